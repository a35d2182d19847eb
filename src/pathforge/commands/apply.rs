//! The merge engine: place new module content at a resolved target.
//!
//! Every branch ends in a human-readable message naming exactly what
//! changed, or an actionable failure listing the valid alternatives.
//! Out-of-range and ambiguous references are Error messages, not `Err`.

use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::{PathforgeError, Result};
use crate::index::ModuleIndex;
use crate::model::{Module, Section, Session};
use crate::resolver::Target;
use chrono::Utc;
use tracing::debug;

pub fn run(session: &mut Session, target: &Target, new_modules: Vec<Module>) -> Result<CmdResult> {
    if new_modules.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::error(
            "Nothing to add: no new modules were provided. Ingest files first.",
        )));
    }

    match target {
        Target::PathwaySection {
            pathway_num,
            section_num,
        } => apply_pathway_section(session, *pathway_num, *section_num, new_modules),
        Target::Module { identifier } => apply_module(session, identifier, new_modules),
        Target::Section { identifier } => apply_section(session, identifier, new_modules),
        Target::Pathway => apply_whole_pathway(session, new_modules),
    }
}

fn apply_pathway_section(
    session: &mut Session,
    pathway_num: usize,
    section_num: usize,
    new_modules: Vec<Module>,
) -> Result<CmdResult> {
    if pathway_num == 0 || pathway_num > session.pathways.count() {
        let available = (1..=session.pathways.count())
            .map(|n| format!("{} (pathway {})", session.pathways.label(n), n))
            .collect::<Vec<_>>()
            .join(", ");
        return Ok(CmdResult::default().with_message(CmdMessage::error(format!(
            "Pathway {} not found. Available pathways: {}",
            pathway_num, available
        ))));
    }

    let label = session.pathways.label(pathway_num);
    let pathway = session
        .pathways
        .get_mut(pathway_num)
        .ok_or_else(|| PathforgeError::Api("pathway ordinal checked but absent".to_string()))?;

    if pathway.sections.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::error(format!(
            "{} has no sections to add content to.",
            label
        ))));
    }
    if section_num == 0 || section_num > pathway.sections.len() {
        let available = (1..=pathway.sections.len())
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Ok(CmdResult::default().with_message(CmdMessage::error(format!(
            "Section {} not found in {}. Available sections: {}",
            section_num, label, available
        ))));
    }

    let section = &mut pathway.sections[section_num - 1];
    let section_title = section.title.clone();
    let added = new_modules.len();
    section.modules.extend(new_modules.iter().cloned());

    let total = ModuleIndex::build(pathway).len();
    debug!(pathway_num, section_num, added, total, "appended modules to section");

    Ok(CmdResult::default()
        .with_affected_modules(new_modules)
        .with_message(CmdMessage::success(format!(
            "Added {} module(s) to {}, Section {} ({}).",
            added, label, section_num, section_title
        ))))
}

fn apply_module(
    session: &mut Session,
    identifier: &str,
    new_modules: Vec<Module>,
) -> Result<CmdResult> {
    let index = ModuleIndex::build(&session.pathways.current);
    let candidates = helpers::find_module_candidates(&index, identifier);
    let shown = helpers::display_identifier(identifier);

    match candidates.as_slice() {
        [] => Ok(CmdResult::default().with_message(CmdMessage::error(format!(
            "No module matches '{}'. Ask for the module list to see what can be addressed.",
            shown
        )))),
        [entry] => {
            let mut replacement = new_modules;
            let payload = replacement.remove(0);
            let entry = entry.clone();

            let module = helpers::module_mut(&mut session.pathways.current, &entry)
                .ok_or_else(|| {
                    PathforgeError::Api("module index out of sync with pathway".to_string())
                })?;
            module.content = payload.content;
            module.description = payload.description;
            module.key_points = payload.key_points;
            // Union of provenance: the replace never drops prior sources.
            module.source.extend(payload.source);
            module.updated_at = Utc::now();
            let updated = module.clone();

            debug!(global = entry.global_number, "replaced module content");

            let mut result = CmdResult::default()
                .with_affected_modules(vec![updated])
                .with_message(CmdMessage::success(format!(
                    "Updated module {} ({}) in section '{}'.",
                    entry.global_number, entry.module_title, entry.section_title
                )));
            if !replacement.is_empty() {
                result.add_message(CmdMessage::warning(format!(
                    "{} additional extracted module(s) were not applied; target a section to append them.",
                    replacement.len()
                )));
            }
            Ok(result)
        }
        many => {
            let listing = many
                .iter()
                .map(|e| format!("module {} ({})", e.global_number, e.module_title))
                .collect::<Vec<_>>()
                .join(", ");
            Ok(CmdResult::default().with_message(CmdMessage::error(format!(
                "'{}' is ambiguous. Candidates: {}. Please refer to one by number.",
                shown, listing
            ))))
        }
    }
}

fn apply_section(
    session: &mut Session,
    identifier: &str,
    new_modules: Vec<Module>,
) -> Result<CmdResult> {
    let pathway = &mut session.pathways.current;

    let position = if let Some(ordinal) = identifier
        .strip_prefix("section_")
        .and_then(|n| n.parse::<usize>().ok())
    {
        if ordinal >= 1 && ordinal <= pathway.sections.len() {
            Some(ordinal - 1)
        } else {
            None
        }
    } else {
        let needle = identifier.to_lowercase();
        pathway
            .sections
            .iter()
            .position(|s| s.title.to_lowercase().contains(&needle))
    };

    let Some(position) = position else {
        // Sections are only created by the generation step; an unknown
        // reference never creates one.
        let available = if pathway.sections.is_empty() {
            "none".to_string()
        } else {
            pathway
                .sections
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{} ({})", i + 1, s.title))
                .collect::<Vec<_>>()
                .join(", ")
        };
        return Ok(CmdResult::default().with_message(CmdMessage::error(format!(
            "No section matches '{}'. Available sections: {}",
            helpers::display_identifier(identifier),
            available
        ))));
    };

    let section = &mut pathway.sections[position];
    let added = new_modules.len();
    section.modules.extend(new_modules.iter().cloned());
    let section_title = section.title.clone();

    debug!(section = %section_title, added, "appended modules to section");

    Ok(CmdResult::default()
        .with_affected_modules(new_modules)
        .with_message(CmdMessage::success(format!(
            "Added {} module(s) to Section {} ({}).",
            added,
            position + 1,
            section_title
        ))))
}

fn apply_whole_pathway(session: &mut Session, new_modules: Vec<Module>) -> Result<CmdResult> {
    let pathway = &mut session.pathways.current;
    if pathway.sections.is_empty() {
        pathway.sections.push(Section::new("Additional Training"));
    }
    let last = pathway.sections.len() - 1;
    let section = &mut pathway.sections[last];
    let added = new_modules.len();
    section.modules.extend(new_modules.iter().cloned());
    let section_title = section.title.clone();

    debug!(added, section = %section_title, "appended modules to pathway tail");

    Ok(CmdResult::default()
        .with_affected_modules(new_modules)
        .with_message(CmdMessage::success(format!(
            "Added {} module(s) to the end of the current pathway (section '{}').",
            added, section_title
        ))))
}
