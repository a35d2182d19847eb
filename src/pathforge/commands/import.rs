use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Pathway, Session};
use tracing::debug;

/// Install a freshly generated pathway as the current one. The previous
/// current pathway, if it has any sections, becomes Past Pathway 1 and
/// everything older shifts down.
pub fn run(session: &mut Session, pathway: Pathway) -> Result<CmdResult> {
    let sections = pathway.sections.len();
    let modules = pathway.module_count();
    let name = pathway.name.clone();

    let previous = std::mem::replace(&mut session.pathways.current, pathway);
    let mut result = CmdResult::default();
    if previous.is_empty() {
        debug!(name = %name, "installed pathway; no previous to archive");
    } else {
        session.pathways.past.insert(0, previous);
        result.add_message(CmdMessage::info(
            "Previous pathway is now Past Pathway 1 (pathway 2).",
        ));
    }

    result.add_message(CmdMessage::success(format!(
        "Installed pathway '{}' with {} section(s) and {} module(s).",
        name, sections, modules
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    fn pathway_with_section(name: &str) -> Pathway {
        let mut pathway = Pathway::new(name);
        pathway.sections.push(Section::new("Core"));
        pathway
    }

    #[test]
    fn first_import_does_not_archive_the_empty_default() {
        let mut session = Session::default();
        run(&mut session, pathway_with_section("Run A")).unwrap();
        assert_eq!(session.pathways.current.name, "Run A");
        assert!(session.pathways.past.is_empty());
    }

    #[test]
    fn reimport_rotates_current_into_past() {
        let mut session = Session::default();
        run(&mut session, pathway_with_section("Run A")).unwrap();
        run(&mut session, pathway_with_section("Run B")).unwrap();
        run(&mut session, pathway_with_section("Run C")).unwrap();

        assert_eq!(session.pathways.current.name, "Run C");
        // Most recent past pathway first: pathway 2 addresses Run B.
        assert_eq!(session.pathways.past[0].name, "Run B");
        assert_eq!(session.pathways.past[1].name, "Run A");
        assert_eq!(session.pathways.count(), 3);
    }
}
