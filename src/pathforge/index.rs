//! Derived numbering over a pathway snapshot.
//!
//! Users address modules as "module 4" (global number, counted across all
//! sections in stored order) or "section 2 module 1" (local number, 1-based
//! per section). Neither number is ever stored on the hierarchy: the index
//! is a pure projection, rebuilt after every structural mutation, so the
//! numbers cannot go stale.

use crate::model::Pathway;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

/// One module's position in the flattened pathway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub section_title: String,
    /// 1-based position of the owning section within the pathway.
    pub section_ordinal: usize,
    /// 1-based position within the owning section.
    pub local_number: usize,
    /// 1-based position counted across the whole pathway.
    pub global_number: usize,
    pub module_id: Uuid,
    pub module_title: String,
}

/// Lookup maps over one pathway snapshot.
///
/// Rebuilding twice from the same hierarchy yields identical results;
/// callers must not reuse an index across a mutation.
#[derive(Debug, Default)]
pub struct ModuleIndex {
    entries: Vec<IndexEntry>,
    by_section: BTreeMap<String, BTreeMap<usize, usize>>,
    by_title: HashMap<String, usize>,
}

impl ModuleIndex {
    /// Walk sections in order, modules in order, assigning global and local
    /// numbers. O(total modules).
    pub fn build(pathway: &Pathway) -> Self {
        let mut entries = Vec::with_capacity(pathway.module_count());
        let mut by_section: BTreeMap<String, BTreeMap<usize, usize>> = BTreeMap::new();
        let mut by_title: HashMap<String, usize> = HashMap::new();

        let mut global = 0usize;
        for (section_idx, section) in pathway.sections.iter().enumerate() {
            for (module_idx, module) in section.modules.iter().enumerate() {
                global += 1;
                let slot = entries.len();
                entries.push(IndexEntry {
                    section_title: section.title.clone(),
                    section_ordinal: section_idx + 1,
                    local_number: module_idx + 1,
                    global_number: global,
                    module_id: module.id,
                    module_title: module.title.clone(),
                });
                by_section
                    .entry(section.title.clone())
                    .or_default()
                    .insert(module_idx + 1, slot);
                // Duplicate titles: last write wins.
                by_title.insert(module.title.to_lowercase(), slot);
            }
        }

        Self {
            entries,
            by_section,
            by_title,
        }
    }

    pub fn by_global_number(&self, global: usize) -> Option<&IndexEntry> {
        // Globals are assigned densely from 1, so the vec is its own map.
        global.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    pub fn by_section_and_number(&self, section_title: &str, local: usize) -> Option<&IndexEntry> {
        self.by_section
            .get(section_title)
            .and_then(|locals| locals.get(&local))
            .map(|&slot| &self.entries[slot])
    }

    pub fn by_title(&self, title: &str) -> Option<&IndexEntry> {
        self.by_title
            .get(&title.to_lowercase())
            .map(|&slot| &self.entries[slot])
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Format the addressable structure of a pathway for display: every section
/// with its modules, local and global numbers included. This is what the
/// caller shows when a free-text reference cannot be resolved.
pub fn reference_help(pathway: &Pathway) -> String {
    let index = ModuleIndex::build(pathway);
    if index.is_empty() {
        return "No modules available yet.".to_string();
    }

    let mut help = String::new();
    let mut current_section = usize::MAX;
    for entry in index.entries() {
        if entry.section_ordinal != current_section {
            if current_section != usize::MAX {
                help.push('\n');
            }
            current_section = entry.section_ordinal;
            help.push_str(&format!(
                "Section {}: {}\n",
                entry.section_ordinal, entry.section_title
            ));
        }
        help.push_str(&format!(
            "  Module {} (module {} overall): {}\n",
            entry.local_number, entry.global_number, entry.module_title
        ));
    }
    help
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Module, Section};

    fn sample_pathway() -> Pathway {
        let mut pathway = Pathway::new("Fabrication Training");
        let mut safety = Section::new("Safety Procedures");
        safety.modules.push(module("PPE Requirements"));
        safety.modules.push(module("Equipment Safety"));
        safety.modules.push(module("Emergency Procedures"));
        let mut quality = Section::new("Quality Control");
        quality.modules.push(module("Inspection Procedures"));
        quality.modules.push(module("Documentation"));
        let mut process = Section::new("Process Training");
        process.modules.push(module("Standard Operating Procedures"));
        process.modules.push(module("Workflow Management"));
        pathway.sections.push(safety);
        pathway.sections.push(quality);
        pathway.sections.push(process);
        pathway
    }

    fn module(title: &str) -> Module {
        Module::new(title.into(), format!("{} description", title), "content".into())
    }

    #[test]
    fn global_numbers_flatten_sections_in_order() {
        let index = ModuleIndex::build(&sample_pathway());
        assert_eq!(index.len(), 7);

        let first = index.by_global_number(1).unwrap();
        assert_eq!(first.module_title, "PPE Requirements");
        assert_eq!(first.local_number, 1);

        // First quality module comes after the three safety modules.
        let quality = index.by_global_number(4).unwrap();
        assert_eq!(quality.module_title, "Inspection Procedures");
        assert_eq!(quality.section_title, "Quality Control");
        assert_eq!(quality.local_number, 1);

        let process_2 = index.by_section_and_number("Process Training", 2).unwrap();
        assert_eq!(process_2.global_number, 7);
    }

    #[test]
    fn local_numbers_reset_per_section() {
        let index = ModuleIndex::build(&sample_pathway());
        for entry in index.entries() {
            let via_section = index
                .by_section_and_number(&entry.section_title, entry.local_number)
                .unwrap();
            assert_eq!(via_section.module_id, entry.module_id);
        }
        assert!(index.by_section_and_number("Quality Control", 3).is_none());
    }

    #[test]
    fn numbering_invariant_holds() {
        // global == modules in preceding sections + local position
        let pathway = sample_pathway();
        let index = ModuleIndex::build(&pathway);
        for entry in index.entries() {
            let preceding: usize = pathway.sections[..entry.section_ordinal - 1]
                .iter()
                .map(|s| s.modules.len())
                .sum();
            assert_eq!(entry.global_number, preceding + entry.local_number);
        }
    }

    #[test]
    fn rebuild_is_deterministic() {
        let pathway = sample_pathway();
        let a = ModuleIndex::build(&pathway);
        let b = ModuleIndex::build(&pathway);
        assert_eq!(a.entries(), b.entries());
    }

    #[test]
    fn title_lookup_is_case_insensitive_last_write_wins() {
        let mut pathway = sample_pathway();
        let index = ModuleIndex::build(&pathway);
        let hit = index.by_title("ppe requirements").unwrap();
        assert_eq!(hit.section_title, "Safety Procedures");
        assert_eq!(hit.local_number, 1);

        // Duplicate a title in a later section; the later entry wins.
        pathway.sections[2]
            .modules
            .push(module("PPE Requirements"));
        let index = ModuleIndex::build(&pathway);
        let hit = index.by_title("PPE Requirements").unwrap();
        assert_eq!(hit.section_title, "Process Training");
    }

    #[test]
    fn reference_help_lists_every_module() {
        let help = reference_help(&sample_pathway());
        assert!(help.contains("Section 1: Safety Procedures"));
        assert!(help.contains("Module 2 (module 5 overall): Documentation"));
        assert!(help.contains("Workflow Management"));
    }

    #[test]
    fn reference_help_on_empty_pathway() {
        let pathway = Pathway::new("Empty");
        assert_eq!(reference_help(&pathway), "No modules available yet.");
    }
}
