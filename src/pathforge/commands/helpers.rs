use crate::index::{IndexEntry, ModuleIndex};
use crate::model::{Module, Pathway};

/// Resolve a module identifier against an index, fuzziest rule last:
/// exact global number ("module_3"), exact title, case-insensitive title
/// substring, then section-keyword containment. The caller decides what
/// zero or multiple candidates mean.
pub fn find_module_candidates(index: &ModuleIndex, identifier: &str) -> Vec<IndexEntry> {
    if let Some(global) = identifier
        .strip_prefix("module_")
        .and_then(|n| n.parse::<usize>().ok())
    {
        return index.by_global_number(global).cloned().into_iter().collect();
    }

    if let Some(entry) = index.by_title(identifier) {
        return vec![entry.clone()];
    }

    let needle = identifier.to_lowercase();
    let by_substring: Vec<IndexEntry> = index
        .entries()
        .iter()
        .filter(|e| e.module_title.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    if !by_substring.is_empty() {
        return by_substring;
    }

    index
        .entries()
        .iter()
        .filter(|e| e.section_title.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Mutable access to the module an index entry points at. The entry must
/// come from an index built against the same snapshot.
pub fn module_mut<'a>(pathway: &'a mut Pathway, entry: &IndexEntry) -> Option<&'a mut Module> {
    pathway
        .sections
        .get_mut(entry.section_ordinal - 1)
        .and_then(|s| s.modules.get_mut(entry.local_number - 1))
        .filter(|m| m.id == entry.module_id)
}

/// "module_3" -> "module 3"; keywords pass through unchanged.
pub fn display_identifier(identifier: &str) -> String {
    identifier.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    fn pathway() -> Pathway {
        let mut pathway = Pathway::new("Training");
        let mut safety = Section::new("Safety Procedures");
        safety.modules.push(Module::new(
            "PPE Requirements".into(),
            "d".into(),
            "c".into(),
        ));
        safety.modules.push(Module::new(
            "Equipment Safety".into(),
            "d".into(),
            "c".into(),
        ));
        let mut quality = Section::new("Quality Control");
        quality
            .modules
            .push(Module::new("Inspection Basics".into(), "d".into(), "c".into()));
        pathway.sections.push(safety);
        pathway.sections.push(quality);
        pathway
    }

    #[test]
    fn numeric_identifier_resolves_globally() {
        let pathway = pathway();
        let index = ModuleIndex::build(&pathway);
        let found = find_module_candidates(&index, "module_3");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].module_title, "Inspection Basics");
        assert!(find_module_candidates(&index, "module_9").is_empty());
    }

    #[test]
    fn title_match_beats_substring_scan() {
        let pathway = pathway();
        let index = ModuleIndex::build(&pathway);
        let found = find_module_candidates(&index, "equipment safety");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].global_number, 2);
    }

    #[test]
    fn substring_scan_can_be_ambiguous() {
        let pathway = pathway();
        let index = ModuleIndex::build(&pathway);
        // "e" prefix words: both safety modules contain "equipment"? No —
        // "requirements" and "equipment" both contain "men".
        let found = find_module_candidates(&index, "men");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn section_keyword_collects_that_sections_modules() {
        let pathway = pathway();
        let index = ModuleIndex::build(&pathway);
        let found = find_module_candidates(&index, "quality");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].section_title, "Quality Control");
    }

    #[test]
    fn module_mut_reaches_the_indexed_module() {
        let mut pathway = pathway();
        let index = ModuleIndex::build(&pathway);
        let entry = index.by_global_number(2).unwrap().clone();
        let module = module_mut(&mut pathway, &entry).unwrap();
        assert_eq!(module.title, "Equipment Safety");
        module.content = "changed".into();
        assert_eq!(pathway.sections[0].modules[1].content, "changed");
    }
}
