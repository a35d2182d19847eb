//! Relevance ranking of modules against a query string.
//!
//! Pure function of the query and a pathway snapshot: no state, restartable,
//! deterministic. Scores are weighted substring counts; modules that share
//! no vocabulary with the query score zero and are excluded.

use crate::index::{IndexEntry, ModuleIndex};
use crate::model::Pathway;

const WEIGHT_FULL_QUERY_IN_TITLE: u32 = 10;
const WEIGHT_TOKEN_IN_TITLE: u32 = 5;
const WEIGHT_TOKEN_IN_DESCRIPTION: u32 = 3;
const WEIGHT_TOKEN_IN_CONTENT: u32 = 1;

/// One ranked result.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub entry: IndexEntry,
    pub score: u32,
}

/// Score every module in the pathway against the query and return the
/// non-zero hits, best first. Ties break toward the lower global number.
pub fn search(query: &str, pathway: &Pathway) -> Vec<SearchHit> {
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return Vec::new();
    }
    let tokens: Vec<&str> = query_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    let index = ModuleIndex::build(pathway);
    let mut hits: Vec<SearchHit> = Vec::new();

    for entry in index.entries() {
        let module = &pathway.sections[entry.section_ordinal - 1].modules[entry.local_number - 1];
        let title = module.title.to_lowercase();
        let description = module.description.to_lowercase();
        let content = module.content.to_lowercase();

        let mut score = 0u32;
        if title.contains(&query_lower) {
            score += WEIGHT_FULL_QUERY_IN_TITLE;
        }
        for token in &tokens {
            if title.contains(token) {
                score += WEIGHT_TOKEN_IN_TITLE;
            }
            if description.contains(token) {
                score += WEIGHT_TOKEN_IN_DESCRIPTION;
            }
            if content.contains(token) {
                score += WEIGHT_TOKEN_IN_CONTENT;
            }
        }

        if score > 0 {
            hits.push(SearchHit {
                entry: entry.clone(),
                score,
            });
        }
    }

    hits.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(a.entry.global_number.cmp(&b.entry.global_number))
    });
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Module, Section};

    fn pathway() -> Pathway {
        let mut pathway = Pathway::new("Safety Program");
        let mut section = Section::new("Safety Procedures");
        section.modules.push(Module::new(
            "PPE Requirements".into(),
            "Personal protective equipment basics".into(),
            "Hard hats, gloves, and safety glasses are mandatory on the floor.".into(),
        ));
        section.modules.push(Module::new(
            "Equipment Safety".into(),
            "Machine guarding and inspection".into(),
            "All PPE must be inspected before use, including gloves.".into(),
        ));
        section.modules.push(Module::new(
            "Documentation".into(),
            "Recording completed checks".into(),
            "Inspection results are filed with the shift supervisor.".into(),
        ));
        pathway.sections.push(section);
        pathway
    }

    #[test]
    fn title_matches_outrank_content_matches() {
        let hits = search("ppe", &pathway());
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].entry.module_title, "PPE Requirements");
        assert_eq!(hits[1].entry.module_title, "Equipment Safety");
        assert!(hits[0].score > hits[1].score);
    }

    #[test]
    fn disjoint_vocabulary_scores_zero_and_is_excluded() {
        let hits = search("forklift battery charging", &pathway());
        assert!(hits.is_empty());
    }

    #[test]
    fn additional_matching_token_never_lowers_a_score() {
        let base = search("inspection", &pathway());
        let extended = search("inspection gloves", &pathway());
        for hit in &base {
            let after = extended
                .iter()
                .find(|h| h.entry.module_id == hit.entry.module_id)
                .expect("matched module still matches with an extra token");
            assert!(after.score >= hit.score);
        }
    }

    #[test]
    fn ties_break_by_global_number() {
        // "gloves" appears in the content of modules 1 and 2 only.
        let hits = search("gloves", &pathway());
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].score, hits[1].score);
        assert!(hits[0].entry.global_number < hits[1].entry.global_number);
    }

    #[test]
    fn empty_query_returns_nothing() {
        assert!(search("   ", &pathway()).is_empty());
    }
}
