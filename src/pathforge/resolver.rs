//! Free-text reference resolution.
//!
//! Instructions typed into the chat box ("update pathway 2 section 1 with
//! the new file") are matched against a fixed set of prioritized patterns
//! and turned into a [`Target`]. The most specific addressable unit always
//! wins: a phrase naming both a pathway and a section resolves as
//! `PathwaySection`, never as a bare module or section reference.

use once_cell::sync::Lazy;
use regex::Regex;

/// Structured result of resolving an instruction to an addressable entity.
///
/// Each variant carries exactly the fields its kind needs, so the merge
/// engine can dispatch exhaustively instead of re-parsing strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// "pathway N section M" — N = 1 is the current pathway, N >= 2 the
    /// (N-1)-th most recent past pathway; M is a 1-based section ordinal.
    PathwaySection {
        pathway_num: usize,
        section_num: usize,
    },
    /// "module N" or a fuzzy module identifier.
    Module { identifier: String },
    /// "section N" or a section keyword.
    Section { identifier: String },
    /// The whole current pathway, no section qualifier.
    Pathway,
}

static PATHWAY_SECTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)\bpathway\s+(\d+)\b.*?\bsection\s+(\d+)\b").unwrap());
static MODULE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bmodule\s+(\d+)\b").unwrap());
static SECTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bsection\s+(\d+)\b").unwrap());
static PATHWAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bpathway\b").unwrap());

/// Section keyword vocabulary, in fixed priority order. When an instruction
/// contains several keywords ("quality safety review"), the first listed
/// keyword present wins.
pub const SECTION_KEYWORDS: &[&str] = &[
    "safety",
    "quality",
    "process",
    "procedure",
    "equipment",
    "maintenance",
    "training",
    "onboarding",
    "communication",
    "documentation",
];

/// Resolve an instruction to a target. Ordered pattern attempts, first
/// match wins; `None` means the caller should show the reference guide.
pub fn resolve(instruction: &str) -> Option<Target> {
    let lower = instruction.to_lowercase();

    // 1. Most specific: pathway N section M, tolerant of intervening words.
    if let Some(caps) = PATHWAY_SECTION_RE.captures(&lower) {
        let pathway_num = caps[1].parse().ok()?;
        let section_num = caps[2].parse().ok()?;
        return Some(Target::PathwaySection {
            pathway_num,
            section_num,
        });
    }

    // 2. Numbered module.
    if let Some(caps) = MODULE_RE.captures(&lower) {
        return Some(Target::Module {
            identifier: format!("module_{}", &caps[1]),
        });
    }

    // 3. Numbered section, then keyword section.
    if let Some(caps) = SECTION_RE.captures(&lower) {
        return Some(Target::Section {
            identifier: format!("section_{}", &caps[1]),
        });
    }
    if let Some(keyword) = first_section_keyword(&lower) {
        return Some(Target::Section {
            identifier: keyword.to_string(),
        });
    }

    // 4. Whole pathway, no paired section number.
    if PATHWAY_RE.is_match(&lower) {
        return Some(Target::Pathway);
    }

    None
}

fn first_section_keyword(lower: &str) -> Option<&'static str> {
    SECTION_KEYWORDS
        .iter()
        .find(|kw| contains_word(lower, kw))
        .copied()
}

fn contains_word(haystack: &str, word: &str) -> bool {
    haystack.split(|c: char| !c.is_alphanumeric()).any(|w| w == word)
}

/// Coarse intent of a chat instruction, decided by keyword heuristics.
/// First matching category wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Help,
    Search,
    Update,
    Ingest,
    Tone,
    PastPathways,
    General,
}

impl RequestKind {
    pub fn classify(instruction: &str) -> Self {
        let lower = instruction.to_lowercase();

        if contains_any(&lower, &["help", "what can you do", "how do i", "how to"]) {
            return RequestKind::Help;
        }
        if contains_any(&lower, &["search", "find", "look for", "what is", "what does"]) {
            return RequestKind::Search;
        }
        if contains_any(
            &lower,
            &["update", "regenerate", "change", "modify", "replace", "add"],
        ) {
            return RequestKind::Update;
        }
        if contains_any(&lower, &["ingest", "upload", "process file", "process the file"]) {
            return RequestKind::Ingest;
        }
        if contains_any(&lower, &["tone", "style", "professional", "casual"]) {
            return RequestKind::Tone;
        }
        if contains_any(&lower, &["past", "previous", "history"]) {
            return RequestKind::PastPathways;
        }

        RequestKind::General
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Requested register for regenerated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Professional,
    Casual,
    Technical,
    Simple,
    Authoritative,
}

pub fn extract_tone(instruction: &str) -> Option<Tone> {
    let lower = instruction.to_lowercase();
    let tones: &[(Tone, &[&str])] = &[
        (Tone::Professional, &["professional", "formal", "business"]),
        (Tone::Casual, &["casual", "informal", "friendly"]),
        (Tone::Technical, &["technical", "detailed", "comprehensive"]),
        (Tone::Simple, &["simple", "basic", "easy"]),
        (Tone::Authoritative, &["authoritative", "commanding", "strict"]),
    ];
    tones
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(tone, _)| *tone)
}

/// Requested subject emphasis for regenerated content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Safety,
    Quality,
    Procedure,
    Equipment,
    Maintenance,
}

pub fn extract_focus(instruction: &str) -> Option<Focus> {
    let lower = instruction.to_lowercase();
    let areas: &[(Focus, &[&str])] = &[
        (Focus::Safety, &["safety", "ppe", "protective", "hazard"]),
        (Focus::Quality, &["quality", "inspection", "standard"]),
        (Focus::Procedure, &["procedure", "workflow"]),
        (Focus::Equipment, &["equipment", "tool", "machine"]),
        (Focus::Maintenance, &["maintenance", "repair", "service"]),
    ];
    areas
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(focus, _)| *focus)
}

static QUERY_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:please\s+)?(?:search(?:\s+for)?|find|look\s+for|what\s+is|what\s+does)\s+")
        .unwrap()
});
static QUERY_NOISE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(?:modules?\s+(?:about|on|for)\s+|the\s+)").unwrap());

/// Strip the search trigger phrasing off an instruction, leaving the query.
pub fn search_query(instruction: &str) -> String {
    let stripped = QUERY_PREFIX_RE.replace(instruction.trim(), "");
    let stripped = QUERY_NOISE_RE.replace(&stripped, "");
    stripped.trim_end_matches(['?', '.', '!']).trim().to_string()
}
