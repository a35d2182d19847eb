//! Raw document text to module candidates.
//!
//! Uploaded documents arrive as free-form extracted text, often meeting
//! transcripts: timestamp/speaker labels, conversational fillers, first
//! person phrasing. The chunker cleans that into a professional register,
//! then splits it into paragraph-like chunks, each of which becomes one
//! module candidate. Degenerate input yields an empty list — that is a
//! soft condition, not an error; callers may fall back to
//! [`fallback_module`].

use crate::model::{Module, TrainingContext};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Minimum size for a chunk to become a module.
const MIN_CHUNK_CHARS: usize = 100;
/// Minimum size for a sentence to survive cleaning.
const MIN_SENTENCE_CHARS: usize = 20;
/// Conciseness cap: cleaned sentences kept per source document.
const MAX_SENTENCES: usize = 20;
/// Upper bound on modules produced by the sentence-grouping fallback.
const MAX_MODULES_PER_DOC: usize = 4;
/// Key points carried per module.
const MAX_KEY_POINTS: usize = 5;

// Transcript artifacts of the shape "14:32 - Dana:" or "9:05:17 - J. Ortiz:".
static SPEAKER_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}:\d{2}(?::\d{2})?\s*-\s*[^:\n]{1,40}:").unwrap());

static FILLER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:you know|i mean|kind of|sort of|basically|actually|literally|um|uh|like|so)\b")
        .unwrap()
});

static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n\s*\r?\n").unwrap());

static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([,.;:!?])").unwrap());
static COMMA_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,;]{2,}").unwrap());

static NUMBERED_STEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^\s*\d+[.)]\s+\S").unwrap());

// First/second person to third-person role names. Contractions first so the
// bare-word rules never see them.
static PRONOUN_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"(?i)\bi'm\b", "Personnel are"),
        (r"(?i)\bi've\b", "Personnel have"),
        (r"(?i)\bi'll\b", "Personnel will"),
        (r"(?i)\bwe're\b", "Personnel are"),
        (r"(?i)\bwe've\b", "Personnel have"),
        (r"(?i)\bwe'll\b", "Personnel will"),
        (r"(?i)\byou're\b", "operators are"),
        (r"(?i)\byou've\b", "operators have"),
        (r"(?i)\byou'll\b", "operators will"),
        (r"(?i)\bi\b", "Personnel"),
        (r"(?i)\bwe\b", "Personnel"),
        (r"(?i)\byou\b", "operators"),
        (r"(?i)\bmy\b", "the"),
        (r"(?i)\bour\b", "the"),
        (r"(?i)\byour\b", "the"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

/// Low-information sentence openers; a sentence starting with one is noise.
const OPENERS: &[&str] = &["so", "well", "yeah", "okay", "right", "and", "but"];

/// Run the full cleaning pipeline and return the surviving sentences.
///
/// Cleaning is a fixed point: running it over already-cleaned text changes
/// nothing further.
pub fn clean_sentences(raw: &str) -> Vec<String> {
    let text = SPEAKER_LABEL_RE.replace_all(raw, " ");
    let text = FILLER_RE.replace_all(&text, " ");
    let mut text = text.into_owned();
    for (pattern, replacement) in PRONOUN_RULES.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    let text = MULTI_SPACE_RE.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCT_RE.replace_all(&text, "$1");
    let text = COMMA_RUN_RE.replace_all(&text, ",");

    split_sentences(text.trim())
        .into_iter()
        .filter(|s| s.len() >= MIN_SENTENCE_CHARS)
        .filter(|s| !starts_with_opener(s))
        .collect()
}

/// Cleaned sentences joined back into prose.
pub fn clean_text(raw: &str) -> String {
    clean_sentences(raw).join(" ")
}

fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '!' | '?') {
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
    }
    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw
        .trim()
        .trim_start_matches(|c| matches!(c, ',' | ';' | ':' | ' '));
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

fn starts_with_opener(sentence: &str) -> bool {
    let first = sentence
        .split(|c: char| !c.is_alphanumeric())
        .find(|w| !w.is_empty())
        .unwrap_or("")
        .to_lowercase();
    OPENERS.contains(&first.as_str())
}

/// Split one source document into module candidates.
///
/// Primary strategy: blank-line paragraphs of the original text, each run
/// through the cleaning pipeline. If no paragraph survives the size floor,
/// the cleaned sentences are regrouped into at most
/// [`MAX_MODULES_PER_DOC`] evenly sized chunks instead.
pub fn chunk(raw_text: &str, filename: &str, ctx: &TrainingContext) -> Vec<Module> {
    let mut budget = MAX_SENTENCES;
    let mut chunks: Vec<String> = Vec::new();
    for paragraph in BLANK_LINE_RE.split(raw_text) {
        if budget == 0 {
            break;
        }
        let mut sentences = clean_sentences(paragraph);
        sentences.truncate(budget);
        budget -= sentences.len();
        let cleaned = sentences.join(" ");
        if cleaned.len() > MIN_CHUNK_CHARS {
            chunks.push(cleaned);
        }
    }

    if chunks.is_empty() {
        let mut sentences = clean_sentences(raw_text);
        sentences.truncate(MAX_SENTENCES);
        if sentences.is_empty() {
            debug!(filename, "no sentences survived cleaning");
            return Vec::new();
        }
        let group_size = (sentences.len() + MAX_MODULES_PER_DOC - 1) / MAX_MODULES_PER_DOC;
        chunks = sentences
            .chunks(group_size.max(1))
            .map(|group| group.join(" "))
            .filter(|chunk| chunk.len() > MIN_CHUNK_CHARS)
            .collect();
    }

    debug!(filename, chunks = chunks.len(), "chunked source document");

    chunks
        .iter()
        .enumerate()
        .map(|(i, chunk)| build_module(i + 1, chunk, filename, ctx))
        .collect()
}

fn build_module(ordinal: usize, chunk: &str, filename: &str, ctx: &TrainingContext) -> Module {
    let title = format!("Module {}: {}", ordinal, title_from_filename(filename));
    let description = format!(
        "Training material derived from {} for {}.",
        filename, ctx.target_audience
    );
    let key_points: Vec<String> = split_sentences(chunk)
        .into_iter()
        .take(MAX_KEY_POINTS)
        .collect();

    let content = format!(
        "{title}\n\n\
         Training Type: {training_type}\n\
         Target Audience: {audience}\n\
         Industry: {industry}\n\n\
         {chunk}\n\n\
         Implementation Guidelines:\n\
         - Integrate these practices into daily operations.\n\
         - Supervisors verify adherence during routine reviews.\n\
         - Deviations are escalated through the established reporting chain.\n\n\
         Assessment Criteria:\n\
         - Demonstrated understanding of the material above.\n\
         - Correct application of the described procedures on the job.\n\
         - Completion of the associated review checklist.",
        title = title,
        training_type = ctx.training_type,
        audience = ctx.target_audience,
        industry = ctx.industry,
        chunk = chunk,
    );

    let mut module = Module::new(title, description, content)
        .with_source(filename)
        .with_key_points(key_points);
    module.content_types = if NUMBERED_STEP_RE.is_match(chunk) {
        vec!["procedural".to_string()]
    } else {
        vec!["narrative".to_string()]
    };
    module
}

/// "safety_training-v2.txt" -> "Safety Training V2"
fn title_from_filename(filename: &str) -> String {
    let stem = filename
        .rsplit('/')
        .next()
        .unwrap_or(filename)
        .split('.')
        .next()
        .unwrap_or(filename);
    stem.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A single generic module built purely from context metadata, for callers
/// handling the nothing-extractable case.
pub fn fallback_module(ctx: &TrainingContext) -> Module {
    let title = format!("{} Overview", ctx.training_type);
    let description = format!(
        "General {} overview for {} in {}.",
        ctx.training_type.to_lowercase(),
        ctx.target_audience,
        ctx.industry
    );
    let content = format!(
        "{title}\n\n\
         Training Type: {training_type}\n\
         Target Audience: {audience}\n\
         Industry: {industry}\n\n\
         This module introduces the core expectations for {audience} working in \
         {industry}. It covers the standard practices, responsibilities, and \
         review points that apply across the program.\n\n\
         Implementation Guidelines:\n\
         - Integrate these practices into daily operations.\n\
         - Supervisors verify adherence during routine reviews.\n\n\
         Assessment Criteria:\n\
         - Demonstrated understanding of the material above.",
        title = title,
        training_type = ctx.training_type,
        audience = ctx.target_audience,
        industry = ctx.industry,
    );
    Module::new(title, description, content).with_key_points(vec![
        "Know the standard practices that apply across the program.".to_string(),
        "Understand individual responsibilities and review points.".to_string(),
    ])
}
