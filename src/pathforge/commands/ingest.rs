//! Turn extracted document text into pending module candidates.
//!
//! The chunker output is parked on the session until an instruction places
//! it; this mirrors the upload-then-instruct flow of the chat layer.

use crate::chunker;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Session;
use tracing::debug;

/// `files` is (filename, already-extracted text). A file from which nothing
/// is extractable produces a warning, not an error; with `fallback` set, a
/// context-only module stands in for it.
pub fn run(session: &mut Session, files: &[(String, String)], fallback: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut added = Vec::new();

    for (filename, text) in files {
        let modules = chunker::chunk(text, filename, &session.context);
        if modules.is_empty() {
            if fallback {
                let module = chunker::fallback_module(&session.context).with_source(filename);
                result.add_message(CmdMessage::warning(format!(
                    "Nothing extractable in {}; added a generic module from the training context instead.",
                    filename
                )));
                added.push(module);
            } else {
                result.add_message(CmdMessage::warning(format!(
                    "Nothing extractable in {}.",
                    filename
                )));
            }
            continue;
        }
        result.add_message(CmdMessage::info(format!(
            "Extracted {} module(s) from {}.",
            modules.len(),
            filename
        )));
        added.extend(modules);
    }

    debug!(pending = added.len(), "ingest produced pending modules");

    if added.is_empty() {
        result.add_message(CmdMessage::warning(
            "No content was extracted. Nothing is pending.",
        ));
        return Ok(result);
    }

    session.pending.extend(added.iter().cloned());
    result.add_message(CmdMessage::success(format!(
        "{} module(s) pending. Tell me where to place them, e.g. \
         'update pathway 1 section 2' or 'add content to the safety section'.",
        session.pending.len()
    )));
    Ok(result.with_affected_modules(added))
}

#[cfg(test)]
mod tests {
    use super::*;

    const USABLE: &str = "The assembly line requires continuous monitoring of temperature levels. \
                          Operators must record the gauge reading at the start of every hour.";

    #[test]
    fn ingest_parks_modules_on_the_session() {
        let mut session = Session::default();
        let files = vec![("procedures.txt".to_string(), USABLE.to_string())];
        let result = run(&mut session, &files, false).unwrap();

        assert!(result.succeeded());
        assert_eq!(session.pending.len(), 1);
        assert_eq!(result.affected_modules.len(), 1);
    }

    #[test]
    fn empty_extraction_is_soft() {
        let mut session = Session::default();
        let files = vec![("noise.txt".to_string(), "Um, uh. Okay.".to_string())];
        let result = run(&mut session, &files, false).unwrap();

        assert!(result.succeeded(), "empty extraction must not be an error");
        assert!(session.pending.is_empty());
    }

    #[test]
    fn fallback_builds_a_context_only_module() {
        let mut session = Session::default();
        let files = vec![("noise.txt".to_string(), "Um, uh. Okay.".to_string())];
        let result = run(&mut session, &files, true).unwrap();

        assert_eq!(session.pending.len(), 1);
        assert!(session.pending[0].source.contains("noise.txt"));
        assert!(result.succeeded());
    }
}
