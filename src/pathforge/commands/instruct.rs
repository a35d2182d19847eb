//! Chat-style entry point: classify one instruction and route it.
//!
//! Update instructions place the session's pending modules at the resolved
//! target; search instructions rank modules; everything else produces
//! guidance. An instruction that cannot be resolved gets the reference
//! guide instead of a silent failure.

use crate::commands::{apply, list, search, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Session;
use crate::resolver::{self, RequestKind};
use tracing::debug;

pub fn run(session: &mut Session, instruction: &str) -> Result<CmdResult> {
    let kind = RequestKind::classify(instruction);
    debug!(?kind, "classified instruction");

    match kind {
        RequestKind::Help => Ok(help(session)),
        RequestKind::Search => {
            let query = resolver::search_query(instruction);
            search::run(session, &query)
        }
        RequestKind::Update => handle_update(session, instruction),
        RequestKind::Ingest => Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "Ingest files first, then tell me where the content goes. \
             {} module(s) are currently pending.",
            session.pending.len()
        )))),
        RequestKind::Tone => {
            let tone = resolver::extract_tone(instruction);
            let content = match tone {
                Some(tone) => format!(
                    "Tone changes ({:?}) are applied when content is regenerated. \
                     Specify which module to regenerate, e.g. 'update module 2'.",
                    tone
                ),
                None => "Which tone would you like: professional, casual, technical, \
                         simple, or authoritative?"
                    .to_string(),
            };
            Ok(CmdResult::default().with_message(CmdMessage::info(content)))
        }
        RequestKind::PastPathways => {
            let content = if session.pathways.past.is_empty() {
                "There are no past pathways yet. Importing a new pathway archives the current one."
                    .to_string()
            } else {
                let listing = session
                    .pathways
                    .past
                    .iter()
                    .enumerate()
                    .map(|(i, p)| {
                        format!(
                            "Past Pathway {} (pathway {}): {} — {} module(s)",
                            i + 1,
                            i + 2,
                            p.name,
                            p.module_count()
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "{}\nAddress them like 'update pathway 2 section 1'.",
                    listing
                )
            };
            Ok(CmdResult::default().with_message(CmdMessage::info(content)))
        }
        RequestKind::General => Ok(CmdResult::default().with_message(CmdMessage::info(
            "I can place ingested content ('update pathway 1 section 2', \
             'add content to the safety section'), search modules \
             ('find modules about quality'), or show the reference guide ('help').",
        ))),
    }
}

fn handle_update(session: &mut Session, instruction: &str) -> Result<CmdResult> {
    let Some(target) = resolver::resolve(instruction) else {
        let mut result = CmdResult::default().with_message(CmdMessage::error(
            "I couldn't identify what to update. Refer to a module, section, or pathway:",
        ));
        result.messages.extend(help(session).messages);
        return Ok(result);
    };

    if session.pending.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::warning(
            "No extracted content is pending. Ingest files first, then repeat the instruction.",
        )));
    }

    let pending = session.pending.clone();
    let result = apply::run(session, &target, pending)?;
    if result.succeeded() {
        session.pending.clear();
    }
    Ok(result)
}

fn help(session: &Session) -> CmdResult {
    let mut result = CmdResult::default().with_message(CmdMessage::info(
        "Addressable targets — refer to them by number or keyword:",
    ));
    if let Ok(listing) = list::run(session) {
        result.messages.extend(listing.messages);
    }
    result
}
