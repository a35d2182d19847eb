use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Session;
use crate::search;

pub fn run(session: &Session, query: &str) -> Result<CmdResult> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(CmdResult::default()
            .with_message(CmdMessage::info("What would you like to search for?")));
    }

    let hits = search::search(query, &session.pathways.current);
    if hits.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info(format!(
            "No modules match '{}'.",
            query
        ))));
    }

    Ok(CmdResult::default()
        .with_message(CmdMessage::info(format!(
            "{} module(s) match '{}':",
            hits.len(),
            query
        )))
        .with_hits(hits))
}
