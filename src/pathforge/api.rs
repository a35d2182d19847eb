//! # API Facade
//!
//! Thin facade over the command layer: the single entry point for every
//! client, chat layer or CLI alike. It owns the in-memory session, routes
//! each call to the right command, and snapshots the session through the
//! store after every mutation. No business logic lives here.

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::{Pathway, Session, TrainingContext};
use crate::store::SessionStore;
use serde::Deserialize;

/// The main API facade for pathforge operations.
///
/// Generic over `SessionStore` to allow different persistence backends:
/// `FileSession` in the CLI, `InMemorySession` in tests.
pub struct PathforgeApi<S: SessionStore> {
    store: S,
    session: Session,
}

impl<S: SessionStore> PathforgeApi<S> {
    pub fn open(store: S) -> Result<Self> {
        let session = store.load()?;
        Ok(Self { store, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_context(&mut self, context: TrainingContext) -> Result<()> {
        self.session.context = context;
        self.persist()
    }

    /// Chunk extracted document text into pending modules.
    pub fn ingest_files(
        &mut self,
        files: &[(String, String)],
        fallback: bool,
    ) -> Result<CmdResult> {
        let result = commands::ingest::run(&mut self.session, files, fallback)?;
        self.persist()?;
        Ok(result)
    }

    /// Process one chat instruction: classify, resolve, and route it.
    pub fn instruct(&mut self, instruction: &str) -> Result<CmdResult> {
        let result = commands::instruct::run(&mut self.session, instruction)?;
        self.persist()?;
        Ok(result)
    }

    /// Rank modules of the current pathway against a query.
    pub fn search(&self, query: &str) -> Result<CmdResult> {
        commands::search::run(&self.session, query)
    }

    /// The reference guide of addressable pathways/sections/modules.
    pub fn list_references(&self) -> Result<CmdResult> {
        commands::list::run(&self.session)
    }

    /// Install a generated pathway as current, archiving the previous one.
    pub fn import_pathway(&mut self, pathway: Pathway) -> Result<CmdResult> {
        let result = commands::import::run(&mut self.session, pathway)?;
        self.persist()?;
        Ok(result)
    }

    /// Accepts either a bare `Pathway` document or a generation-run wrapper
    /// of the shape `{"pathways": [ ... ]}` (first pathway wins).
    pub fn import_pathway_json(&mut self, json: &str) -> Result<CmdResult> {
        let pathway = parse_pathway_json(json)?;
        self.import_pathway(pathway)
    }

    /// Drop pending modules that were ingested but never placed.
    pub fn clear_pending(&mut self) -> Result<usize> {
        let dropped = self.session.pending.len();
        self.session.pending.clear();
        self.persist()?;
        Ok(dropped)
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.session)
    }
}

#[derive(Deserialize)]
struct GenerationRun {
    pathways: Vec<Pathway>,
}

fn parse_pathway_json(json: &str) -> Result<Pathway> {
    if let Ok(pathway) = serde_json::from_str::<Pathway>(json) {
        return Ok(pathway);
    }
    let run: GenerationRun = serde_json::from_str(json)?;
    run.pathways.into_iter().next().ok_or_else(|| {
        crate::error::PathforgeError::Api("Generation run contains no pathways".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemorySession;

    const USABLE: &str = "The assembly line requires continuous monitoring of temperature levels. \
                          Operators must record the gauge reading at the start of every hour.";

    fn api() -> PathforgeApi<InMemorySession> {
        PathforgeApi::open(InMemorySession::new()).unwrap()
    }

    #[test]
    fn ingest_then_instruct_places_content() {
        let mut api = api();
        api.import_pathway_json(
            r#"{"name":"Run A","sections":[{"title":"Intro","modules":[]},{"title":"Core","modules":[]}]}"#,
        )
        .unwrap();

        let files = vec![("plant.txt".to_string(), USABLE.to_string())];
        api.ingest_files(&files, false).unwrap();
        assert_eq!(api.session().pending.len(), 1);

        let result = api.instruct("update pathway 1 section 2 with the file").unwrap();
        assert!(result.succeeded());
        assert_eq!(api.session().pathways.current.sections[1].modules.len(), 1);
        assert!(api.session().pending.is_empty());
    }

    #[test]
    fn wrapper_json_takes_the_first_pathway() {
        let mut api = api();
        api.import_pathway_json(
            r#"{"pathways":[{"name":"First","sections":[]},{"name":"Second","sections":[]}]}"#,
        )
        .unwrap();
        assert_eq!(api.session().pathways.current.name, "First");
    }

    #[test]
    fn invalid_json_is_a_serialization_error() {
        let mut api = api();
        assert!(api.import_pathway_json("not json").is_err());
    }

    #[test]
    fn session_round_trips_through_the_store() {
        let mut api = api();
        let files = vec![("plant.txt".to_string(), USABLE.to_string())];
        api.ingest_files(&files, false).unwrap();

        // A new facade over the same store sees the saved state.
        let store = InMemorySession::with_session(api.session().clone());
        let reopened = PathforgeApi::open(store).unwrap();
        assert_eq!(reopened.session().pending.len(), 1);
    }
}
