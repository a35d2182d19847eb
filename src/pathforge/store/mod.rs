//! Session persistence for callers that want it.
//!
//! The engine itself never touches the filesystem: every command operates
//! on an in-memory [`Session`]. The [`SessionStore`] trait exists so the
//! CLI can snapshot the session between invocations while tests run
//! against [`memory::InMemorySession`] with no setup.

use crate::error::Result;
use crate::model::Session;

pub mod fs;
pub mod memory;

pub trait SessionStore {
    /// Load the stored session, or a fresh default when none exists yet.
    fn load(&self) -> Result<Session>;

    /// Persist the session snapshot.
    fn save(&mut self, session: &Session) -> Result<()>;
}
