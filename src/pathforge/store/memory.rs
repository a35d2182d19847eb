use super::SessionStore;
use crate::error::Result;
use crate::model::Session;

/// In-memory session storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemorySession {
    session: Session,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self { session }
    }
}

impl SessionStore for InMemorySession {
    fn load(&self) -> Result<Session> {
        Ok(self.session.clone())
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        self.session = session.clone();
        Ok(())
    }
}
