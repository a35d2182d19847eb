use super::SessionStore;
use crate::error::{PathforgeError, Result};
use crate::model::Session;
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.json";

/// File-backed session snapshot: one JSON file in the data directory.
pub struct FileSession {
    dir: PathBuf,
}

impl FileSession {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn session_path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(PathforgeError::Io)?;
        }
        Ok(())
    }
}

impl SessionStore for FileSession {
    fn load(&self) -> Result<Session> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(Session::default());
        }
        let data = fs::read_to_string(&path).map_err(PathforgeError::Io)?;
        let session = serde_json::from_str(&data)?;
        Ok(session)
    }

    fn save(&mut self, session: &Session) -> Result<()> {
        self.ensure_dir()?;
        let data = serde_json::to_string_pretty(session)?;
        write_atomic(&self.session_path(), &data)
    }
}

// Write via a sibling temp file and rename, so a crash mid-write never
// leaves a truncated snapshot.
fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, data).map_err(PathforgeError::Io)?;
    fs::rename(&tmp, path).map_err(PathforgeError::Io)?;
    Ok(())
}
