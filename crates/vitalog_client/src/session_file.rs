//! File-backed session persistence.
//!
//! The session lives in a single JSON file. `open` reads it once at
//! process start; `set` and `clear` are the only mutators and rewrite the
//! file; every read goes through `current()`. A missing or unreadable file
//! means logged out.

use crate::{ClientError, Session, SessionStore};
use std::path::PathBuf;
use std::sync::RwLock;

#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: RwLock<Option<Session>>,
}

impl FileSessionStore {
    /// Load the persisted session, if any. A corrupt file is treated as
    /// logged out rather than an error.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cached = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<Session>(&bytes) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
                    None
                }
            },
            Err(_) => None,
        };
        Self {
            path,
            cached: RwLock::new(cached),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn current(&self) -> Option<Session> {
        self.cached.read().expect("session lock").clone()
    }

    fn set(&self, session: Session) -> Result<(), ClientError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let bytes = serde_json::to_vec_pretty(&session)?;
        std::fs::write(&self.path, bytes)?;
        *self.cached.write().expect("session lock") = Some(session);
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *self.cached.write().expect("session lock") = None;
        Ok(())
    }
}
