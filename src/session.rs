//! Read-only access to the cached login session.
//!
//! The login flow owns the session file; the desk only reads it to learn
//! the bearer token and who is acting.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use grievance_core::Actor;
use grievance_types::Session;

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when nobody is signed in.
    pub fn load(&self) -> Result<Option<Session>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read session file {}", self.path.display())
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let session: Session = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse session file {}", self.path.display()))?;
        tracing::debug!(user = %session.user.id, role = %session.user.role, "session loaded");
        Ok(Some(session))
    }

    /// Token and actor for the signed-in user, or an error naming the file.
    pub fn require(&self) -> Result<(String, Actor)> {
        let session = self.load()?.with_context(|| {
            format!("Not signed in: no session at {}", self.path.display())
        })?;
        let actor = Actor::from_session(&session)?;
        Ok((session.token, actor))
    }
}
