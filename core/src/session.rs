//! Session state: the one bearer token the client holds.
//!
//! # Design
//! The token is the only mutable process-wide state in the system, so it
//! lives in an explicit `Session` owned by the composition point
//! (`FestivalApi`) and handed by reference to the request-build layer —
//! never in a module-level global. Persistence is a single one-line file
//! (`<dir>/token`), the durable analog of the browser client's
//! `localStorage["token"]`, and surviving restarts is an explicit
//! [`Session::restore`] step rather than something that happens ambiently.
//!
//! The session never validates the token, never talks to the network, and
//! never clears itself: detecting an `ApiError::Unauthorized` and calling
//! `set_token(None)` is the caller's decision.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

const TOKEN_FILE: &str = "token";

/// Holds at most one opaque bearer token, optionally persisted to disk.
#[derive(Debug, Default)]
pub struct Session {
    token: Option<String>,
    store: Option<PathBuf>,
}

impl Session {
    /// An empty, memory-only session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a persisted session from `dir`, reading `<dir>/token` if it
    /// exists. Later `set_token` calls write through to the same file.
    pub fn restore(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let token = fs::read_to_string(dir.join(TOKEN_FILE))
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|t| !t.is_empty());
        Self {
            token,
            store: Some(dir),
        }
    }

    /// The current token, if any. Never blocks, never touches the network.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Store or clear the token, writing through to the token file when the
    /// session is persistent. The token is stored as-is; no shape validation.
    ///
    /// Persistence failures are logged and do not disturb the in-memory
    /// state, so a read-only disk degrades to a memory-only session.
    pub fn set_token(&mut self, token: Option<&str>) {
        self.token = token.map(str::to_string);
        let Some(dir) = &self.store else { return };
        let path = dir.join(TOKEN_FILE);
        let result = match token {
            Some(value) => fs::create_dir_all(dir).and_then(|()| fs::write(&path, value)),
            None => match fs::remove_file(&path) {
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                other => other,
            },
        };
        if let Err(e) = result {
            warn!(path = %path.display(), "failed to persist session token: {e}");
        }
    }
}
