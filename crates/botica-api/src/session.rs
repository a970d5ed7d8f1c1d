//! # Session Context
//!
//! Explicit, injectable session state: the bearer token attached to every
//! request once present. Constructed once at app start (optionally reading
//! the persisted token) and passed into [`crate::ApiClient`] — never an
//! ambient singleton.
//!
//! Persistence is best-effort: a failure to write or remove the token file
//! is logged and the in-memory session stays authoritative.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use directories::ProjectDirs;
use tracing::{debug, info, warn};

/// File name of the persisted token inside the platform data dir.
const TOKEN_FILE: &str = "session.token";

/// Shared session context.
///
/// Cheap to clone; all clones observe the same token.
#[derive(Debug, Clone)]
pub struct Session {
    token: Arc<RwLock<Option<String>>>,
    store_path: Option<PathBuf>,
}

impl Session {
    /// An unauthenticated, in-memory-only session (no persistence).
    pub fn new() -> Self {
        Session {
            token: Arc::new(RwLock::new(None)),
            store_path: None,
        }
    }

    /// An in-memory session seeded with a token (tests, short-lived tools).
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Session::new();
        session.set_token(token);
        session
    }

    /// Loads the session persisted in the platform data dir, if any.
    ///
    /// Call once at app start; the returned session keeps persisting token
    /// changes to the same location.
    pub fn load_persisted() -> Self {
        match default_store_path() {
            Some(path) => Session::load_from(path),
            None => {
                warn!("no platform data dir available; session will not persist");
                Session::new()
            }
        }
    }

    /// Loads a session persisted at an explicit path.
    pub fn load_from(path: PathBuf) -> Self {
        let token = match fs::read_to_string(&path) {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    info!("restored persisted session token");
                    Some(trimmed.to_string())
                }
            }
            Err(err) => {
                debug!(?path, %err, "no persisted session token");
                None
            }
        };

        Session {
            token: Arc::new(RwLock::new(token)),
            store_path: Some(path),
        }
    }

    /// The current bearer token, if authenticated.
    pub fn token(&self) -> Option<String> {
        self.token.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Stores a new token and persists it when a store path is configured.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();

        if let Some(path) = &self.store_path {
            if let Some(parent) = path.parent() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!(?path, %err, "could not create session data dir");
                }
            }
            if let Err(err) = fs::write(path, &token) {
                warn!(?path, %err, "could not persist session token");
            }
        }

        *self.token.write().expect("session lock poisoned") = Some(token);
    }

    /// Teardown: clears the token from memory and disk.
    pub fn logout(&self) {
        *self.token.write().expect("session lock poisoned") = None;

        if let Some(path) = &self.store_path {
            if let Err(err) = fs::remove_file(path) {
                debug!(?path, %err, "no persisted token to remove");
            }
        }

        info!("session cleared");
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

fn default_store_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "botica", "botica-admin").map(|dirs| dirs.data_dir().join(TOKEN_FILE))
}

// =============================================================================
// Unit Tests
// =============================================================================
