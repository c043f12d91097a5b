use std::{collections::HashMap, io, path::PathBuf};

use crate::storage::{Session, SessionKey};

/// A key-value store of sessions.
///
/// An absent key is not an error: [`SessionStore::open`] returns an empty
/// session for it. The last [`SessionStore::save`] for a key wins.
pub trait SessionStore {
    /// Load the session stored under `key`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored session exists but cannot be read.
    fn load(&self, key: &SessionKey) -> Result<Option<Session>, StoreError>;

    /// Store `session` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    fn save(&mut self, key: &SessionKey, session: &Session) -> Result<(), StoreError>;

    /// Remove the session stored under `key`. Removing an absent key
    /// succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored session exists but cannot be removed.
    fn remove(&mut self, key: &SessionKey) -> Result<(), StoreError>;

    /// Load the session stored under `key`, or an empty session.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored session exists but cannot be read.
    fn open(&self, key: &SessionKey) -> Result<Session, StoreError> {
        Ok(self.load(key)?.unwrap_or_else(|| {
            tracing::debug!(session = %key, "no stored session, starting empty");
            Session::default()
        }))
    }
}

/// Errors raised by a [`SessionStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file could not be read, written or removed.
    #[error("failed to access session file {path}: {source}")]
    Io {
        /// The file being accessed.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// A stored session could not be parsed.
    #[error("failed to parse session file {path}: {source}")]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The underlying error.
        source: serde_yaml::Error,
    },

    /// A session could not be serialized.
    #[error("failed to serialize session: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// A store that keeps sessions in memory for the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sessions: HashMap<SessionKey, Session>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self, key: &SessionKey) -> Result<Option<Session>, StoreError> {
        Ok(self.sessions.get(key).cloned())
    }

    fn save(&mut self, key: &SessionKey, session: &Session) -> Result<(), StoreError> {
        self.sessions.insert(key.clone(), session.clone());
        Ok(())
    }

    fn remove(&mut self, key: &SessionKey) -> Result<(), StoreError> {
        self.sessions.remove(key);
        Ok(())
    }
}
