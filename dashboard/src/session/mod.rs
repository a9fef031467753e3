//! Persisted session: the three well-known keys (token, profile JSON,
//! user type) on top of a pluggable [`KeyValueStore`].

pub mod store;

use std::sync::Arc;

use shared::types::{PROFILE_KEY, SESSION_KEYS, Session, TOKEN_KEY, USER_TYPE_KEY, UserType};
use tracing::{debug, warn};

pub use self::store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Typed view over the session keys.
///
/// Reads never fail: a storage error is logged and reported as an absent
/// value, which the auth guard turns into a redirect.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(inner: Arc<dyn KeyValueStore>) -> Self {
        Self { inner }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY).filter(|t| !t.trim().is_empty())
    }

    pub fn profile_json(&self) -> Option<String> {
        self.read(PROFILE_KEY)
    }

    /// `None` when the key is missing or holds an unknown tag.
    pub fn user_type(&self) -> Option<UserType> {
        self.read(USER_TYPE_KEY)
            .and_then(|tag| UserType::parse(&tag))
    }

    /// Persist a freshly created session. Last write wins.
    pub fn write(&self, session: &Session) -> Result<(), StoreError> {
        let profile = session.profile_json()?;
        self.inner.set(TOKEN_KEY, &session.token)?;
        self.inner.set(PROFILE_KEY, &profile)?;
        self.inner.set(USER_TYPE_KEY, session.user_type().as_str())?;
        debug!("Session written: {}", session);
        Ok(())
    }

    /// Remove all three keys. Every key is attempted even if one fails; the
    /// first error is returned.
    pub fn clear(&self) -> Result<(), StoreError> {
        let mut first_err = None;
        for key in SESSION_KEYS {
            if let Err(e) = self.inner.remove(key) {
                warn!("Failed to remove session key {}: {}", key, e);
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn raw(&self) -> &dyn KeyValueStore {
        self.inner.as_ref()
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.inner.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read session key {}: {}", key, e);
                None
            }
        }
    }
}
