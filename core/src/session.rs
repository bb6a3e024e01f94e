//! The authenticated session and its persistence.
//!
//! # Design
//! A [`Session`] is constructed explicitly over a [`KeyValueStore`] and
//! passed to whatever needs it; there is no global. The token and user id
//! are written under the fixed keys [`TOKEN_KEY`] and [`USER_ID_KEY`] on
//! every mutation and removed when cleared, so a new `Session` over the same
//! store picks up where the last one left off.
//!
//! Token and user id are always set and cleared together. A store holding
//! only one of them is treated as corrupt: the session starts signed out and
//! both entries are removed.

use crate::storage::{KeyValueStore, StorageError};

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "userId";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Credentials {
    token: String,
    user_id: String,
}

#[derive(Debug)]
pub struct Session<S> {
    store: S,
    current: Option<Credentials>,
}

impl<S: KeyValueStore> Session<S> {
    /// Restore the session persisted in `store`, if any.
    pub fn load(store: S) -> Self {
        let token = store.get(TOKEN_KEY).filter(|t| !t.is_empty());
        let user_id = store.get(USER_ID_KEY).filter(|u| !u.is_empty());

        let current = match (token, user_id) {
            (Some(token), Some(user_id)) => {
                tracing::info!(user_id = %user_id, "restored session");
                Some(Credentials { token, user_id })
            }
            (None, None) => None,
            _ => {
                tracing::warn!("discarding incomplete persisted session");
                None
            }
        };

        let mut session = Self { store, current };
        if session.current.is_none() {
            if let Err(e) = session.persist() {
                tracing::warn!(error = %e, "failed to clear persisted session");
            }
        }
        session
    }

    pub fn login(
        &mut self,
        token: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<(), StorageError> {
        let credentials = Credentials {
            token: token.into(),
            user_id: user_id.into(),
        };
        tracing::info!(user_id = %credentials.user_id, "session started");
        self.current = Some(credentials);
        self.persist()
    }

    /// Forget the session locally. The server is not contacted.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        if let Some(credentials) = self.current.take() {
            tracing::info!(user_id = %credentials.user_id, "session ended");
        }
        self.persist()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.current
            .as_ref()
            .map(|c| c.token.as_str())
            .filter(|t| !t.is_empty())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.user_id.as_str())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        self.current = self
            .current
            .take()
            .filter(|c| !c.token.is_empty() && !c.user_id.is_empty());

        match &self.current {
            Some(c) => {
                self.store.set(TOKEN_KEY, &c.token)?;
                self.store.set(USER_ID_KEY, &c.user_id)
            }
            None => {
                self.store.remove(TOKEN_KEY)?;
                self.store.remove(USER_ID_KEY)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn fresh_store_is_signed_out() {
        let session = Session::load(MemoryStore::new());
        assert!(!session.is_authenticated());
        assert!(session.token().is_none());
        assert!(session.user_id().is_none());
    }

    #[test]
    fn login_survives_reload() {
        let store = MemoryStore::new();
        let mut session = Session::load(store.clone());
        session.login("t", "u").unwrap();

        let reloaded = Session::load(store.clone());
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token(), Some("t"));
        assert_eq!(reloaded.user_id(), Some("u"));
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("t"));
        assert_eq!(store.get(USER_ID_KEY).as_deref(), Some("u"));
    }

    #[test]
    fn logout_clears_storage() {
        let store = MemoryStore::new();
        let mut session = Session::load(store.clone());
        session.login("t", "u").unwrap();
        session.logout().unwrap();

        let reloaded = Session::load(store.clone());
        assert!(!reloaded.is_authenticated());
        assert!(store.get(TOKEN_KEY).is_none());
        assert!(store.get(USER_ID_KEY).is_none());
    }

    #[test]
    fn half_persisted_session_is_discarded() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "orphan").unwrap();

        let session = Session::load(store.clone());

        assert!(!session.is_authenticated());
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn empty_token_is_not_a_session() {
        let store = MemoryStore::new();
        let mut session = Session::load(store.clone());
        session.login("", "u").unwrap();

        assert!(!session.is_authenticated());
        assert!(session.user_id().is_none());
        assert!(store.get(USER_ID_KEY).is_none());
    }
}
