//! The user store: registered users and the access tokens that name them.
//!
//! Tokens are issued once at registration and stay valid until the
//! process restarts. There is no revocation and no persistence.
//!
//! # Concurrency note
//!
//! Lookups vastly outnumber registrations (every request resolves a
//! token), so the maps sit behind a read/write lock. Registration takes
//! the write side only long enough to insert.

use std::collections::HashMap;

use parking_lot::RwLock;
use pokerforge_protocol::{AccessToken, UserId, generate_id, generate_unique};

use crate::{Authenticator, SessionError, User};

/// How many times to redraw a colliding user id or token before treating
/// the generator as broken.
const ID_ATTEMPTS: u32 = 10_000;

#[derive(Default)]
struct Registry {
    users: HashMap<UserId, User>,
    /// Token → owner index, kept in sync with `users`.
    tokens: HashMap<AccessToken, UserId>,
}

/// Maps opaque access tokens to user identities.
#[derive(Default)]
pub struct UserStore {
    inner: RwLock<Registry>,
}

impl UserStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new user and issues their access token.
    ///
    /// The name is trimmed before it is stored.
    ///
    /// # Errors
    /// [`SessionError::BlankName`] if the name is empty or whitespace.
    pub fn register(&self, name: &str) -> Result<(User, AccessToken), SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::BlankName);
        }

        let mut registry = self.inner.write();

        let id = generate_unique(
            "user id",
            ID_ATTEMPTS,
            || UserId(generate_id()),
            |id| registry.users.contains_key(id),
        )
        .unwrap_or_else(|fault| fault.abort());
        let token = generate_unique(
            "access token",
            ID_ATTEMPTS,
            || AccessToken(generate_id()),
            |token| registry.tokens.contains_key(token),
        )
        .unwrap_or_else(|fault| fault.abort());

        let user = User {
            id: id.clone(),
            name: name.to_owned(),
        };
        registry.users.insert(id.clone(), user.clone());
        registry.tokens.insert(token.clone(), id);

        tracing::info!(user_id = %user.id, "user registered");
        Ok((user, token))
    }

    /// Looks up the user behind an access token.
    ///
    /// # Errors
    /// [`SessionError::InvalidToken`] if the token was never issued.
    pub fn resolve(&self, token: &str) -> Result<User, SessionError> {
        let registry = self.inner.read();
        let user_id = registry
            .tokens
            .get(&AccessToken::from(token))
            .ok_or(SessionError::InvalidToken)?;
        registry
            .users
            .get(user_id)
            .cloned()
            .ok_or(SessionError::InvalidToken)
    }

    /// Looks up a user by id.
    pub fn get(&self, user_id: &UserId) -> Option<User> {
        self.inner.read().users.get(user_id).cloned()
    }

    /// Returns the number of registered users.
    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    /// Returns `true` if nobody has registered yet.
    pub fn is_empty(&self) -> bool {
        self.inner.read().users.is_empty()
    }
}

impl Authenticator for UserStore {
    async fn authenticate(&self, token: &str) -> Result<User, SessionError> {
        self.resolve(token)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_returns_user_and_token() {
        let store = UserStore::new();

        let (user, token) = store.register("Alice").expect("should register");

        assert_eq!(user.name, "Alice");
        assert_eq!(user.id.as_str().len(), 32);
        assert_eq!(token.as_str().len(), 32);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_register_trims_name() {
        let store = UserStore::new();
        let (user, _) = store.register("  Bob \n").unwrap();
        assert_eq!(user.name, "Bob");
    }

    #[test]
    fn test_register_blank_name_returns_error() {
        let store = UserStore::new();

        assert!(matches!(store.register(""), Err(SessionError::BlankName)));
        assert!(matches!(store.register("   "), Err(SessionError::BlankName)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_register_same_name_twice_gets_distinct_identities() {
        let store = UserStore::new();
        let (u1, t1) = store.register("Sam").unwrap();
        let (u2, t2) = store.register("Sam").unwrap();

        assert_ne!(u1.id, u2.id);
        assert_ne!(t1, t2, "tokens must be unique per user");
    }

    #[test]
    fn test_resolve_known_token_returns_user() {
        let store = UserStore::new();
        let (user, token) = store.register("Alice").unwrap();

        let resolved = store.resolve(token.as_str()).expect("should resolve");

        assert_eq!(resolved, user);
        assert_eq!(store.get(&user.id), Some(user));
    }

    #[test]
    fn test_resolve_unknown_token_returns_invalid() {
        let store = UserStore::new();
        store.register("Alice").unwrap();

        assert!(matches!(
            store.resolve("not-a-token"),
            Err(SessionError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn test_authenticate_delegates_to_resolve() {
        let store = UserStore::new();
        let (user, token) = store.register("Alice").unwrap();

        let resolved = store.authenticate(token.as_str()).await.unwrap();
        assert_eq!(resolved.id, user.id);

        let err = store.authenticate("nope").await;
        assert!(matches!(err, Err(SessionError::InvalidToken)));
    }
}
