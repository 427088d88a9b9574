//! Authentication hook for resolving who is acting.
//!
//! The HTTP layer only knows the raw `Authorization` header. It strips the
//! `Bearer ` prefix with [`bearer_token`] and hands the rest to an
//! [`Authenticator`], which returns the [`User`] behind the token.
//!
//! The in-process [`UserStore`](crate::UserStore) is the production
//! implementation; tests can swap in anything that speaks the trait.

use crate::{SessionError, User};

/// Resolves an access token to a user identity.
///
/// `Send + Sync + 'static` because one authenticator is shared by every
/// request handler for the life of the server.
pub trait Authenticator: Send + Sync + 'static {
    /// Validates the given token and returns the user it belongs to.
    ///
    /// # Returns
    /// - `Ok(User)` — the token is known
    /// - `Err(SessionError::InvalidToken)` — it is not
    fn authenticate(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<User, SessionError>> + Send;
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// # Errors
/// [`SessionError::MissingToken`] when the header is absent, empty, or
/// uses a different scheme.
pub fn bearer_token(header: Option<&str>) -> Result<&str, SessionError> {
    let header = header.ok_or(SessionError::MissingToken)?;
    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(SessionError::MissingToken),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_strips_scheme() {
        assert_eq!(bearer_token(Some("Bearer abc123")).unwrap(), "abc123");
    }

    #[test]
    fn test_bearer_token_absent_header_is_missing() {
        assert!(matches!(
            bearer_token(None),
            Err(SessionError::MissingToken)
        ));
    }

    #[test]
    fn test_bearer_token_other_scheme_is_missing() {
        assert!(matches!(
            bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(SessionError::MissingToken)
        ));
        assert!(matches!(
            bearer_token(Some("Bearer ")),
            Err(SessionError::MissingToken)
        ));
    }
}
