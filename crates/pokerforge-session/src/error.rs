//! Error types for the session layer.

/// Errors that can occur while registering or resolving users.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The request carried no bearer token at all.
    #[error("missing access token")]
    MissingToken,

    /// The bearer token was not issued by this process.
    /// Tokens live until restart, so this is either a stale client
    /// or a guess.
    #[error("invalid access token")]
    InvalidToken,

    /// Registration needs a non-blank display name.
    #[error("user name must not be blank")]
    BlankName,
}
