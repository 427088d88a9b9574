//! Unified error type and its HTTP mapping.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pokerforge_room::{ErrorKind, RoomError};
use pokerforge_session::SessionError;

/// Startup configuration problems.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is unset or blank.
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{var} is not a socket address: {value:?}")]
    InvalidAddress { var: &'static str, value: String },
}

/// Top-level error that wraps all crate-specific errors.
///
/// Handlers return this so `?` converts store and session errors
/// automatically; [`IntoResponse`] turns it into a status code and a
/// `{"error": "..."}` body.
#[derive(Debug, thiserror::Error)]
pub enum PokerError {
    /// A room-level error (not found, forbidden, limits, state).
    #[error(transparent)]
    Room(#[from] RoomError),

    /// A session-level error (missing or unknown token, blank name).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A request body was present but not valid JSON for the route.
    #[error(transparent)]
    Body(#[from] JsonRejection),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Binding or serving failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PokerError {
    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Room(err) => match err.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                ErrorKind::LimitExceeded => StatusCode::TOO_MANY_REQUESTS,
                ErrorKind::IllegalState => StatusCode::CONFLICT,
            },
            Self::Session(SessionError::MissingToken | SessionError::InvalidToken) => {
                StatusCode::UNAUTHORIZED
            }
            Self::Session(SessionError::BlankName) => StatusCode::BAD_REQUEST,
            Self::Body(rejection) => rejection.status(),
            Self::Config(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PokerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokerforge_protocol::{GameId, RoomCode, UserId};

    #[test]
    fn test_from_room_error_maps_kind_to_status() {
        let cases = [
            (RoomError::RoomNotFound(RoomCode::from("r")), StatusCode::NOT_FOUND),
            (
                RoomError::NotOwner {
                    user: UserId::from("u"),
                    room: RoomCode::from("r"),
                },
                StatusCode::FORBIDDEN,
            ),
            (RoomError::LimitExceeded("rooms"), StatusCode::TOO_MANY_REQUESTS),
            (RoomError::GameCompleted(GameId::from("g")), StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(PokerError::from(err).status(), status);
        }
    }

    #[test]
    fn test_from_session_error_maps_to_status() {
        assert_eq!(
            PokerError::from(SessionError::MissingToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PokerError::from(SessionError::InvalidToken).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            PokerError::from(SessionError::BlankName).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_config_error_is_server_error() {
        let err = PokerError::from(ConfigError::Missing("POKER_ADDRESS"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("POKER_ADDRESS"));
    }
}
