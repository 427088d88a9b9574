//! Request extractors.

use axum::Json;
use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use pokerforge_session::{Authenticator, SessionError, User, bearer_token};
use serde::de::DeserializeOwned;

use crate::{AppState, PokerError};

/// The authenticated caller.
///
/// Resolves `Authorization: Bearer <token>` before the handler body runs,
/// so a missing or unknown token is answered with 401 without touching
/// the room store.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = PokerError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let token = bearer_token(header).inspect_err(log_rejection)?;
        let user = state
            .users
            .authenticate(token)
            .await
            .inspect_err(log_rejection)?;

        Ok(AuthUser(user))
    }
}

/// A JSON request body that may be left out.
///
/// An absent or blank body yields `T::default()`, so clients can omit
/// bodies whose fields are all optional. A body that is present must
/// decode; otherwise the request is rejected with 400 (bad syntax) or 422
/// (wrong shape, e.g. a string where a score belongs). The content type is
/// not checked.
#[derive(Debug, Clone, Default)]
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = PokerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(JsonRejection::from)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(T::default()));
        }
        let Json(value) = Json::<T>::from_bytes(&bytes)?;
        Ok(Self(value))
    }
}

fn log_rejection(err: &SessionError) {
    tracing::debug!(error = %err, "authorization failed");
}
