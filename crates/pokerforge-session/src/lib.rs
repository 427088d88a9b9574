//! User identity for Pokerforge.
//!
//! This crate answers one question for every request: **who is acting?**
//!
//! 1. **Registration** — [`UserStore::register`] creates a [`User`] and
//!    issues an opaque access token
//! 2. **Resolution** — the [`Authenticator`] trait turns a bearer token back
//!    into the [`User`]
//!
//! # How it fits in the stack
//!
//! ```text
//! HTTP adapters (above)  ← resolve the caller before touching any room
//!     ↕
//! Session Layer (this crate)  ← users and their access tokens
//!     ↕
//! Protocol Layer (below)  ← provides UserId, AccessToken, id generation
//! ```

mod auth;
mod error;
mod store;
mod user;

pub use auth::{Authenticator, bearer_token};
pub use error::SessionError;
pub use store::UserStore;
pub use user::User;
