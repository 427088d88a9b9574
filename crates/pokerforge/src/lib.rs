//! # Pokerforge
//!
//! Planning poker backend. Users register for an access token, open rooms,
//! invite teammates, and estimate work items by playing cards in
//! successive games. Clients poll the room state and use its commit token
//! to skip unchanged snapshots.
//!
//! The crate wires the layers together:
//!
//! ```text
//! HTTP (this crate)         ← axum router, bearer auth, status mapping
//!     ↕
//! pokerforge-room           ← rooms, games, cards, idle sweep
//!     ↕
//! pokerforge-session        ← users and access tokens
//!     ↕
//! pokerforge-protocol       ← ids and wire types
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pokerforge::PokerServer;
//!
//! # async fn start() -> Result<(), pokerforge::PokerError> {
//! let server = PokerServer::builder()
//!     .bind("127.0.0.1:8080".parse().unwrap())
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

mod config;
mod error;
mod extract;
mod handler;
mod render;
mod server;
pub mod telemetry;

pub use config::{ADDRESS_VAR, MODE_VAR, ServerConfig};
pub use error::{ConfigError, PokerError};
pub use extract::{AuthUser, JsonBody};
pub use server::{AppState, PokerServer, PokerServerBuilder, router};
