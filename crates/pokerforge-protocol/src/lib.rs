//! Wire-level vocabulary for Pokerforge.
//!
//! - **Types** ([`UserId`], [`GameId`], [`RoomCode`], [`CommitToken`],
//!   [`AccessToken`], [`GameStatus`]) — identifiers every layer shares.
//! - **Id generation** ([`generate_id`], [`generate_room_code`],
//!   [`generate_unique`]) — opaque ids and short public room codes.
//! - **Wire bodies** ([`wire`]) — request and response records of the
//!   HTTP surface.
//!
//! # Architecture
//!
//! ```text
//! HTTP adapters (pokerforge) → Room store / Session store → Protocol (this crate)
//! ```

mod id;
mod types;
pub mod wire;

pub use id::{IdSpaceExhausted, generate_id, generate_room_code, generate_unique};
pub use types::{AccessToken, CommitToken, GameId, GameStatus, RoomCode, UserId};
