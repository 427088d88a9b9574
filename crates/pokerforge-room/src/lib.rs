//! Room and game state for Pokerforge.
//!
//! A [`RoomStore`] holds every room, its members, and its game history.
//! All reads and writes go through the store, which enforces ownership and
//! membership, bumps each room's commit token on every change, and records
//! who was active where.
//!
//! # Lifecycle
//!
//! 1. A user creates a room and becomes its owner and first player.
//! 2. Others join, with an invite code if the room asks for one.
//! 3. The owner starts a game; members submit and withdraw cards.
//! 4. The owner completes the game, which reveals the cards and computes
//!    the estimate, or resets it to play again.
//! 5. A watcher per room ([`spawn_idle_watcher`]) prunes idle members and
//!    deletes the room once nobody is left using it.

mod activity;
mod config;
mod error;
mod estimate;
mod model;
mod store;
mod watch;

pub use activity::ActivityTracker;
pub use config::{DEFAULT_PLAYER_COLOR, PLAYER_COLORS, StoreConfig, player_color};
pub use error::{ErrorKind, RoomError};
pub use estimate::{Estimate, estimate};
pub use model::{Card, Game, InviteCode, Player, Room, RoomState};
pub use store::RoomStore;
pub use watch::spawn_idle_watcher;
