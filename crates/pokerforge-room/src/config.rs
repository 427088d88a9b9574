//! Store limits, idle thresholds, and the player palette.

use std::time::Duration;

use pokerforge_sweep::SweepConfig;

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Player colors, handed out in join order.
pub const PLAYER_COLORS: [&str; 7] = [
    "FF8B8B", "76FFCE", "BB86FF", "85E2FF", "FF86F3", "FFCF86", "CAFF86",
];

/// Color for every player past the end of [`PLAYER_COLORS`].
pub const DEFAULT_PLAYER_COLOR: &str = "000000";

/// Returns the color for the player at `visitor_index` (0-based join order).
pub fn player_color(visitor_index: u32) -> &'static str {
    PLAYER_COLORS
        .get(visitor_index as usize)
        .copied()
        .unwrap_or(DEFAULT_PLAYER_COLOR)
}

// ---------------------------------------------------------------------------
// StoreConfig
// ---------------------------------------------------------------------------

/// Capacity ceilings and expiry policy for a [`RoomStore`](crate::RoomStore).
///
/// The ceilings keep memory bounded without a database behind the store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Live rooms across the whole process.
    pub max_rooms: usize,

    /// Games a single room may start over its lifetime.
    pub max_games_per_room: usize,

    /// Members a single room may hold at once.
    pub max_players_per_room: usize,

    /// A room with no member activity for this long is deleted by the sweep.
    pub room_idle_timeout: Duration,

    /// A non-owner member with no activity for this long is pruned from the
    /// room, taking their card for the current game with them.
    pub player_idle_timeout: Duration,

    /// Cadence of the per-room idle watcher.
    pub sweep: SweepConfig,

    /// Letters in a public room code.
    pub room_code_len: usize,

    /// Candidates drawn for a room code or game id before giving up.
    pub id_attempts: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_rooms: 300,
            max_games_per_room: 200,
            max_players_per_room: 60,
            room_idle_timeout: Duration::from_secs(60 * 60),
            player_idle_timeout: Duration::from_secs(10 * 60),
            sweep: SweepConfig::default(),
            room_code_len: 10,
            id_attempts: 10_000,
        }
    }
}
