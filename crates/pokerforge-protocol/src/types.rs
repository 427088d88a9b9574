//! Core identity types shared by every Pokerforge layer.
//!
//! All identifiers are opaque strings on the wire. Each one gets its own
//! newtype so a `GameId` can never be passed where a `UserId` is expected,
//! even though both are `String` underneath.

use serde::{Deserialize, Serialize};

use std::fmt;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Declares a string-backed identifier newtype.
///
/// `#[serde(transparent)]` makes the wrapper serialize as the bare string,
/// so `UserId("ab12".into())` becomes `"ab12"` in JSON rather than
/// `{ "0": "ab12" }`.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Borrows the underlying string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }
    };
}

string_id! {
    /// A registered user. Generated once at registration and never reused.
    UserId
}

string_id! {
    /// One estimation round inside a room.
    GameId
}

string_id! {
    /// The short public code that identifies a room, e.g. `"qhzbtmwcar"`.
    ///
    /// Codes are short enough to read aloud, which makes collisions
    /// plausible; the room store checks uniqueness before handing one out.
    RoomCode
}

string_id! {
    /// Opaque token that changes on every mutation of a room.
    ///
    /// Clients send back the last token they saw; an identical value
    /// means nothing changed.
    CommitToken
}

string_id! {
    /// Bearer token that authenticates a user on every request.
    AccessToken
}

// ---------------------------------------------------------------------------
// GameStatus
// ---------------------------------------------------------------------------

/// Lifecycle of a single game.
///
/// ```text
/// Active ──(complete)──→ Completed
///   ↑                        │
///   └────────(reset)─────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Cards may be submitted and withdrawn.
    #[default]
    Active,
    /// Cards are revealed and aggregates are frozen.
    Completed,
}

impl GameStatus {
    /// Returns `true` once the round has been revealed.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}
