//! Error types for the room layer.

use pokerforge_protocol::{GameId, RoomCode, UserId};

/// The four kinds of failure a store operation can report.
///
/// Transport adapters map on the kind, not on the individual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The room or game does not exist.
    NotFound,
    /// The caller is known but not allowed to do this.
    Forbidden,
    /// A capacity ceiling was reached.
    LimitExceeded,
    /// The target exists but its current state rejects the operation.
    IllegalState,
}

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// The room does not exist (never created, deleted, or swept).
    #[error("room {0} not found")]
    RoomNotFound(RoomCode),

    /// The game does not exist, or its room is gone.
    #[error("game {0} not found")]
    GameNotFound(GameId),

    /// Only the room owner may do this.
    #[error("user {user} does not own room {room}")]
    NotOwner { user: UserId, room: RoomCode },

    /// Only room members may do this.
    #[error("user {user} is not a member of room {room}")]
    NotMember { user: UserId, room: RoomCode },

    /// Joining twice is rejected rather than duplicating the membership.
    #[error("user {user} is already a member of room {room}")]
    AlreadyMember { user: UserId, room: RoomCode },

    /// The room requires an invite code and the supplied one is not accepted.
    #[error("invite code rejected for room {0}")]
    InviteCodeRejected(RoomCode),

    /// A capacity ceiling on rooms, games, or players was reached.
    #[error("{0} limit exceeded")]
    LimitExceeded(&'static str),

    /// Cards cannot change once the game has been revealed.
    #[error("game {0} is already completed")]
    GameCompleted(GameId),
}

impl RoomError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RoomNotFound(_) | Self::GameNotFound(_) => ErrorKind::NotFound,
            Self::NotOwner { .. }
            | Self::NotMember { .. }
            | Self::AlreadyMember { .. }
            | Self::InviteCodeRejected(_) => ErrorKind::Forbidden,
            Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
            Self::GameCompleted(_) => ErrorKind::IllegalState,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_variants() {
        assert_eq!(
            RoomError::GameNotFound(GameId::from("g")).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            RoomError::InviteCodeRejected(RoomCode::from("r")).kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            RoomError::LimitExceeded("rooms").kind(),
            ErrorKind::LimitExceeded
        );
        assert_eq!(
            RoomError::GameCompleted(GameId::from("g")).kind(),
            ErrorKind::IllegalState
        );
    }

    #[test]
    fn test_display_names_the_target() {
        let err = RoomError::NotOwner {
            user: UserId::from("u1"),
            room: RoomCode::from("abc"),
        };
        assert_eq!(err.to_string(), "user u1 does not own room abc");
    }
}
