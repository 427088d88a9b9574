//! JSON request and response bodies of the HTTP surface.
//!
//! Request bodies default every field so a missing key behaves like an
//! empty value instead of a decode failure; validation happens in the
//! handlers.

use serde::{Deserialize, Serialize};

use crate::{AccessToken, CommitToken, GameId, GameStatus, RoomCode, UserId};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: UserDto,
    pub access_token: AccessToken,
}

// ---------------------------------------------------------------------------
// Rooms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateRoomRequest {
    pub name: String,
    pub invite_code_required: bool,
}

/// Summary returned by create, get and join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDto {
    pub id: RoomCode,
    pub name: String,
    pub owner: UserId,
}

/// Query string of `POST /rooms/{room_id}/join`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinQuery {
    #[serde(rename = "invite-code")]
    pub invite_code: String,
}

/// Query string of `GET /rooms/{room_id}/state`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateQuery {
    /// The last commit token the client saw, if any.
    pub commit: Option<CommitToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteCodeDto {
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDto {
    pub id: UserId,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDto {
    pub score: i32,
    pub player: PlayerDto,
}

/// The latest game of a room. Scores and cards stay hidden until the
/// game is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentGameDto {
    pub id: GameId,
    pub name: String,
    pub status: GameStatus,
    pub max_score: i32,
    pub average_score: i32,
    #[serde(rename = "is_card_revealed")]
    pub cards_revealed: bool,
    pub cards: Vec<CardDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResultDto {
    pub game_id: GameId,
    pub name: String,
    pub status: GameStatus,
    pub max_score: i32,
    pub average_score: i32,
}

/// Full room snapshot for polling clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStateDto {
    pub room_id: RoomCode,
    pub name: String,
    pub owner: UserId,
    pub commit: CommitToken,
    pub players: Vec<PlayerDto>,
    pub current_game: Option<CurrentGameDto>,
    pub game_results: Vec<GameResultDto>,
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateGameRequest {
    pub room_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SendCardRequest {
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameDto {
    pub id: GameId,
    pub room_id: RoomCode,
    pub name: String,
    pub status: GameStatus,
    pub max_score: i32,
    pub average_score: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_query_reads_dashed_key() {
        let query: JoinQuery =
            serde_json::from_str(r#"{"invite-code":"xyz"}"#).unwrap();
        assert_eq!(query.invite_code, "xyz");
    }

    #[test]
    fn test_create_room_request_defaults_missing_fields() {
        let req: CreateRoomRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.name, "");
        assert!(!req.invite_code_required);
    }

    #[test]
    fn test_current_game_uses_revealed_wire_name() {
        let dto = CurrentGameDto {
            id: GameId::from("g"),
            name: "Game 1".into(),
            status: GameStatus::Active,
            max_score: 0,
            average_score: 0,
            cards_revealed: false,
            cards: vec![],
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["is_card_revealed"], false);
        assert_eq!(json["status"], "active");
    }
}
