//! Rooms, players, games and cards.
//!
//! These are plain records. The [`RoomStore`](crate::RoomStore) is their
//! only writer; everything handed out of the store is a cloned snapshot.

use std::time::SystemTime;

use pokerforge_protocol::{CommitToken, GameId, GameStatus, RoomCode, UserId, generate_id};

use crate::config::player_color;
use crate::estimate::estimate;

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A user's membership in one room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub user_id: UserId,
    pub name: String,
    /// Hex RGB without the leading `#`.
    pub color: String,
}

impl Player {
    /// Creates the membership record for the `visitor_index`-th (0-based)
    /// arrival in a room.
    ///
    /// A blank `name` becomes `"Player N"` with `N` the 1-based join order.
    pub fn new(user_id: UserId, name: &str, visitor_index: u32) -> Self {
        let name = if name.trim().is_empty() {
            format!("Player {}", u64::from(visitor_index) + 1)
        } else {
            name.to_owned()
        };
        Self {
            user_id,
            name,
            color: player_color(visitor_index).to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// InviteCode
// ---------------------------------------------------------------------------

/// A secret a room may require from joining users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteCode {
    pub code: String,
    pub created_at: SystemTime,
}

// ---------------------------------------------------------------------------
// Room
// ---------------------------------------------------------------------------

/// A shared space where players estimate successive games.
#[derive(Debug, Clone)]
pub struct Room {
    pub code: RoomCode,
    pub name: String,
    /// Checked directly for every owner-only operation.
    pub owner: UserId,
    pub invite_code_required: bool,
    pub invite_codes: Vec<InviteCode>,
    /// Members in join order. Never empty while the owner is present.
    pub players: Vec<Player>,
    /// Play history, oldest first. Append-only.
    pub games: Vec<GameId>,
    /// Replaced on every mutation.
    pub commit: CommitToken,
    /// Arrivals over the room's lifetime, including members who were
    /// later pruned. Drives default names and colors.
    pub visitors: u32,
}

impl Room {
    /// Returns `true` if `user` currently holds a membership.
    pub fn is_member(&self, user: &UserId) -> bool {
        self.player(user).is_some()
    }

    /// Returns `true` if `user` owns the room.
    pub fn is_owner(&self, user: &UserId) -> bool {
        self.owner == *user
    }

    /// The membership record for `user`, if any.
    pub fn player(&self, user: &UserId) -> Option<&Player> {
        self.players.iter().find(|p| p.user_id == *user)
    }

    /// The most recently started game.
    pub fn current_game(&self) -> Option<&GameId> {
        self.games.last()
    }

    /// Whether a join carrying `code` passes the invite check.
    ///
    /// Rooms that do not require a code accept anything.
    pub fn accepts_invite(&self, code: &str) -> bool {
        !self.invite_code_required || self.invite_codes.iter().any(|c| c.code == code)
    }

    /// Replaces the commit token with a fresh one that is guaranteed to
    /// differ from the previous value.
    pub(crate) fn bump_commit(&mut self) {
        let previous = std::mem::replace(&mut self.commit, CommitToken(generate_id()));
        while self.commit == previous {
            self.commit = CommitToken(generate_id());
        }
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// One player's estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Snapshot of the player at submission time.
    pub player: Player,
    /// Negative values are special markers, not estimates.
    pub score: i32,
}

/// One round of estimation.
#[derive(Debug, Clone)]
pub struct Game {
    pub id: GameId,
    pub room: RoomCode,
    pub name: String,
    pub status: GameStatus,
    /// Meaningful only once completed; zero otherwise.
    pub max_score: i32,
    /// Meaningful only once completed; zero otherwise.
    pub average_score: i32,
    /// At most one card per player, in first-submission order.
    pub cards: Vec<Card>,
}

impl Game {
    pub(crate) fn new(id: GameId, room: RoomCode, name: String) -> Self {
        Self {
            id,
            room,
            name,
            status: GameStatus::Active,
            max_score: 0,
            average_score: 0,
            cards: Vec::new(),
        }
    }

    /// Stores `card`, replacing any earlier card from the same player.
    pub(crate) fn put_card(&mut self, card: Card) {
        match self
            .cards
            .iter_mut()
            .find(|c| c.player.user_id == card.player.user_id)
        {
            Some(existing) => *existing = card,
            None => self.cards.push(card),
        }
    }

    /// Removes `user`'s card. Returns `false` if there was none.
    pub(crate) fn drop_card(&mut self, user: &UserId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.player.user_id != *user);
        self.cards.len() != before
    }

    /// Freezes the game and computes its aggregates from the current cards.
    pub(crate) fn complete(&mut self) {
        let result = estimate(&self.cards);
        self.max_score = result.max_score;
        self.average_score = result.average_score;
        self.status = GameStatus::Completed;
    }

    /// Clears cards and aggregates and reopens the game.
    pub(crate) fn reset(&mut self) {
        self.cards.clear();
        self.max_score = 0;
        self.average_score = 0;
        self.status = GameStatus::Active;
    }

    /// The card `user` submitted, if any.
    pub fn card(&self, user: &UserId) -> Option<&Card> {
        self.cards.iter().find(|c| c.player.user_id == *user)
    }
}

// ---------------------------------------------------------------------------
// RoomState
// ---------------------------------------------------------------------------

/// A room together with its resolved game history, read in one critical
/// section.
#[derive(Debug, Clone)]
pub struct RoomState {
    pub room: Room,
    /// Same order as `room.games`.
    pub games: Vec<Game>,
}

impl RoomState {
    /// The most recently started game.
    pub fn current_game(&self) -> Option<&Game> {
        self.games.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uid(s: &str) -> UserId {
        UserId::from(s)
    }

    fn card(user: &str, score: i32) -> Card {
        Card {
            player: Player::new(uid(user), user, 0),
            score,
        }
    }

    fn game() -> Game {
        Game::new(GameId::from("g1"), RoomCode::from("room"), "Game 1".into())
    }

    #[test]
    fn test_player_new_blank_name_uses_join_order() {
        let p = Player::new(uid("u"), "  ", 2);
        assert_eq!(p.name, "Player 3");
        assert_eq!(p.color, "BB86FF");
    }

    #[test]
    fn test_player_new_keeps_given_name() {
        let p = Player::new(uid("u"), "Ann", 0);
        assert_eq!(p.name, "Ann");
        assert_eq!(p.color, "FF8B8B");
    }

    #[test]
    fn test_put_card_replaces_first_players_card() {
        let mut g = game();
        g.put_card(card("a", 1));
        g.put_card(card("b", 2));
        g.put_card(card("a", 8));

        assert_eq!(g.cards.len(), 2);
        assert_eq!(g.card(&uid("a")).map(|c| c.score), Some(8));
        assert_eq!(g.cards[0].player.user_id, uid("a"));
    }

    #[test]
    fn test_drop_card_reports_whether_removed() {
        let mut g = game();
        g.put_card(card("a", 1));

        assert!(g.drop_card(&uid("a")));
        assert!(!g.drop_card(&uid("a")));
        assert!(g.cards.is_empty());
    }

    #[test]
    fn test_complete_then_reset_clears_everything() {
        let mut g = game();
        g.put_card(card("a", 3));
        g.put_card(card("b", 4));

        g.complete();
        assert_eq!(g.status, GameStatus::Completed);
        assert_eq!((g.max_score, g.average_score), (4, 4));

        g.reset();
        assert_eq!(g.status, GameStatus::Active);
        assert_eq!((g.max_score, g.average_score), (0, 0));
        assert!(g.cards.is_empty());
    }

    #[test]
    fn test_accepts_invite_only_checks_when_required() {
        let mut room = Room {
            code: RoomCode::from("r"),
            name: String::new(),
            owner: uid("o"),
            invite_code_required: false,
            invite_codes: vec![],
            players: vec![],
            games: vec![],
            commit: CommitToken::from("c"),
            visitors: 0,
        };
        assert!(room.accepts_invite(""));

        room.invite_code_required = true;
        assert!(!room.accepts_invite("secret"));

        room.invite_codes.push(InviteCode {
            code: "secret".into(),
            created_at: SystemTime::now(),
        });
        assert!(room.accepts_invite("secret"));
        assert!(!room.accepts_invite("other"));
    }

    #[test]
    fn test_bump_commit_always_changes_token() {
        let mut room = Room {
            code: RoomCode::from("r"),
            name: String::new(),
            owner: uid("o"),
            invite_code_required: false,
            invite_codes: vec![],
            players: vec![],
            games: vec![],
            commit: CommitToken::from("c"),
            visitors: 0,
        };
        let before = room.commit.clone();
        room.bump_commit();
        assert_ne!(room.commit, before);
    }
}
