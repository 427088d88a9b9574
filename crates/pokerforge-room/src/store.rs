//! The room state store: every room, game and card in the process.
//!
//! # Locking
//!
//! One read/write lock guards all rooms and games. Writers take it
//! exclusively, readers share it, and nothing inside the critical section
//! blocks or awaits. That gives:
//! - one mutation at a time, so commit-token bumps are totally ordered
//! - readers never see a half-applied mutation
//! - a game and its room are always looked up under the same guard
//!
//! At hundreds of rooms a single lock is plenty. If contention ever shows
//! up, sharding the map by room code is the way out; no operation touches
//! two rooms.
//!
//! # Activity
//!
//! Every successful call attributable to a user refreshes that user's
//! last-seen time in the [`ActivityTracker`]. The idle sweep
//! ([`RoomStore::check_room_activity`]) reads those timestamps back to
//! prune idle members and delete abandoned rooms.

use std::collections::HashMap;
use std::time::SystemTime;

use parking_lot::RwLock;
use pokerforge_protocol::{
    CommitToken, GameId, RoomCode, UserId, generate_id, generate_room_code, generate_unique,
};
use pokerforge_session::User;

use crate::{
    ActivityTracker, Card, Game, InviteCode, Player, Room, RoomError, RoomState, StoreConfig,
};

#[derive(Default)]
struct Tables {
    rooms: HashMap<RoomCode, Room>,
    /// Every game ever started in a live room, keyed by id.
    /// A game's `room` always names a key of `rooms`.
    games: HashMap<GameId, Game>,
}

impl Tables {
    fn room(&self, code: &RoomCode) -> Result<&Room, RoomError> {
        self.rooms
            .get(code)
            .ok_or_else(|| RoomError::RoomNotFound(code.clone()))
    }

    fn owned_room_mut(&mut self, actor: &UserId, code: &RoomCode) -> Result<&mut Room, RoomError> {
        let room = self
            .rooms
            .get_mut(code)
            .ok_or_else(|| RoomError::RoomNotFound(code.clone()))?;
        if !room.is_owner(actor) {
            return Err(RoomError::NotOwner {
                user: actor.clone(),
                room: code.clone(),
            });
        }
        Ok(room)
    }

    /// Resolves a game and its room together. A game whose room is gone is
    /// reported as not found.
    fn room_and_game_mut(&mut self, id: &GameId) -> Result<(&mut Room, &mut Game), RoomError> {
        let game = self
            .games
            .get_mut(id)
            .ok_or_else(|| RoomError::GameNotFound(id.clone()))?;
        let room = self
            .rooms
            .get_mut(&game.room)
            .ok_or_else(|| RoomError::GameNotFound(id.clone()))?;
        Ok((room, game))
    }

    fn remove_room(&mut self, code: &RoomCode) -> Option<Room> {
        let room = self.rooms.remove(code)?;
        for id in &room.games {
            self.games.remove(id);
        }
        Some(room)
    }
}

/// Owns all room and game records and enforces who may change them.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct RoomStore {
    config: StoreConfig,
    tables: RwLock<Tables>,
    activity: ActivityTracker,
}

impl RoomStore {
    /// Creates an empty store.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            tables: RwLock::new(Tables::default()),
            activity: ActivityTracker::new(),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The tracker this store records into.
    pub fn activity(&self) -> &ActivityTracker {
        &self.activity
    }

    // =====================================================================
    // Rooms
    // =====================================================================

    /// Creates a room owned by `creator`, who becomes its first player.
    ///
    /// # Errors
    /// [`RoomError::LimitExceeded`] once `max_rooms` rooms are live.
    pub fn create_room(
        &self,
        creator: &User,
        name: &str,
        invite_code_required: bool,
    ) -> Result<Room, RoomError> {
        let mut tables = self.tables.write();

        if tables.rooms.len() >= self.config.max_rooms {
            tracing::warn!(max = self.config.max_rooms, "room limit reached");
            return Err(RoomError::LimitExceeded("rooms"));
        }

        let code = generate_unique(
            "room code",
            self.config.id_attempts,
            || generate_room_code(self.config.room_code_len),
            |code| tables.rooms.contains_key(code),
        )
        .unwrap_or_else(|fault| fault.abort());

        let room = Room {
            code: code.clone(),
            name: name.to_owned(),
            owner: creator.id.clone(),
            invite_code_required,
            invite_codes: Vec::new(),
            players: vec![Player::new(creator.id.clone(), &creator.name, 0)],
            games: Vec::new(),
            commit: CommitToken(generate_id()),
            visitors: 1,
        };
        tables.rooms.insert(code.clone(), room.clone());
        self.activity.record_player(&code, &creator.id);

        tracing::info!(room = %code, owner = %creator.id, "room created");
        Ok(room)
    }

    /// Looks up a room. Anyone authenticated may read the summary.
    pub fn get_room(&self, actor: &UserId, code: &RoomCode) -> Result<Room, RoomError> {
        let tables = self.tables.read();
        let room = tables.room(code)?.clone();
        self.activity.record_player(code, actor);
        Ok(room)
    }

    /// Deletes a room and all of its games.
    ///
    /// # Errors
    /// - [`RoomError::RoomNotFound`]
    /// - [`RoomError::NotOwner`] unless `actor` owns the room
    pub fn delete_room(&self, actor: &UserId, code: &RoomCode) -> Result<(), RoomError> {
        let mut tables = self.tables.write();
        tables.owned_room_mut(actor, code)?;
        tables.remove_room(code);
        self.activity.forget_room(code);
        self.activity.record_user(actor);

        tracing::info!(room = %code, "room deleted by owner");
        Ok(())
    }

    /// Adds `user` to a room.
    ///
    /// `invite_code` is only checked when the room requires one.
    ///
    /// # Errors
    /// - [`RoomError::RoomNotFound`]
    /// - [`RoomError::AlreadyMember`] if `user` already belongs to the room
    /// - [`RoomError::InviteCodeRejected`] if the code is required and wrong
    /// - [`RoomError::LimitExceeded`] once the room holds `max_players_per_room`
    pub fn join_room(
        &self,
        user: &User,
        code: &RoomCode,
        invite_code: &str,
    ) -> Result<Room, RoomError> {
        let mut tables = self.tables.write();
        let room = tables
            .rooms
            .get_mut(code)
            .ok_or_else(|| RoomError::RoomNotFound(code.clone()))?;

        if room.is_member(&user.id) {
            return Err(RoomError::AlreadyMember {
                user: user.id.clone(),
                room: code.clone(),
            });
        }
        if !room.accepts_invite(invite_code) {
            return Err(RoomError::InviteCodeRejected(code.clone()));
        }
        if room.players.len() >= self.config.max_players_per_room {
            return Err(RoomError::LimitExceeded("players"));
        }

        room.players
            .push(Player::new(user.id.clone(), &user.name, room.visitors));
        room.visitors = room.visitors.saturating_add(1);
        room.bump_commit();
        let room = room.clone();
        self.activity.record_player(code, &user.id);

        tracing::info!(
            room = %code,
            user = %user.id,
            players = room.players.len(),
            "player joined"
        );
        Ok(room)
    }

    /// Mints a new invite code for a room. Owner only.
    pub fn create_invite_code(
        &self,
        actor: &UserId,
        code: &RoomCode,
    ) -> Result<InviteCode, RoomError> {
        let mut tables = self.tables.write();
        let room = tables.owned_room_mut(actor, code)?;

        let invite = InviteCode {
            code: generate_id(),
            created_at: SystemTime::now(),
        };
        room.invite_codes.push(invite.clone());
        room.bump_commit();
        self.activity.record_player(code, actor);

        tracing::debug!(room = %code, "invite code created");
        Ok(invite)
    }

    /// Full room snapshot with its games resolved. Members only.
    ///
    /// # Errors
    /// - [`RoomError::RoomNotFound`]
    /// - [`RoomError::NotMember`] unless `user` currently belongs to the room
    pub fn room_state(&self, user: &UserId, code: &RoomCode) -> Result<RoomState, RoomError> {
        let tables = self.tables.read();
        let room = tables.room(code)?;
        if !room.is_member(user) {
            return Err(RoomError::NotMember {
                user: user.clone(),
                room: code.clone(),
            });
        }

        let games = room
            .games
            .iter()
            .filter_map(|id| tables.games.get(id).cloned())
            .collect();
        let state = RoomState {
            room: room.clone(),
            games,
        };
        self.activity.record_player(code, user);
        Ok(state)
    }

    // =====================================================================
    // Games
    // =====================================================================

    /// Starts a new game in a room. Owner only.
    ///
    /// A blank `name` becomes `"Game N"` with `N` one past the number of
    /// games already played.
    ///
    /// # Errors
    /// - [`RoomError::RoomNotFound`]
    /// - [`RoomError::NotOwner`]
    /// - [`RoomError::LimitExceeded`] once the room has `max_games_per_room`
    pub fn create_game(
        &self,
        actor: &UserId,
        code: &RoomCode,
        name: &str,
    ) -> Result<Game, RoomError> {
        let mut guard = self.tables.write();
        let tables = &mut *guard;

        let room = tables.owned_room_mut(actor, code)?;
        if room.games.len() >= self.config.max_games_per_room {
            return Err(RoomError::LimitExceeded("games"));
        }
        let name = if name.trim().is_empty() {
            format!("Game {}", room.games.len() + 1)
        } else {
            name.to_owned()
        };

        let games = &tables.games;
        let id = generate_unique(
            "game id",
            self.config.id_attempts,
            || GameId(generate_id()),
            |id| games.contains_key(id),
        )
        .unwrap_or_else(|fault| fault.abort());

        let game = Game::new(id.clone(), code.clone(), name);
        tables.games.insert(id.clone(), game.clone());

        let room = tables.owned_room_mut(actor, code)?;
        room.games.push(id.clone());
        room.bump_commit();
        self.activity.record_player(code, actor);

        tracing::info!(room = %code, game = %id, "game started");
        Ok(game)
    }

    /// Reveals a game and computes its aggregates. Owner only.
    ///
    /// Completing an already completed game returns it unchanged and does
    /// not bump the commit token.
    pub fn complete_game(&self, actor: &UserId, id: &GameId) -> Result<Game, RoomError> {
        let mut tables = self.tables.write();
        let (room, game) = tables.room_and_game_mut(id)?;
        require_owner(room, actor)?;

        if !game.status.is_completed() {
            game.complete();
            room.bump_commit();
            tracing::info!(
                room = %room.code,
                game = %id,
                max = game.max_score,
                average = game.average_score,
                cards = game.cards.len(),
                "game completed"
            );
        }
        self.activity.record_player(&room.code, actor);
        Ok(game.clone())
    }

    /// Clears all cards and aggregates and reopens the game, whatever its
    /// status. Owner only.
    pub fn reset_game(&self, actor: &UserId, id: &GameId) -> Result<Game, RoomError> {
        let mut tables = self.tables.write();
        let (room, game) = tables.room_and_game_mut(id)?;
        require_owner(room, actor)?;

        game.reset();
        room.bump_commit();
        self.activity.record_player(&room.code, actor);

        tracing::info!(room = %room.code, game = %id, "game reset");
        Ok(game.clone())
    }

    /// Submits `user`'s card, replacing any earlier one.
    ///
    /// # Errors
    /// - [`RoomError::GameNotFound`]
    /// - [`RoomError::GameCompleted`] once the game is revealed
    /// - [`RoomError::NotMember`] unless `user` belongs to the room
    pub fn submit_card(&self, user: &UserId, id: &GameId, score: i32) -> Result<Game, RoomError> {
        let mut tables = self.tables.write();
        let (room, game) = tables.room_and_game_mut(id)?;

        if game.status.is_completed() {
            return Err(RoomError::GameCompleted(id.clone()));
        }
        let player = room.player(user).cloned().ok_or_else(|| RoomError::NotMember {
            user: user.clone(),
            room: room.code.clone(),
        })?;

        game.put_card(Card { player, score });
        room.bump_commit();
        self.activity.record_player(&room.code, user);

        tracing::debug!(room = %room.code, game = %id, %user, "card submitted");
        Ok(game.clone())
    }

    /// Withdraws `user`'s card. Withdrawing a card that is not there is a
    /// silent no-op and leaves the commit token alone.
    ///
    /// # Errors
    /// - [`RoomError::GameNotFound`]
    /// - [`RoomError::GameCompleted`] once the game is revealed
    pub fn withdraw_card(&self, user: &UserId, id: &GameId) -> Result<Game, RoomError> {
        let mut tables = self.tables.write();
        let (room, game) = tables.room_and_game_mut(id)?;

        if game.status.is_completed() {
            return Err(RoomError::GameCompleted(id.clone()));
        }
        if game.drop_card(user) {
            room.bump_commit();
            tracing::debug!(room = %room.code, game = %id, %user, "card withdrawn");
        }
        self.activity.record_player(&room.code, user);
        Ok(game.clone())
    }

    // =====================================================================
    // Expiry
    // =====================================================================

    /// One idle-sweep pass over a room. Returns `false` once the room is
    /// gone, which tells its watcher to stop.
    ///
    /// - No member seen within `room_idle_timeout`: the room and its games
    ///   are deleted.
    /// - Otherwise, non-owner members idle past `player_idle_timeout` are
    ///   removed along with their card in the current game. This step is
    ///   skipped while the current game is completed, so revealed results
    ///   never change because someone wandered off.
    pub fn check_room_activity(&self, code: &RoomCode) -> bool {
        let mut guard = self.tables.write();
        let tables = &mut *guard;

        let Some(room) = tables.rooms.get_mut(code) else {
            return false;
        };

        let members = room.players.iter().map(|p| &p.user_id);
        if !self
            .activity
            .any_active(code, members, self.config.room_idle_timeout)
        {
            tables.remove_room(code);
            self.activity.forget_room(code);
            tracing::info!(room = %code, "idle room deleted");
            return false;
        }

        let current = room.current_game().and_then(|id| tables.games.get_mut(id));
        if current.as_ref().is_some_and(|g| g.status.is_completed()) {
            return true;
        }

        let candidates = room
            .players
            .iter()
            .map(|p| &p.user_id)
            .filter(|user| !room.is_owner(user));
        let idle = self
            .activity
            .idle_members(code, candidates, self.config.player_idle_timeout);
        if idle.is_empty() {
            return true;
        }

        room.players.retain(|p| !idle.contains(&p.user_id));
        if let Some(game) = current {
            for user in &idle {
                game.drop_card(user);
            }
        }
        for user in &idle {
            self.activity.forget_player(code, user);
        }
        room.bump_commit();

        tracing::info!(
            room = %code,
            pruned = idle.len(),
            players = room.players.len(),
            "idle players pruned"
        );
        true
    }

    // =====================================================================
    // Introspection
    // =====================================================================

    /// Returns the number of live rooms.
    pub fn room_count(&self) -> usize {
        self.tables.read().rooms.len()
    }

    /// Returns the number of stored games across all rooms.
    pub fn game_count(&self) -> usize {
        self.tables.read().games.len()
    }

    /// Returns `true` if `code` names a live room.
    pub fn contains_room(&self, code: &RoomCode) -> bool {
        self.tables.read().rooms.contains_key(code)
    }
}

impl Default for RoomStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

fn require_owner(room: &Room, actor: &UserId) -> Result<(), RoomError> {
    if room.is_owner(actor) {
        Ok(())
    } else {
        Err(RoomError::NotOwner {
            user: actor.clone(),
            room: room.code.clone(),
        })
    }
}
