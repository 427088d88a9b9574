//! Last-seen bookkeeping for rooms, users, and room members.
//!
//! The tracker only answers "how long since X was seen?". It never touches
//! rooms or games; the store reads it during a sweep and acts on the
//! answer itself.
//!
//! Lock order: callers may hold the store lock while calling in here,
//! never the other way round.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use pokerforge_protocol::{RoomCode, UserId};

#[derive(Default)]
struct Timestamps {
    rooms: HashMap<RoomCode, Instant>,
    users: HashMap<UserId, Instant>,
    players: HashMap<(RoomCode, UserId), Instant>,
}

/// Records when rooms, users, and (room, user) pairs were last active.
#[derive(Default)]
pub struct ActivityTracker {
    inner: Mutex<Timestamps>,
}

impl ActivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `user` as seen, independent of any room.
    pub fn record_user(&self, user: &UserId) {
        self.inner.lock().users.insert(user.clone(), Instant::now());
    }

    /// Marks `user` as seen in `room`. Also refreshes the room and the user.
    pub fn record_player(&self, room: &RoomCode, user: &UserId) {
        let now = Instant::now();
        let mut ts = self.inner.lock();
        ts.rooms.insert(room.clone(), now);
        ts.users.insert(user.clone(), now);
        ts.players.insert((room.clone(), user.clone()), now);
    }

    pub fn last_user_activity(&self, user: &UserId) -> Option<Instant> {
        self.inner.lock().users.get(user).copied()
    }

    pub fn last_room_activity(&self, room: &RoomCode) -> Option<Instant> {
        self.inner.lock().rooms.get(room).copied()
    }

    pub fn last_player_activity(&self, room: &RoomCode, user: &UserId) -> Option<Instant> {
        self.inner
            .lock()
            .players
            .get(&(room.clone(), user.clone()))
            .copied()
    }

    /// `true` if at least one of `members` was seen in `room` within
    /// `timeout`. A room with no members is never active.
    pub fn any_active<'a>(
        &self,
        room: &RoomCode,
        members: impl IntoIterator<Item = &'a UserId>,
        timeout: Duration,
    ) -> bool {
        let ts = self.inner.lock();
        members.into_iter().any(|user| {
            ts.players
                .get(&(room.clone(), user.clone()))
                .is_some_and(|seen| seen.elapsed() < timeout)
        })
    }

    /// The subset of `members` not seen in `room` within `timeout`.
    /// Members with no record at all count as idle.
    pub fn idle_members<'a>(
        &self,
        room: &RoomCode,
        members: impl IntoIterator<Item = &'a UserId>,
        timeout: Duration,
    ) -> Vec<UserId> {
        let ts = self.inner.lock();
        members
            .into_iter()
            .filter(|user| {
                ts.players
                    .get(&(room.clone(), (*user).clone()))
                    .is_none_or(|seen| seen.elapsed() >= timeout)
            })
            .cloned()
            .collect()
    }

    /// Drops `user`'s record for `room`.
    pub fn forget_player(&self, room: &RoomCode, user: &UserId) {
        self.inner.lock().players.remove(&(room.clone(), user.clone()));
    }

    /// Drops every record tied to `room`.
    pub fn forget_room(&self, room: &RoomCode) {
        let mut ts = self.inner.lock();
        ts.rooms.remove(room);
        ts.players.retain(|(r, _), _| r != room);
    }
}
