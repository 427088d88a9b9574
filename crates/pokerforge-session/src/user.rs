//! The user record.

use pokerforge_protocol::UserId;

/// A registered participant.
///
/// Users exist independently of rooms: one user can own some rooms and be
/// a member of others, under the same identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Generated at registration.
    pub id: UserId,
    /// Display name, already trimmed and non-blank.
    pub name: String,
}
