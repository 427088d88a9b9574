//! Identifier generation.
//!
//! Two shapes:
//! - opaque ids: 128 random bits as 32 lowercase hex chars. Used for users,
//!   games, commit tokens, and access tokens.
//! - room codes: a few lowercase letters. Easy to read and type, but the
//!   space is small enough that callers must check for collisions.

use rand::Rng;

use crate::RoomCode;

/// Alphabet for public room codes.
const ROOM_CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Bounded-retry generation ran out of attempts.
///
/// This is not a user-facing error. It means the id space is exhausted or
/// the generator is broken, and the process should not keep serving.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no unique {kind} after {attempts} attempts")]
pub struct IdSpaceExhausted {
    /// What was being generated ("room code", "game id", ...).
    pub kind: &'static str,
    /// How many candidates were tried.
    pub attempts: u32,
}

impl IdSpaceExhausted {
    /// Logs the fault and aborts the process.
    ///
    /// Callers hold a store lock when this fires. The process stops and is
    /// restarted by its supervisor rather than unwinding out of the
    /// critical section.
    pub fn abort(self) -> ! {
        tracing::error!(kind = self.kind, attempts = self.attempts, "id space exhausted, aborting");
        std::process::abort()
    }
}

/// Generates a 32-character hex string (128 bits of entropy).
pub fn generate_id() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Generates a room code of `len` lowercase ASCII letters.
pub fn generate_room_code(len: usize) -> RoomCode {
    let mut rng = rand::rng();
    let code = (0..len)
        .map(|_| {
            let idx = rng.random_range(0..ROOM_CODE_ALPHABET.len());
            ROOM_CODE_ALPHABET[idx] as char
        })
        .collect::<String>();
    RoomCode(code)
}

/// Draws candidates from `generate` until one is not `taken`.
///
/// Gives up after `attempts` candidates and returns [`IdSpaceExhausted`].
pub fn generate_unique<T>(
    kind: &'static str,
    attempts: u32,
    mut generate: impl FnMut() -> T,
    mut taken: impl FnMut(&T) -> bool,
) -> Result<T, IdSpaceExhausted> {
    for attempt in 0..attempts {
        let candidate = generate();
        if !taken(&candidate) {
            return Ok(candidate);
        }
        tracing::debug!(kind, attempt, "id collision, regenerating");
    }
    Err(IdSpaceExhausted { kind, attempts })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_32_hex_chars() {
        let id = generate_id();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_id_differs_between_calls() {
        assert_ne!(generate_id(), generate_id());
    }

    #[test]
    fn test_generate_room_code_uses_lowercase_letters() {
        let code = generate_room_code(10);
        assert_eq!(code.as_str().len(), 10);
        assert!(code.as_str().chars().all(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn test_generate_unique_skips_taken_candidates() {
        let mut next = 0;
        let value = generate_unique(
            "number",
            10,
            || {
                next += 1;
                next
            },
            |n| *n < 3,
        )
        .unwrap();
        assert_eq!(value, 3);
    }

    #[test]
    fn test_generate_unique_exhausted_returns_fault() {
        let mut calls = 0;
        let result = generate_unique(
            "room code",
            5,
            || {
                calls += 1;
                RoomCode::from("aaaaa")
            },
            |_| true,
        );
        assert_eq!(
            result,
            Err(IdSpaceExhausted {
                kind: "room code",
                attempts: 5
            })
        );
        assert_eq!(calls, 5);
    }
}
