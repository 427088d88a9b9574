//! Score aggregation for a revealed game.
//!
//! Scores split into two groups:
//! - numeric (`>= 0`): real estimates
//! - special (`< 0`): "don't know", "infinite", and similar markers
//!
//! | Cards present        | `max_score`              | `average_score`           |
//! |----------------------|--------------------------|---------------------------|
//! | any numeric          | largest numeric score    | mean of numeric, rounded up |
//! | only special         | most negative score      | 0                         |
//! | none                 | 0                        | 0                         |
//!
//! Rounding is always up so the suggested consensus never lands below
//! what the estimates support.

use crate::Card;

/// Aggregates computed over a game's cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Estimate {
    pub max_score: i32,
    pub average_score: i32,
}

/// Computes the aggregates for a set of cards.
///
/// Pure: depends only on the scores, never on card order.
pub fn estimate(cards: &[Card]) -> Estimate {
    let mut max_numeric: Option<i32> = None;
    let mut min_special: Option<i32> = None;
    let mut sum: i64 = 0;
    let mut count: i64 = 0;

    for score in cards.iter().map(|card| card.score) {
        if score >= 0 {
            sum += i64::from(score);
            count += 1;
            max_numeric = Some(max_numeric.map_or(score, |m| m.max(score)));
        } else {
            min_special = Some(min_special.map_or(score, |m| m.min(score)));
        }
    }

    match max_numeric {
        Some(max_score) => Estimate {
            max_score,
            // sum and count are non-negative, so this is a ceiling division.
            // The mean never exceeds max_score, so it fits in an i32.
            average_score: ((sum + count - 1) / count) as i32,
        },
        None => Estimate {
            max_score: min_special.unwrap_or(0),
            average_score: 0,
        },
    }
}
