//! Readiness score calculation.
//!
//! Sleep quality and mood count as-is, muscle soreness is inverted
//! (`11 - soreness`) so every component is "higher is better". The sum of the
//! three (3..=30) is scaled to 0..=100 with truncation.

use serde::Serialize;

use crate::bands::Tier;
use crate::entry::{Entry, Rating};

/// Highest possible component sum.
const MAX_TOTAL: u32 = 30;

/// Derived readiness of one entry. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Readiness {
    pub score: u8,
    pub tier: Tier,
    pub label: &'static str,
}

/// Score, tier and label for an entry.
pub fn compute_readiness(entry: &Entry) -> Readiness {
    let score = readiness_score(entry.sleep_quality, entry.mood, entry.muscle_soreness);
    let tier = Tier::for_score(score);
    Readiness {
        score,
        tier,
        label: tier.label(),
    }
}

/// `floor((sleep + mood + (11 - soreness)) / 30 * 100)`.
pub fn readiness_score(sleep_quality: Rating, mood: Rating, muscle_soreness: Rating) -> u8 {
    let soreness_points = 11 - u32::from(muscle_soreness.get());
    let total = u32::from(sleep_quality.get()) + u32::from(mood.get()) + soreness_points;
    // Integer division truncates, matching floor for non-negative totals.
    (total * 100 / MAX_TOTAL) as u8
}
