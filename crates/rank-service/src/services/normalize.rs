//! Score normalization onto `[0, 1000]`

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rank_core::{UserId, UserScore};

/// Upper bound of the normalized scale
pub const SCORE_SCALE: f64 = 1000.0;

/// Min-max rescale to `[0, 1000]`, rounded to 2 decimals, highest first
///
/// When every raw score is equal each user gets `1000.0`.
pub fn normalize(raw: &BTreeMap<UserId, f64>) -> Vec<UserScore> {
    let Some((min, max)) = raw.values().fold(None, |bounds: Option<(f64, f64)>, &score| {
        Some(match bounds {
            None => (score, score),
            Some((min, max)) => (min.min(score), max.max(score)),
        })
    }) else {
        return Vec::new();
    };

    let range = max - min;
    let mut scores: Vec<UserScore> = raw
        .iter()
        .map(|(&user, &score)| {
            let normalized = if range > 0.0 {
                round2((score - min) / range * SCORE_SCALE)
            } else {
                SCORE_SCALE
            };
            UserScore::new(user, score, normalized)
        })
        .collect();

    scores.sort_by(rank_order);
    scores
}

/// Highest normalized score first, then lowest user id
pub fn rank_order(a: &UserScore, b: &UserScore) -> Ordering {
    b.normalized_score
        .total_cmp(&a.normalized_score)
        .then_with(|| a.user_id.cmp(&b.user_id))
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
