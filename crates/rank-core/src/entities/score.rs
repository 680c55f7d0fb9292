//! User score entity

use crate::value_objects::UserId;

/// Incoming trust of one user, raw and rescaled to `[0, 1000]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UserScore {
    pub user_id: UserId,
    pub raw_score: f64,
    pub normalized_score: f64,
}

impl UserScore {
    pub fn new(user_id: UserId, raw_score: f64, normalized_score: f64) -> Self {
        Self {
            user_id,
            raw_score,
            normalized_score,
        }
    }
}
