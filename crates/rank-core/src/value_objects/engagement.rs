//! Engagement constants
//!
//! `engagement = min(1, (reactions + replies * K) / (posts * D))`

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::CorpusShape;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct EngagementConstants {
    /// Worth of one received reply in reactions (K)
    #[validate(range(min = 0.0))]
    pub reply_factor: f64,
    /// Interactions per post that count as full engagement (D)
    #[validate(range(exclusive_min = 0.0))]
    pub post_divisor: f64,
}

impl EngagementConstants {
    pub const CHANNEL: Self = Self::new(2.0, 5.0);
    pub const FLAT: Self = Self::new(1.0, 2.0);

    pub const fn new(reply_factor: f64, post_divisor: f64) -> Self {
        Self {
            reply_factor,
            post_divisor,
        }
    }

    /// Stock constants for a corpus shape
    pub fn for_shape(shape: CorpusShape) -> Self {
        match shape {
            CorpusShape::Flat => Self::FLAT,
            CorpusShape::Channel => Self::CHANNEL,
        }
    }
}
