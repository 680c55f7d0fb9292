//! Edge weighting policy
//!
//! Maps each interaction kind to the trust weight it confers on its target.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::InteractionKind;
use crate::error::DomainError;

/// Share of the reply weight granted to thread co-participation when unset
pub const THREAD_PARTICIPATION_SHARE: f64 = 0.25;

/// Per-interaction trust weights
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeightConfig {
    #[validate(range(min = 0.0))]
    pub reaction_weight: f64,
    #[validate(range(min = 0.0))]
    pub reply_weight: f64,
    #[validate(range(min = 0.0))]
    pub mention_weight: f64,
    #[validate(range(min = 0.0))]
    pub thread_participation_weight: f64,
}

impl WeightConfig {
    /// Weights used when the configuration has no trust section at all
    pub const SECTION_DEFAULT_REACTION: f64 = 30.0;
    pub const SECTION_DEFAULT_REPLY: f64 = 40.0;
    pub const SECTION_DEFAULT_MENTION: f64 = 50.0;

    /// Weights used when a trust section exists but omits a key
    pub const FALLBACK_REACTION: f64 = 1.0;
    pub const FALLBACK_REPLY: f64 = 2.0;
    pub const FALLBACK_MENTION: f64 = 1.5;

    /// Build weights with the thread participation weight derived from the reply weight
    pub fn new(reaction_weight: f64, reply_weight: f64, mention_weight: f64) -> Self {
        Self {
            reaction_weight,
            reply_weight,
            mention_weight,
            thread_participation_weight: Self::default_thread_participation(reply_weight),
        }
    }

    /// Override the thread participation weight
    pub fn with_thread_participation(mut self, weight: f64) -> Self {
        self.thread_participation_weight = weight;
        self
    }

    /// Thread participation is implicit trust, so it defaults to a quarter of a reply
    #[inline]
    pub fn default_thread_participation(reply_weight: f64) -> f64 {
        reply_weight * THREAD_PARTICIPATION_SHARE
    }

    /// Weight conferred by one interaction of the given kind
    #[inline]
    pub fn weight_for(&self, kind: InteractionKind) -> f64 {
        match kind {
            InteractionKind::Reaction => self.reaction_weight,
            InteractionKind::Reply => self.reply_weight,
            InteractionKind::Mention => self.mention_weight,
            InteractionKind::ThreadParticipation => self.thread_participation_weight,
        }
    }

    /// Reject negative or non-finite weights
    pub fn check(&self) -> Result<(), DomainError> {
        for kind in InteractionKind::ALL {
            let value = self.weight_for(kind);
            if !value.is_finite() {
                return Err(DomainError::InvalidWeight {
                    name: kind.weight_key(),
                    value,
                });
            }
        }
        self.validate()
            .map_err(|e| DomainError::ValidationError(e.to_string()))
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self::new(
            Self::SECTION_DEFAULT_REACTION,
            Self::SECTION_DEFAULT_REPLY,
            Self::SECTION_DEFAULT_MENTION,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightConfig::default();
        assert_eq!(weights.reaction_weight, 30.0);
        assert_eq!(weights.reply_weight, 40.0);
        assert_eq!(weights.mention_weight, 50.0);
        assert_eq!(weights.thread_participation_weight, 10.0);
    }

    #[test]
    fn test_thread_participation_derived_from_reply() {
        let weights = WeightConfig::new(1.0, 2.0, 1.5);
        assert_eq!(weights.thread_participation_weight, 0.5);

        let weights = weights.with_thread_participation(3.0);
        assert_eq!(weights.thread_participation_weight, 3.0);
    }

    #[test]
    fn test_weight_for() {
        let weights = WeightConfig::new(1.0, 2.0, 3.0).with_thread_participation(4.0);
        assert_eq!(weights.weight_for(InteractionKind::Reaction), 1.0);
        assert_eq!(weights.weight_for(InteractionKind::Reply), 2.0);
        assert_eq!(weights.weight_for(InteractionKind::Mention), 3.0);
        assert_eq!(weights.weight_for(InteractionKind::ThreadParticipation), 4.0);
    }

    #[test]
    fn test_check_rejects_negative_and_nan() {
        assert!(WeightConfig::default().check().is_ok());
        assert!(WeightConfig::new(0.0, 0.0, 0.0).check().is_ok());

        let negative = WeightConfig::new(-1.0, 2.0, 1.5);
        assert!(negative.check().is_err());

        let nan = WeightConfig::new(1.0, f64::NAN, 1.5);
        let err = nan.check().unwrap_err();
        assert!(matches!(err, DomainError::InvalidWeight { name: "reply_weight", .. }));
    }
}
