//! Trust weight configuration
//!
//! Two tiers of defaults: a missing `[trust]` section falls back to
//! 30/40/50, while a present section with a missing key falls back to
//! 1.0/2.0/1.5. Thread participation always falls back to a quarter of the
//! resolved reply weight.

use rank_core::{InteractionKind, WeightConfig};
use serde::Deserialize;

/// Raw `[trust]` section, accepting both `*_points` and `*_weight` keys
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrustConfig {
    #[serde(default, alias = "reaction_points")]
    pub reaction_weight: Option<f64>,
    #[serde(default, alias = "reply_points")]
    pub reply_weight: Option<f64>,
    #[serde(default, alias = "mention_points")]
    pub mention_weight: Option<f64>,
    #[serde(default, alias = "thread_participation_points")]
    pub thread_participation_weight: Option<f64>,
}

/// Why a weight was substituted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DefaultReason {
    SectionMissing,
    KeyMissing,
    /// Negative or non-finite value that was configured
    Invalid(f64),
}

/// One substituted weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultedWeight {
    pub key: &'static str,
    pub value: f64,
    pub reason: DefaultReason,
}

/// Effective weights plus every substitution made to get them
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWeights {
    pub weights: WeightConfig,
    pub defaulted: Vec<DefaultedWeight>,
}

impl ResolvedWeights {
    /// Resolve an optional `[trust]` section
    pub fn resolve(section: Option<&TrustConfig>) -> Self {
        let mut defaulted = Vec::new();

        let (reaction, reply, mention, thread) = match section {
            None => {
                let reaction = WeightConfig::SECTION_DEFAULT_REACTION;
                let reply = WeightConfig::SECTION_DEFAULT_REPLY;
                let mention = WeightConfig::SECTION_DEFAULT_MENTION;
                let thread = WeightConfig::default_thread_participation(reply);
                for (kind, value) in [
                    (InteractionKind::Reaction, reaction),
                    (InteractionKind::Reply, reply),
                    (InteractionKind::Mention, mention),
                    (InteractionKind::ThreadParticipation, thread),
                ] {
                    defaulted.push(DefaultedWeight {
                        key: kind.weight_key(),
                        value,
                        reason: DefaultReason::SectionMissing,
                    });
                }
                (reaction, reply, mention, thread)
            }
            Some(trust) => {
                let reaction = pick(
                    InteractionKind::Reaction,
                    trust.reaction_weight,
                    WeightConfig::FALLBACK_REACTION,
                    &mut defaulted,
                );
                let reply = pick(
                    InteractionKind::Reply,
                    trust.reply_weight,
                    WeightConfig::FALLBACK_REPLY,
                    &mut defaulted,
                );
                let mention = pick(
                    InteractionKind::Mention,
                    trust.mention_weight,
                    WeightConfig::FALLBACK_MENTION,
                    &mut defaulted,
                );
                let thread = pick(
                    InteractionKind::ThreadParticipation,
                    trust.thread_participation_weight,
                    WeightConfig::default_thread_participation(reply),
                    &mut defaulted,
                );
                (reaction, reply, mention, thread)
            }
        };

        Self {
            weights: WeightConfig::new(reaction, reply, mention).with_thread_participation(thread),
            defaulted,
        }
    }

    #[inline]
    pub fn is_fully_configured(&self) -> bool {
        self.defaulted.is_empty()
    }
}

fn pick(
    kind: InteractionKind,
    configured: Option<f64>,
    fallback: f64,
    defaulted: &mut Vec<DefaultedWeight>,
) -> f64 {
    let reason = match configured {
        Some(value) if value.is_finite() && value >= 0.0 => return value,
        Some(value) => DefaultReason::Invalid(value),
        None => DefaultReason::KeyMissing,
    };
    defaulted.push(DefaultedWeight {
        key: kind.weight_key(),
        value: fallback,
        reason,
    });
    fallback
}
