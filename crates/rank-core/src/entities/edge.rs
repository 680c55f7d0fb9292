//! Trust edge entity - one directed grant of reputation

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::UserId;

/// Interaction that produced a trust edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Reaction,
    Reply,
    Mention,
    ThreadParticipation,
}

impl InteractionKind {
    pub const ALL: [Self; 4] = [
        Self::Reaction,
        Self::Reply,
        Self::Mention,
        Self::ThreadParticipation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reaction => "reaction",
            Self::Reply => "reply",
            Self::Mention => "mention",
            Self::ThreadParticipation => "thread_participation",
        }
    }

    /// Configuration key of the weight for this kind
    pub fn weight_key(&self) -> &'static str {
        match self {
            Self::Reaction => "reaction_weight",
            Self::Reply => "reply_weight",
            Self::Mention => "mention_weight",
            Self::ThreadParticipation => "thread_participation_weight",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed weighted edge `source -> target`
///
/// Never a self-loop: construction refuses `source == target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrustEdge {
    pub source: UserId,
    pub target: UserId,
    pub weight: f64,
    pub kind: InteractionKind,
}

impl TrustEdge {
    /// Create an edge, or `None` when it would be a self-loop
    pub fn new(source: UserId, target: UserId, weight: f64, kind: InteractionKind) -> Option<Self> {
        (source != target).then_some(Self {
            source,
            target,
            weight,
            kind,
        })
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Ordered pair key used when summing parallel edges
    #[inline]
    pub fn pair(&self) -> (UserId, UserId) {
        (self.source, self.target)
    }
}
