//! Corpus entity - every message crawled for one community

use serde::{Deserialize, Serialize};
use std::fmt;

use super::message::Message;
use crate::error::DomainError;

/// Layout of a crawled corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusShape {
    /// Group chat: one flat list, replies linked by `reply_to_id`
    Flat,
    /// Broadcast channel: announcement posts with nested reply trees
    #[default]
    Channel,
}

impl CorpusShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Channel => "channel",
        }
    }

    /// Whether reactions in this layout name their reactor
    #[inline]
    pub fn has_individual_reactions(&self) -> bool {
        matches!(self, Self::Flat)
    }
}

impl fmt::Display for CorpusShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CorpusShape {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" | "group" | "chat" => Ok(Self::Flat),
            "channel" => Ok(Self::Channel),
            other => Err(DomainError::UnknownShape(other.to_string())),
        }
    }
}

/// Corpus of one community, immutable during processing
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    pub community_id: String,
    pub shape: CorpusShape,
    /// Top-level messages in crawl order
    pub messages: Vec<Message>,
    /// Records dropped while loading because a required field was missing
    pub skipped_records: usize,
}

impl Corpus {
    pub fn new(community_id: impl Into<String>, shape: CorpusShape, messages: Vec<Message>) -> Self {
        Self {
            community_id: community_id.into(),
            shape,
            messages,
            skipped_records: 0,
        }
    }

    /// Empty corpus for a community with no crawled messages
    pub fn empty(community_id: impl Into<String>, shape: CorpusShape) -> Self {
        Self::new(community_id, shape, Vec::new())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Total number of messages, nested replies included
    pub fn total_messages(&self) -> usize {
        self.messages.iter().map(Message::subtree_len).sum()
    }
}
