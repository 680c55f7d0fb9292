//! Message entity - one post or reply in a crawled corpus

use chrono::{DateTime, Utc};

use crate::value_objects::{MessageId, UserId};

/// Message entity
///
/// Channel corpora nest replies under the post they answer; flat group-chat
/// corpora keep every message at the top level and link replies through
/// `reply_to_id` only.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: MessageId,
    /// `None` for channel-authored announcement posts
    pub author_id: Option<UserId>,
    pub timestamp: DateTime<Utc>,
    pub text: Option<String>,
    pub reply_to_id: Option<MessageId>,
    pub reactions: Vec<Reaction>,
    pub replies: Vec<Message>,
}

impl Message {
    /// Create a new Message with no text, reactions, or replies
    pub fn new(id: MessageId, author_id: Option<UserId>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id,
            author_id,
            timestamp,
            text: None,
            reply_to_id: None,
            reactions: Vec::new(),
            replies: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_reply_to(mut self, reply_to_id: MessageId) -> Self {
        self.reply_to_id = Some(reply_to_id);
        self
    }

    pub fn with_reaction(mut self, reaction: Reaction) -> Self {
        self.reactions.push(reaction);
        self
    }

    pub fn with_reply(mut self, reply: Message) -> Self {
        self.replies.push(reply);
        self
    }

    /// Check if the message has an identifiable author
    #[inline]
    pub fn is_attributed(&self) -> bool {
        self.author_id.is_some()
    }

    /// Check if the message explicitly references another message
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.reply_to_id.is_some()
    }

    /// Text body, empty when absent
    #[inline]
    pub fn body(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Number of messages in this subtree, including this one
    pub fn subtree_len(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(message) = stack.pop() {
            total += 1;
            stack.extend(message.replies.iter());
        }
        total
    }
}

impl Drop for Message {
    // Unnest replies onto a heap stack so dropping a deep chain stays flat
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.replies);
        while let Some(mut message) = stack.pop() {
            stack.append(&mut message.replies);
        }
    }
}

/// Emoji reaction on a message
///
/// Group chats report one record per reacting user (`reactor_id`); broadcast
/// channels only report an aggregated `count` per emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub emoji: String,
    pub reactor_id: Option<UserId>,
    pub count: Option<u64>,
}

impl Reaction {
    /// Reaction by a known user
    pub fn individual(emoji: impl Into<String>, reactor_id: UserId) -> Self {
        Self {
            emoji: emoji.into(),
            reactor_id: Some(reactor_id),
            count: None,
        }
    }

    /// Anonymous aggregated reaction count
    pub fn aggregated(emoji: impl Into<String>, count: u64) -> Self {
        Self {
            emoji: emoji.into(),
            reactor_id: None,
            count: Some(count),
        }
    }

    /// The reacting user, when the record names one
    #[inline]
    pub fn attributable_reactor(&self) -> Option<UserId> {
        self.reactor_id
    }

    /// Number of received reactions this record stands for
    #[inline]
    pub fn received_count(&self) -> u64 {
        self.count.unwrap_or(1)
    }
}
