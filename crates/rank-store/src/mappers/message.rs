//! Crawled message records -> Message entities

use chrono::{DateTime, Utc};
use rank_core::{DomainError, Message, MessageId, Reaction, UserId};
use serde_json::Value;
use tracing::debug;

use super::scalar::{parse_id, parse_timestamp};
use crate::models::{RawMessage, RawReaction};

/// Messages that survived mapping plus the number of dropped records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedMessages {
    pub messages: Vec<Message>,
    pub skipped: usize,
}

/// Map top-level records
///
/// A malformed record is dropped on its own: its valid replies move up to the
/// nearest surviving ancestor, or become top-level messages, and keep their
/// `reply_to_msg_id`. Nesting is walked with an explicit stack.
pub fn map_messages(records: Vec<Value>) -> MappedMessages {
    let mut mapped = MappedMessages::default();
    let mut top = records.into_iter();
    let mut open: Vec<Frame> = Vec::new();

    loop {
        let next = match open.last_mut() {
            Some(frame) => frame.pending.next(),
            None => top.next(),
        };
        if let Some(record) = next {
            open.push(Frame::open(record));
            continue;
        }

        let Some(frame) = open.pop() else { break };
        let siblings = match open.last_mut() {
            Some(parent) => &mut parent.replies,
            None => &mut mapped.messages,
        };
        frame.close(siblings, &mut mapped.skipped);
    }
    mapped
}

/// A record whose nested replies are still being mapped
struct Frame {
    record: Value,
    pending: std::vec::IntoIter<Value>,
    replies: Vec<Message>,
}

impl Frame {
    fn open(mut record: Value) -> Self {
        let nested = match record.as_object_mut().and_then(|map| map.remove("replies_data")) {
            Some(Value::Array(nested)) => nested,
            _ => Vec::new(),
        };
        Self {
            record,
            replies: Vec::with_capacity(nested.len()),
            pending: nested.into_iter(),
        }
    }

    fn close(self, siblings: &mut Vec<Message>, skipped: &mut usize) {
        match to_message(self.record) {
            Ok(mut message) => {
                message.replies = self.replies;
                siblings.push(message);
            }
            Err(e) => {
                debug!(error = %e, hoisted = self.replies.len(), "Skipping malformed message record");
                *skipped += 1;
                siblings.extend(self.replies);
            }
        }
    }
}

fn to_message(record: Value) -> Result<Message, DomainError> {
    let raw: RawMessage =
        serde_json::from_value(record).map_err(|e| DomainError::SerializationError(e.to_string()))?;
    let (id, timestamp) = required_fields(&raw)?;

    let reactions = raw
        .reactions
        .unwrap_or_default()
        .into_iter()
        .filter_map(map_reaction)
        .collect();

    Ok(Message {
        id: MessageId::new(id),
        author_id: raw.from_id.as_ref().and_then(parse_id).map(UserId::new),
        timestamp,
        text: raw.message,
        reply_to_id: raw.reply_to_msg_id.as_ref().and_then(parse_id).map(MessageId::new),
        reactions,
        replies: Vec::new(),
    })
}

fn required_fields(raw: &RawMessage) -> Result<(i64, DateTime<Utc>), DomainError> {
    let id = raw
        .id
        .as_ref()
        .and_then(parse_id)
        .ok_or_else(|| DomainError::malformed(None, "id"))?;
    let timestamp = raw
        .date
        .as_ref()
        .and_then(parse_timestamp)
        .ok_or_else(|| DomainError::malformed(Some(id), "date"))?;
    Ok((id, timestamp))
}

fn map_reaction(value: Value) -> Option<Reaction> {
    let raw: RawReaction = serde_json::from_value(value).ok()?;
    Some(Reaction {
        emoji: raw.emoji.unwrap_or_default(),
        reactor_id: raw.user_id.as_ref().and_then(parse_id).map(UserId::new),
        count: raw.count,
    })
}
