//! Test fixtures and data generators
//!
//! Domain builders for in-memory runs and crawler-format records for
//! filesystem runs.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rank_core::{Message, MessageId, Reaction, UserId, UserProfile};
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Community id that no other test uses
pub fn unique_community() -> String {
    format!("community{}", unique_suffix())
}

pub fn uid(id: i64) -> UserId {
    UserId::new(id)
}

pub fn mid(id: i64) -> MessageId {
    MessageId::new(id)
}

/// Fixed base time plus `minutes`
pub fn at(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap() + Duration::minutes(minutes)
}

/// Message by `author` (or unattributed) posted `id` minutes after the base time
pub fn message(id: i64, author: Option<i64>) -> Message {
    Message::new(mid(id), author.map(uid), at(id))
}

pub fn reaction_by(reactor: i64) -> Reaction {
    Reaction::individual("👍", uid(reactor))
}

pub fn profile(id: i64, username: &str) -> UserProfile {
    UserProfile::new(uid(id)).with_username(username)
}

/// The canonical channel thread: an unattributed post with a comment by 100
/// (reacted to by 200) and a comment by 200 replying to it
pub fn channel_thread() -> Message {
    message(1, None)
        .with_reply(message(2, Some(100)).with_reaction(reaction_by(200)))
        .with_reply(message(3, Some(200)).with_reply_to(mid(2)))
}

// ============================================================================
// Crawler-format records
// ============================================================================

/// One message record as the crawler writes it
#[derive(Debug, Clone, Serialize)]
pub struct RecordFixture {
    pub id: i64,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_msg_id: Option<i64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reactions: Vec<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub replies_data: Vec<RecordFixture>,
}

impl RecordFixture {
    pub fn new(id: i64, author: Option<i64>) -> Self {
        Self {
            id,
            date: at(id).to_rfc3339(),
            from_id: author.map(|a| serde_json::json!({ "user_id": a })),
            message: None,
            reply_to_msg_id: None,
            reactions: Vec::new(),
            replies_data: Vec::new(),
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.message = Some(text.to_string());
        self
    }

    pub fn reply_to(mut self, id: i64) -> Self {
        self.reply_to_msg_id = Some(id);
        self
    }

    pub fn reacted_by(mut self, reactor: i64) -> Self {
        self.reactions
            .push(serde_json::json!({ "emoji": "👍", "user_id": reactor }));
        self
    }

    pub fn reaction_count(mut self, count: u64) -> Self {
        self.reactions
            .push(serde_json::json!({ "emoji": "🔥", "count": count }));
        self
    }

    pub fn comment(mut self, reply: RecordFixture) -> Self {
        self.replies_data.push(reply);
        self
    }
}

/// Identity row as exported by the crawler
pub fn user_row(id: i64, username: &str, first: &str, last: &str) -> Value {
    serde_json::json!({
        "user_id": id,
        "username": username,
        "first_name": first,
        "last_name": last,
        "bio": format!("bio of {username}"),
    })
}
