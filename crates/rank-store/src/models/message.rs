//! Crawled message record

use serde::Deserialize;
use serde_json::Value;

/// One crawled message
///
/// Channel posts nest their comments under `replies_data`; the mapper detaches
/// that array before reading the rest of the record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    /// Integer, numeric string, or a peer object carrying `user_id`
    #[serde(default)]
    pub from_id: Option<Value>,
    #[serde(default, alias = "text")]
    pub message: Option<String>,
    #[serde(default)]
    pub reply_to_msg_id: Option<Value>,
    #[serde(default)]
    pub reactions: Option<Vec<Value>>,
}

/// Reaction record: individual (`user_id`) or aggregated (`count`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReaction {
    #[serde(default, alias = "reaction")]
    pub emoji: Option<String>,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub count: Option<u64>,
}
