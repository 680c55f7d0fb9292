//! Seed trust rows

use rank_core::{ScoreEntry, UserId};
use serde_json::Value;

use super::scalar::parse_id;

/// Map `[{i, v}]` seed rows; rows with a bad id or a non-finite value are dropped
pub fn map_seed_rows(rows: Vec<Value>) -> (Vec<ScoreEntry>, usize) {
    let mut entries = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for row in rows {
        let id = row.get("i").and_then(parse_id);
        let value = row.get("v").and_then(Value::as_f64).filter(|v| v.is_finite());
        match (id, value) {
            (Some(id), Some(value)) => entries.push(ScoreEntry::new(UserId::new(id), value)),
            _ => skipped += 1,
        }
    }
    (entries, skipped)
}
