//! Scalar field parsing shared by the mappers

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Integer id from a number, a numeric string, or a peer object
///
/// Peer objects look like `{"_": "PeerUser", "user_id": 42}`.
pub fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_u64().and_then(|u| i64::try_from(u).ok())),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => ["user_id", "channel_id", "id"]
            .iter()
            .find_map(|key| map.get(*key))
            .and_then(parse_id),
        _ => None,
    }
}

/// Timestamp from RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]` (UTC), or epoch seconds
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.with_timezone(&Utc))
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
                        .ok()
                        .map(|naive| naive.and_utc())
                })
        }
        Value::Number(n) => n.as_i64().and_then(|secs| DateTime::from_timestamp(secs, 0)),
        _ => None,
    }
}
