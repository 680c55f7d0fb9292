//! Identity rows -> UserProfile entities

use rank_core::{UserId, UserProfile};
use serde_json::Value;

use super::scalar::parse_id;
use crate::models::UserRow;

/// Map identity or admin rows; rows without a usable user id are counted and dropped
pub fn map_user_rows(rows: Vec<Value>) -> (Vec<UserProfile>, usize) {
    let mut skipped = 0;
    let profiles = rows
        .into_iter()
        .filter_map(|row| {
            let profile = serde_json::from_value::<UserRow>(row)
                .ok()
                .and_then(UserRow::into_profile);
            if profile.is_none() {
                skipped += 1;
            }
            profile
        })
        .collect();
    (profiles, skipped)
}

impl UserRow {
    fn into_profile(self) -> Option<UserProfile> {
        let user_id = self.user_id.as_ref().and_then(parse_id).map(UserId::new)?;
        let clean = |field: Option<String>| field.map(|s| s.trim().to_string()).unwrap_or_default();

        let mut first_name = clean(self.first_name);
        let last_name = clean(self.last_name);
        if first_name.is_empty() && last_name.is_empty() {
            first_name = clean(self.name);
        }

        Some(
            UserProfile::new(user_id)
                .with_username(clean(self.username))
                .with_name(first_name, last_name)
                .with_bio(clean(self.bio)),
        )
    }
}
