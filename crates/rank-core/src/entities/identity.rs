//! Identity entities - who the user ids in a corpus belong to

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::value_objects::UserId;

/// Ids of a community's owners, admins, and moderators
pub type AdminSet = BTreeSet<UserId>;

/// Profile of one community member as reported by the crawler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub bio: String,
}

impl UserProfile {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            username: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            bio: String::new(),
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = bio.into();
        self
    }

    /// Name shown in the UI: full name, then username, then the raw id
    pub fn display_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        if !first.is_empty() || !last.is_empty() {
            format!("{first} {last}").trim().to_string()
        } else if !self.username.trim().is_empty() {
            self.username.trim().to_string()
        } else {
            self.user_id.to_string()
        }
    }
}

/// Mapping from user id to profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityMap {
    profiles: BTreeMap<UserId, UserProfile>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a profile, replacing any previous one for the same id
    pub fn insert(&mut self, profile: UserProfile) {
        self.profiles.insert(profile.user_id, profile);
    }

    pub fn get(&self, user_id: UserId) -> Option<&UserProfile> {
        self.profiles.get(&user_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles in ascending user id order
    pub fn iter(&self) -> impl Iterator<Item = &UserProfile> {
        self.profiles.values()
    }

    /// Display name for any user id, known or not
    pub fn display_name(&self, user_id: UserId) -> String {
        self.get(user_id)
            .map_or_else(|| user_id.to_string(), UserProfile::display_name)
    }

    /// Add admins that never appeared in the identity export.
    ///
    /// Existing profiles win; admin rows carry no bio. Returns how many were added.
    pub fn fill_from_admins<'a>(&mut self, admins: impl IntoIterator<Item = &'a UserProfile>) -> usize {
        let mut added = 0;
        for admin in admins {
            if !self.profiles.contains_key(&admin.user_id) {
                let mut profile = admin.clone();
                profile.bio.clear();
                self.profiles.insert(profile.user_id, profile);
                added += 1;
            }
        }
        added
    }
}

impl FromIterator<UserProfile> for IdentityMap {
    fn from_iter<I: IntoIterator<Item = UserProfile>>(iter: I) -> Self {
        let mut map = Self::new();
        for profile in iter {
            map.insert(profile);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_precedence() {
        let full = UserProfile::new(UserId::new(1))
            .with_username("jdoe")
            .with_name("John", "Doe");
        assert_eq!(full.display_name(), "John Doe");

        let first_only = UserProfile::new(UserId::new(2)).with_name("Ann", "");
        assert_eq!(first_only.display_name(), "Ann");

        let username_only = UserProfile::new(UserId::new(3)).with_username("alice");
        assert_eq!(username_only.display_name(), "alice");

        let bare = UserProfile::new(UserId::new(4));
        assert_eq!(bare.display_name(), "4");
    }

    #[test]
    fn test_display_name_for_unknown_user() {
        let map = IdentityMap::new();
        assert_eq!(map.display_name(UserId::new(77)), "77");
    }

    #[test]
    fn test_fill_from_admins_keeps_existing() {
        let mut map: IdentityMap = vec![UserProfile::new(UserId::new(1))
            .with_username("alice")
            .with_bio("hi")]
        .into_iter()
        .collect();

        let admins = vec![
            UserProfile::new(UserId::new(1)).with_username("alice_admin"),
            UserProfile::new(UserId::new(2))
                .with_username("bob")
                .with_bio("should be dropped"),
        ];

        let added = map.fill_from_admins(&admins);
        assert_eq!(added, 1);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(UserId::new(1)).unwrap().username, "alice");
        assert_eq!(map.get(UserId::new(1)).unwrap().bio, "hi");
        assert_eq!(map.get(UserId::new(2)).unwrap().username, "bob");
        assert_eq!(map.get(UserId::new(2)).unwrap().bio, "");
    }

    #[test]
    fn test_profile_deserialize_defaults() {
        let profile: UserProfile = serde_json::from_str(r#"{"user_id": 5, "username": "eve"}"#).unwrap();
        assert_eq!(profile.user_id, UserId::new(5));
        assert_eq!(profile.username, "eve");
        assert!(profile.first_name.is_empty());
        assert!(profile.bio.is_empty());
    }
}
