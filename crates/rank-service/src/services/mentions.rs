//! @mention resolution

use std::collections::HashMap;

use rank_core::{IdentityMap, UserId};

/// Characters stripped from both ends of a mention token
const MENTION_PUNCTUATION: &[char] = &[',', '.', '!', '?', ';', ':'];

/// Reverse `username -> user id` index, built once per community
#[derive(Debug, Clone, Default)]
pub struct MentionIndex {
    by_username: HashMap<String, UserId>,
}

impl MentionIndex {
    /// Index every non-empty username; on duplicates the lowest user id wins
    pub fn build(identities: &IdentityMap) -> Self {
        let mut by_username = HashMap::with_capacity(identities.len());
        // IdentityMap iterates in ascending id order
        for profile in identities.iter() {
            let username = profile.username.trim();
            if !username.is_empty() {
                by_username
                    .entry(username.to_string())
                    .or_insert(profile.user_id);
            }
        }
        Self { by_username }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_username.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_username.is_empty()
    }

    /// Exact, case-sensitive lookup
    #[inline]
    pub fn resolve(&self, username: &str) -> Option<UserId> {
        self.by_username.get(username).copied()
    }
}

/// Whitespace-separated words starting with `@`, without the `@` and surrounding punctuation
pub fn mention_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|word| word.len() > 1)
        .filter_map(|word| word.strip_prefix('@'))
        .map(|username| username.trim_matches(MENTION_PUNCTUATION))
        .filter(|username| !username.is_empty())
}
