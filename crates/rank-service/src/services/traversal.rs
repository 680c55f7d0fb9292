//! Corpus traversal
//!
//! One walk over the message forest produces everything the graph builder and
//! the activity statistics need: a pre-order sequence of visits with parent
//! linkage, the `message_id -> author` index, and per-thread reply counts.
//! The walk uses an explicit stack so arbitrarily deep reply chains are fine.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use rank_core::{Corpus, CorpusShape, Message, MessageId, UserId};

/// One message as seen during the walk
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub message: &'a Message,
    /// Message this one is nested under, if any
    pub parent: Option<&'a Message>,
    /// Top-level message of this thread
    pub root: MessageId,
    /// 0 for top-level messages
    pub depth: usize,
}

impl Visit<'_> {
    #[inline]
    pub fn author(&self) -> Option<UserId> {
        self.message.author_id
    }

    /// Explicit reply or nested comment
    #[inline]
    pub fn is_reply(&self) -> bool {
        self.message.reply_to_id.is_some() || self.depth > 0
    }
}

/// Result of walking one corpus
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex<'a> {
    visits: Vec<Visit<'a>>,
    /// Known message ids; `None` for unattributed messages
    authors: HashMap<MessageId, Option<UserId>>,
    /// Root id -> reply author -> number of replies in that thread
    threads: BTreeMap<MessageId, BTreeMap<UserId, u64>>,
    duplicate_ids: usize,
}

impl<'a> CorpusIndex<'a> {
    /// Walk the corpus, optionally tracking thread participation
    pub fn build(messages: &'a [Message], track_threads: bool) -> Self {
        let mut index = Self::default();
        let mut stack: Vec<Visit<'a>> = messages
            .iter()
            .rev()
            .map(|message| Visit {
                message,
                parent: None,
                root: message.id,
                depth: 0,
            })
            .collect();

        while let Some(visit) = stack.pop() {
            let message = visit.message;

            match index.authors.entry(message.id) {
                Entry::Vacant(slot) => {
                    slot.insert(message.author_id);
                }
                Entry::Occupied(_) => index.duplicate_ids += 1,
            }

            if track_threads && visit.depth > 0 {
                if let Some(author) = message.author_id {
                    *index
                        .threads
                        .entry(visit.root)
                        .or_default()
                        .entry(author)
                        .or_default() += 1;
                }
            }

            stack.extend(message.replies.iter().rev().map(|reply| Visit {
                message: reply,
                parent: Some(message),
                root: visit.root,
                depth: visit.depth + 1,
            }));
            index.visits.push(visit);
        }

        index
    }

    /// Visits in pre-order (each message before its replies, siblings in order)
    pub fn visits(&self) -> &[Visit<'a>] {
        &self.visits
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Whether the id belongs to a message in this corpus
    #[inline]
    pub fn contains(&self, id: MessageId) -> bool {
        self.authors.contains_key(&id)
    }

    /// Author of a known message; `None` when unknown or unattributed
    #[inline]
    pub fn author_of(&self, id: MessageId) -> Option<UserId> {
        self.authors.get(&id).copied().flatten()
    }

    /// Whom a reply confers trust on
    ///
    /// A `reply_to_id` that resolves wins, even to an unattributed message.
    /// Otherwise (absent or dangling) the tree parent's author is used.
    pub fn reply_target(&self, visit: &Visit<'_>) -> Option<UserId> {
        match visit.message.reply_to_id.and_then(|id| self.authors.get(&id)) {
            Some(author) => *author,
            None => visit.parent.and_then(|parent| parent.author_id),
        }
    }

    /// Whose received-reply count a reply increments
    ///
    /// Explicit `reply_to_id` when present (dangling counts for nobody),
    /// tree parent otherwise. Never both.
    pub fn replied_author(&self, visit: &Visit<'_>) -> Option<UserId> {
        match visit.message.reply_to_id {
            Some(id) => self.author_of(id),
            None => visit.parent.and_then(|parent| parent.author_id),
        }
    }

    /// Reply counts per participant, per root post
    pub fn threads(&self) -> &BTreeMap<MessageId, BTreeMap<UserId, u64>> {
        &self.threads
    }

    /// Messages whose id was already seen; the first occurrence is indexed
    pub fn duplicate_ids(&self) -> usize {
        self.duplicate_ids
    }
}

/// Shape-specific traversal behaviour
pub trait CorpusLayout: Send + Sync {
    fn shape(&self) -> CorpusShape;

    /// Whether co-replying under one root post forms a thread
    fn has_threads(&self) -> bool;

    /// Whether reactions name their reactors
    fn tracks_given_reactions(&self) -> bool;

    /// Walk the corpus
    fn walk<'a>(&self, corpus: &'a Corpus) -> CorpusIndex<'a> {
        CorpusIndex::build(&corpus.messages, self.has_threads())
    }
}

/// Group chat export: mostly top-level messages linked by `reply_to_id`,
/// individual reactions
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatChatLayout;

impl CorpusLayout for FlatChatLayout {
    fn shape(&self) -> CorpusShape {
        CorpusShape::Flat
    }

    fn has_threads(&self) -> bool {
        false
    }

    fn tracks_given_reactions(&self) -> bool {
        true
    }
}

/// Channel export: posts with nested comment trees, aggregated reactions
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelLayout;

impl CorpusLayout for ChannelLayout {
    fn shape(&self) -> CorpusShape {
        CorpusShape::Channel
    }

    fn has_threads(&self) -> bool {
        true
    }

    fn tracks_given_reactions(&self) -> bool {
        false
    }
}

/// Layout for a corpus shape
pub fn layout_for(shape: CorpusShape) -> &'static dyn CorpusLayout {
    match shape {
        CorpusShape::Flat => &FlatChatLayout,
        CorpusShape::Channel => &ChannelLayout,
    }
}
