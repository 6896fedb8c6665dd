//! Indexed in-memory history with optional retention.
//!
//! Entries are kept ordered by their [`EntryId`] (allocation order). A URL
//! map gives constant-time duplicate detection when deduplication is on, and
//! an optional limit drops the oldest entries first.

use std::collections::{BTreeMap, HashMap};

use unity_types::config::HistoryRetention;
use unity_types::record::{EntryId, HistoryEntry};

/// Ordered history entries subject to a [`HistoryRetention`] policy.
#[derive(Debug, Clone, Default)]
pub struct HistoryIndex {
    entries: BTreeMap<EntryId, HistoryEntry>,
    /// Latest entry per URL. Only maintained when `retention.dedup` is set.
    latest: HashMap<String, EntryId>,
    retention: HistoryRetention,
}

impl HistoryIndex {
    pub fn new(retention: HistoryRetention) -> Self {
        Self {
            entries: BTreeMap::new(),
            latest: HashMap::new(),
            retention,
        }
    }

    /// Insert `entry` under `id` and apply retention.
    ///
    /// Returns the ids that were dropped, oldest first. The returned list
    /// contains `id` itself when the limit is zero.
    pub fn push(&mut self, id: EntryId, entry: HistoryEntry) -> Vec<EntryId> {
        let mut dropped = Vec::new();

        if self.retention.dedup {
            if let Some(previous) = self.latest.insert(entry.url.clone(), id) {
                self.entries.remove(&previous);
                dropped.push(previous);
            }
        }
        self.entries.insert(id, entry);

        if let Some(limit) = self.retention.limit {
            while self.entries.len() > limit {
                let Some((old_id, old)) = self.entries.pop_first() else {
                    break;
                };
                if self.latest.get(&old.url) == Some(&old_id) {
                    self.latest.remove(&old.url);
                }
                dropped.push(old_id);
            }
        }

        dropped
    }

    pub fn get(&self, id: EntryId) -> Option<&HistoryEntry> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &HistoryEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Cloned snapshot of the retained entries, oldest first.
    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.values().cloned().collect()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.values().next_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn retention(limit: Option<usize>, dedup: bool) -> HistoryRetention {
        HistoryRetention { limit, dedup }
    }

    fn fill(index: &mut HistoryIndex, urls: &[&str]) -> Vec<EntryId> {
        let mut dropped = Vec::new();
        for (i, url) in urls.iter().enumerate() {
            dropped.extend(index.push(EntryId(i as u64), HistoryEntry::new(*url)));
        }
        dropped
    }

    fn urls(index: &HistoryIndex) -> Vec<String> {
        index.iter().map(|(_, e)| e.url.clone()).collect()
    }

    #[test]
    fn unbounded_keeps_everything_in_order() {
        let mut index = HistoryIndex::default();
        let dropped = fill(&mut index, &["a", "b", "a", "c"]);
        assert!(dropped.is_empty());
        assert_eq!(urls(&index), ["a", "b", "a", "c"]);
        assert_eq!(index.last().map(|e| e.url.as_str()), Some("c"));
    }

    #[test]
    fn dedup_keeps_latest_visit() {
        let mut index = HistoryIndex::new(retention(None, true));
        let dropped = fill(&mut index, &["a", "b", "a", "c"]);
        assert_eq!(dropped, [EntryId(0)]);
        assert_eq!(urls(&index), ["b", "a", "c"]);
        assert!(!index.contains(EntryId(0)));
        assert!(index.contains(EntryId(2)));
    }

    #[test]
    fn limit_drops_oldest_first() {
        let mut index = HistoryIndex::new(retention(Some(2), false));
        let dropped = fill(&mut index, &["a", "b", "c", "d"]);
        assert_eq!(dropped, [EntryId(0), EntryId(1)]);
        assert_eq!(urls(&index), ["c", "d"]);
    }

    #[test]
    fn limit_and_dedup_combine() {
        let mut index = HistoryIndex::new(retention(Some(2), true));
        fill(&mut index, &["a", "b", "a", "c"]);
        assert_eq!(urls(&index), ["a", "c"]);
        assert!(!index.contains(EntryId(1)));
    }

    #[test]
    fn zero_limit_drops_the_new_entry() {
        let mut index = HistoryIndex::new(retention(Some(0), false));
        let dropped = index.push(EntryId(7), HistoryEntry::new("a"));
        assert_eq!(dropped, [EntryId(7)]);
        assert!(index.is_empty());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        fn arb_urls() -> impl Strategy<Value = Vec<String>> {
            proptest::collection::vec("[a-e]".prop_map(|s| format!("https://{s}.com")), 0..40)
        }

        proptest! {
            #[test]
            fn limit_is_never_exceeded(urls in arb_urls(), limit in 0usize..10) {
                let mut index = HistoryIndex::new(retention(Some(limit), false));
                for (i, url) in urls.iter().enumerate() {
                    index.push(EntryId(i as u64), HistoryEntry::new(url.clone()));
                    prop_assert!(index.len() <= limit);
                }
            }

            #[test]
            fn dedup_leaves_unique_urls(urls in arb_urls()) {
                let mut index = HistoryIndex::new(retention(None, true));
                for (i, url) in urls.iter().enumerate() {
                    index.push(EntryId(i as u64), HistoryEntry::new(url.clone()));
                }
                let unique: HashSet<_> = urls.iter().collect();
                prop_assert_eq!(index.len(), unique.len());
                if let Some(last) = urls.last() {
                    prop_assert_eq!(&index.last().unwrap().url, last);
                }
            }
        }
    }
}
