//! History and bookmark registry.
//!
//! Entries are kept as data. Every entry gets an [`EntryId`] and the UI menu
//! item is bound to that id; activating it looks the URL up here.

use unity_store::{HistoryIndex, SessionStore};
use unity_types::config::HistoryRetention;
use unity_types::error::Result;
use unity_types::record::{Bookmark, EntryId, HistoryEntry};

use crate::surface::{MenuKind, ShellUi};

/// Counts reported by [`Registry::load_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// History entries found in the store.
    pub history_read: usize,
    /// History entries kept after retention.
    pub history_kept: usize,
    pub bookmarks: usize,
}

/// In-memory history and bookmarks, mirrored to a store and a UI.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    history: HistoryIndex,
    bookmarks: Vec<(EntryId, Bookmark)>,
    next_id: u64,
}

impl Registry {
    pub fn new(retention: HistoryRetention) -> Self {
        Self {
            history: HistoryIndex::new(retention),
            bookmarks: Vec::new(),
            next_id: 0,
        }
    }

    fn allocate_id(&mut self) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Record a committed navigation.
    ///
    /// The entry is added to memory and the history menu before it is
    /// persisted, so a store error leaves the session usable.
    pub fn record(
        &mut self,
        url: &str,
        store: &mut dyn SessionStore,
        ui: &mut dyn ShellUi,
    ) -> Result<EntryId> {
        let entry = HistoryEntry::new(url);
        let id = self.allocate_id();
        let dropped = self.history.push(id, entry.clone());
        for old in dropped.iter().filter(|old| **old != id) {
            ui.remove_menu_entry(MenuKind::History, *old);
        }
        if self.history.contains(id) {
            ui.add_menu_entry(MenuKind::History, id, url);
        }
        store.append_history(&entry)?;
        Ok(id)
    }

    /// Add a user-named bookmark.
    ///
    /// Invalid names or URLs are rejected before anything changes. A store
    /// error is returned after the bookmark is already in the menu.
    pub fn add_bookmark(
        &mut self,
        name: &str,
        url: &str,
        store: &mut dyn SessionStore,
        ui: &mut dyn ShellUi,
    ) -> Result<EntryId> {
        let bookmark = Bookmark::new(name, url)?;
        let id = self.allocate_id();
        ui.add_menu_entry(MenuKind::Bookmarks, id, bookmark.label());
        let persisted = store.append_bookmark(&bookmark);
        self.bookmarks.push((id, bookmark));
        persisted?;
        Ok(id)
    }

    /// Replay persisted history and bookmarks into memory and the UI,
    /// oldest first. Meant to run once at startup.
    ///
    /// When retention drops persisted history, the store is compacted to
    /// what was kept.
    pub fn load_all(&mut self, store: &mut dyn SessionStore, ui: &mut dyn ShellUi) -> LoadSummary {
        let persisted = store.read_all_history();
        let history_read = persisted.len();
        for entry in persisted {
            let id = self.allocate_id();
            self.history.push(id, entry);
        }
        for (id, entry) in self.history.iter() {
            ui.add_menu_entry(MenuKind::History, id, &entry.url);
        }
        let history_kept = self.history.len();
        if history_kept < history_read {
            if let Err(e) = store.replace_history(&self.history.to_vec()) {
                log::warn!("History compaction failed: {e}");
            }
        }

        let bookmarks = store.read_all_bookmarks();
        let bookmark_count = bookmarks.len();
        for bookmark in bookmarks {
            let id = self.allocate_id();
            ui.add_menu_entry(MenuKind::Bookmarks, id, bookmark.label());
            self.bookmarks.push((id, bookmark));
        }

        LoadSummary {
            history_read,
            history_kept,
            bookmarks: bookmark_count,
        }
    }

    pub fn history_url(&self, id: EntryId) -> Option<&str> {
        self.history.get(id).map(|e| e.url.as_str())
    }

    pub fn bookmark_url(&self, id: EntryId) -> Option<&str> {
        self.bookmarks
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, bm)| bm.url.as_str())
    }

    /// Target URL of a menu entry.
    pub fn url_for(&self, menu: MenuKind, id: EntryId) -> Option<&str> {
        match menu {
            MenuKind::History => self.history_url(id),
            MenuKind::Bookmarks => self.bookmark_url(id),
        }
    }

    pub fn history(&self) -> &HistoryIndex {
        &self.history
    }

    pub fn bookmarks(&self) -> impl Iterator<Item = &Bookmark> {
        self.bookmarks.iter().map(|(_, bm)| bm)
    }

    pub fn bookmark_count(&self) -> usize {
        self.bookmarks.len()
    }
}
