//! In-memory session store.
//!
//! Keeps each stream as the same text a [`FileStore`](crate::FileStore)
//! would write, so parsing and malformed-line handling behave identically.
//! Useful for unit tests and private sessions that must not touch disk.

use unity_types::config::DEFAULT_HOME_URL;
use unity_types::error::Result;
use unity_types::record::{Bookmark, HistoryEntry};

use crate::{SessionStore, encode_history, parse_bookmarks, parse_history};

/// A session store that never touches the file system.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    history: String,
    bookmarks: String,
    home_page: Option<String>,
    default_home_url: String,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_default_home(DEFAULT_HOME_URL)
    }

    pub fn with_default_home(url: &str) -> Self {
        Self {
            history: String::new(),
            bookmarks: String::new(),
            home_page: None,
            default_home_url: url.to_string(),
        }
    }

    /// Seed the raw history stream.
    pub fn with_history_text(mut self, text: &str) -> Self {
        self.history = text.to_string();
        self
    }

    /// Seed the raw bookmark stream.
    pub fn with_bookmark_text(mut self, text: &str) -> Self {
        self.bookmarks = text.to_string();
        self
    }

    /// Raw history stream, as it would appear on disk.
    pub fn history_text(&self) -> &str {
        &self.history
    }

    /// Raw bookmark stream, as it would appear on disk.
    pub fn bookmark_text(&self) -> &str {
        &self.bookmarks
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for MemoryStore {
    fn append_history(&mut self, entry: &HistoryEntry) -> Result<()> {
        self.history.push_str(entry.to_line());
        self.history.push('\n');
        Ok(())
    }

    fn append_bookmark(&mut self, bookmark: &Bookmark) -> Result<()> {
        self.bookmarks.push_str(&bookmark.to_line());
        self.bookmarks.push('\n');
        Ok(())
    }

    fn read_all_history(&self) -> Vec<HistoryEntry> {
        parse_history(&self.history)
    }

    fn read_all_bookmarks(&self) -> Vec<Bookmark> {
        parse_bookmarks(&self.bookmarks, "memory")
    }

    fn write_home_page(&mut self, url: &str) -> Result<()> {
        self.home_page = Some(url.to_string());
        Ok(())
    }

    fn read_home_page(&self) -> String {
        self.home_page
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(self.default_home_url.as_str())
            .to_string()
    }

    fn replace_history(&mut self, entries: &[HistoryEntry]) -> Result<()> {
        self.history = encode_history(entries);
        Ok(())
    }
}
