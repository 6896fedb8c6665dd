//! Persistence for the browser session.
//!
//! Three logical streams are kept: an append-only history, an append-only
//! bookmark list and a single home-page value. The [`SessionStore`] trait is
//! the seam the shell talks to; [`FileStore`] backs it with flat text files
//! and [`MemoryStore`] keeps everything in memory.

pub mod file;
pub mod index;
pub mod memory;

pub use file::FileStore;
pub use index::HistoryIndex;
pub use memory::MemoryStore;

use unity_types::error::Result;
use unity_types::record::{Bookmark, HistoryEntry};

/// Durable storage for history, bookmarks and the home page.
///
/// Reads never fail: an unreadable stream is logged and treated as empty.
/// Writes return an error the caller is expected to surface as a warning.
pub trait SessionStore {
    /// Append one committed navigation.
    fn append_history(&mut self, entry: &HistoryEntry) -> Result<()>;

    /// Append one bookmark record.
    fn append_bookmark(&mut self, bookmark: &Bookmark) -> Result<()>;

    /// All history entries, oldest first.
    fn read_all_history(&self) -> Vec<HistoryEntry>;

    /// All well-formed bookmarks, oldest first.
    fn read_all_bookmarks(&self) -> Vec<Bookmark>;

    /// Overwrite the home page.
    fn write_home_page(&mut self, url: &str) -> Result<()>;

    /// The persisted home page, or the store's default when none is set.
    fn read_home_page(&self) -> String;

    /// Rewrite the whole history stream with `entries`.
    fn replace_history(&mut self, entries: &[HistoryEntry]) -> Result<()>;
}

/// Parse a history stream, skipping blank lines.
pub(crate) fn parse_history(text: &str) -> Vec<HistoryEntry> {
    text.lines().filter_map(HistoryEntry::parse_line).collect()
}

/// Parse a bookmark stream. Malformed lines are skipped one at a time.
pub(crate) fn parse_bookmarks(text: &str, source: &str) -> Vec<Bookmark> {
    let mut bookmarks = Vec::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match Bookmark::parse_line(line) {
            Some(bm) => bookmarks.push(bm),
            None => log::warn!("Skipping malformed bookmark at {source} line {}", index + 1),
        }
    }
    bookmarks
}

/// Encode history entries as a complete stream.
pub(crate) fn encode_history(entries: &[HistoryEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(entry.to_line());
        out.push('\n');
    }
    out
}
