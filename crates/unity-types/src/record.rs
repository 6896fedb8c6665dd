//! Persisted browsing records and their flat-file line format.
//!
//! History is stored one URL per line. Bookmarks are stored as `name,url`
//! with no escaping: the first comma splits the record, so a URL may contain
//! commas but a name may not.

use crate::error::{Result, UnityError};

/// Field separator of a bookmark line.
pub const BOOKMARK_SEPARATOR: char = ',';

/// Stable handle of a history or bookmark entry exposed to the UI.
///
/// Handles are allocated in increasing order, so comparing two handles
/// compares their insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryId(pub u64);

/// A single committed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub url: String,
}

impl HistoryEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Parse one history line. Blank lines yield `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let url = line.trim();
        if url.is_empty() {
            return None;
        }
        Some(Self::new(url))
    }

    /// Encode as a history line (without the trailing newline).
    pub fn to_line(&self) -> &str {
        &self.url
    }
}

/// A user-named bookmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bookmark {
    pub name: String,
    pub url: String,
}

impl Bookmark {
    /// Build a bookmark, rejecting values the line format cannot hold.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let url = url.into();
        if url.trim().is_empty() {
            return Err(UnityError::InvalidInput("bookmark URL is empty".into()));
        }
        if name.contains(BOOKMARK_SEPARATOR) {
            return Err(UnityError::InvalidInput(format!(
                "bookmark name must not contain '{BOOKMARK_SEPARATOR}': {name}"
            )));
        }
        if name.contains('\n') || name.contains('\r') || url.contains('\n') || url.contains('\r')
        {
            return Err(UnityError::InvalidInput(
                "bookmark fields must be single-line".into(),
            ));
        }
        Ok(Self { name, url })
    }

    /// Parse one `name,url` line.
    ///
    /// Returns `None` for blank lines, lines without a separator and lines
    /// with an empty URL.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        let (name, url) = line.split_once(BOOKMARK_SEPARATOR)?;
        if url.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            url: url.to_string(),
        })
    }

    /// Encode as a bookmark line (without the trailing newline).
    pub fn to_line(&self) -> String {
        format!("{}{BOOKMARK_SEPARATOR}{}", self.name, self.url)
    }

    /// Menu label: the name, or the URL when the name is blank.
    pub fn label(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.url
        } else {
            &self.name
        }
    }
}
