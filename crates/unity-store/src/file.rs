//! Flat-file store.
//!
//! Each stream lives in its own text file inside the data directory. The
//! history and bookmark files are only ever appended to, except when
//! retention compacts the history through [`SessionStore::replace_history`].

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use unity_types::config::ShellConfig;
use unity_types::error::{Result, UnityError};
use unity_types::record::{Bookmark, HistoryEntry};

use crate::{SessionStore, encode_history, parse_bookmarks, parse_history};

/// Session store backed by three text files.
#[derive(Debug, Clone)]
pub struct FileStore {
    history_path: PathBuf,
    bookmarks_path: PathBuf,
    home_page_path: PathBuf,
    default_home_url: String,
}

impl FileStore {
    /// Build a store from the configured data directory and file names.
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            history_path: config.history_path(),
            bookmarks_path: config.bookmarks_path(),
            home_page_path: config.home_page_path(),
            default_home_url: config.default_home_url.clone(),
        }
    }

    pub fn history_path(&self) -> &Path {
        &self.history_path
    }

    pub fn bookmarks_path(&self) -> &Path {
        &self.bookmarks_path
    }

    pub fn home_page_path(&self) -> &Path {
        &self.home_page_path
    }
}

/// Read a stream, treating a missing or unreadable file as empty.
///
/// Lines that are not valid UTF-8 are dropped one at a time; the rest of
/// the stream still loads.
fn read_stream(path: &Path) -> Option<String> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("Failed to read {}: {e}", path.display());
            return None;
        },
    };
    Some(decode_lines(&bytes, path))
}

fn decode_lines(bytes: &[u8], path: &Path) -> String {
    let mut text = String::with_capacity(bytes.len());
    for (index, line) in bytes.split(|b| *b == b'\n').enumerate() {
        match std::str::from_utf8(line) {
            Ok(line) => {
                text.push_str(line);
                text.push('\n');
            },
            Err(e) => log::warn!(
                "Skipping undecodable line {} of {}: {e}",
                index + 1,
                path.display()
            ),
        }
    }
    text
}

fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let write = || -> io::Result<()> {
        ensure_parent(path)?;
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")
    };
    write().map_err(|e| {
        UnityError::Store(format!("failed to append to `{}`: {e}", path.display()))
    })
}

impl SessionStore for FileStore {
    fn append_history(&mut self, entry: &HistoryEntry) -> Result<()> {
        append_line(&self.history_path, entry.to_line())
    }

    fn append_bookmark(&mut self, bookmark: &Bookmark) -> Result<()> {
        append_line(&self.bookmarks_path, &bookmark.to_line())
    }

    fn read_all_history(&self) -> Vec<HistoryEntry> {
        read_stream(&self.history_path)
            .map(|text| parse_history(&text))
            .unwrap_or_default()
    }

    fn read_all_bookmarks(&self) -> Vec<Bookmark> {
        let source = self.bookmarks_path.display().to_string();
        read_stream(&self.bookmarks_path)
            .map(|text| parse_bookmarks(&text, &source))
            .unwrap_or_default()
    }

    fn write_home_page(&mut self, url: &str) -> Result<()> {
        let path = &self.home_page_path;
        ensure_parent(path)
            .and_then(|()| fs::write(path, url))
            .map_err(|e| {
                UnityError::Store(format!("failed to write `{}`: {e}", path.display()))
            })
    }

    fn read_home_page(&self) -> String {
        read_stream(&self.home_page_path)
            .map(|text| text.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.default_home_url.clone())
    }

    fn replace_history(&mut self, entries: &[HistoryEntry]) -> Result<()> {
        let path = &self.history_path;
        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp = path.with_file_name(tmp_name);

        ensure_parent(path)
            .and_then(|()| fs::write(&tmp, encode_history(entries)))
            .and_then(|()| fs::rename(&tmp, path))
            .map_err(|e| {
                UnityError::Store(format!("failed to rewrite `{}`: {e}", path.display()))
            })?;
        log::info!(
            "Compacted {} to {} entries",
            path.display(),
            entries.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use unity_types::config::DEFAULT_HOME_URL;

    fn store_in(dir: &TempDir) -> FileStore {
        let config = ShellConfig {
            data_dir: dir.path().to_path_buf(),
            ..ShellConfig::default()
        };
        FileStore::from_config(&config)
    }

    #[test]
    fn empty_directory_reads_as_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.read_all_history().is_empty());
        assert!(store.read_all_bookmarks().is_empty());
        assert_eq!(store.read_home_page(), DEFAULT_HOME_URL);
    }

    #[test]
    fn history_appends_one_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.append_history(&HistoryEntry::new("https://a.com")).unwrap();
        store.append_history(&HistoryEntry::new("https://b.com")).unwrap();

        let text = fs::read_to_string(store.history_path()).unwrap();
        assert_eq!(text, "https://a.com\nhttps://b.com\n");

        let reopened = store_in(&dir);
        let urls: Vec<_> = reopened
            .read_all_history()
            .into_iter()
            .map(|e| e.url)
            .collect();
        assert_eq!(urls, ["https://a.com", "https://b.com"]);
    }

    #[test]
    fn bookmark_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        let bm = Bookmark::new("Name", "http://x").unwrap();
        store.append_bookmark(&bm).unwrap();

        let text = fs::read_to_string(store.bookmarks_path()).unwrap();
        assert_eq!(text, "Name,http://x\n");

        let reopened = store_in(&dir);
        assert_eq!(reopened.read_all_bookmarks(), vec![bm]);
    }

    #[test]
    fn malformed_bookmark_lines_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.bookmarks_path(),
            "Rust,https://rust-lang.org\nno comma at all\nCrates,https://crates.io\n",
        )
        .unwrap();

        let bookmarks = store.read_all_bookmarks();
        assert_eq!(bookmarks.len(), 2);
        assert_eq!(bookmarks[0].name, "Rust");
        assert_eq!(bookmarks[1].name, "Crates");
    }

    #[test]
    fn undecodable_lines_are_skipped_individually() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(
            store.history_path(),
            b"https://a.com\nhttps://b.com\nhttps://bad.test/\xff\nhttps://c.com\n",
        )
        .unwrap();
        fs::write(
            store.bookmarks_path(),
            b"A,https://a.com\nBroken\xfe,https://x.com\nC,https://c.com\n",
        )
        .unwrap();

        let urls: Vec<_> = store
            .read_all_history()
            .into_iter()
            .map(|e| e.url)
            .collect();
        assert_eq!(urls, ["https://a.com", "https://b.com", "https://c.com"]);

        let names: Vec<_> = store
            .read_all_bookmarks()
            .into_iter()
            .map(|b| b.name)
            .collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn home_page_overwrites_and_trims() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.write_home_page("https://first.com").unwrap();
        store.write_home_page("https://example.com").unwrap();
        assert_eq!(store.read_home_page(), "https://example.com");

        fs::write(store.home_page_path(), "  https://padded.com \n").unwrap();
        assert_eq!(store.read_home_page(), "https://padded.com");
    }

    #[test]
    fn blank_home_page_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.home_page_path(), "\n   \n").unwrap();
        assert_eq!(store.read_home_page(), DEFAULT_HOME_URL);
    }

    #[test]
    fn append_failure_is_reported_not_panicked() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        // A directory where the history file should be makes the open fail.
        fs::create_dir(store.history_path()).unwrap();

        let err = store
            .append_history(&HistoryEntry::new("https://a.com"))
            .unwrap_err();
        assert!(matches!(err, UnityError::Store(_)));
        assert!(format!("{err}").contains("history.txt"));
    }

    #[test]
    fn unreadable_stream_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir(store.bookmarks_path()).unwrap();
        assert!(store.read_all_bookmarks().is_empty());
    }

    #[test]
    fn replace_history_rewrites_stream() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        for url in ["https://a.com", "https://b.com", "https://a.com"] {
            store.append_history(&HistoryEntry::new(url)).unwrap();
        }

        store
            .replace_history(&[HistoryEntry::new("https://b.com"), HistoryEntry::new("https://a.com")])
            .unwrap();

        let text = fs::read_to_string(store.history_path()).unwrap();
        assert_eq!(text, "https://b.com\nhttps://a.com\n");
        assert!(!dir.path().join("history.txt.tmp").exists());
    }

    #[test]
    fn nested_data_dir_is_created_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let config = ShellConfig {
            data_dir: dir.path().join("profile").join("default"),
            ..ShellConfig::default()
        };
        let mut store = FileStore::from_config(&config);
        store.append_history(&HistoryEntry::new("https://a.com")).unwrap();
        assert_eq!(store.read_all_history().len(), 1);
    }
}
