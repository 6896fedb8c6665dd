//! Shell configuration (`unity.toml`).
//!
//! Every field has a default, so an absent file or an empty table yields the
//! stock behaviour of the browser.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, UnityError};

/// Name of the optional configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "unity.toml";

/// Home page used until the user sets one.
pub const DEFAULT_HOME_URL: &str = "https://unitybrowser.my.canva.site/";

/// Search endpoint the raw address-bar text is appended to.
pub const DEFAULT_SEARCH_ENDPOINT: &str = "https://www.google.com/search?q=";

/// History retention policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HistoryRetention {
    /// Keep at most this many entries (oldest dropped first).
    pub limit: Option<usize>,
    /// Keep only the latest visit of each URL.
    pub dedup: bool,
}

impl HistoryRetention {
    /// Whether the policy ever drops entries.
    pub fn is_unbounded(&self) -> bool {
        self.limit.is_none() && !self.dedup
    }
}

/// File names of the three persisted streams.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StoreFiles {
    pub history: String,
    pub bookmarks: String,
    pub home_page: String,
}

impl Default for StoreFiles {
    fn default() -> Self {
        Self {
            history: "history.txt".to_string(),
            bookmarks: "bookmarks.txt".to_string(),
            home_page: "home_page.txt".to_string(),
        }
    }
}

/// Top-level shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Main window title.
    pub window_title: String,
    /// Home page used when none has been persisted.
    pub default_home_url: String,
    /// Prefix of search URLs built from non-URL input.
    pub search_endpoint: String,
    /// Directory holding the persisted streams. Relative paths resolve
    /// against the process working directory.
    pub data_dir: PathBuf,
    pub files: StoreFiles,
    pub history: HistoryRetention,
    /// Record a URL as soon as the surface reports it, even if the load
    /// later fails. When false, recording waits for a successful finish.
    pub record_failed_loads: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            window_title: "Unity Browser".to_string(),
            default_home_url: DEFAULT_HOME_URL.to_string(),
            search_endpoint: DEFAULT_SEARCH_ENDPOINT.to_string(),
            data_dir: PathBuf::from("."),
            files: StoreFiles::default(),
            history: HistoryRetention::default(),
            record_failed_loads: true,
        }
    }
}

impl ShellConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Each stream needs its own non-empty file name.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("history", &self.files.history),
            ("bookmarks", &self.files.bookmarks),
            ("home_page", &self.files.home_page),
        ];
        for (i, (key, name)) in names.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(UnityError::Config(format!("files.{key} is empty")));
            }
            if let Some((other, _)) = names[..i].iter().find(|(_, n)| n == name) {
                return Err(UnityError::Config(format!(
                    "files.{key} and files.{other} both use `{name}`"
                )));
            }
        }
        Ok(())
    }

    /// Load `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let config = Self::from_toml_str(&text)?;
                log::info!("Loaded config from {}", path.display());
                Ok(config)
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            },
            Err(e) => Err(e.into()),
        }
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.history)
    }

    pub fn bookmarks_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.bookmarks)
    }

    pub fn home_page_path(&self) -> PathBuf {
        self.data_dir.join(&self.files.home_page)
    }
}
