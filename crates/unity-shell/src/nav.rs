//! Navigation state: committed URL, home page, load progress, theme.
//!
//! Requested and committed navigations are kept apart. [`navigate_to`]
//! only asks the surface to load; `current_url` changes when the surface
//! reports [`on_url_changed`].
//!
//! [`navigate_to`]: NavigationState::navigate_to
//! [`on_url_changed`]: NavigationState::on_url_changed

use unity_store::SessionStore;
use unity_types::error::{Result, UnityError};

use crate::surface::RenderingSurface;
use crate::theme::Theme;

/// Load lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
}

/// Where the session is, how loaded the page is and which theme is active.
#[derive(Debug, Clone)]
pub struct NavigationState {
    current_url: String,
    home_url: String,
    load_progress: u8,
    phase: LoadPhase,
    theme: Theme,
    record_failed_loads: bool,
    /// Committed URL waiting for a successful finish before it is recorded.
    unconfirmed: Option<String>,
}

impl NavigationState {
    pub fn new(home_url: &str) -> Self {
        Self {
            current_url: String::new(),
            home_url: home_url.to_string(),
            load_progress: 0,
            phase: LoadPhase::Idle,
            theme: Theme::default(),
            record_failed_loads: true,
            unconfirmed: None,
        }
    }

    /// Record committed URLs only after the load finishes successfully.
    pub fn with_confirmed_recording(mut self) -> Self {
        self.record_failed_loads = false;
        self
    }

    /// Ask the surface to load `url`. `current_url` is left alone until the
    /// surface commits.
    pub fn navigate_to(&mut self, url: &str, surface: &mut dyn RenderingSurface) {
        log::debug!("Navigating to {url}");
        self.phase = LoadPhase::Loading;
        self.load_progress = 0;
        surface.load(url);
    }

    /// Navigate to the home page.
    pub fn navigate_home(&mut self, surface: &mut dyn RenderingSurface) {
        let url = self.home_url.clone();
        self.navigate_to(&url, surface);
    }

    /// The surface committed a navigation.
    ///
    /// Returns the URL to record in history now, or `None` when recording
    /// waits for [`on_load_finished`](Self::on_load_finished). While waiting,
    /// only the last URL committed before the finish is recorded.
    pub fn on_url_changed(&mut self, url: &str) -> Option<String> {
        self.current_url = url.to_string();
        if self.record_failed_loads {
            return Some(url.to_string());
        }
        if let Some(replaced) = self.unconfirmed.replace(url.to_string()) {
            log::debug!("Commit of {replaced} superseded by {url} before the load finished");
        }
        None
    }

    pub fn on_load_progress(&mut self, percent: i32) {
        self.load_progress = percent.clamp(0, 100) as u8;
        self.phase = LoadPhase::Loading;
    }

    /// The current load finished.
    ///
    /// Returns a URL whose recording was deferred until now.
    pub fn on_load_finished(&mut self, ok: bool) -> Option<String> {
        self.phase = LoadPhase::Idle;
        let pending = self.unconfirmed.take();
        if !ok {
            if let Some(url) = &pending {
                log::info!("Load of {url} failed, not recording it");
            }
            return None;
        }
        pending
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Persist and adopt a new home page.
    ///
    /// Blank input is rejected and changes nothing. A store failure is
    /// returned after the in-memory home page has already been updated.
    pub fn set_home_page(&mut self, url: &str, store: &mut dyn SessionStore) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            return Err(UnityError::InvalidInput("home page URL is empty".into()));
        }
        self.home_url = url.to_string();
        log::info!("Home page set to {url}");
        store.write_home_page(url)
    }

    /// Last committed URL, empty before the first commit.
    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    /// Progress of the current load. Only meaningful while loading.
    pub fn load_progress(&self) -> u8 {
        self.load_progress
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn theme_is_dark(&self) -> bool {
        self.theme.is_dark()
    }
}
