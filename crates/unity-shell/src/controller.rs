//! Shell controller: wires toolbar actions and surface events to the
//! session.
//!
//! The controller owns the three collaborators (surface, window, store) and
//! an explicit [`Session`]. It keeps no other state of its own.

use std::path::PathBuf;

use unity_store::SessionStore;
use unity_types::config::ShellConfig;
use unity_types::error::{Result, UnityError};
use unity_types::record::EntryId;

use crate::nav::NavigationState;
use crate::registry::{LoadSummary, Registry};
use crate::resolver::UrlResolver;
use crate::surface::{DownloadRequest, MenuKind, RenderingSurface, ShellUi, SurfaceEvent};
use crate::theme::Theme;

/// Toolbar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Back,
    Forward,
    Reload,
    Home,
    Bookmark,
    ToggleTheme,
    SetHomePage,
}

/// The single session configuration shared by every handler.
#[derive(Debug, Clone)]
pub struct Session {
    pub nav: NavigationState,
    pub registry: Registry,
}

impl Session {
    /// Build a session whose home page comes from `store`.
    pub fn new(config: &ShellConfig, store: &dyn SessionStore) -> Self {
        let mut nav = NavigationState::new(&store.read_home_page());
        if !config.record_failed_loads {
            nav = nav.with_confirmed_recording();
        }
        Self {
            nav,
            registry: Registry::new(config.history.clone()),
        }
    }
}

/// Orchestrates the resolver, navigation state and registry.
pub struct ShellController<R, U, S> {
    window_title: String,
    resolver: UrlResolver,
    session: Session,
    surface: R,
    ui: U,
    store: S,
}

impl<R, U, S> ShellController<R, U, S>
where
    R: RenderingSurface,
    U: ShellUi,
    S: SessionStore,
{
    pub fn new(config: &ShellConfig, surface: R, ui: U, store: S) -> Self {
        let session = Session::new(config, &store);
        Self {
            window_title: config.window_title.clone(),
            resolver: UrlResolver::from_config(config),
            session,
            surface,
            ui,
            store,
        }
    }

    /// Populate the window from the store and load the home page.
    pub fn start(&mut self) -> LoadSummary {
        self.ui.set_title(&self.window_title);
        self.ui.apply_theme(self.session.nav.theme());
        self.ui.set_progress(false, 0);

        let summary = self.session.registry.load_all(&mut self.store, &mut self.ui);
        log::info!(
            "Loaded {} history entries ({} kept) and {} bookmarks",
            summary.history_read,
            summary.history_kept,
            summary.bookmarks
        );

        log::debug!("Searching with {}", self.resolver.search_endpoint());
        log::info!("Opening home page {}", self.session.nav.home_url());
        self.session.nav.navigate_home(&mut self.surface);
        summary
    }

    /// The user pressed enter in the address bar.
    pub fn submit_address(&mut self, raw: &str) {
        let url = self.resolver.resolve(raw);
        self.session.nav.navigate_to(&url, &mut self.surface);
    }

    pub fn trigger(&mut self, action: ToolbarAction) {
        log::debug!("Toolbar action {action:?}");
        match action {
            ToolbarAction::Back => self.surface.go_back(),
            ToolbarAction::Forward => self.surface.go_forward(),
            ToolbarAction::Reload => self.surface.reload(),
            ToolbarAction::Home => self.session.nav.navigate_home(&mut self.surface),
            ToolbarAction::Bookmark => self.prompt_bookmark(),
            ToolbarAction::ToggleTheme => {
                self.toggle_theme();
            },
            ToolbarAction::SetHomePage => self.prompt_home_page(),
        }
    }

    /// Dispatch one lifecycle event from the surface.
    pub fn handle_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Progress(percent) => {
                self.session.nav.on_load_progress(percent);
                self.ui
                    .set_progress(true, self.session.nav.load_progress());
            },
            SurfaceEvent::Finished { ok } => {
                let deferred = self.session.nav.on_load_finished(ok);
                self.ui
                    .set_progress(false, self.session.nav.load_progress());
                if let Some(url) = deferred {
                    self.record(&url);
                }
            },
            SurfaceEvent::UrlChanged(url) => {
                let record = self.session.nav.on_url_changed(&url);
                self.ui.set_address_text(&url);
                if let Some(url) = record {
                    self.record(&url);
                }
            },
        }
    }

    /// Drain and dispatch queued surface events. Returns how many ran.
    pub fn pump(&mut self) -> usize {
        let events = self.surface.poll_events();
        let count = events.len();
        for event in events {
            self.handle_event(event);
        }
        count
    }

    /// A history or bookmark menu entry was activated.
    ///
    /// Returns false when the entry no longer exists.
    pub fn activate_entry(&mut self, menu: MenuKind, id: EntryId) -> bool {
        let Some(url) = self.session.registry.url_for(menu, id).map(str::to_string) else {
            log::warn!("No {menu:?} entry with id {}", id.0);
            return false;
        };
        self.session.nav.navigate_to(&url, &mut self.surface);
        true
    }

    /// Bookmark the committed page under `name`.
    pub fn add_bookmark(&mut self, name: &str) -> Result<EntryId> {
        let url = self.session.nav.current_url().to_string();
        if url.is_empty() {
            return Err(UnityError::InvalidInput(
                "no page has been loaded yet".into(),
            ));
        }
        self.session
            .registry
            .add_bookmark(name, &url, &mut self.store, &mut self.ui)
    }

    pub fn set_home_page(&mut self, url: &str) -> Result<()> {
        self.session.nav.set_home_page(url, &mut self.store)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        let theme = self.session.nav.toggle_theme();
        log::info!("Switched to {} theme", theme.name());
        self.ui.apply_theme(theme);
        theme
    }

    /// Ask the user where to save a download and start it.
    ///
    /// Returns the chosen path, or `None` when the user cancelled and the
    /// request was left untouched.
    pub fn download_requested(&mut self, request: &mut dyn DownloadRequest) -> Option<PathBuf> {
        let suggested = request.suggested_file_name();
        let path = self.ui.prompt_save_path(&suggested)?;
        request.set_path(&path);
        request.accept();
        log::info!("Downloading {suggested} to {}", path.display());
        Some(path)
    }

    fn prompt_bookmark(&mut self) {
        let Some(name) = self
            .ui
            .prompt_text("Bookmark Name", "Enter name for this bookmark:")
        else {
            return;
        };
        let result = self.add_bookmark(&name);
        self.report(result);
    }

    fn prompt_home_page(&mut self) {
        let Some(url) = self
            .ui
            .prompt_text("Set Home Page", "Enter the URL for the home page:")
        else {
            return;
        };
        let result = self.set_home_page(&url);
        self.report(result);
    }

    fn record(&mut self, url: &str) {
        let result = self
            .session
            .registry
            .record(url, &mut self.store, &mut self.ui);
        self.report(result);
    }

    /// Surface a failure as a non-blocking warning.
    fn report<T>(&mut self, result: Result<T>) {
        if let Err(e) = result {
            log::warn!("{e}");
            self.ui.warn(&e.to_string());
        }
    }

    pub fn nav(&self) -> &NavigationState {
        &self.session.nav
    }

    pub fn registry(&self) -> &Registry {
        &self.session.registry
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
