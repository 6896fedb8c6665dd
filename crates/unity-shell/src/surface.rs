//! Collaborator traits for the external toolkit.
//!
//! The shell never talks to a widget or web engine directly. A front end
//! implements [`RenderingSurface`] for its web view and [`ShellUi`] for its
//! window, and hands download notifications over as [`DownloadRequest`]s.

use std::path::{Path, PathBuf};

use unity_types::record::EntryId;

use crate::theme::Theme;

/// Load lifecycle signal emitted by the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Load progress in percent. Out-of-range values are clamped.
    Progress(i32),
    /// The current load finished. `ok` is false when the engine reports a
    /// failed load.
    Finished { ok: bool },
    /// The surface committed a navigation to this URL.
    UrlChanged(String),
}

/// The embedded web view.
pub trait RenderingSurface {
    /// Start loading `url`. Completion is reported through events.
    fn load(&mut self, url: &str);

    fn go_back(&mut self);

    fn go_forward(&mut self);

    fn reload(&mut self);

    /// Drain lifecycle events queued since the last call.
    ///
    /// Surfaces that deliver events as direct calls into the controller can
    /// keep the default.
    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        Vec::new()
    }
}

/// A pending download offered by the rendering surface.
pub trait DownloadRequest {
    /// File name proposed by the engine (usually the last URL segment).
    fn suggested_file_name(&self) -> String;

    fn set_path(&mut self, path: &Path);

    fn accept(&mut self);
}

/// Which growable menu an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuKind {
    History,
    Bookmarks,
}

/// The window hosting the toolbar, menus, progress bar and dialogs.
pub trait ShellUi {
    fn set_title(&mut self, title: &str);

    /// Replace the address-bar text.
    fn set_address_text(&mut self, text: &str);

    /// Show or hide the progress indicator.
    fn set_progress(&mut self, visible: bool, percent: u8);

    fn apply_theme(&mut self, theme: Theme);

    /// Append an actionable entry. Activating it must call back into
    /// [`ShellController::activate_entry`](crate::ShellController::activate_entry)
    /// with the same `menu` and `id`.
    fn add_menu_entry(&mut self, menu: MenuKind, id: EntryId, label: &str);

    fn remove_menu_entry(&mut self, menu: MenuKind, id: EntryId);

    /// Modal text prompt. `None` means the user cancelled.
    fn prompt_text(&mut self, title: &str, label: &str) -> Option<String>;

    /// Modal save-file dialog seeded with `suggested`. `None` means cancel.
    fn prompt_save_path(&mut self, suggested: &str) -> Option<PathBuf>;

    /// Non-blocking warning, e.g. a failed write to the session store.
    fn warn(&mut self, message: &str);
}
