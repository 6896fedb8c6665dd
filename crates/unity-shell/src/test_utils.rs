//! Shared test utilities for the shell.
//!
//! [`MockSurface`] records every instruction and replays queued events;
//! [`MockUi`] keeps the state a real window would show and answers prompts
//! from pre-loaded replies.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use unity_types::record::EntryId;

use crate::surface::{DownloadRequest, MenuKind, RenderingSurface, ShellUi, SurfaceEvent};
use crate::theme::Theme;

/// An instruction sent to the mock surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Load(String),
    Back,
    Forward,
    Reload,
}

/// A rendering surface that records calls and replays queued events.
#[derive(Debug, Default)]
pub struct MockSurface {
    pub calls: Vec<SurfaceCall>,
    pub queued: VecDeque<SurfaceEvent>,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs passed to `load`, in order.
    pub fn loads(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Load(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_load(&self) -> Option<&str> {
        self.loads().last().copied()
    }

    pub fn queue(&mut self, event: SurfaceEvent) {
        self.queued.push_back(event);
    }

    /// Queue the events of a complete, successful page load.
    pub fn queue_commit(&mut self, url: &str) {
        self.queue(SurfaceEvent::Progress(40));
        self.queue(SurfaceEvent::UrlChanged(url.to_string()));
        self.queue(SurfaceEvent::Progress(100));
        self.queue(SurfaceEvent::Finished { ok: true });
    }
}

impl RenderingSurface for MockSurface {
    fn load(&mut self, url: &str) {
        self.calls.push(SurfaceCall::Load(url.to_string()));
    }

    fn go_back(&mut self) {
        self.calls.push(SurfaceCall::Back);
    }

    fn go_forward(&mut self) {
        self.calls.push(SurfaceCall::Forward);
    }

    fn reload(&mut self) {
        self.calls.push(SurfaceCall::Reload);
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        self.queued.drain(..).collect()
    }
}

/// A window that keeps what it would display.
#[derive(Debug, Default)]
pub struct MockUi {
    pub title: String,
    pub address: String,
    pub progress_visible: bool,
    pub progress: u8,
    pub theme: Theme,
    pub history_menu: Vec<(EntryId, String)>,
    pub bookmark_menu: Vec<(EntryId, String)>,
    pub warnings: Vec<String>,
    /// Replies handed out by `prompt_text`, front first.
    pub text_replies: VecDeque<Option<String>>,
    pub prompts: Vec<String>,
    pub save_path_reply: Option<PathBuf>,
}

impl MockUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply_text(mut self, reply: Option<&str>) -> Self {
        self.text_replies.push_back(reply.map(str::to_string));
        self
    }

    pub fn history_labels(&self) -> Vec<&str> {
        self.history_menu.iter().map(|(_, l)| l.as_str()).collect()
    }

    pub fn bookmark_labels(&self) -> Vec<&str> {
        self.bookmark_menu.iter().map(|(_, l)| l.as_str()).collect()
    }

    fn menu_mut(&mut self, menu: MenuKind) -> &mut Vec<(EntryId, String)> {
        match menu {
            MenuKind::History => &mut self.history_menu,
            MenuKind::Bookmarks => &mut self.bookmark_menu,
        }
    }
}

impl ShellUi for MockUi {
    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_address_text(&mut self, text: &str) {
        self.address = text.to_string();
    }

    fn set_progress(&mut self, visible: bool, percent: u8) {
        self.progress_visible = visible;
        self.progress = percent;
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn add_menu_entry(&mut self, menu: MenuKind, id: EntryId, label: &str) {
        self.menu_mut(menu).push((id, label.to_string()));
    }

    fn remove_menu_entry(&mut self, menu: MenuKind, id: EntryId) {
        self.menu_mut(menu).retain(|(entry, _)| *entry != id);
    }

    fn prompt_text(&mut self, title: &str, _label: &str) -> Option<String> {
        self.prompts.push(title.to_string());
        self.text_replies.pop_front().flatten()
    }

    fn prompt_save_path(&mut self, suggested: &str) -> Option<PathBuf> {
        self.prompts.push(suggested.to_string());
        self.save_path_reply.clone()
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

/// A download notification that records what the shell did with it.
#[derive(Debug, Default)]
pub struct MockDownload {
    pub suggested: String,
    pub path: Option<PathBuf>,
    pub accepted: bool,
}

impl MockDownload {
    pub fn new(suggested: &str) -> Self {
        Self {
            suggested: suggested.to_string(),
            ..Self::default()
        }
    }
}

impl DownloadRequest for MockDownload {
    fn suggested_file_name(&self) -> String {
        self.suggested.clone()
    }

    fn set_path(&mut self, path: &Path) {
        self.path = Some(path.to_path_buf());
    }

    fn accept(&mut self) {
        self.accepted = true;
    }
}
