//! Console implementations of the shell collaborators.
//!
//! There is no web engine behind [`ConsoleSurface`]: every load commits
//! immediately, and back/forward walk a simple visit list.

use std::collections::VecDeque;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use unity_shell::{DownloadRequest, MenuKind, RenderingSurface, ShellUi, SurfaceEvent, Theme};
use unity_types::record::EntryId;

use crate::commands::entry_prefix;

/// A surface that commits every load right away.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    visits: Vec<String>,
    cursor: usize,
    queued: VecDeque<SurfaceEvent>,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn commit(&mut self, url: String) {
        self.queued.push_back(SurfaceEvent::Progress(10));
        self.queued.push_back(SurfaceEvent::UrlChanged(url));
        self.queued.push_back(SurfaceEvent::Progress(100));
        self.queued.push_back(SurfaceEvent::Finished { ok: true });
    }

    fn commit_current(&mut self) {
        if let Some(url) = self.visits.get(self.cursor).cloned() {
            self.commit(url);
        }
    }
}

impl RenderingSurface for ConsoleSurface {
    fn load(&mut self, url: &str) {
        if !self.visits.is_empty() {
            self.visits.truncate(self.cursor + 1);
        }
        self.visits.push(url.to_string());
        self.cursor = self.visits.len() - 1;
        self.commit(url.to_string());
    }

    fn go_back(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.commit_current();
        }
    }

    fn go_forward(&mut self) {
        if self.cursor + 1 < self.visits.len() {
            self.cursor += 1;
            self.commit_current();
        }
    }

    fn reload(&mut self) {
        self.commit_current();
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        self.queued.drain(..).collect()
    }
}

/// A window printed to stdout, with prompts answered from `input`.
pub struct ConsoleUi<I> {
    input: I,
    menus: Vec<(MenuKind, EntryId, String)>,
}

impl<I: BufRead> ConsoleUi<I> {
    pub fn new(input: I) -> Self {
        Self {
            input,
            menus: Vec::new(),
        }
    }

    /// Read one line, without its terminator. `None` at end of input.
    pub fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                None
            },
        }
    }

    /// Menu entries in display order.
    pub fn entries(&self, menu: MenuKind) -> impl Iterator<Item = (EntryId, &str)> {
        self.menus
            .iter()
            .filter(move |(kind, _, _)| *kind == menu)
            .map(|(_, id, label)| (*id, label.as_str()))
    }

    pub fn print_menu(&self, menu: MenuKind) {
        let mut empty = true;
        for (id, label) in self.entries(menu) {
            println!("  {}{}  {label}", entry_prefix(menu), id.0);
            empty = false;
        }
        if empty {
            println!("  (empty)");
        }
    }
}

impl<I: BufRead> ShellUi for ConsoleUi<I> {
    fn set_title(&mut self, title: &str) {
        println!("== {title} ==");
    }

    fn set_address_text(&mut self, text: &str) {
        println!("[{text}]");
    }

    fn set_progress(&mut self, visible: bool, percent: u8) {
        if visible {
            log::debug!("Loading {percent}%");
        }
    }

    fn apply_theme(&mut self, theme: Theme) {
        log::info!("Theme {} ({})", theme.name(), theme.stylesheet());
    }

    fn add_menu_entry(&mut self, menu: MenuKind, id: EntryId, label: &str) {
        self.menus.push((menu, id, label.to_string()));
    }

    fn remove_menu_entry(&mut self, menu: MenuKind, id: EntryId) {
        self.menus
            .retain(|(kind, entry, _)| !(*kind == menu && *entry == id));
    }

    fn prompt_text(&mut self, title: &str, label: &str) -> Option<String> {
        println!("{title}: {label} (empty line cancels)");
        self.read_line().filter(|reply| !reply.is_empty())
    }

    fn prompt_save_path(&mut self, suggested: &str) -> Option<PathBuf> {
        println!("Save File: path for {suggested} (empty line cancels)");
        let reply = self.read_line()?;
        if reply.is_empty() {
            None
        } else {
            Some(PathBuf::from(reply))
        }
    }

    fn warn(&mut self, message: &str) {
        eprintln!("warning: {message}");
    }
}

/// A download offered by the console `download` command.
#[derive(Debug)]
pub struct ConsoleDownload {
    file_name: String,
    path: Option<PathBuf>,
    accepted: bool,
}

impl ConsoleDownload {
    pub fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            path: None,
            accepted: false,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl DownloadRequest for ConsoleDownload {
    fn suggested_file_name(&self) -> String {
        self.file_name.clone()
    }

    fn set_path(&mut self, path: &Path) {
        self.path = Some(path.to_path_buf());
    }

    fn accept(&mut self) {
        self.accepted = true;
    }
}
