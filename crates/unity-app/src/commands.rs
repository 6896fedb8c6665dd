//! Console command parsing.
//!
//! Each input line is either a command word or raw address-bar text.

use anyhow::{Context, Result, bail};

use unity_shell::{MenuKind, ToolbarAction};
use unity_types::record::EntryId;

pub const HELP: &str = "\
commands:
  back | forward | reload | home    toolbar navigation
  bookmark                          bookmark the current page
  sethome                           set the home page
  theme                             toggle dark mode
  history | bookmarks               list menu entries
  open h<id> | open b<id>           open a history or bookmark entry
  download <file>                   simulate a download of <file>
  help | quit
anything else is submitted to the address bar";

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    Toolbar(ToolbarAction),
    List(MenuKind),
    Open(MenuKind, EntryId),
    Download(String),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match (word, rest) {
        ("back", "") => Command::Toolbar(ToolbarAction::Back),
        ("forward", "") => Command::Toolbar(ToolbarAction::Forward),
        ("reload", "") => Command::Toolbar(ToolbarAction::Reload),
        ("home", "") => Command::Toolbar(ToolbarAction::Home),
        ("bookmark", "") => Command::Toolbar(ToolbarAction::Bookmark),
        ("sethome", "") => Command::Toolbar(ToolbarAction::SetHomePage),
        ("theme", "") => Command::Toolbar(ToolbarAction::ToggleTheme),
        ("history", "") => Command::List(MenuKind::History),
        ("bookmarks", "") => Command::List(MenuKind::Bookmarks),
        ("help", "") => Command::Help,
        ("quit" | "exit", "") => Command::Quit,
        ("open", "") => bail!("usage: open h<id> | open b<id>"),
        ("open", entry) => match parse_entry(entry) {
            Ok((menu, id)) => Command::Open(menu, id),
            Err(e) => {
                log::debug!("Not a menu entry ({e:#}), submitting `{line}`");
                Command::Submit(line.to_string())
            },
        },
        ("download", "") => bail!("usage: download <file>"),
        ("download", file) => Command::Download(file.to_string()),
        // Raw text goes to the address bar untouched.
        _ => Command::Submit(line.to_string()),
    };
    Ok(Some(command))
}

/// Parse a menu entry reference such as `h3` or `b0`.
fn parse_entry(entry: &str) -> Result<(MenuKind, EntryId)> {
    let menu = match entry.chars().next() {
        Some('h') => MenuKind::History,
        Some('b') => MenuKind::Bookmarks,
        _ => bail!("expected h<id> or b<id>, got `{entry}`"),
    };
    let id = entry[1..]
        .parse::<u64>()
        .with_context(|| format!("invalid entry id in `{entry}`"))?;
    Ok((menu, EntryId(id)))
}

/// Menu prefix used when listing and opening entries.
pub fn entry_prefix(menu: MenuKind) -> char {
    match menu {
        MenuKind::History => 'h',
        MenuKind::Bookmarks => 'b',
    }
}
