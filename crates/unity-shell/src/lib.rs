//! Session state manager for the Unity Browser shell.
//!
//! The rendering engine, window chrome and dialogs belong to an external
//! toolkit and are reached only through the [`surface`] traits. This crate
//! decides where to navigate from raw address-bar input ([`resolver`]),
//! tracks the committed URL, load progress and theme ([`nav`]), mirrors
//! history and bookmarks to a [`SessionStore`](unity_store::SessionStore)
//! ([`registry`]) and wires all of it to toolbar actions and surface events
//! in the [`ShellController`].

pub mod controller;
pub mod nav;
pub mod registry;
pub mod resolver;
pub mod surface;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use controller::{Session, ShellController, ToolbarAction};
pub use nav::{LoadPhase, NavigationState};
pub use registry::{LoadSummary, Registry};
pub use resolver::UrlResolver;
pub use surface::{DownloadRequest, MenuKind, RenderingSurface, ShellUi, SurfaceEvent};
pub use theme::Theme;
