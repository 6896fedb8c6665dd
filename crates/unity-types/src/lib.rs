//! Foundation types for the Unity Browser shell.
//!
//! This crate holds the pieces shared by every other crate in the workspace:
//! the persisted record types, the error type and the shell configuration.

pub mod config;
pub mod error;
pub mod record;
