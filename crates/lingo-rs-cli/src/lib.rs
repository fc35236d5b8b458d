//! # lingo-rs-cli
//!
//! The `lingo` command line tool for working with translation catalogs.
//!
//! - `lingo check` - Validates catalogs (missing default locale, coverage gaps)
//! - `lingo manifest` - Lists the files matched by the naming convention
//! - `lingo translate <key> -p name=Ana` - Renders one message
//! - `lingo resolve --header "es-ES,es;q=0.9"` - Shows locale resolution
//!
//! Settings come from `--config <file>` when given, otherwise from the
//! `LINGO_*` environment variables.
//!
//! ## Quick Start
//!
//! ```rust
//! use lingo_rs_cli::command::CommandRegistry;
//! use lingo_rs_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! assert_eq!(registry.list_commands(), vec!["check", "manifest", "resolve", "translate"]);
//! ```

// These clippy lints are intentionally allowed:
// - result_large_err: LingoError is the crate-wide error type
// - module_name_repetitions: re-exports make module-prefixed names redundant
// - unused_async: command handlers keep a uniform async signature
#![allow(clippy::result_large_err)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::unused_async)]

pub mod command;
pub mod commands;

pub use command::{CommandRegistry, ManagementCommand, CONFIG_ARG};

use lingo_rs_core::{settings_loader, LanguageSettings, LingoResult};

/// Returns a registry holding every built-in command.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    commands::register_builtin_commands(&mut registry);
    registry
}

/// Loads settings from `config` (with env overrides) or from the environment.
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, or if
/// no file is given and `LINGO_LOCALE`/`LINGO_PATH` are unset.
pub fn load_settings(config: Option<&str>) -> LingoResult<LanguageSettings> {
    match config {
        Some(path) => settings_loader::from_file_with_env(path),
        None => settings_loader::from_env(),
    }
}
