//! Settings loading from configuration files.
//!
//! This module provides functions to load [`LanguageSettings`] from TOML or
//! JSON files and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Load from a TOML or JSON file (`locale` and `path` are required there).
//! 2. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `LINGO_LOCALE` | `locale` |
//! | `LINGO_PATH` | `path` |
//! | `LINGO_FILE_FORMAT` | `file_format` (`yaml` or `json`) |
//! | `LINGO_WRAPPER` | `wrapper` (`{}` or `%`) |
//! | `LINGO_LAYOUT` | `layout` (`locale` or `domain`) |
//! | `LINGO_LOG_LEVEL` | `log_level` |
//! | `LINGO_DEBUG` | `debug` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use lingo_rs_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("config/lingo.toml").unwrap();
//! let settings = settings_loader::from_file_with_env("config/lingo.json").unwrap();
//! ```

use std::path::Path;

use crate::error::{LingoError, LingoResult};
use crate::settings::LanguageSettings;

/// Loads settings from a TOML string.
///
/// # Errors
///
/// Returns a configuration error if the TOML is malformed, a required field is
/// missing, or an enumerated field has an unsupported value.
pub fn from_toml_str(toml_str: &str) -> LingoResult<LanguageSettings> {
    toml::from_str(toml_str).map_err(|e| {
        LingoError::ConfigurationError(format!("Failed to parse TOML settings: {e}"))
    })
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> LingoResult<LanguageSettings> {
    from_toml_str(&read(path.as_ref())?)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns a configuration error if the JSON is malformed, a required field is
/// missing, or an enumerated field has an unsupported value.
pub fn from_json_str(json_str: &str) -> LingoResult<LanguageSettings> {
    serde_json::from_str(json_str).map_err(|e| {
        LingoError::ConfigurationError(format!("Failed to parse JSON settings: {e}"))
    })
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> LingoResult<LanguageSettings> {
    from_json_str(&read(path.as_ref())?)
}

/// Loads settings from a file, choosing the parser by extension.
///
/// `.json` files are parsed as JSON; everything else as TOML.
pub fn from_file(path: impl AsRef<Path>) -> LingoResult<LanguageSettings> {
    let path = path.as_ref();
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => from_json_file(path),
        _ => from_toml_file(path),
    }
}

/// Loads settings from a TOML file and then applies environment overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> LingoResult<LanguageSettings> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings)?;
    Ok(settings)
}

/// Loads settings from a JSON file and then applies environment overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> LingoResult<LanguageSettings> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings)?;
    Ok(settings)
}

/// Loads settings from a TOML or JSON file and then applies environment overrides.
pub fn from_file_with_env(path: impl AsRef<Path>) -> LingoResult<LanguageSettings> {
    let mut settings = from_file(path)?;
    apply_env_overrides(&mut settings)?;
    Ok(settings)
}

/// Loads settings purely from the environment.
///
/// # Errors
///
/// Returns a configuration error if `LINGO_LOCALE` or `LINGO_PATH` is unset,
/// or if any override has an unsupported value.
pub fn from_env() -> LingoResult<LanguageSettings> {
    let locale = required_env("LINGO_LOCALE")?;
    let path = required_env("LINGO_PATH")?;
    let mut settings = LanguageSettings::new(locale, path);
    apply_env_overrides(&mut settings)?;
    Ok(settings)
}

/// Applies environment variable overrides to a settings struct.
///
/// # Errors
///
/// Returns a configuration error if `LINGO_FILE_FORMAT`, `LINGO_WRAPPER`, or
/// `LINGO_LAYOUT` holds an unsupported value.
pub fn apply_env_overrides(settings: &mut LanguageSettings) -> LingoResult<()> {
    if let Ok(val) = std::env::var("LINGO_LOCALE") {
        settings.locale = val;
    }

    if let Ok(val) = std::env::var("LINGO_PATH") {
        settings.path = val.into();
    }

    if let Ok(val) = std::env::var("LINGO_FILE_FORMAT") {
        settings.file_format = val.parse()?;
    }

    if let Ok(val) = std::env::var("LINGO_WRAPPER") {
        settings.wrapper = val.parse()?;
    }

    if let Ok(val) = std::env::var("LINGO_LAYOUT") {
        settings.layout = val.parse()?;
    }

    if let Ok(val) = std::env::var("LINGO_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("LINGO_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    Ok(())
}

fn required_env(name: &str) -> LingoResult<String> {
    std::env::var(name)
        .map_err(|_| LingoError::ConfigurationError(format!("{name} is not set")))
}

fn read(path: &Path) -> LingoResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        LingoError::ConfigurationError(format!(
            "Failed to read settings file '{}': {e}",
            path.display()
        ))
    })
}
