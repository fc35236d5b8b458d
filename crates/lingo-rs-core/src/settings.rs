//! Settings for the language service.
//!
//! [`LanguageSettings`] is the validated configuration passed once to
//! [`LanguageService::load`](crate::i18n::LanguageService::load). Only `locale`
//! and `path` are required; every other field has a default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{LingoError, LingoResult};
use crate::i18n::locale::Locale;
use crate::i18n::manifest::{FileFormat, FileLayout};
use crate::i18n::render::Wrapper;

/// Configuration for the language service.
///
/// # Examples
///
/// ```
/// use lingo_rs_core::settings::LanguageSettings;
/// use lingo_rs_core::i18n::{FileFormat, Wrapper};
///
/// let settings = LanguageSettings::new("en", "translations");
/// assert_eq!(settings.file_format, FileFormat::Yaml);
/// assert_eq!(settings.wrapper, Wrapper::PercentSign);
/// assert!(settings.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSettings {
    // ── Required ─────────────────────────────────────────────────────

    /// The default locale (e.g. "en").
    pub locale: String,
    /// Directory containing the resource files.
    pub path: PathBuf,

    // ── Catalogs ─────────────────────────────────────────────────────

    /// Format of the resource files.
    #[serde(default)]
    pub file_format: FileFormat,
    /// Placeholder delimiter style applied to unwrapped parameter names.
    #[serde(default)]
    pub wrapper: Wrapper,
    /// How resource file names encode locale and domain.
    #[serde(default)]
    pub layout: FileLayout,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level filter (e.g. "info", "debug", "lingo_rs_core=trace").
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Whether to use human-readable log output instead of JSON.
    #[serde(default)]
    pub debug: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl LanguageSettings {
    /// Creates settings with the two required fields and defaults elsewhere.
    pub fn new(locale: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            locale: locale.into(),
            path: path.into(),
            file_format: FileFormat::default(),
            wrapper: Wrapper::default(),
            layout: FileLayout::default(),
            log_level: default_log_level(),
            debug: false,
        }
    }

    /// Sets the resource file format.
    #[must_use]
    pub const fn with_file_format(mut self, file_format: FileFormat) -> Self {
        self.file_format = file_format;
        self
    }

    /// Sets the placeholder wrapper convention.
    #[must_use]
    pub const fn with_wrapper(mut self, wrapper: Wrapper) -> Self {
        self.wrapper = wrapper;
        self
    }

    /// Sets the resource file layout.
    #[must_use]
    pub const fn with_layout(mut self, layout: FileLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Checks the required fields and returns the normalized default locale.
    ///
    /// The enumerated fields are already constrained by their types; this
    /// covers what serde cannot: empty strings and malformed language tags.
    pub fn validate(&self) -> LingoResult<Locale> {
        if self.locale.trim().is_empty() {
            return Err(LingoError::ConfigurationError(
                "language settings require a non-empty \"locale\"".to_string(),
            ));
        }
        if self.path.as_os_str().is_empty() {
            return Err(LingoError::ConfigurationError(
                "language settings require a non-empty \"path\"".to_string(),
            ));
        }
        Locale::parse(&self.locale).ok_or_else(|| {
            LingoError::ConfigurationError(format!(
                "invalid default locale \"{}\"",
                self.locale
            ))
        })
    }
}
