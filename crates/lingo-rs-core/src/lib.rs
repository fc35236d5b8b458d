//! # lingo-rs-core
//!
//! Message catalogs, locale negotiation, and placeholder rendering for the
//! lingo-rs workspace. This crate has no web or templating dependencies; the
//! adapters in `lingo-rs-http` and `lingo-rs-template` build on it.
//!
//! ## Modules
//!
//! - [`i18n`] - Catalogs, locale resolution, rendering, and the service facade
//! - [`settings`] - Validated service configuration
//! - [`settings_loader`] - Loading settings from TOML/JSON files and the environment
//! - [`checks`] - Coverage checks over loaded catalogs
//! - [`error`] - Error types and result aliases
//! - [`logging`] - Tracing-based logging integration

pub mod checks;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{LingoError, LingoResult};
pub use i18n::{LanguageService, Locale, Params, Translator};
pub use settings::LanguageSettings;
