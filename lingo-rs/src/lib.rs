//! # lingo-rs
//!
//! Key-based message translation for Rust services.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on `lingo-rs`
//! for everything, or on individual crates for finer-grained control.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lingo_rs::prelude::*;
//!
//! let settings = LanguageSettings::new("en", "translations");
//! i18n::load(&settings).unwrap();
//! i18n::set_locale("es").unwrap();
//! let text = i18n::trans("greeting", &Params::new().with("name", "Ana"), None, None).unwrap();
//! ```

/// Catalogs, locales, rendering, settings, checks, and error types.
pub use lingo_rs_core as core;

pub use lingo_rs_core::i18n;

/// Locale negotiation for `http::Request`/`http::Response`.
#[cfg(feature = "http")]
pub use lingo_rs_http as http;

/// The `t` function for Tera templates.
#[cfg(feature = "template")]
pub use lingo_rs_template as template;

/// The `lingo` command framework and built-in commands.
#[cfg(feature = "cli")]
pub use lingo_rs_cli as cli;

pub use tracing;

/// The types most applications need.
pub mod prelude {
    pub use lingo_rs_core::i18n::{
        self, Catalog, FileFormat, FileLayout, LanguageService, Locale, Params, TranslateFn,
        Translator, Wrapper,
    };
    pub use lingo_rs_core::{LanguageSettings, LingoError, LingoResult};

    #[cfg(feature = "http")]
    pub use lingo_rs_http::{LocaleMiddleware, RequestLocaleExt};
}
