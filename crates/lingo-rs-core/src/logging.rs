//! Logging integration for lingo-rs.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`LanguageSettings`] and for creating per-request spans.

use crate::i18n::Locale;
use crate::settings::LanguageSettings;

/// Crates whose events a bare `log_level` applies to.
const LINGO_TARGETS: [&str; 5] = [
    "lingo_rs",
    "lingo_rs_core",
    "lingo_rs_http",
    "lingo_rs_template",
    "lingo_rs_cli",
];

/// Level applied to every other crate when `log_level` is a bare level.
const OTHER_TARGETS_LEVEL: &str = "warn";

/// Builds the filter directives for `settings`.
///
/// A bare level such as `debug` applies to the lingo-rs crates only; other
/// crates stay at `warn` so the host's dependencies do not flood the output.
/// Anything containing `=` or `,` is a full directive string and is used as
/// written.
///
/// # Examples
///
/// ```
/// use lingo_rs_core::logging::filter_directives;
/// use lingo_rs_core::LanguageSettings;
///
/// let mut settings = LanguageSettings::new("en", "translations");
/// settings.log_level = "tera=debug".into();
/// assert_eq!(filter_directives(&settings), "tera=debug");
/// ```
pub fn filter_directives(settings: &LanguageSettings) -> String {
    let level = settings.log_level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    let level = if level.is_empty() { "info" } else { level };
    std::iter::once(OTHER_TARGETS_LEVEL.to_string())
        .chain(LINGO_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter comes from [`filter_directives`]. In debug mode a pretty,
/// human-readable format with source locations is used; otherwise each event
/// is one JSON object carrying the enclosing request span's locale.
///
/// Installing a subscriber twice is a no-op.
pub fn setup_logging(settings: &LanguageSettings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let directives = filter_directives(settings);
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one unit of work in a given locale.
///
/// Events emitted inside the span (including missing-translation warnings)
/// carry the locale.
///
/// # Examples
///
/// ```
/// use lingo_rs_core::i18n::Locale;
/// use lingo_rs_core::logging::request_span;
///
/// let span = request_span(&Locale::parse("es").unwrap());
/// let _guard = span.enter();
/// tracing::info!("handling request");
/// ```
pub fn request_span(locale: &Locale) -> tracing::Span {
    tracing::info_span!("request", locale = %locale)
}
