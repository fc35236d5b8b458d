//! Locale negotiation and message catalogs.
//!
//! This module provides:
//!
//! - **Catalogs**: message templates loaded once from a directory of YAML or
//!   JSON files ([`catalog`], [`manifest`]).
//! - **Locale resolution**: explicit value, then `Accept-Language`, then the
//!   configured default ([`locale`]).
//! - **Rendering**: `%name%` / `{name}` placeholder substitution ([`render`]).
//! - **Service objects**: [`LanguageService`] (shared, immutable) and
//!   [`Translator`] (one per unit of work) in [`service`].
//!
//! The free functions below are a process-wide facade over one installed
//! service. The active locale they read and write is thread-local, so
//! requests handled on different threads never observe each other's locale.
//! Hosts that move work between threads should pass a [`Translator`] along
//! instead.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lingo_rs_core::i18n::{self, Params};
//! use lingo_rs_core::settings::LanguageSettings;
//!
//! i18n::load(&LanguageSettings::new("en", "translations")).unwrap();
//!
//! // Per request:
//! i18n::resolve_locale(None, Some("es-ES,es;q=0.9")).unwrap();
//! let text = i18n::trans("greeting", &Params::new().with("name", "Ana"), None, None).unwrap();
//! ```

pub mod catalog;
pub mod locale;
pub mod manifest;
pub mod render;
pub mod service;

use std::cell::RefCell;
use std::sync::{Arc, OnceLock, RwLock};

pub use catalog::Catalog;
pub use locale::Locale;
pub use manifest::{FileFormat, FileLayout, ManifestEntry, DEFAULT_DOMAIN};
pub use render::{Params, Wrapper};
pub use service::{LanguageService, TranslateFn, Translator};

use crate::error::{LingoError, LingoResult};
use crate::settings::LanguageSettings;

// ── Process-wide service slot ────────────────────────────────────────────

fn global_service() -> &'static RwLock<Option<Arc<LanguageService>>> {
    static SERVICE: OnceLock<RwLock<Option<Arc<LanguageService>>>> = OnceLock::new();
    SERVICE.get_or_init(|| RwLock::new(None))
}

// ── Thread-local locale state ────────────────────────────────────────────

thread_local! {
    static ACTIVE_LOCALE: RefCell<Option<Locale>> = const { RefCell::new(None) };
}

/// Builds a service from `settings` and installs it process-wide.
///
/// Calling `load` again replaces the installed service entirely. Concurrent
/// calls race; the last one to finish wins.
pub fn load(settings: &LanguageSettings) -> LingoResult<Arc<LanguageService>> {
    let service = Arc::new(LanguageService::load(settings)?);
    install(Arc::clone(&service));
    Ok(service)
}

/// Installs an already-built service process-wide.
pub fn install(service: Arc<LanguageService>) {
    let mut slot = global_service()
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    *slot = Some(service);
}

/// Returns the installed service.
///
/// # Errors
///
/// Returns [`LingoError::NotInitialized`] if [`load`] was never called.
pub fn current() -> LingoResult<Arc<LanguageService>> {
    global_service()
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone()
        .ok_or(LingoError::NotInitialized)
}

/// Activates `locale` for the current thread.
///
/// The value is used as given (see [`Locale::explicit`]); a locale with no
/// catalog renders every key as itself. An empty value reverts to the
/// default.
///
/// # Errors
///
/// Only [`LingoError::NotInitialized`], before [`load`].
pub fn set_locale(locale: &str) -> LingoResult<()> {
    current()?;
    let locale = Locale::explicit(locale);
    ACTIVE_LOCALE.with(|cell| *cell.borrow_mut() = locale);
    Ok(())
}

/// Returns the current thread's locale, or the default if none is active.
pub fn get_locale() -> LingoResult<Locale> {
    let service = current()?;
    Ok(ACTIVE_LOCALE
        .with(|cell| cell.borrow().clone())
        .unwrap_or_else(|| service.default_locale().clone()))
}

/// Clears the current thread's locale, reverting to the default.
pub fn reset_locale() {
    ACTIVE_LOCALE.with(|cell| *cell.borrow_mut() = None);
}

/// Resolves the locale for the current unit of work and activates it.
///
/// This is the entry point request middleware calls: `explicit` is typically
/// a query parameter and `header` the raw `Accept-Language` value.
pub fn resolve_locale(explicit: Option<&str>, header: Option<&str>) -> LingoResult<Locale> {
    let locale = current()?.resolve(explicit, header);
    ACTIVE_LOCALE.with(|cell| *cell.borrow_mut() = Some(locale.clone()));
    Ok(locale)
}

/// Renders `key` on the current thread's locale, or on `locale` if given.
///
/// A missing translation returns `key`. An empty override is ignored.
///
/// # Errors
///
/// Only [`LingoError::NotInitialized`].
pub fn trans(
    key: &str,
    params: &Params,
    domain: Option<&str>,
    locale: Option<&str>,
) -> LingoResult<String> {
    let service = current()?;
    let locale = match locale.and_then(Locale::explicit) {
        Some(locale) => locale,
        None => get_locale()?,
    };
    Ok(service.translate(key, params, domain, &locale))
}

/// Returns a [`Translator`] for the installed service on the current
/// thread's locale.
pub fn translator() -> LingoResult<Translator> {
    Ok(Translator::with_locale(current()?, get_locale()?))
}
