//! The language service and its per-request handle.
//!
//! [`LanguageService`] owns the immutable catalog and the configured defaults.
//! It never holds an "active" locale; that lives in a [`Translator`], which a
//! host creates per unit of work (one request, one job) and threads through
//! its call chain.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::catalog::Catalog;
use super::locale::{self, Locale};
use super::manifest::DEFAULT_DOMAIN;
use super::render::{self, Params, Wrapper};
use crate::error::LingoResult;
use crate::settings::LanguageSettings;

/// A plain translation callable: `(key, params, domain, locale) -> text`.
///
/// This is what templating engines register (as `t`). A `None` or unusable
/// locale falls back to whichever locale the callable was created with.
pub type TranslateFn =
    Arc<dyn Fn(&str, &Params, Option<&str>, Option<&str>) -> String + Send + Sync>;

/// Loaded catalogs plus the configured default locale and wrapper.
///
/// # Examples
///
/// ```
/// use lingo_rs_core::i18n::{Catalog, LanguageService, Locale, Params, Wrapper};
///
/// let es = Locale::parse("es").unwrap();
/// let mut catalog = Catalog::new();
/// catalog.add_messages(&es, None, [("greeting", "Hola %name%")]);
///
/// let service = LanguageService::from_catalog(catalog, es.clone(), Wrapper::PercentSign);
/// let params = Params::new().with("name", "Ana");
/// assert_eq!(service.translate("greeting", &params, None, &es), "Hola Ana");
/// assert_eq!(service.translate("farewell", &params, None, &es), "farewell");
/// ```
pub struct LanguageService {
    catalog: Catalog,
    default_locale: Locale,
    wrapper: Wrapper,
    missing: AtomicU64,
}

impl LanguageService {
    /// Validates the settings and loads every catalog under `settings.path`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid settings or an unreadable
    /// directory, and a malformed-catalog error for any unparsable file.
    pub fn load(settings: &LanguageSettings) -> LingoResult<Self> {
        let default_locale = settings.validate()?;
        let catalog = Catalog::build(&settings.path, settings.file_format, settings.layout)?;

        tracing::info!(
            locale = %default_locale,
            path = %settings.path.display(),
            format = %settings.file_format,
            layout = %settings.layout,
            locales = catalog.locales().len(),
            messages = catalog.len(),
            "language service loaded"
        );
        if !catalog.has_locale(&default_locale) {
            tracing::warn!(locale = %default_locale, "no catalog found for the default locale");
        }

        Ok(Self::from_catalog(catalog, default_locale, settings.wrapper))
    }

    /// Wraps an already-built catalog.
    pub fn from_catalog(catalog: Catalog, default_locale: Locale, wrapper: Wrapper) -> Self {
        Self {
            catalog,
            default_locale,
            wrapper,
            missing: AtomicU64::new(0),
        }
    }

    /// Returns the loaded catalog.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the configured default locale.
    pub const fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Returns the configured wrapper convention.
    pub const fn wrapper(&self) -> Wrapper {
        self.wrapper
    }

    /// Returns how many lookups have fallen back to the key since loading.
    pub fn missing_translations(&self) -> u64 {
        self.missing.load(Ordering::Relaxed)
    }

    /// Resolves the locale for a unit of work without touching any state.
    pub fn resolve(&self, explicit: Option<&str>, header: Option<&str>) -> Locale {
        locale::resolve(explicit, header, &self.default_locale)
    }

    /// Renders `key` for `locale`, substituting `params`.
    ///
    /// A missing template yields `key` itself and is logged and counted.
    pub fn translate(
        &self,
        key: &str,
        params: &Params,
        domain: Option<&str>,
        locale: &Locale,
    ) -> String {
        match self.catalog.lookup(locale, domain, key) {
            Some(template) => render::substitute(template, params, self.wrapper),
            None => {
                self.missing.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(
                    %locale,
                    domain = domain.unwrap_or(DEFAULT_DOMAIN),
                    key,
                    "missing translation"
                );
                key.to_string()
            }
        }
    }

    /// Returns a translation callable bound to this service's default locale.
    pub fn translate_fn(self: &Arc<Self>) -> TranslateFn {
        bind(Arc::clone(self), self.default_locale.clone())
    }
}

impl fmt::Debug for LanguageService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageService")
            .field("default_locale", &self.default_locale)
            .field("wrapper", &self.wrapper)
            .field("messages", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

fn bind(service: Arc<LanguageService>, fallback: Locale) -> TranslateFn {
    Arc::new(
        move |key: &str, params: &Params, domain: Option<&str>, locale: Option<&str>| {
            let locale = locale
                .and_then(Locale::explicit)
                .unwrap_or_else(|| fallback.clone());
            service.translate(key, params, domain, &locale)
        },
    )
}

/// The translation handle for one unit of work.
///
/// Holds a shared service and the locale resolved for this unit of work.
/// Cloning is cheap; two translators never affect each other's locale.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use lingo_rs_core::i18n::{Catalog, LanguageService, Locale, Params, Translator, Wrapper};
///
/// let en = Locale::parse("en").unwrap();
/// let service = Arc::new(LanguageService::from_catalog(Catalog::new(), en, Wrapper::PercentSign));
///
/// let mut translator = Translator::new(Arc::clone(&service));
/// translator.resolve(None, Some("de-DE,de;q=0.9"));
/// assert_eq!(translator.locale().as_str(), "de");
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
    service: Arc<LanguageService>,
    locale: Locale,
}

impl Translator {
    /// Creates a translator on the service's default locale.
    pub fn new(service: Arc<LanguageService>) -> Self {
        let locale = service.default_locale.clone();
        Self { service, locale }
    }

    /// Creates a translator on a specific locale.
    pub const fn with_locale(service: Arc<LanguageService>, locale: Locale) -> Self {
        Self { service, locale }
    }

    /// Returns the shared service.
    pub const fn service(&self) -> &Arc<LanguageService> {
        &self.service
    }

    /// Returns the active locale.
    pub const fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Replaces the active locale.
    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    /// Resolves and activates the locale for this unit of work.
    pub fn resolve(&mut self, explicit: Option<&str>, header: Option<&str>) -> &Locale {
        self.locale = self.service.resolve(explicit, header);
        &self.locale
    }

    /// Renders `key` on the active locale, or on `locale` if given.
    pub fn trans(
        &self,
        key: &str,
        params: &Params,
        domain: Option<&str>,
        locale: Option<&Locale>,
    ) -> String {
        self.service
            .translate(key, params, domain, locale.unwrap_or(&self.locale))
    }

    /// Returns a translation callable bound to this translator's locale.
    pub fn translate_fn(&self) -> TranslateFn {
        bind(Arc::clone(&self.service), self.locale.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(tag: &str) -> Locale {
        Locale::parse(tag).unwrap()
    }

    fn service(wrapper: Wrapper) -> Arc<LanguageService> {
        let mut catalog = Catalog::new();
        catalog.add_messages(&locale("es"), None, [("greeting", "Hola %name%")]);
        catalog.add_messages(&locale("en"), None, [("greeting", "Hello {name}")]);
        catalog.add_messages(&locale("en"), Some("admin"), [("title", "Dashboard")]);
        Arc::new(LanguageService::from_catalog(catalog, locale("en"), wrapper))
    }

    #[test]
    fn test_translate_round_trip() {
        let svc = service(Wrapper::PercentSign);
        let params = Params::new().with("name", "Ana");
        assert_eq!(svc.translate("greeting", &params, None, &locale("es")), "Hola Ana");
    }

    #[test]
    fn test_translate_respects_wrapper() {
        let svc = service(Wrapper::CurlyBraces);
        let params = Params::new().with("name", "Ana");
        assert_eq!(svc.translate("greeting", &params, None, &locale("en")), "Hello Ana");
        assert_eq!(
            svc.translate("greeting", &params, None, &locale("es")),
            "Hola %name%"
        );
    }

    #[test]
    fn test_translate_domain() {
        let svc = service(Wrapper::PercentSign);
        let none = Params::new();
        assert_eq!(svc.translate("title", &none, Some("admin"), &locale("en")), "Dashboard");
        assert_eq!(svc.translate("title", &none, None, &locale("en")), "title");
    }

    #[test]
    fn test_missing_key_returns_key_and_counts() {
        let svc = service(Wrapper::PercentSign);
        assert_eq!(svc.missing_translations(), 0);
        let params = Params::new().with("name", "Ana");
        assert_eq!(svc.translate("nope", &params, None, &locale("es")), "nope");
        assert_eq!(svc.translate("greeting", &params, None, &locale("fr")), "greeting");
        assert_eq!(svc.missing_translations(), 2);
    }

    #[test]
    fn test_translator_isolation() {
        let svc = service(Wrapper::PercentSign);
        let mut a = Translator::new(Arc::clone(&svc));
        let b = Translator::new(Arc::clone(&svc));
        a.set_locale(locale("es"));
        assert_eq!(a.locale().as_str(), "es");
        assert_eq!(b.locale().as_str(), "en");
    }

    #[test]
    fn test_translator_set_locale_idempotent() {
        let mut t = Translator::new(service(Wrapper::PercentSign));
        t.set_locale(locale("en"));
        t.set_locale(locale("en"));
        assert_eq!(t.locale().as_str(), "en");
    }

    #[test]
    fn test_translator_trans_override() {
        let mut t = Translator::new(service(Wrapper::PercentSign));
        t.resolve(Some("es"), None);
        let params = Params::new().with("name", "Ana");
        assert_eq!(t.trans("greeting", &params, None, None), "Hola Ana");
        assert_eq!(
            t.trans("greeting", &params, None, Some(&locale("en"))),
            "Hello {name}"
        );
    }

    #[test]
    fn test_translate_fn_fallback_locale() {
        let svc = service(Wrapper::PercentSign);
        let mut t = Translator::new(Arc::clone(&svc));
        t.set_locale(locale("es"));
        let f = t.translate_fn();
        let params = Params::new().with("name", "Ana");
        assert_eq!(f("greeting", &params, None, None), "Hola Ana");
        assert_eq!(f("greeting", &params, None, Some("en")), "Hello {name}");
        // An empty override keeps the bound locale; any other is used as given.
        assert_eq!(f("greeting", &params, None, Some("")), "Hola Ana");
        assert_eq!(f("greeting", &params, None, Some("klingon")), "greeting");

        let default_fn = svc.translate_fn();
        assert_eq!(default_fn("greeting", &params, None, None), "Hello {name}");
    }
}
