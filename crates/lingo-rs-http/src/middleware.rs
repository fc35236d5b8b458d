//! Request and response hooks for locale negotiation.
//!
//! The middleware checks language preference in this order:
//!
//! 1. Query parameter (`lang` by default)
//! 2. `Accept-Language` header (first tag only)
//! 3. The service's default locale
//!
//! The resolved locale is stored as a [`RequestLocale`] extension on the
//! request, never in shared state, so concurrent requests cannot observe each
//! other's locale.

use std::sync::Arc;

use http::header::{HeaderValue, ACCEPT_LANGUAGE, CONTENT_LANGUAGE, VARY};
use http::{Request, Response};
use lingo_rs_core::i18n::{LanguageService, Locale, Translator};
use lingo_rs_core::logging::request_span;

/// The query parameter read by default.
pub const DEFAULT_QUERY_PARAM: &str = "lang";

/// The locale resolved for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

/// Access to the locale a [`LocaleMiddleware`] resolved for a request.
pub trait RequestLocaleExt {
    /// Returns the resolved locale, if the middleware has run.
    fn locale(&self) -> Option<&Locale>;
}

impl<B> RequestLocaleExt for Request<B> {
    fn locale(&self) -> Option<&Locale> {
        self.extensions().get::<RequestLocale>().map(|l| &l.0)
    }
}

/// Resolves the locale of each request and tags responses with it.
///
/// This mirrors the request/response halves of a classic locale middleware:
/// call [`process_request`](Self::process_request) before the handler and
/// [`process_response`](Self::process_response) after it.
#[derive(Debug, Clone)]
pub struct LocaleMiddleware {
    service: Arc<LanguageService>,
    query_param: String,
}

impl LocaleMiddleware {
    /// Creates a middleware reading the `lang` query parameter.
    pub fn new(service: Arc<LanguageService>) -> Self {
        Self {
            service,
            query_param: DEFAULT_QUERY_PARAM.to_string(),
        }
    }

    /// Changes the query parameter holding an explicit locale.
    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>) -> Self {
        self.query_param = name.into();
        self
    }

    /// Returns the shared service.
    pub const fn service(&self) -> &Arc<LanguageService> {
        &self.service
    }

    /// Resolves the request's locale and stores it in the request extensions.
    pub fn process_request<B>(&self, request: &mut Request<B>) -> Locale {
        let explicit = self.explicit_locale(request);
        let header = request
            .headers()
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        let locale = self.service.resolve(explicit.as_deref(), header);
        tracing::debug!(
            %locale,
            explicit = explicit.as_deref(),
            accept_language = header,
            "resolved request locale"
        );

        request.extensions_mut().insert(RequestLocale(locale.clone()));
        locale
    }

    /// Sets `Content-Language` and adds `Accept-Language` to `Vary`.
    pub fn process_response<B, R>(&self, request: &Request<B>, response: &mut Response<R>) {
        let locale = request
            .locale()
            .unwrap_or_else(|| self.service.default_locale());

        if let Ok(value) = HeaderValue::from_str(locale.as_str()) {
            response.headers_mut().insert(CONTENT_LANGUAGE, value);
        }

        let already_varies = response
            .headers()
            .get_all(VARY)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .any(|name| name.trim().eq_ignore_ascii_case("accept-language"));
        if !already_varies {
            response
                .headers_mut()
                .append(VARY, HeaderValue::from_static("Accept-Language"));
        }
    }

    /// Returns a [`Translator`] on the request's resolved locale.
    ///
    /// Falls back to the default locale if the request was never processed.
    pub fn translator<B>(&self, request: &Request<B>) -> Translator {
        request.locale().map_or_else(
            || Translator::new(Arc::clone(&self.service)),
            |locale| Translator::with_locale(Arc::clone(&self.service), locale.clone()),
        )
    }

    /// Returns a tracing span tagged with the request's locale.
    pub fn span<B>(&self, request: &Request<B>) -> tracing::Span {
        request_span(request.locale().unwrap_or_else(|| self.service.default_locale()))
    }

    fn explicit_locale<B>(&self, request: &Request<B>) -> Option<String> {
        let query = request.uri().query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == self.query_param.as_str())
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingo_rs_core::i18n::{Catalog, Wrapper};

    fn middleware() -> LocaleMiddleware {
        let en = Locale::parse("en").unwrap();
        LocaleMiddleware::new(Arc::new(LanguageService::from_catalog(
            Catalog::new(),
            en,
            Wrapper::PercentSign,
        )))
    }

    fn request(uri: &str, accept_language: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri(uri);
        if let Some(value) = accept_language {
            builder = builder.header(ACCEPT_LANGUAGE, value);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn test_query_param_wins() {
        let mut req = request("/?lang=fr", Some("de-DE,de;q=0.9"));
        assert_eq!(middleware().process_request(&mut req).as_str(), "fr");
        assert_eq!(req.locale().unwrap().as_str(), "fr");
    }

    #[test]
    fn test_header_used_without_query() {
        let mut req = request("/page?x=1", Some("de-DE,de;q=0.9"));
        assert_eq!(middleware().process_request(&mut req).as_str(), "de");
    }

    #[test]
    fn test_default_without_signals() {
        let mut req = request("/", None);
        assert_eq!(middleware().process_request(&mut req).as_str(), "en");
    }

    #[test]
    fn test_malformed_header_falls_back() {
        let mut req = request("/", Some("???invalid"));
        assert_eq!(middleware().process_request(&mut req).as_str(), "en");
    }

    #[test]
    fn test_empty_query_value_is_ignored() {
        let mut req = request("/?lang=", Some("it"));
        assert_eq!(middleware().process_request(&mut req).as_str(), "it");
    }

    #[test]
    fn test_percent_encoded_query_value() {
        let mut req = request("/?lang=pt%2DBR", None);
        assert_eq!(middleware().process_request(&mut req).as_str(), "pt-br");
    }

    #[test]
    fn test_query_value_kept_without_catalog() {
        let mut req = request("/?lang=English", Some("de-DE"));
        assert_eq!(middleware().process_request(&mut req).as_str(), "english");
    }

    #[test]
    fn test_underscore_header_uses_prefix() {
        let mut req = request("/", Some("en_US,en;q=0.9"));
        assert_eq!(middleware().process_request(&mut req).as_str(), "en");
    }

    #[test]
    fn test_custom_query_param() {
        let mw = middleware().with_query_param("locale");
        let mut req = request("/?lang=fr&locale=es", None);
        assert_eq!(mw.process_request(&mut req).as_str(), "es");
    }

    #[test]
    fn test_response_headers() {
        let mw = middleware();
        let mut req = request("/?lang=es", None);
        mw.process_request(&mut req);

        let mut resp = Response::builder()
            .header(VARY, "Cookie")
            .body(())
            .unwrap();
        mw.process_response(&req, &mut resp);
        mw.process_response(&req, &mut resp);

        assert_eq!(resp.headers().get(CONTENT_LANGUAGE).unwrap(), "es");
        let vary: Vec<&str> = resp
            .headers()
            .get_all(VARY)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(vary, vec!["Cookie", "Accept-Language"]);
    }

    #[test]
    fn test_response_defaults_when_unprocessed() {
        let mw = middleware();
        let req = request("/", None);
        let mut resp = Response::new(());
        mw.process_response(&req, &mut resp);
        assert_eq!(resp.headers().get(CONTENT_LANGUAGE).unwrap(), "en");
    }

    #[test]
    fn test_span_can_be_entered() {
        let mw = middleware();
        let mut req = request("/?lang=es", None);
        mw.process_request(&mut req);
        let span = mw.span(&req);
        let _guard = span.enter();
        tracing::info!("inside request span");
    }

    #[test]
    fn test_translator_follows_request() {
        let mw = middleware();
        let mut req = request("/", Some("nl-NL"));
        assert_eq!(mw.translator(&req).locale().as_str(), "en");
        mw.process_request(&mut req);
        assert_eq!(mw.translator(&req).locale().as_str(), "nl");
    }
}
