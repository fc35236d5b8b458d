//! # lingo-rs-http
//!
//! Locale negotiation for HTTP requests built on the [`http`] crate's
//! `Request`/`Response` types, so it plugs into any framework that exposes
//! them (axum, hyper, tower services).
//!
//! - [`LocaleMiddleware`] - Resolves the request locale and tags the response
//! - [`RequestLocale`] - The resolved locale, stored in request extensions
//! - [`RequestLocaleExt`] - Reads the resolved locale back from a request
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use lingo_rs_core::i18n::{Catalog, LanguageService, Locale, Params, Wrapper};
//! use lingo_rs_http::{LocaleMiddleware, RequestLocaleExt};
//!
//! let es = Locale::parse("es").unwrap();
//! let mut catalog = Catalog::new();
//! catalog.add_messages(&es, None, [("greeting", "Hola %name%")]);
//! let en = Locale::parse("en").unwrap();
//! let service = Arc::new(LanguageService::from_catalog(catalog, en, Wrapper::PercentSign));
//!
//! let middleware = LocaleMiddleware::new(Arc::clone(&service));
//! let mut request = http::Request::builder()
//!     .uri("/home?lang=es")
//!     .body(())
//!     .unwrap();
//! middleware.process_request(&mut request);
//!
//! let translator = middleware.translator(&request);
//! let text = translator.trans("greeting", &Params::new().with("name", "Ana"), None, None);
//! assert_eq!(text, "Hola Ana");
//! assert_eq!(request.locale().unwrap().as_str(), "es");
//! ```

pub mod middleware;

pub use middleware::{LocaleMiddleware, RequestLocale, RequestLocaleExt, DEFAULT_QUERY_PARAM};
