//! Integration tests for request locale negotiation against on-disk catalogs.

use std::sync::Arc;

use http::header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE, VARY};
use http::{Request, Response};
use lingo_rs_core::i18n::{LanguageService, Params};
use lingo_rs_core::LanguageSettings;
use lingo_rs_http::{LocaleMiddleware, RequestLocaleExt};

fn service(dir: &std::path::Path) -> Arc<LanguageService> {
    std::fs::write(dir.join("en.yml"), "greeting: \"Hello %name%\"\n").unwrap();
    std::fs::write(dir.join("es.yml"), "greeting: \"Hola %name%\"\n").unwrap();
    std::fs::write(dir.join("de.yml"), "greeting: \"Hallo %name%\"\n").unwrap();
    let settings = LanguageSettings::new("en", dir);
    Arc::new(LanguageService::load(&settings).unwrap())
}

fn handle(middleware: &LocaleMiddleware, mut request: Request<()>) -> Response<String> {
    middleware.process_request(&mut request);
    let translator = middleware.translator(&request);
    let body = translator.trans("greeting", &Params::new().with("name", "Ana"), None, None);
    let mut response = Response::new(body);
    middleware.process_response(&request, &mut response);
    response
}

#[test]
fn test_concurrent_requests_keep_their_own_locale() {
    let dir = tempfile::tempdir().unwrap();
    let middleware = Arc::new(LocaleMiddleware::new(service(dir.path())));

    let cases = [
        ("/?lang=es", None, "Hola Ana", "es"),
        ("/", Some("de-AT,de;q=0.8"), "Hallo Ana", "de"),
        ("/", None, "Hello Ana", "en"),
        ("/?lang=fr", None, "greeting", "fr"),
    ];

    let handles: Vec<_> = cases
        .into_iter()
        .map(|(uri, header, expected_body, expected_lang)| {
            let middleware = Arc::clone(&middleware);
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let mut builder = Request::builder().uri(uri);
                    if let Some(value) = header {
                        builder = builder.header(ACCEPT_LANGUAGE, value);
                    }
                    let response = handle(&middleware, builder.body(()).unwrap());
                    assert_eq!(response.body(), expected_body);
                    assert_eq!(
                        response.headers().get(CONTENT_LANGUAGE).unwrap(),
                        expected_lang
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_response_varies_on_accept_language() {
    let dir = tempfile::tempdir().unwrap();
    let middleware = LocaleMiddleware::new(service(dir.path()));
    let request = Request::builder()
        .uri("/")
        .header(ACCEPT_LANGUAGE, "es-MX")
        .body(())
        .unwrap();

    let response = handle(&middleware, request);
    assert_eq!(response.body(), "Hola Ana");
    assert_eq!(response.headers().get(VARY).unwrap(), "Accept-Language");
}

#[test]
fn test_request_locale_extension() {
    let dir = tempfile::tempdir().unwrap();
    let middleware = LocaleMiddleware::new(service(dir.path())).with_query_param("hl");
    let mut request = Request::builder().uri("/?hl=es_ES").body(()).unwrap();

    assert!(request.locale().is_none());
    middleware.process_request(&mut request);
    assert_eq!(request.locale().unwrap().as_str(), "es-es");
}
