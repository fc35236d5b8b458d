//! One request flowing through the middleware, a template, and the facade.
#![cfg(all(feature = "http", feature = "template"))]

use std::sync::Arc;

use lingo_rs::prelude::*;

fn write_catalogs(dir: &std::path::Path) {
    std::fs::write(
        dir.join("en.yaml"),
        "greeting: \"Hello %name%\"\ncart:\n  items: \"%count% items\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("es.yaml"),
        "greeting: \"Hola %name%\"\ncart:\n  items: \"%count% artículos\"\n",
    )
    .unwrap();
}

#[test]
fn test_request_renders_template_in_negotiated_locale() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());
    let service = Arc::new(LanguageService::load(&LanguageSettings::new("en", dir.path())).unwrap());
    let middleware = LocaleMiddleware::new(Arc::clone(&service));

    let mut request = http::Request::builder()
        .uri("/cart")
        .header(http::header::ACCEPT_LANGUAGE, "es-AR,es;q=0.9")
        .body(())
        .unwrap();
    middleware.process_request(&mut request);

    let mut tera = tera::Tera::default();
    lingo_rs::template::register(&mut tera, middleware.translator(&request).translate_fn());
    tera.add_raw_template(
        "cart",
        r#"{{ t(key="greeting", name=user) }}: {{ t(key="cart.items", count=n) }}"#,
    )
    .unwrap();

    let mut context = tera::Context::new();
    context.insert("user", "Ana");
    context.insert("n", &3);
    let body = tera.render("cart", &context).unwrap();
    assert_eq!(body, "Hola Ana: 3 artículos");

    let mut response = http::Response::new(body);
    middleware.process_response(&request, &mut response);
    assert_eq!(
        response.headers().get(http::header::CONTENT_LANGUAGE).unwrap(),
        "es"
    );
    assert_eq!(service.missing_translations(), 0);
}

#[test]
fn test_facade_through_meta_crate() {
    let dir = tempfile::tempdir().unwrap();
    write_catalogs(dir.path());

    i18n::load(&LanguageSettings::new("en", dir.path())).unwrap();
    i18n::set_locale("es").unwrap();
    let params = Params::new().with("count", 2);
    assert_eq!(
        i18n::trans("cart.items", &params, None, None).unwrap(),
        "2 artículos"
    );
    assert_eq!(
        i18n::trans("cart.items", &params, None, Some("en")).unwrap(),
        "2 items"
    );
}
