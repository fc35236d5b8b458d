//! Rendering Tera templates against catalogs loaded from disk.

use std::sync::Arc;

use lingo_rs_core::i18n::{FileFormat, LanguageService, Translator, Wrapper};
use lingo_rs_core::LanguageSettings;
use tera::{Context, Tera};

fn load(dir: &std::path::Path) -> Arc<LanguageService> {
    std::fs::write(
        dir.join("en.json"),
        r#"{"greeting": "Hello {name}", "nav": {"home": "Home"}}"#,
    )
    .unwrap();
    std::fs::write(
        dir.join("es.json"),
        r#"{"greeting": "Hola {name}", "nav": {"home": "Inicio"}}"#,
    )
    .unwrap();
    let settings = LanguageSettings::new("en", dir)
        .with_file_format(FileFormat::Json)
        .with_wrapper(Wrapper::CurlyBraces);
    Arc::new(LanguageService::load(&settings).unwrap())
}

const PAGE: &str = r#"{{ t(key="nav.home") }} | {{ t(key="greeting", name=user) }}"#;

#[test]
fn test_render_with_default_locale() {
    let dir = tempfile::tempdir().unwrap();
    let service = load(dir.path());

    let mut tera = Tera::default();
    lingo_rs_template::register_service(&mut tera, &service);
    tera.add_raw_template("page", PAGE).unwrap();

    let mut context = Context::new();
    context.insert("user", "Ana");
    assert_eq!(tera.render("page", &context).unwrap(), "Home | Hello Ana");
}

#[test]
fn test_render_with_request_translator() {
    let dir = tempfile::tempdir().unwrap();
    let service = load(dir.path());
    let mut translator = Translator::new(Arc::clone(&service));
    translator.resolve(None, Some("es-ES,es;q=0.9,en;q=0.5"));

    let mut tera = Tera::default();
    lingo_rs_template::register(&mut tera, translator.translate_fn());
    tera.add_raw_template("page", PAGE).unwrap();

    let mut context = Context::new();
    context.insert("user", "Ana");
    assert_eq!(tera.render("page", &context).unwrap(), "Inicio | Hola Ana");
}

#[test]
fn test_params_from_context_object() {
    let dir = tempfile::tempdir().unwrap();
    let service = load(dir.path());

    let mut tera = Tera::default();
    lingo_rs_template::register_service(&mut tera, &service);
    tera.add_raw_template("page", r#"{{ t(key="greeting", params=vars, locale="es") }}"#)
        .unwrap();

    let mut vars = std::collections::HashMap::new();
    vars.insert("name", "Ana");
    let mut context = Context::new();
    context.insert("vars", &vars);
    assert_eq!(tera.render("page", &context).unwrap(), "Hola Ana");
}

#[test]
fn test_missing_key_argument_fails_render() {
    let dir = tempfile::tempdir().unwrap();
    let service = load(dir.path());

    let mut tera = Tera::default();
    lingo_rs_template::register_service(&mut tera, &service);
    tera.add_raw_template("broken", r#"{{ t(domain="admin") }}"#).unwrap();

    assert!(tera.render("broken", &Context::new()).is_err());
}
