//! # lingo-rs-template
//!
//! Exposes translations to [Tera](https://keats.github.io/tera/) templates as a
//! global function, `t`.
//!
//! ```text
//! {{ t(key="greeting", params=vars) }}
//! {{ t(key="greeting", name=user) }}
//! {{ t(key="title", domain="admin", locale="es") }}
//! ```
//!
//! The function is built from a plain [`TranslateFn`], so the core crate never
//! depends on Tera and any engine with callable globals can be wired the same
//! way.
//!
//! ## Examples
//!
//! ```
//! use std::sync::Arc;
//! use lingo_rs_core::i18n::{Catalog, LanguageService, Locale, Wrapper};
//!
//! let es = Locale::parse("es").unwrap();
//! let mut catalog = Catalog::new();
//! catalog.add_messages(&es, None, [("greeting", "Hola %name%")]);
//! let service = Arc::new(LanguageService::from_catalog(catalog, es, Wrapper::PercentSign));
//!
//! let mut tera = tera::Tera::default();
//! lingo_rs_template::register_service(&mut tera, &service);
//! tera.add_raw_template("hello", r#"{{ t(key="greeting", name="Ana") }}"#).unwrap();
//! let out = tera.render("hello", &tera::Context::new()).unwrap();
//! assert_eq!(out, "Hola Ana");
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use lingo_rs_core::i18n::{LanguageService, Params, TranslateFn};
use tera::{Function, Tera, Value};

/// The name templates call the translation function by.
pub const FUNCTION_NAME: &str = "t";

const RESERVED_ARGS: [&str; 4] = ["key", "params", "domain", "locale"];

/// Wraps a [`TranslateFn`] as a Tera function.
///
/// # Arguments
///
/// - `key` (required): the message key.
/// - `params` (optional object): placeholder values.
/// - `domain`, `locale` (optional strings): overrides for this call.
///
/// Any other named argument is added to the parameters as well; explicit
/// arguments win over entries of `params` with the same name.
pub fn translation_function(translate: TranslateFn) -> impl Function {
    move |args: &HashMap<String, Value>| -> tera::Result<Value> {
        let key = match args.get("key") {
            Some(Value::String(key)) => key,
            Some(other) => {
                return Err(tera::Error::msg(format!(
                    "Function `{FUNCTION_NAME}` expected `key` to be a string, got `{other}`"
                )))
            }
            None => {
                return Err(tera::Error::msg(format!(
                    "Function `{FUNCTION_NAME}` was called without a `key` argument"
                )))
            }
        };

        let params = collect_params(args)?;
        let domain = optional_str(args, "domain")?;
        let locale = optional_str(args, "locale")?;

        Ok(Value::String(translate(key.as_str(), &params, domain, locale)))
    }
}

/// Registers `t` on a Tera instance.
pub fn register(tera: &mut Tera, translate: TranslateFn) {
    tera.register_function(FUNCTION_NAME, translation_function(translate));
    tracing::debug!(function = FUNCTION_NAME, "registered translation function");
}

/// Registers `t` bound to the service's default locale.
///
/// Per-request rendering should prefer a `Translator`:
/// `register(&mut tera, translator.translate_fn())`.
pub fn register_service(tera: &mut Tera, service: &Arc<LanguageService>) {
    register(tera, service.translate_fn());
}

fn collect_params(args: &HashMap<String, Value>) -> tera::Result<Params> {
    let mut params = Params::new();

    match args.get("params") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (name, value) in map {
                params.insert(name.as_str(), render_value(value));
            }
        }
        Some(other) => {
            return Err(tera::Error::msg(format!(
                "Function `{FUNCTION_NAME}` expected `params` to be an object, got `{other}`"
            )))
        }
    }

    for (name, value) in args {
        if !RESERVED_ARGS.contains(&name.as_str()) {
            params.insert(name.as_str(), render_value(value));
        }
    }

    Ok(params)
}

fn optional_str<'a>(args: &'a HashMap<String, Value>, name: &str) -> tera::Result<Option<&'a str>> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(tera::Error::msg(format!(
            "Function `{FUNCTION_NAME}` expected `{name}` to be a string, got `{other}`"
        ))),
    }
}

/// Strings are used verbatim; everything else is rendered as JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
