//! Translation catalog for loading and looking up message templates.
//!
//! A [`Catalog`] maps `locale -> domain -> key -> template`. It is built once
//! from a resource directory (see [`manifest`](super::manifest)) and is
//! read-only afterwards, so it can be shared between threads without locking.
//!
//! ## File contents
//!
//! Both formats hold a single mapping. Nested mappings are flattened with
//! `.` separators, so these two files are equivalent:
//!
//! ```yaml
//! home:
//!   title: Bienvenido
//! greeting: Hola %name%
//! ```
//!
//! ```json
//! { "home.title": "Bienvenido", "greeting": "Hola %name%" }
//! ```
//!
//! Numbers and booleans are stored as their text form. Anything else (nulls,
//! lists, non-mapping documents) makes the whole load fail.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::Path;

use super::locale::Locale;
use super::manifest::{self, FileFormat, FileLayout, ManifestEntry, DEFAULT_DOMAIN};
use crate::error::{LingoError, LingoResult};

type Messages = HashMap<String, String>;

/// An immutable store of message templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    locales: HashMap<Locale, HashMap<String, Messages>>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `dir` and loads every matching resource file.
    ///
    /// An empty directory yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns [`LingoError::ConfigurationError`] if `dir` is not a readable
    /// directory and [`LingoError::MalformedCatalog`] if any matched file
    /// fails to parse.
    pub fn build(dir: &Path, format: FileFormat, layout: FileLayout) -> LingoResult<Self> {
        let manifest = manifest::build_manifest(dir, format, layout)?;
        Self::from_manifest(&manifest, format)
    }

    /// Loads the files listed in a manifest.
    pub fn from_manifest(manifest: &[ManifestEntry], format: FileFormat) -> LingoResult<Self> {
        let mut catalog = Self::new();
        for entry in manifest {
            let content = std::fs::read_to_string(&entry.path).map_err(|e| {
                LingoError::malformed(&entry.path, format!("could not be read: {e}"))
            })?;
            let messages = parse_resource(&content, format)
                .map_err(|reason| LingoError::malformed(&entry.path, reason))?;
            tracing::debug!(
                locale = %entry.locale,
                domain = %entry.domain,
                count = messages.len(),
                "loaded resource file"
            );
            catalog.add_messages(&entry.locale, Some(&entry.domain), messages);
        }
        Ok(catalog)
    }

    /// Adds templates for a locale and domain.
    ///
    /// Keys that already exist are overwritten, with a warning, since that
    /// means two resource files disagree.
    pub fn add_messages<I, K, V>(&mut self, locale: &Locale, domain: Option<&str>, messages: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let domain = domain.unwrap_or(DEFAULT_DOMAIN);
        let target = self
            .locales
            .entry(locale.clone())
            .or_default()
            .entry(domain.to_string())
            .or_default();
        for (key, template) in messages {
            let key = key.into();
            if target.insert(key.clone(), template.into()).is_some() {
                tracing::warn!(%locale, domain, key = %key, "duplicate catalog key overwritten");
            }
        }
    }

    /// Returns the raw template for an exact `(locale, domain, key)`.
    ///
    /// No fallback to other locales or domains is attempted.
    pub fn lookup(&self, locale: &Locale, domain: Option<&str>, key: &str) -> Option<&str> {
        self.locales
            .get(locale)?
            .get(domain.unwrap_or(DEFAULT_DOMAIN))?
            .get(key)
            .map(String::as_str)
    }

    /// Returns `true` if any file contributed to the given locale.
    pub fn has_locale(&self, locale: &Locale) -> bool {
        self.locales.contains_key(locale)
    }

    /// Returns the loaded locales, sorted.
    pub fn locales(&self) -> Vec<&Locale> {
        let mut locales: Vec<&Locale> = self.locales.keys().collect();
        locales.sort_unstable();
        locales
    }

    /// Returns the domains loaded for a locale, sorted.
    pub fn domains(&self, locale: &Locale) -> Vec<&str> {
        let mut domains: Vec<&str> = self
            .locales
            .get(locale)
            .map(|domains| domains.keys().map(String::as_str).collect())
            .unwrap_or_default();
        domains.sort_unstable();
        domains
    }

    /// Returns the keys of one `(locale, domain)` catalog, sorted.
    pub fn keys(&self, locale: &Locale, domain: Option<&str>) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .locales
            .get(locale)
            .and_then(|domains| domains.get(domain.unwrap_or(DEFAULT_DOMAIN)))
            .map(|messages| messages.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Returns the total number of templates across all locales and domains.
    pub fn len(&self) -> usize {
        self.locales
            .values()
            .flat_map(HashMap::values)
            .map(HashMap::len)
            .sum()
    }

    /// Returns `true` if the catalog holds no templates.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parses one resource file's contents into flattened `key -> template` pairs.
///
/// Whitespace-only content is an empty catalog. The error is a human-readable
/// reason; the caller attaches the file path.
pub fn parse_resource(content: &str, format: FileFormat) -> Result<Messages, String> {
    let mut messages = Messages::new();
    if content.trim().is_empty() {
        return Ok(messages);
    }

    match format {
        FileFormat::Yaml => {
            let value: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| format!("invalid YAML: {e}"))?;
            match value {
                serde_yaml::Value::Null => {}
                serde_yaml::Value::Mapping(mapping) => flatten_yaml("", &mapping, &mut messages)?,
                _ => return Err("top level must be a mapping".to_string()),
            }
        }
        FileFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| format!("invalid JSON: {e}"))?;
            match value {
                serde_json::Value::Object(object) => flatten_json("", &object, &mut messages)?,
                _ => return Err("top level must be an object".to_string()),
            }
        }
    }

    Ok(messages)
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn insert_unique(out: &mut Messages, key: String, template: String) -> Result<(), String> {
    match out.entry(key) {
        Entry::Occupied(entry) => Err(format!("key \"{}\" is defined more than once", entry.key())),
        Entry::Vacant(entry) => {
            entry.insert(template);
            Ok(())
        }
    }
}

fn flatten_yaml(
    prefix: &str,
    mapping: &serde_yaml::Mapping,
    out: &mut Messages,
) -> Result<(), String> {
    use serde_yaml::Value;

    for (key, value) in mapping {
        let Value::String(key) = key else {
            let shown = serde_yaml::to_string(key).unwrap_or_default();
            return Err(format!("key {} must be a string", shown.trim()));
        };
        let key = join_key(prefix, key);
        match value {
            Value::String(s) => insert_unique(out, key, s.clone())?,
            Value::Number(n) => insert_unique(out, key, n.to_string())?,
            Value::Bool(b) => insert_unique(out, key, b.to_string())?,
            Value::Mapping(nested) => flatten_yaml(&key, nested, out)?,
            Value::Null => return Err(format!("key \"{key}\" has no value")),
            Value::Sequence(_) | Value::Tagged(_) => {
                return Err(format!("key \"{key}\" must map to a string"))
            }
        }
    }
    Ok(())
}

fn flatten_json(
    prefix: &str,
    object: &serde_json::Map<String, serde_json::Value>,
    out: &mut Messages,
) -> Result<(), String> {
    use serde_json::Value;

    for (key, value) in object {
        let key = join_key(prefix, key);
        match value {
            Value::String(s) => insert_unique(out, key, s.clone())?,
            Value::Number(n) => insert_unique(out, key, n.to_string())?,
            Value::Bool(b) => insert_unique(out, key, b.to_string())?,
            Value::Object(nested) => flatten_json(&key, nested, out)?,
            Value::Null => return Err(format!("key \"{key}\" has no value")),
            Value::Array(_) => return Err(format!("key \"{key}\" must map to a string")),
        }
    }
    Ok(())
}
