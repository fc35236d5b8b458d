//! Resource file discovery.
//!
//! A manifest is the list of `(locale, domain, path)` tuples matched in a
//! resource directory. Building it only lists the directory; reading and
//! parsing the files is the catalog's job.
//!
//! ## Naming convention
//!
//! The layout is fixed by configuration, never inferred per file:
//!
//! | Layout | File name | Domain |
//! |---|---|---|
//! | [`FileLayout::Locale`] | `{locale}.{format}` (e.g. `es.yaml`) | [`DEFAULT_DOMAIN`] |
//! | [`FileLayout::Domain`] | `{locale}.{domain}.{format}` (e.g. `es.admin.yaml`) | `{domain}` |
//!
//! Files that do not match the configured layout and format are skipped.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::locale::Locale;
use crate::error::{LingoError, LingoResult};

/// The domain used when a lookup names none.
pub const DEFAULT_DOMAIN: &str = "messages";

static DOMAIN_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid domain regex"));

/// Supported resource file formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// YAML mappings, `*.yaml`.
    #[default]
    Yaml,
    /// JSON objects, `*.json`.
    Json,
}

impl FileFormat {
    /// Returns the file extension (without the dot) this format matches.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for FileFormat {
    type Err = LingoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yaml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(LingoError::ConfigurationError(format!(
                "Unsupported file format: {other} (expected \"yaml\" or \"json\")"
            ))),
        }
    }
}

/// How resource file names encode locale and domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileLayout {
    /// One file per locale: `{locale}.{format}`.
    #[default]
    Locale,
    /// One file per locale and domain: `{locale}.{domain}.{format}`.
    Domain,
}

impl fmt::Display for FileLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locale => f.write_str("locale"),
            Self::Domain => f.write_str("domain"),
        }
    }
}

impl FromStr for FileLayout {
    type Err = LingoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "locale" => Ok(Self::Locale),
            "domain" => Ok(Self::Domain),
            other => Err(LingoError::ConfigurationError(format!(
                "Unsupported layout: {other} (expected \"locale\" or \"domain\")"
            ))),
        }
    }
}

/// A resource file matched by the naming convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// The locale encoded in the file name.
    pub locale: Locale,
    /// The domain encoded in the file name, or [`DEFAULT_DOMAIN`].
    pub domain: String,
    /// Full path of the file.
    pub path: PathBuf,
}

/// Maps a bare file name to its `(locale, domain)` under the given layout.
///
/// # Examples
///
/// ```
/// use lingo_rs_core::i18n::manifest::{parse_file_name, FileFormat, FileLayout};
///
/// let (locale, domain) = parse_file_name("es.yaml", FileFormat::Yaml, FileLayout::Locale).unwrap();
/// assert_eq!((locale.as_str(), domain.as_str()), ("es", "messages"));
///
/// let (locale, domain) = parse_file_name("es.admin.json", FileFormat::Json, FileLayout::Domain).unwrap();
/// assert_eq!((locale.as_str(), domain.as_str()), ("es", "admin"));
///
/// assert!(parse_file_name("es.yaml", FileFormat::Yaml, FileLayout::Domain).is_none());
/// ```
pub fn parse_file_name(
    file_name: &str,
    format: FileFormat,
    layout: FileLayout,
) -> Option<(Locale, String)> {
    if file_name.starts_with('.') {
        return None;
    }
    let stem = file_name
        .strip_suffix(format.extension())?
        .strip_suffix('.')?;

    match layout {
        FileLayout::Locale => Locale::parse(stem).map(|locale| (locale, DEFAULT_DOMAIN.to_string())),
        FileLayout::Domain => {
            let (locale, domain) = stem.split_once('.')?;
            if !DOMAIN_NAME.is_match(domain) {
                return None;
            }
            Locale::parse(locale).map(|locale| (locale, domain.to_string()))
        }
    }
}

/// Lists the resource files directly under `dir` that match the convention.
///
/// The scan is not recursive. Entries are sorted by path so that merge order
/// is stable across platforms.
///
/// # Errors
///
/// Returns [`LingoError::ConfigurationError`] if `dir` is not a readable
/// directory.
pub fn build_manifest(
    dir: &Path,
    format: FileFormat,
    layout: FileLayout,
) -> LingoResult<Vec<ManifestEntry>> {
    if !dir.is_dir() {
        return Err(LingoError::ConfigurationError(format!(
            "resource path '{}' is not a directory",
            dir.display()
        )));
    }

    let unreadable = |e: std::io::Error| {
        LingoError::ConfigurationError(format!(
            "resource directory '{}' is not readable: {e}",
            dir.display()
        ))
    };

    let mut entries = Vec::new();
    for dir_entry in std::fs::read_dir(dir).map_err(unreadable)? {
        let path = dir_entry.map_err(unreadable)?.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        match parse_file_name(file_name, format, layout) {
            Some((locale, domain)) => {
                tracing::debug!(%locale, %domain, path = %path.display(), "matched resource file");
                entries.push(ManifestEntry {
                    locale,
                    domain,
                    path,
                });
            }
            None => tracing::trace!(path = %path.display(), "skipping unmatched file"),
        }
    }

    entries.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("yaml".parse::<FileFormat>().unwrap(), FileFormat::Yaml);
        assert_eq!("json".parse::<FileFormat>().unwrap(), FileFormat::Json);
        let err = "xml".parse::<FileFormat>().unwrap_err();
        assert!(err.to_string().contains("Unsupported file format: xml"));
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("domain".parse::<FileLayout>().unwrap(), FileLayout::Domain);
        assert!("flat".parse::<FileLayout>().is_err());
    }

    #[test]
    fn test_parse_locale_layout() {
        let parse = |name| parse_file_name(name, FileFormat::Yaml, FileLayout::Locale);
        assert_eq!(parse("en.yaml").unwrap().0, "en");
        assert_eq!(parse("pt_BR.yaml").unwrap().0, "pt-br");
        assert!(parse("en.json").is_none());
        assert!(parse("en.yml").is_none());
        assert!(parse("es.messages.yaml").is_none());
        assert!(parse(".en.yaml").is_none());
        assert!(parse("yaml").is_none());
        assert!(parse("README.yaml").is_none());
    }

    #[test]
    fn test_parse_domain_layout() {
        let parse = |name| parse_file_name(name, FileFormat::Json, FileLayout::Domain);
        let (locale, domain) = parse("de.validators.json").unwrap();
        assert_eq!(locale, "de");
        assert_eq!(domain, "validators");
        assert!(parse("de.json").is_none());
        assert!(parse("de.a.b.json").is_none());
        assert!(parse("de..json").is_none());
    }

    #[test]
    fn test_build_manifest_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "fr.yaml");
        touch(dir.path(), "en.yaml");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "es.json");
        std::fs::create_dir(dir.path().join("de.yaml")).unwrap();

        let manifest = build_manifest(dir.path(), FileFormat::Yaml, FileLayout::Locale).unwrap();
        let locales: Vec<&str> = manifest.iter().map(|e| e.locale.as_str()).collect();
        assert_eq!(locales, vec!["en", "fr"]);
        assert!(manifest.iter().all(|e| e.domain == DEFAULT_DOMAIN));
    }

    #[test]
    fn test_build_manifest_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "en.yaml");
        let manifest = build_manifest(dir.path(), FileFormat::Yaml, FileLayout::Locale).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_build_manifest_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = build_manifest(&missing, FileFormat::Yaml, FileLayout::Locale).unwrap_err();
        assert!(matches!(err, LingoError::ConfigurationError(_)));
    }

    #[test]
    fn test_build_manifest_rejects_file_path() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "en.yaml");
        let err = build_manifest(&dir.path().join("en.yaml"), FileFormat::Yaml, FileLayout::Locale)
            .unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }
}
