//! System checks for loaded catalogs.
//!
//! Missing translations are not errors at render time (the key is shown
//! instead), so gaps in coverage are easy to ship unnoticed. These checks
//! compare every locale against the default locale so the gaps can be reported
//! before deployment.
//!
//! ## Examples
//!
//! ```
//! use lingo_rs_core::checks::{CheckLevel, CheckRegistry};
//! use lingo_rs_core::i18n::{Catalog, LanguageService, Locale, Wrapper};
//!
//! let en = Locale::parse("en").unwrap();
//! let es = Locale::parse("es").unwrap();
//! let mut catalog = Catalog::new();
//! catalog.add_messages(&en, None, [("hello", "Hello"), ("bye", "Bye")]);
//! catalog.add_messages(&es, None, [("hello", "Hola")]);
//! let service = LanguageService::from_catalog(catalog, en, Wrapper::PercentSign);
//!
//! let messages = CheckRegistry::with_builtins().run_checks(None, &service);
//! assert_eq!(messages.len(), 1);
//! assert_eq!(messages[0].level, CheckLevel::Warning);
//! assert_eq!(messages[0].id, "lingo.W001");
//! ```

use std::collections::HashSet;
use std::fmt;

use crate::i18n::LanguageService;

/// How many keys a coverage message lists before summarizing.
const LISTED_KEYS: usize = 5;

/// Severity level for a check message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckLevel {
    /// Informational message.
    Info = 1,
    /// A potential problem.
    Warning = 2,
    /// A definite problem that should be fixed.
    Error = 3,
}

impl fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// A finding about the loaded catalogs.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    /// The severity level.
    pub level: CheckLevel,
    /// Stable identifier, e.g. `lingo.W001`.
    pub id: &'static str,
    /// What is wrong.
    pub msg: String,
    /// How to fix it.
    pub hint: &'static str,
    /// The catalog concerned, as `locale` or `locale/domain`.
    pub catalog: Option<String>,
}

impl CheckMessage {
    /// Creates a message that is not tied to one catalog.
    pub fn new(
        level: CheckLevel,
        id: &'static str,
        msg: impl Into<String>,
        hint: &'static str,
    ) -> Self {
        Self {
            level,
            id,
            msg: msg.into(),
            hint,
            catalog: None,
        }
    }

    /// Ties the message to a catalog.
    #[must_use]
    pub fn for_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }
}

impl fmt::Display for CheckMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}) {}: {}", self.id, self.level, self.msg)?;
        if let Some(ref catalog) = self.catalog {
            write!(f, "\n\tCatalog: {catalog}")?;
        }
        write!(f, "\n\tHINT: {}", self.hint)
    }
}

/// A check function that inspects a loaded service.
pub type CheckFn = fn(&LanguageService) -> Vec<CheckMessage>;

struct RegisteredCheck {
    func: CheckFn,
    tags: Vec<String>,
}

/// Registry for check functions, filterable by tag.
pub struct CheckRegistry {
    checks: Vec<RegisteredCheck>,
}

impl CheckRegistry {
    /// Creates a registry pre-loaded with the built-in catalog checks.
    pub fn with_builtins() -> Self {
        let mut registry = Self { checks: Vec::new() };
        registry.register(check_default_locale, &["catalog"]);
        registry.register(check_coverage, &["coverage"]);
        registry
    }

    /// Registers a check function with the given tags.
    pub fn register(&mut self, func: CheckFn, tags: &[&str]) {
        self.checks.push(RegisteredCheck {
            func,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        });
    }

    /// Runs all registered checks, or only those tagged with one of `tags`.
    pub fn run_checks(&self, tags: Option<&[&str]>, service: &LanguageService) -> Vec<CheckMessage> {
        let mut messages = Vec::new();

        for check in &self.checks {
            let should_run = tags.map_or(true, |filter_tags| {
                filter_tags.iter().any(|t| check.tags.iter().any(|tag| tag == t))
            });

            if should_run {
                messages.extend((check.func)(service));
            }
        }

        messages
    }

    /// Returns the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns `true` if no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

/// Runs every built-in check.
pub fn run_checks(service: &LanguageService) -> Vec<CheckMessage> {
    CheckRegistry::with_builtins().run_checks(None, service)
}

// ============================================================
// Built-in checks
// ============================================================

/// Checks that the default locale has a catalog.
fn check_default_locale(service: &LanguageService) -> Vec<CheckMessage> {
    let catalog = service.catalog();
    let default = service.default_locale();

    if catalog.is_empty() {
        return vec![CheckMessage::new(
            CheckLevel::Info,
            "lingo.I001",
            "No translations are loaded; every lookup will return its key.",
            "Add resource files to the configured directory.",
        )];
    }

    if catalog.has_locale(default) {
        Vec::new()
    } else {
        vec![CheckMessage::new(
            CheckLevel::Error,
            "lingo.E001",
            format!("The default locale '{default}' has no catalog."),
            "Add a resource file for the default locale or change the 'locale' setting.",
        )
        .for_catalog(default.as_str())]
    }
}

/// Compares every locale's keys against the default locale, per domain.
fn check_coverage(service: &LanguageService) -> Vec<CheckMessage> {
    let catalog = service.catalog();
    let default = service.default_locale();
    let mut messages = Vec::new();

    if !catalog.has_locale(default) {
        return messages;
    }

    for locale in catalog.locales() {
        if locale == default {
            continue;
        }

        let mut domains: Vec<&str> = catalog.domains(default);
        domains.extend(catalog.domains(locale));
        domains.sort_unstable();
        domains.dedup();

        for domain in domains {
            let reference: HashSet<&str> = catalog.keys(default, Some(domain)).into_iter().collect();
            let translated: HashSet<&str> = catalog.keys(locale, Some(domain)).into_iter().collect();
            let name = format!("{locale}/{domain}");

            let missing = sorted_difference(&reference, &translated);
            if !missing.is_empty() {
                messages.push(
                    CheckMessage::new(
                        CheckLevel::Warning,
                        "lingo.W001",
                        format!(
                            "{} key(s) are untranslated: {}",
                            missing.len(),
                            summarize(&missing)
                        ),
                        "These keys will render as the key itself in this locale.",
                    )
                    .for_catalog(name.as_str()),
                );
            }

            let orphaned = sorted_difference(&translated, &reference);
            if !orphaned.is_empty() {
                messages.push(
                    CheckMessage::new(
                        CheckLevel::Warning,
                        "lingo.W002",
                        format!(
                            "{} key(s) do not exist in the default locale '{default}': {}",
                            orphaned.len(),
                            summarize(&orphaned)
                        ),
                        "Remove stale keys or add them to the default locale.",
                    )
                    .for_catalog(name),
                );
            }
        }
    }

    messages
}

fn sorted_difference<'a>(a: &HashSet<&'a str>, b: &HashSet<&'a str>) -> Vec<&'a str> {
    let mut keys: Vec<&str> = a.difference(b).copied().collect();
    keys.sort_unstable();
    keys
}

fn summarize(keys: &[&str]) -> String {
    let listed = keys
        .iter()
        .take(LISTED_KEYS)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if keys.len() > LISTED_KEYS {
        format!("{listed}, ...")
    } else {
        listed
    }
}
