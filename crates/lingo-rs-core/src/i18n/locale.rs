//! Locale identifiers and request-side locale negotiation.
//!
//! Resolution follows a fixed precedence:
//!
//! 1. An explicit locale (e.g. a `?lang=` query parameter), kept as given
//!    apart from case and `_` separators.
//! 2. The first tag of an `Accept-Language`-style header, reduced to its
//!    leading two letters.
//! 3. The configured default locale.
//!
//! Resolution never fails. An empty explicit value or an unreadable header
//! falls through to the next tier.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static LOCALE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(?:-[a-z0-9]{2,8})*$").expect("valid locale regex"));

static ACCEPT_LANGUAGE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]{2})").expect("valid accept-language regex"));

/// A normalized, lowercase language tag such as `en` or `pt-br`.
///
/// # Examples
///
/// ```
/// use lingo_rs_core::i18n::Locale;
///
/// let locale = Locale::parse("pt_BR").unwrap();
/// assert_eq!(locale.as_str(), "pt-br");
/// assert_eq!(locale.primary_language(), "pt");
/// assert!(Locale::parse("").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale(String);

impl Locale {
    /// Parses and normalizes a language tag.
    ///
    /// Surrounding whitespace is trimmed, `_` separators become `-`, and the
    /// whole tag is lowercased. Returns `None` for anything that is not a
    /// language tag.
    pub fn parse(tag: &str) -> Option<Self> {
        let normalized = tag.trim().replace('_', "-").to_ascii_lowercase();
        if LOCALE_TAG.is_match(&normalized) {
            Some(Self(normalized))
        } else {
            None
        }
    }

    /// Normalizes a locale someone asked for by name.
    ///
    /// Unlike [`parse`](Self::parse) the value is not checked against the tag
    /// grammar: a caller who names `english` or `x-pirate` gets exactly that,
    /// and simply finds no catalog for it. Only an empty value yields `None`.
    ///
    /// ```
    /// use lingo_rs_core::i18n::Locale;
    ///
    /// assert_eq!(Locale::explicit(" English ").unwrap().as_str(), "english");
    /// assert_eq!(Locale::explicit("pt_BR").unwrap().as_str(), "pt-br");
    /// assert!(Locale::explicit("  ").is_none());
    /// ```
    pub fn explicit(value: &str) -> Option<Self> {
        let normalized = value.trim().replace('_', "-").to_ascii_lowercase();
        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    /// Returns the normalized tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the primary language subtag (`en` for `en-gb`).
    pub fn primary_language(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Locale {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Locale {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Extracts the primary language from an `Accept-Language` header.
///
/// Only the first comma-separated tag is considered, and only its leading two
/// letters are kept: quality weights, region subtags and whatever else follows
/// are ignored. Returns `None` when the tag does not start with two letters.
///
/// # Examples
///
/// ```
/// use lingo_rs_core::i18n::locale::parse_accept_language;
///
/// assert_eq!(parse_accept_language("es-ES,es;q=0.9,en;q=0.8").unwrap().as_str(), "es");
/// assert_eq!(parse_accept_language("en_US,en;q=0.9").unwrap().as_str(), "en");
/// assert!(parse_accept_language("???invalid").is_none());
/// ```
pub fn parse_accept_language(header: &str) -> Option<Locale> {
    let first = header.split(',').next()?;
    let tag = first.split(';').next()?.trim();
    let captures = ACCEPT_LANGUAGE_PREFIX.captures(tag)?;
    Locale::parse(&captures[1])
}

/// Picks the active locale for one unit of work.
///
/// # Examples
///
/// ```
/// use lingo_rs_core::i18n::Locale;
/// use lingo_rs_core::i18n::locale::resolve;
///
/// let default = Locale::parse("en").unwrap();
/// assert_eq!(resolve(Some("fr"), Some("de-DE,de;q=0.9"), &default), "fr");
/// assert_eq!(resolve(None, Some("de-DE,de;q=0.9"), &default), "de");
/// assert_eq!(resolve(None, None, &default), "en");
/// ```
pub fn resolve(explicit: Option<&str>, header: Option<&str>, default: &Locale) -> Locale {
    if let Some(locale) = explicit.and_then(Locale::explicit) {
        return locale;
    }

    if let Some(header) = header {
        if let Some(locale) = parse_accept_language(header) {
            return locale;
        }
        tracing::debug!(header, "no usable locale in language header");
    }

    default.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Locale {
        Locale::parse("en").unwrap()
    }

    #[test]
    fn test_parse_normalizes() {
        assert_eq!(Locale::parse(" ES ").unwrap().as_str(), "es");
        assert_eq!(Locale::parse("zh_Hant_TW").unwrap().as_str(), "zh-hant-tw");
        assert_eq!(Locale::parse("fr-CA").unwrap().primary_language(), "fr");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Locale::parse("").is_none());
        assert!(Locale::parse("e").is_none());
        assert!(Locale::parse("english").is_none());
        assert!(Locale::parse("en-").is_none());
        assert!(Locale::parse("../etc").is_none());
    }

    #[test]
    fn test_accept_language_first_tag_only() {
        assert_eq!(parse_accept_language("de-DE,de;q=0.9").unwrap(), "de");
        assert_eq!(parse_accept_language("fr;q=0.1, en;q=0.9").unwrap(), "fr");
        assert_eq!(parse_accept_language("  EN-gb ").unwrap(), "en");
    }

    #[test]
    fn test_accept_language_prefix_match() {
        assert_eq!(parse_accept_language("en_US,en;q=0.9").unwrap(), "en");
        assert_eq!(parse_accept_language("english").unwrap(), "en");
        assert_eq!(parse_accept_language("ast-ES").unwrap(), "as");
    }

    #[test]
    fn test_accept_language_malformed() {
        assert!(parse_accept_language("").is_none());
        assert!(parse_accept_language("*").is_none());
        assert!(parse_accept_language("???invalid").is_none());
        assert!(parse_accept_language("e1-US").is_none());
        // A usable later tag does not rescue a malformed first one.
        assert!(parse_accept_language("*,en;q=0.5").is_none());
    }

    #[test]
    fn test_resolve_precedence() {
        assert_eq!(resolve(Some("fr"), Some("de-DE,de;q=0.9"), &en()), "fr");
        assert_eq!(resolve(None, Some("de-DE,de;q=0.9"), &en()), "de");
        assert_eq!(resolve(None, None, &en()), "en");
        assert_eq!(resolve(None, Some("???invalid"), &en()), "en");
    }

    #[test]
    fn test_resolve_explicit_keeps_region() {
        assert_eq!(resolve(Some("pt-BR"), None, &en()), "pt-br");
    }

    #[test]
    fn test_resolve_explicit_used_verbatim() {
        assert_eq!(resolve(Some("english"), Some("de-DE"), &en()), "english");
        assert_eq!(resolve(Some("x-pirate"), Some("de-DE"), &en()), "x-pirate");
        assert_eq!(resolve(Some(" FR "), None, &en()), "fr");
    }

    #[test]
    fn test_resolve_empty_explicit_falls_through() {
        assert_eq!(resolve(Some(""), Some("it-IT"), &en()), "it");
        assert_eq!(resolve(Some("   "), None, &en()), "en");
    }

    #[test]
    fn test_explicit_only_rejects_empty() {
        assert_eq!(Locale::explicit("!!").unwrap().as_str(), "!!");
        assert_eq!(Locale::explicit("Zh_Hant").unwrap().primary_language(), "zh");
        assert!(Locale::explicit("").is_none());
    }
}
