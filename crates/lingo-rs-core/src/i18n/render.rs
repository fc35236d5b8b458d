//! Placeholder substitution for message templates.
//!
//! Placeholders are named slots wrapped in one of two delimiter styles,
//! `%name%` or `{name}`. Parameter names passed without delimiters are wrapped
//! with the configured [`Wrapper`]; names that already carry either style are
//! used as-is, which lets a call site target the other style explicitly.
//!
//! Substitution is a single left-to-right pass: at each position the longest
//! matching placeholder is replaced and scanning resumes after it, so text
//! coming from a parameter value is never substituted again.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LingoError;

/// The delimiter style applied to unwrapped parameter names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wrapper {
    /// `{name}`
    #[serde(rename = "{}")]
    CurlyBraces,
    /// `%name%`
    #[default]
    #[serde(rename = "%")]
    PercentSign,
}

impl Wrapper {
    /// Returns the opening and closing delimiters.
    pub const fn delimiters(self) -> (char, char) {
        match self {
            Self::CurlyBraces => ('{', '}'),
            Self::PercentSign => ('%', '%'),
        }
    }

    /// Wraps a bare parameter name in this style.
    ///
    /// # Examples
    ///
    /// ```
    /// use lingo_rs_core::i18n::Wrapper;
    ///
    /// assert_eq!(Wrapper::PercentSign.wrap("name"), "%name%");
    /// assert_eq!(Wrapper::CurlyBraces.wrap("name"), "{name}");
    /// ```
    pub fn wrap(self, name: &str) -> String {
        let (open, close) = self.delimiters();
        format!("{open}{name}{close}")
    }

    /// Returns `true` if `name` is already wrapped in either supported style.
    pub fn is_wrapped(name: &str) -> bool {
        [Self::CurlyBraces, Self::PercentSign]
            .iter()
            .any(|style| {
                let (open, close) = style.delimiters();
                name.len() >= 2 && name.starts_with(open) && name.ends_with(close)
            })
    }

    /// Returns the placeholder form of a parameter name.
    pub fn placeholder(self, name: &str) -> String {
        if Self::is_wrapped(name) {
            name.to_string()
        } else {
            self.wrap(name)
        }
    }
}

impl fmt::Display for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CurlyBraces => f.write_str("{}"),
            Self::PercentSign => f.write_str("%"),
        }
    }
}

impl FromStr for Wrapper {
    type Err = LingoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "{}" => Ok(Self::CurlyBraces),
            "%" => Ok(Self::PercentSign),
            other => Err(LingoError::ConfigurationError(format!(
                "Unsupported wrapper: {other} (expected \"{{}}\" or \"%\")"
            ))),
        }
    }
}

/// Parameters for a translation, keyed by (possibly pre-wrapped) name.
///
/// # Examples
///
/// ```
/// use lingo_rs_core::i18n::Params;
///
/// let params = Params::new().with("name", "Ana").with("count", 3);
/// assert_eq!(params.get("count"), Some("3"));
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, String>,
}

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, rendering the value with `Display`.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl fmt::Display) {
        self.values.insert(name.into(), value.to_string());
    }

    /// Returns a parameter value by the name it was inserted under.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<K: Into<String>, V: fmt::Display, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<V: fmt::Display> From<HashMap<String, V>> for Params {
    fn from(map: HashMap<String, V>) -> Self {
        map.into_iter().collect()
    }
}

/// Substitutes parameters into a template.
///
/// Unmatched placeholders stay verbatim; unused parameters are ignored.
///
/// # Examples
///
/// ```
/// use lingo_rs_core::i18n::{render, Params, Wrapper};
///
/// let params = Params::new().with("name", "Ana").with("{place}", "Lima");
/// assert_eq!(
///     render::substitute("Hola %name% de {place}, %missing%", &params, Wrapper::PercentSign),
///     "Hola Ana de Lima, %missing%"
/// );
/// ```
pub fn substitute(template: &str, params: &Params, wrapper: Wrapper) -> String {
    if params.is_empty() {
        return template.to_string();
    }

    let mut replacements: Vec<(String, &str)> = params
        .iter()
        .map(|(name, value)| (wrapper.placeholder(name), value))
        .collect();
    // Longest first, so `%name_full%` wins over a hypothetical `%name%` prefix match.
    replacements.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    'scan: while let Some(ch) = rest.chars().next() {
        for (placeholder, value) in &replacements {
            if !placeholder.is_empty() && rest.starts_with(placeholder.as_str()) {
                out.push_str(value);
                rest = &rest[placeholder.len()..];
                continue 'scan;
            }
        }
        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }
    out
}
