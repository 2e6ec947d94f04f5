//! Row predicates used by the leaf filter.
//!
//! [`TextFilter`] matches a row's display text against a regular expression;
//! [`TypeFilter`] matches the kind of the object a row shows. Both treat an
//! empty filter as "accept everything".

use std::collections::BTreeSet;

use regex::Regex;

use napkin_outline_core::logging::targets;
use napkin_outline_core::{ObjectKind, OutlineError, Result};

/// A compiled text pattern.
///
/// Matching is a search: the pattern may match anywhere in the text, so
/// `"Lig"` accepts `"Light"`.
#[derive(Debug, Clone, Default)]
pub struct TextFilter {
    pattern: String,
    case_sensitive: bool,
    matcher: Matcher,
}

#[derive(Debug, Clone, Default)]
enum Matcher {
    #[default]
    Any,
    Regex(Regex),
    /// Substring search; lowercased when matching ignores case.
    Literal(String),
}

impl TextFilter {
    /// Compiles `pattern` as a regular expression.
    ///
    /// A pattern that is not a valid regular expression is matched as a
    /// literal substring instead, and a warning is logged.
    pub fn new(pattern: impl Into<String>, case_sensitive: bool) -> Self {
        let pattern = pattern.into();
        match Self::try_new(pattern.clone(), case_sensitive) {
            Ok(filter) => filter,
            Err(err) => {
                tracing::warn!(
                    target: targets::FILTER,
                    %err,
                    "invalid filter pattern, matching it literally"
                );
                let needle = if case_sensitive {
                    pattern.clone()
                } else {
                    pattern.to_lowercase()
                };
                Self {
                    pattern,
                    case_sensitive,
                    matcher: Matcher::Literal(needle),
                }
            }
        }
    }

    /// Compiles `pattern` as a regular expression.
    ///
    /// Fails with [`OutlineError::InvalidPattern`] if the pattern does not compile.
    pub fn try_new(pattern: impl Into<String>, case_sensitive: bool) -> Result<Self> {
        let pattern = pattern.into();
        let matcher = if pattern.is_empty() {
            Matcher::Any
        } else {
            Matcher::Regex(
                compile(&pattern, case_sensitive)
                    .map_err(|err| OutlineError::invalid_pattern(pattern.clone(), err))?,
            )
        };
        Ok(Self {
            pattern,
            case_sensitive,
            matcher,
        })
    }

    /// Returns the pattern as given.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns `true` if matching distinguishes upper and lower case.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Returns `true` if this filter accepts every text.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// Returns `true` if the pattern matches somewhere in `text`.
    pub fn matches(&self, text: &str) -> bool {
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Regex(regex) => regex.is_match(text),
            Matcher::Literal(needle) if self.case_sensitive => text.contains(needle.as_str()),
            Matcher::Literal(needle) => text.to_lowercase().contains(needle.as_str()),
        }
    }
}

impl PartialEq for TextFilter {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.case_sensitive == other.case_sensitive
    }
}

fn compile(pattern: &str, case_sensitive: bool) -> std::result::Result<Regex, regex::Error> {
    if case_sensitive {
        Regex::new(pattern)
    } else {
        Regex::new(&format!("(?i){pattern}"))
    }
}

/// The set of object kinds a row may show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeFilter {
    kinds: BTreeSet<ObjectKind>,
}

impl TypeFilter {
    /// Creates a filter enabling the given kinds.
    pub fn new(kinds: impl IntoIterator<Item = ObjectKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Returns `true` if this filter accepts every kind.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Returns the enabled kinds in kind order.
    pub fn kinds(&self) -> impl Iterator<Item = ObjectKind> + '_ {
        self.kinds.iter().copied()
    }

    /// Returns `true` if a row of the given kind passes.
    ///
    /// Rows without a kind only pass an empty filter.
    pub fn accepts(&self, kind: Option<ObjectKind>) -> bool {
        if self.kinds.is_empty() {
            return true;
        }
        kind.is_some_and(|kind| self.kinds.contains(&kind))
    }
}

impl FromIterator<ObjectKind> for TypeFilter {
    fn from_iter<I: IntoIterator<Item = ObjectKind>>(iter: I) -> Self {
        Self::new(iter)
    }
}
