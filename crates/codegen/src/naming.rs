//! Name rules: exclusion patterns and fragment-name derivation.

use crate::{CodegenError, Result};
use regex::Regex;

/// An ordered list of name patterns compiled into one start-anchored alternation.
///
/// A name is excluded when the combined pattern matches at position 0. The match
/// does not have to cover the whole name: `Query` also excludes `QueryRoot`.
#[derive(Debug, Clone)]
pub struct ExclusionRuleset {
    patterns: Vec<String>,
    regex: Option<Regex>,
}

impl ExclusionRuleset {
    /// Compiles `patterns`; `ruleset` names the list in error messages.
    pub fn new<I, S>(ruleset: &'static str, patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        if patterns.is_empty() {
            return Ok(Self::empty());
        }

        let combined = patterns.join("|");
        let regex = Regex::new(&format!("^(?:{combined})")).map_err(|source| {
            CodegenError::InvalidPattern {
                ruleset,
                pattern: combined.clone(),
                source,
            }
        })?;

        Ok(Self {
            patterns,
            regex: Some(regex),
        })
    }

    /// A ruleset that never excludes anything.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            regex: None,
        }
    }

    #[must_use]
    pub fn is_excluded(&self, name: &str) -> bool {
        self.regex.as_ref().is_some_and(|regex| regex.is_match(name))
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// A single substitution turning a type name into a fragment name.
///
/// Every match of `pattern` is replaced; the replacement may refer to capture
/// groups with `$1` / `${name}`.
#[derive(Debug, Clone)]
pub struct NamingTransform {
    pattern: Regex,
    replacement: String,
}

impl NamingTransform {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| CodegenError::InvalidPattern {
            ruleset: "fragment name",
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self {
            pattern: regex,
            replacement: replacement.into(),
        })
    }

    #[must_use]
    pub fn apply(&self, type_name: &str) -> String {
        self.pattern
            .replace_all(type_name, self.replacement.as_str())
            .into_owned()
    }
}

/// Derives the fragment name for `type_name`; identity without a transform.
///
/// No uniqueness check is made: two types may map to the same fragment name.
#[must_use]
pub fn fragment_name(type_name: &str, transform: Option<&NamingTransform>) -> String {
    transform.map_or_else(|| type_name.to_string(), |t| t.apply(type_name))
}
