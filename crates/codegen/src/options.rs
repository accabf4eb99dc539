use serde::{Deserialize, Serialize};

/// Types that never get a fragment: the root types, generated connection,
/// edge and payload wrappers, and the Django debug toolbar's SQL type.
pub const DEFAULT_FRAGMENT_EXCLUDE: &[&str] = &[
    "Query",
    ".+TypeConnection$",
    ".+TypeEdge$",
    ".+Payload$",
    "Mutation",
    "DjangoDebugSQL",
];

pub const DEFAULT_FRAGMENT_NAME_PATTERN: &str = "Type.*";
pub const DEFAULT_FRAGMENT_NAME_REPLACEMENT: &str = "Field";

pub const DEFAULT_QUERY_EXCLUDE: &[&str] = &["_debug"];
pub const DEFAULT_MUTATION_EXCLUDE: &[&str] = &["_debug"];

/// A `(pattern, replacement)` pair used to derive fragment names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameRule {
    pub pattern: String,
    pub replacement: String,
}

impl NameRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

impl Default for NameRule {
    fn default() -> Self {
        Self::new(DEFAULT_FRAGMENT_NAME_PATTERN, DEFAULT_FRAGMENT_NAME_REPLACEMENT)
    }
}

/// Uncompiled generator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub fragment_exclude: Vec<String>,
    /// `None` keeps type names unchanged as fragment names.
    pub fragment_name_rule: Option<NameRule>,
    pub query_exclude: Vec<String>,
    pub mutation_exclude: Vec<String>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            fragment_exclude: to_owned(DEFAULT_FRAGMENT_EXCLUDE),
            fragment_name_rule: Some(NameRule::default()),
            query_exclude: to_owned(DEFAULT_QUERY_EXCLUDE),
            mutation_exclude: to_owned(DEFAULT_MUTATION_EXCLUDE),
        }
    }
}

fn to_owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(ToString::to_string).collect()
}
