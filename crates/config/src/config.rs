use gqlgen_codegen::{
    GeneratorOptions, NameRule, Outputs, DEFAULT_FRAGMENT_EXCLUDE, DEFAULT_MUTATION_EXCLUDE,
    DEFAULT_QUERY_EXCLUDE,
};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Top-level `gqlgen` configuration.
///
/// Every key is optional. Omitted exclusion lists and an omitted fragment
/// naming rule fall back to the generator defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenConfig {
    /// Schema file (SDL or introspection JSON)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default)]
    pub fragments: FragmentsConfig,

    #[serde(default)]
    pub queries: OperationsConfig,

    #[serde(default)]
    pub mutations: OperationsConfig,
}

/// Settings for the fragments document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FragmentsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Type name patterns that never get a fragment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    /// Fragment naming rule.
    ///
    /// `None` when the key is absent (use the default rule), `Some(None)` when
    /// it is explicitly `null` (fragment names equal type names).
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub name_replace: Option<Option<NameRule>>,
}

/// Settings for the queries or mutations document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Root field name patterns to skip
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl CodegenConfig {
    /// Generator options with defaults filled in for anything not configured.
    #[must_use]
    pub fn to_generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            fragment_exclude: patterns_or(self.fragments.exclude.as_ref(), DEFAULT_FRAGMENT_EXCLUDE),
            fragment_name_rule: self
                .fragments
                .name_replace
                .clone()
                .unwrap_or_else(|| Some(NameRule::default())),
            query_exclude: patterns_or(self.queries.exclude.as_ref(), DEFAULT_QUERY_EXCLUDE),
            mutation_exclude: patterns_or(self.mutations.exclude.as_ref(), DEFAULT_MUTATION_EXCLUDE),
        }
    }

    /// Schema path resolved against `base_dir`.
    #[must_use]
    pub fn schema_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.schema.as_deref().map(|path| resolve(base_dir, path))
    }

    /// Output paths resolved against `base_dir`.
    #[must_use]
    pub fn outputs(&self, base_dir: &Path) -> Outputs {
        let output = |path: &Option<String>| path.as_deref().map(|path| resolve(base_dir, path));
        Outputs {
            fragments: output(&self.fragments.output),
            mutations: output(&self.mutations.output),
            queries: output(&self.queries.output),
        }
    }

    /// Every configured pattern string, labelled by where it came from.
    pub(crate) fn patterns(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let excludes = [
            ("fragments.exclude", &self.fragments.exclude),
            ("queries.exclude", &self.queries.exclude),
            ("mutations.exclude", &self.mutations.exclude),
        ]
        .into_iter()
        .flat_map(|(key, patterns)| {
            patterns
                .iter()
                .flatten()
                .map(move |pattern| (key, pattern.as_str()))
        });
        let name_rule = self
            .fragments
            .name_replace
            .iter()
            .flatten()
            .map(|rule| ("fragments.nameReplace.pattern", rule.pattern.as_str()));
        excludes.chain(name_rule)
    }

    /// Every configured output path, labelled by where it came from.
    pub(crate) fn output_paths(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("fragments.output", &self.fragments.output),
            ("queries.output", &self.queries.output),
            ("mutations.output", &self.mutations.output),
        ]
        .into_iter()
        .filter_map(|(key, path)| path.as_deref().map(|path| (key, path)))
    }
}

fn patterns_or(configured: Option<&Vec<String>>, defaults: &[&str]) -> Vec<String> {
    configured.map_or_else(
        || defaults.iter().map(ToString::to_string).collect(),
        Clone::clone,
    )
}

fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: CodegenConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.to_generator_options(), GeneratorOptions::default());
        assert!(config.outputs(Path::new("/project")).is_empty());
        assert_eq!(config.schema_path(Path::new("/project")), None);
    }

    #[test]
    fn test_explicit_null_name_rule_disables_renaming() {
        let config: CodegenConfig =
            serde_json::from_str(r#"{"fragments": {"nameReplace": null}}"#).unwrap();
        assert_eq!(config.fragments.name_replace, Some(None));
        assert_eq!(config.to_generator_options().fragment_name_rule, None);
    }

    #[test]
    fn test_custom_name_rule_and_excludes() {
        let config: CodegenConfig = serde_json::from_str(
            r#"{
                "fragments": {
                    "exclude": ["Query"],
                    "nameReplace": {"pattern": "Node$", "replacement": "Parts"}
                },
                "queries": {"exclude": []}
            }"#,
        )
        .unwrap();

        let options = config.to_generator_options();
        assert_eq!(options.fragment_exclude, ["Query"]);
        assert_eq!(
            options.fragment_name_rule,
            Some(NameRule::new("Node$", "Parts"))
        );
        assert!(options.query_exclude.is_empty());
        assert_eq!(options.mutation_exclude, ["_debug"]);
    }

    #[test]
    fn test_paths_resolve_against_base_dir() {
        let config = CodegenConfig {
            schema: Some("schema.graphql".into()),
            fragments: FragmentsConfig {
                output: Some("gen/fragments.graphql".into()),
                ..FragmentsConfig::default()
            },
            queries: OperationsConfig {
                output: Some("/abs/queries.graphql".into()),
                exclude: None,
            },
            ..CodegenConfig::default()
        };

        let base = Path::new("/project");
        assert_eq!(
            config.schema_path(base),
            Some(PathBuf::from("/project/schema.graphql"))
        );
        let outputs = config.outputs(base);
        assert_eq!(
            outputs.fragments,
            Some(PathBuf::from("/project/gen/fragments.graphql"))
        );
        assert_eq!(outputs.queries, Some(PathBuf::from("/abs/queries.graphql")));
        assert_eq!(outputs.mutations, None);
    }

    #[test]
    fn test_patterns_are_labelled() {
        let config: CodegenConfig = serde_json::from_str(
            r#"{
                "fragments": {"exclude": ["A"], "nameReplace": {"pattern": "B", "replacement": ""}},
                "mutations": {"exclude": ["C"]}
            }"#,
        )
        .unwrap();

        let patterns: Vec<_> = config.patterns().collect();
        assert_eq!(
            patterns,
            [
                ("fragments.exclude", "A"),
                ("mutations.exclude", "C"),
                ("fragments.nameReplace.pattern", "B"),
            ]
        );
    }
}
