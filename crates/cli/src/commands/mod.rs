//! Subcommand implementations and the settings they share.

pub mod generate;
pub mod print;

use anyhow::{Context, Result};
use gqlgen_codegen::Generator;
use gqlgen_config::{find_config, load_config, CodegenConfig};
use gqlgen_schema::{load_schema, Schema};
use std::path::{Path, PathBuf};

/// Config file contents plus the directory its relative paths resolve against.
#[derive(Debug)]
pub struct Settings {
    pub config: CodegenConfig,
    pub base_dir: PathBuf,
}

impl Settings {
    /// Loads the config named by `--config`, or the first one found walking up
    /// from `start_dir`. Without a config file every setting is a default and
    /// paths resolve against `start_dir`.
    pub fn load(config_path: Option<PathBuf>, start_dir: &Path) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => Some(path),
            None => find_config(start_dir).context("Failed to search for config")?,
        };

        let Some(config_path) = config_path else {
            tracing::debug!(dir = %start_dir.display(), "No config file, using defaults");
            return Ok(Self {
                config: CodegenConfig::default(),
                base_dir: start_dir.to_path_buf(),
            });
        };

        let config = load_config(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
        let base_dir = config_path
            .parent()
            .map_or_else(|| start_dir.to_path_buf(), Path::to_path_buf);
        Ok(Self { config, base_dir })
    }

    /// The `--schema` flag wins over the config file.
    pub fn schema_path(&self, cli_schema: Option<PathBuf>) -> Result<PathBuf> {
        cli_schema
            .or_else(|| self.config.schema_path(&self.base_dir))
            .context("No schema given. Pass --schema or set 'schema' in a config file.")
    }

    pub fn load_schema(&self, cli_schema: Option<PathBuf>) -> Result<Schema> {
        let path = self.schema_path(cli_schema)?;
        load_schema(&path)
            .with_context(|| format!("Failed to load schema from {}", path.display()))
    }

    pub fn generator(&self) -> Result<Generator> {
        Generator::new(&self.config.to_generator_options())
            .context("Invalid exclusion or naming pattern")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nowhere");
        let settings = Settings {
            config: CodegenConfig::default(),
            base_dir: missing,
        };
        assert!(settings.schema_path(None).is_err());
        assert_eq!(
            settings.schema_path(Some(PathBuf::from("s.graphql"))).unwrap(),
            PathBuf::from("s.graphql")
        );
    }

    #[test]
    fn test_explicit_config_resolves_against_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("conf");
        fs::create_dir(&config_dir).unwrap();
        let config_path = config_dir.join("gqlgen.config.json");
        fs::write(&config_path, r#"{"schema": "../schema.graphql"}"#).unwrap();

        let settings = Settings::load(Some(config_path), dir.path()).unwrap();
        assert_eq!(settings.base_dir, config_dir);
        assert_eq!(
            settings.schema_path(None).unwrap(),
            config_dir.join("../schema.graphql")
        );
    }

    #[test]
    fn test_cli_schema_overrides_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(".gqlgenrc.yml");
        fs::write(&config_path, "schema: from-config.graphql\n").unwrap();

        let settings = Settings::load(None, dir.path()).unwrap();
        assert_eq!(
            settings.schema_path(Some(PathBuf::from("cli.graphql"))).unwrap(),
            PathBuf::from("cli.graphql")
        );
        assert_eq!(
            settings.schema_path(None).unwrap(),
            dir.path().join("from-config.graphql")
        );
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(dir.path().join("absent.yml")), dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to load config"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let settings = Settings {
            config: config_with_bad_pattern(),
            base_dir: PathBuf::from("."),
        };
        let err = settings.generator().unwrap_err();
        assert!(err.to_string().contains("Invalid exclusion or naming pattern"));
    }

    fn config_with_bad_pattern() -> CodegenConfig {
        let mut config = CodegenConfig::default();
        config.queries.exclude = Some(vec!["(unclosed".to_string()]);
        config
    }
}
