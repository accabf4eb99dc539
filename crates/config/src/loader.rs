use crate::{CodegenConfig, ConfigError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names to search for, in order of preference
pub const CONFIG_FILES: &[&str] = &[
    ".gqlgenrc.yml",
    ".gqlgenrc.yaml",
    ".gqlgenrc.json",
    ".gqlgenrc.toml",
    ".gqlgenrc",
    "gqlgen.config.yml",
    "gqlgen.config.yaml",
    "gqlgen.config.json",
    "gqlgen.config.toml",
];

/// Find a config file by walking up the directory tree from the given start directory.
/// Returns the path to the config file if found.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a config from the specified path.
/// The format is detected from the file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<CodegenConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        schema = config.schema.as_deref().unwrap_or("<unset>"),
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a config from a string.
/// The path is used for error messages and format detection.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<CodegenConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("");

    tracing::debug!(extension, file_name, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => {
            tracing::trace!("Parsing as YAML");
            parse_yaml(contents, path)?
        }
        "json" => {
            tracing::trace!("Parsing as JSON");
            parse_json(contents, path)?
        }
        "toml" => {
            tracing::trace!("Parsing as TOML");
            parse_toml(contents, path)?
        }
        "" if file_name == ".gqlgenrc" => {
            tracing::trace!("Trying YAML then JSON for .gqlgenrc");
            parse_yaml(contents, path).or_else(|_| parse_json(contents, path))?
        }
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    tracing::debug!("Validating config");
    validate_config(&config, path)?;

    Ok(config)
}

/// Parse YAML configuration
fn parse_yaml(contents: &str, path: &Path) -> Result<CodegenConfig> {
    // An empty document means "all defaults".
    if contents.trim().is_empty() {
        return Ok(CodegenConfig::default());
    }
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

/// Parse JSON configuration
fn parse_json(contents: &str, path: &Path) -> Result<CodegenConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

/// Parse TOML configuration
fn parse_toml(contents: &str, path: &Path) -> Result<CodegenConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

/// Validate the loaded configuration
#[tracing::instrument(skip(config, path), fields(path = %path.display()))]
fn validate_config(config: &CodegenConfig, path: &Path) -> Result<()> {
    let invalid = |message: String| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    };

    if let Some(schema) = &config.schema {
        if schema.trim().is_empty() {
            return Err(invalid("'schema' must not be empty".to_string()));
        }
    }

    for (key, output) in config.output_paths() {
        tracing::trace!(key, output, "Validating output path");
        if output.trim().is_empty() {
            return Err(invalid(format!("'{key}' must not be empty")));
        }
    }

    for (key, pattern) in config.patterns() {
        if pattern.is_empty() {
            return Err(invalid(format!("'{key}' contains an empty pattern")));
        }
    }

    tracing::debug!("Config validation passed");
    Ok(())
}
