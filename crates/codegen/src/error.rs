use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("Invalid {ruleset} pattern '{pattern}': {source}")]
    InvalidPattern {
        ruleset: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
