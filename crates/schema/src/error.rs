use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to read schema file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse introspection result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("GraphQL syntax errors in schema:\n{}", .0.join("\n"))]
    Syntax(Vec<String>),

    #[error("Unsupported schema file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("Invalid schema: {0}")]
    Invalid(String),
}
