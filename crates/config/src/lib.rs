//! Configuration for `gqlgen`.
//!
//! A config file names the schema to read and, per document kind, where to
//! write it and which names to leave out:
//!
//! ```yaml
//! schema: schema.graphql
//! fragments:
//!   output: fragments.graphql
//!   nameReplace:
//!     pattern: "Type.*"
//!     replacement: "Field"
//! queries:
//!   output: queries.graphql
//!   exclude: [_debug]
//! ```
//!
//! Config files are discovered with [`find_config`] and read with
//! [`load_config`]; YAML, JSON and TOML are supported.

mod config;
mod error;
mod loader;

pub use config::{CodegenConfig, FragmentsConfig, OperationsConfig};
pub use error::{ConfigError, Result};
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILES};
