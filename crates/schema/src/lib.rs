//! Read-only GraphQL schema model for operation generation.
//!
//! A [`Schema`] can be loaded from a JSON introspection result or from SDL text.
//! Once loaded it is immutable; generators borrow it for the duration of a pass.
//!
//! # Examples
//!
//! ```
//! use gqlgen_schema::Schema;
//!
//! let schema = Schema::from_sdl("type Query { me: UserType } type UserType { id: ID! }")?;
//! assert_eq!(schema.query_fields().count(), 1);
//! # Ok::<(), gqlgen_schema::SchemaError>(())
//! ```

mod error;
mod introspection;
mod model;
mod sdl;

pub use error::{Result, SchemaError};
pub use introspection::schema_from_introspection;
pub use model::*;
pub use sdl::schema_from_sdl;

use std::path::Path;

/// File extensions treated as SDL.
const SDL_EXTENSIONS: &[&str] = &["graphql", "graphqls", "gql", "sdl"];

impl Schema {
    /// Parses SDL text. See [`schema_from_sdl`].
    pub fn from_sdl(sdl: &str) -> Result<Self> {
        schema_from_sdl(sdl)
    }

    /// Parses an introspection result. See [`schema_from_introspection`].
    pub fn from_introspection_json(json: &str) -> Result<Self> {
        schema_from_introspection(json)
    }
}

/// Loads a schema file, choosing the format from its extension.
///
/// `.json` files are read as introspection results; `.graphql`, `.graphqls`,
/// `.gql` and `.sdl` files as SDL.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_schema(path: &Path) -> Result<Schema> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let is_sdl = SDL_EXTENSIONS.contains(&extension);
    if extension != "json" && !is_sdl {
        return Err(SchemaError::UnsupportedFormat(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let schema = if is_sdl {
        schema_from_sdl(&contents)?
    } else {
        schema_from_introspection(&contents)?
    };
    tracing::info!(types = schema.type_count(), "Schema loaded");
    Ok(schema)
}
