//! GraphQL operation generation.
//!
//! Walks a [`gqlgen_schema::Schema`] and produces three documents:
//!
//! - **fragments**: one shallow fragment per object type,
//! - **queries**: one query per root query field,
//! - **mutations**: one mutation per root mutation field.
//!
//! Names are filtered through configurable exclusion patterns, fragment names
//! are derived with a configurable substitution, and each query's selection
//! depends on the shape of its result type (see [`shape`]).
//!
//! # Examples
//!
//! ```
//! use gqlgen_codegen::{DocumentKind, Generator, GeneratorOptions};
//! use gqlgen_schema::Schema;
//!
//! let schema = Schema::from_sdl(
//!     "type Query { users(page: Int): [UserType] } type UserType { id: ID! }",
//! )?;
//! let generator = Generator::new(&GeneratorOptions::default())?;
//! let queries = generator.render(&schema, DocumentKind::Queries);
//! assert!(queries.contains("node {\n        ...UserField\n      }"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod document;
mod error;
mod fragments;
mod generator;
mod mutations;
pub mod naming;
mod options;
mod queries;
pub mod shape;

pub use error::{CodegenError, Result};
pub use generator::{DocumentKind, Generator, Outputs, WrittenDocument};
pub use mutations::{ERROR_TYPE, ERROR_TYPE_FRAGMENT};
pub use options::*;
pub use queries::PAGE_INFO_FRAGMENT;
