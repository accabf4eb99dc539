//! Generator facade: compiled configuration plus document rendering and output.

use crate::document::{Definition, Document};
use crate::naming::{fragment_name, ExclusionRuleset, NamingTransform};
use crate::options::GeneratorOptions;
use crate::{CodegenError, Result};
use gqlgen_schema::Schema;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The three generated artifact kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Fragments,
    Queries,
    Mutations,
}

impl DocumentKind {
    pub const ALL: [Self; 3] = [Self::Fragments, Self::Queries, Self::Mutations];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fragments => "fragments",
            Self::Queries => "queries",
            Self::Mutations => "mutations",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output paths per document kind; `None` skips that kind entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outputs {
    pub fragments: Option<PathBuf>,
    pub mutations: Option<PathBuf>,
    pub queries: Option<PathBuf>,
}

impl Outputs {
    /// Requested outputs in write order: fragments, mutations, queries.
    pub fn requested(&self) -> impl Iterator<Item = (DocumentKind, &Path)> {
        [
            (DocumentKind::Fragments, &self.fragments),
            (DocumentKind::Mutations, &self.mutations),
            (DocumentKind::Queries, &self.queries),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.as_deref().map(|path| (kind, path)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requested().next().is_none()
    }
}

/// A document written by [`Generator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenDocument {
    pub kind: DocumentKind,
    /// Absolute path of the written file.
    pub path: PathBuf,
    pub definitions: usize,
}

/// Generates fragment, query and mutation documents from a [`Schema`].
///
/// The generator only holds compiled configuration; the schema is passed to
/// every call and only read.
///
/// # Examples
///
/// ```
/// use gqlgen_codegen::{DocumentKind, Generator, GeneratorOptions};
/// use gqlgen_schema::Schema;
///
/// let schema = Schema::from_sdl("type Query { me: UserType } type UserType { id: ID! }")?;
/// let generator = Generator::new(&GeneratorOptions::default())?;
///
/// assert_eq!(
///     generator.render(&schema, DocumentKind::Fragments),
///     "fragment UserField on UserType {\n  id\n}\n"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    pub(crate) fragment_exclude: ExclusionRuleset,
    pub(crate) query_exclude: ExclusionRuleset,
    pub(crate) mutation_exclude: ExclusionRuleset,
    pub(crate) name_transform: Option<NamingTransform>,
}

impl Generator {
    /// Compiles `options`; invalid patterns are reported here.
    pub fn new(options: &GeneratorOptions) -> Result<Self> {
        let name_transform = options
            .fragment_name_rule
            .as_ref()
            .map(|rule| NamingTransform::new(&rule.pattern, rule.replacement.clone()))
            .transpose()?;

        Ok(Self {
            fragment_exclude: ExclusionRuleset::new(
                "fragment",
                options.fragment_exclude.iter().cloned(),
            )?,
            query_exclude: ExclusionRuleset::new("query", options.query_exclude.iter().cloned())?,
            mutation_exclude: ExclusionRuleset::new(
                "mutation",
                options.mutation_exclude.iter().cloned(),
            )?,
            name_transform,
        })
    }

    /// Fragment name for `type_name` under the configured naming rule.
    #[must_use]
    pub fn fragment_name(&self, type_name: &str) -> String {
        fragment_name(type_name, self.name_transform.as_ref())
    }

    /// Lazily builds the definitions of one document kind.
    pub fn definitions<'a>(
        &'a self,
        schema: &'a Schema,
        kind: DocumentKind,
    ) -> Box<dyn Iterator<Item = Definition> + 'a> {
        match kind {
            DocumentKind::Fragments => Box::new(self.fragments(schema).map(Definition::Fragment)),
            DocumentKind::Queries => Box::new(self.queries(schema).map(Definition::Operation)),
            DocumentKind::Mutations => {
                Box::new(self.mutations(schema).map(Definition::Operation))
            }
        }
    }

    #[must_use]
    pub fn document(&self, schema: &Schema, kind: DocumentKind) -> Document {
        self.definitions(schema, kind).collect()
    }

    #[must_use]
    pub fn render(&self, schema: &Schema, kind: DocumentKind) -> String {
        self.document(schema, kind).to_string()
    }

    /// Streams one document to `writer`, returning the number of definitions.
    ///
    /// The bytes written are identical to [`Generator::render`].
    pub fn write<W: Write>(
        &self,
        schema: &Schema,
        kind: DocumentKind,
        writer: &mut W,
    ) -> io::Result<usize> {
        let mut count = 0;
        for definition in self.definitions(schema, kind) {
            if count > 0 {
                writer.write_all(b"\n")?;
            }
            writeln!(writer, "{definition}")?;
            count += 1;
        }
        Ok(count)
    }

    /// Writes every requested document, overwriting existing files.
    ///
    /// Returns the absolute path of each file written, in write order. A failed
    /// write aborts the remaining outputs.
    #[tracing::instrument(skip(self, schema, outputs), fields(types = schema.type_count()))]
    pub fn generate(&self, schema: &Schema, outputs: &Outputs) -> Result<Vec<WrittenDocument>> {
        let mut written = Vec::new();

        for (kind, path) in outputs.requested() {
            let definitions = self.write_file(schema, kind, path)?;
            let path = std::path::absolute(path).map_err(|source| CodegenError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(%kind, path = %path.display(), definitions, "Document written");
            written.push(WrittenDocument {
                kind,
                path,
                definitions,
            });
        }

        tracing::info!(documents = written.len(), "Generation complete");
        Ok(written)
    }

    fn write_file(&self, schema: &Schema, kind: DocumentKind, path: &Path) -> Result<usize> {
        let io_error = |source: io::Error| CodegenError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        let definitions = self.write(schema, kind, &mut writer).map_err(io_error)?;
        writer.flush().map_err(io_error)?;
        Ok(definitions)
    }
}
