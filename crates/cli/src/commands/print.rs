//! `gqlgen print`: write one document to stdout.

use super::Settings;
use anyhow::{Context, Result};
use gqlgen_codegen::DocumentKind;
use std::io::Write;
use std::path::PathBuf;

pub fn run(config_path: Option<PathBuf>, schema: Option<PathBuf>, kind: DocumentKind) -> Result<()> {
    let current_dir = std::env::current_dir().context("Failed to read current directory")?;
    let settings = Settings::load(config_path, &current_dir)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    print(&settings, schema, kind, &mut handle)?;
    handle.flush().context("Failed to write to stdout")
}

#[tracing::instrument(skip(settings, schema, out, kind), fields(kind = %kind))]
fn print<W: Write>(
    settings: &Settings,
    schema: Option<PathBuf>,
    kind: DocumentKind,
    out: &mut W,
) -> Result<()> {
    let schema = settings.load_schema(schema)?;
    let generator = settings.generator()?;
    let definitions = generator
        .write(&schema, kind, out)
        .context("Failed to write to stdout")?;
    tracing::debug!(definitions, "Document printed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlgen_config::{CodegenConfig, FragmentsConfig};
    use std::fs;

    #[test]
    fn test_prints_document_with_configured_naming() {
        let dir = tempfile::tempdir().unwrap();
        let schema_path = dir.path().join("schema.graphql");
        fs::write(
            &schema_path,
            "type Query { me: UserType } type UserType { id: ID! }",
        )
        .unwrap();

        let settings = Settings {
            config: CodegenConfig {
                fragments: FragmentsConfig {
                    name_replace: Some(None),
                    ..FragmentsConfig::default()
                },
                ..CodegenConfig::default()
            },
            base_dir: dir.path().to_path_buf(),
        };

        let mut out = Vec::new();
        print(&settings, Some(schema_path), DocumentKind::Queries, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "query me {\n  me {\n    ...UserType\n  }\n}\n"
        );
    }

    #[test]
    fn test_empty_document_prints_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema_path = dir.path().join("schema.graphql");
        fs::write(&schema_path, "type Query { version: String }").unwrap();

        let settings = Settings {
            config: CodegenConfig::default(),
            base_dir: dir.path().to_path_buf(),
        };

        let mut out = Vec::new();
        print(&settings, Some(schema_path), DocumentKind::Mutations, &mut out).unwrap();
        assert!(out.is_empty());
    }
}
