//! Integration tests for loading schema files from disk.

use gqlgen_schema::{load_schema, SchemaError, TypeKind};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_sdl_file() {
    let file = write_temp(".graphql", "type Query { me: UserType }\ntype UserType { id: ID! }");
    let schema = load_schema(file.path()).unwrap();
    assert_eq!(schema.kind_of("UserType"), Some(TypeKind::Object));
    assert_eq!(schema.query_fields().count(), 1);
}

#[test]
fn test_load_introspection_file() {
    let file = write_temp(
        ".json",
        r#"{"data": {"__schema": {
            "queryType": {"name": "Query"},
            "mutationType": null,
            "types": [
                {"kind": "OBJECT", "name": "Query", "fields": [
                    {"name": "ping", "args": [], "type": {"kind": "SCALAR", "name": "String", "ofType": null}}
                ]},
                {"kind": "SCALAR", "name": "String"}
            ]
        }}}"#,
    );
    let schema = load_schema(file.path()).unwrap();
    assert_eq!(schema.query_type().unwrap().name, "Query");
}

#[test]
fn test_unsupported_extension() {
    let file = write_temp(".txt", "type Query { a: Int }");
    let err = load_schema(file.path()).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedFormat(_)));
}

#[test]
fn test_missing_file() {
    let err = load_schema(std::path::Path::new("/definitely/not/here/schema.graphql")).unwrap_err();
    assert!(matches!(err, SchemaError::Io { .. }));
    assert!(err.to_string().contains("schema.graphql"));
}
