//! Conversion from GraphQL introspection results.
//!
//! These types mirror the parts of an introspection query response that the
//! schema model needs. Unknown keys (descriptions, directives, deprecation
//! info) are ignored by serde.

use crate::model::{
    ArgumentDefinition, FieldDefinition, Schema, TypeDefinition, TypeKind, TypeRef,
};
use crate::{Result, SchemaError};
use serde::Deserialize;

/// Either `{"data": {"__schema": ...}}` or the bare `{"__schema": ...}` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IntrospectionDocument {
    Response { data: IntrospectionData },
    Data(IntrospectionData),
}

#[derive(Debug, Deserialize)]
struct IntrospectionData {
    #[serde(rename = "__schema")]
    schema: IntrospectionSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionSchema {
    query_type: Option<IntrospectionTypeName>,
    mutation_type: Option<IntrospectionTypeName>,
    types: Vec<IntrospectionType>,
}

#[derive(Debug, Deserialize)]
struct IntrospectionTypeName {
    name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionType {
    kind: IntrospectionKind,
    name: String,
    #[serde(default)]
    fields: Option<Vec<IntrospectionField>>,
}

#[derive(Debug, Deserialize)]
struct IntrospectionField {
    name: String,
    #[serde(default)]
    args: Vec<IntrospectionInputValue>,
    #[serde(rename = "type")]
    type_ref: IntrospectionTypeRef,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionInputValue {
    name: String,
    #[serde(rename = "type")]
    type_ref: IntrospectionTypeRef,
    default_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntrospectionTypeRef {
    kind: IntrospectionKind,
    name: Option<String>,
    of_type: Option<Box<IntrospectionTypeRef>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum IntrospectionKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl IntrospectionKind {
    fn type_kind(self) -> Option<TypeKind> {
        match self {
            Self::Scalar => Some(TypeKind::Scalar),
            Self::Object => Some(TypeKind::Object),
            Self::Interface => Some(TypeKind::Interface),
            Self::Union => Some(TypeKind::Union),
            Self::Enum => Some(TypeKind::Enum),
            Self::InputObject => Some(TypeKind::InputObject),
            Self::List | Self::NonNull => None,
        }
    }
}

impl IntrospectionTypeRef {
    fn to_type_ref(&self) -> Result<TypeRef> {
        match self.kind {
            IntrospectionKind::List => Ok(TypeRef::list(self.of_type()?.to_type_ref()?)),
            IntrospectionKind::NonNull => {
                Ok(TypeRef::non_null(self.of_type()?.to_type_ref()?))
            }
            _ => self
                .name
                .clone()
                .map(TypeRef::Named)
                .ok_or_else(|| SchemaError::Invalid("named type reference without a name".into())),
        }
    }

    fn of_type(&self) -> Result<&Self> {
        self.of_type.as_deref().ok_or_else(|| {
            SchemaError::Invalid(format!("{:?} type reference without ofType", self.kind))
        })
    }
}

/// Builds a [`Schema`] from the JSON text of an introspection result.
#[tracing::instrument(skip(json), fields(size = json.len()))]
pub fn schema_from_introspection(json: &str) -> Result<Schema> {
    let document: IntrospectionDocument = serde_json::from_str(json)?;
    let schema = match document {
        IntrospectionDocument::Response { data } | IntrospectionDocument::Data(data) => {
            data.schema
        }
    };

    let mut builder = Schema::builder();
    for introspected in &schema.types {
        let kind = introspected.kind.type_kind().ok_or_else(|| {
            SchemaError::Invalid(format!(
                "type '{}' has wrapper kind {:?}",
                introspected.name, introspected.kind
            ))
        })?;

        let mut def = TypeDefinition::new(&introspected.name, kind);
        for field in introspected.fields.iter().flatten() {
            def = def.with_field(convert_field(field)?);
        }
        builder = builder.add_type(def);
    }

    if let Some(query) = schema.query_type {
        builder = builder.query_type(query.name);
    }
    if let Some(mutation) = schema.mutation_type {
        builder = builder.mutation_type(mutation.name);
    }

    tracing::debug!(types = schema.types.len(), "Converted introspection result");
    builder.build()
}

fn convert_field(field: &IntrospectionField) -> Result<FieldDefinition> {
    let mut converted = FieldDefinition::new(&field.name, field.type_ref.to_type_ref()?);
    for arg in &field.args {
        let mut argument = ArgumentDefinition::new(&arg.name, arg.type_ref.to_type_ref()?);
        argument.default_value.clone_from(&arg.default_value);
        converted = converted.with_argument(argument);
    }
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTROSPECTION: &str = r#"{
      "data": {
        "__schema": {
          "queryType": { "name": "Query" },
          "mutationType": null,
          "subscriptionType": null,
          "types": [
            {
              "kind": "OBJECT",
              "name": "Query",
              "description": null,
              "fields": [
                {
                  "name": "users",
                  "description": null,
                  "args": [
                    {
                      "name": "first",
                      "description": null,
                      "type": { "kind": "SCALAR", "name": "Int", "ofType": null },
                      "defaultValue": "10"
                    }
                  ],
                  "type": {
                    "kind": "NON_NULL",
                    "name": null,
                    "ofType": {
                      "kind": "LIST",
                      "name": null,
                      "ofType": { "kind": "OBJECT", "name": "UserType", "ofType": null }
                    }
                  },
                  "isDeprecated": false,
                  "deprecationReason": null
                }
              ],
              "interfaces": []
            },
            {
              "kind": "OBJECT",
              "name": "UserType",
              "fields": [
                {
                  "name": "id",
                  "args": [],
                  "type": { "kind": "NON_NULL", "name": null, "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null } }
                }
              ]
            },
            { "kind": "SCALAR", "name": "Int", "fields": null },
            { "kind": "SCALAR", "name": "ID", "fields": null }
          ],
          "directives": []
        }
      }
    }"#;

    #[test]
    fn test_converts_fields_arguments_and_wrappers() {
        let schema = schema_from_introspection(INTROSPECTION).unwrap();

        let users = schema.query_fields().next().unwrap();
        assert_eq!(users.name, "users");
        assert_eq!(users.ty.to_type_string(), "[UserType]!");
        assert_eq!(users.arguments[0].default_value.as_deref(), Some("10"));
        assert!(schema.mutation_type().is_none());

        let user = schema.get_type("UserType").unwrap();
        assert_eq!(user.kind, TypeKind::Object);
        assert_eq!(user.field("id").unwrap().ty.to_type_string(), "ID!");
    }

    #[test]
    fn test_accepts_bare_schema_object() {
        let bare = r#"{"__schema": {"queryType": null, "mutationType": null, "types": [
            {"kind": "SCALAR", "name": "String"}
        ]}}"#;
        let schema = schema_from_introspection(bare).unwrap();
        assert_eq!(schema.type_count(), 1);
        assert!(schema.query_type().is_none());
    }

    #[test]
    fn test_rejects_list_without_of_type() {
        let broken = r#"{"__schema": {"queryType": {"name": "Query"}, "types": [
            {"kind": "OBJECT", "name": "Query", "fields": [
                {"name": "xs", "args": [], "type": {"kind": "LIST", "name": null, "ofType": null}}
            ]}
        ]}}"#;
        let err = schema_from_introspection(broken).unwrap_err();
        assert!(matches!(err, SchemaError::Invalid(_)));
    }
}
