//! Schema construction from SDL (Schema Definition Language) text.

use crate::model::{
    ArgumentDefinition, FieldDefinition, Schema, TypeDefinition, TypeKind, TypeRef,
};
use crate::{Result, SchemaError};
use apollo_parser::cst::{self, CstNode};
use apollo_parser::{SyntaxKind, SyntaxNode};
use indexmap::IndexMap;

/// Parses SDL text into a [`Schema`].
///
/// Root types come from an explicit `schema { ... }` block when there is one,
/// otherwise from the conventional `Query` and `Mutation` type names. Object
/// and interface extensions are merged into their base definitions. Built-in
/// scalars are appended when the document does not declare them.
#[tracing::instrument(skip(sdl), fields(size = sdl.len()))]
pub fn schema_from_sdl(sdl: &str) -> Result<Schema> {
    let tree = apollo_parser::Parser::new(sdl).parse();
    let errors: Vec<String> = tree
        .errors()
        .map(|e| format!("{} at offset {}", e.message(), e.index()))
        .collect();
    if !errors.is_empty() {
        return Err(SchemaError::Syntax(errors));
    }

    let document = tree.document();
    let mut types: IndexMap<String, TypeDefinition> = IndexMap::new();
    let mut roots = RootTypes::default();
    let mut extensions: Vec<(String, Vec<FieldDefinition>)> = Vec::new();

    for definition in document.definitions() {
        match definition {
            cst::Definition::SchemaDefinition(schema_def) => {
                roots.explicit = true;
                for root in schema_def.root_operation_type_definitions() {
                    let (Some(op), Some(named)) = (root.operation_type(), root.named_type())
                    else {
                        continue;
                    };
                    let Some(name) = named.name() else {
                        continue;
                    };
                    let name = name.text().to_string();
                    if op.query_token().is_some() {
                        roots.query = Some(name);
                    } else if op.mutation_token().is_some() {
                        roots.mutation = Some(name);
                    }
                }
            }
            cst::Definition::ObjectTypeDefinition(obj) => {
                if let Some(name) = obj.name() {
                    let mut def = TypeDefinition::new(name.text().to_string(), TypeKind::Object);
                    for field in collect_fields(sdl, obj.fields_definition())? {
                        def = def.with_field(field);
                    }
                    types.insert(def.name.clone(), def);
                }
            }
            cst::Definition::InterfaceTypeDefinition(iface) => {
                if let Some(name) = iface.name() {
                    let mut def =
                        TypeDefinition::new(name.text().to_string(), TypeKind::Interface);
                    for field in collect_fields(sdl, iface.fields_definition())? {
                        def = def.with_field(field);
                    }
                    types.insert(def.name.clone(), def);
                }
            }
            cst::Definition::UnionTypeDefinition(def) => {
                insert_named(&mut types, def.name(), TypeKind::Union);
            }
            cst::Definition::EnumTypeDefinition(def) => {
                insert_named(&mut types, def.name(), TypeKind::Enum);
            }
            cst::Definition::ScalarTypeDefinition(def) => {
                insert_named(&mut types, def.name(), TypeKind::Scalar);
            }
            cst::Definition::InputObjectTypeDefinition(def) => {
                insert_named(&mut types, def.name(), TypeKind::InputObject);
            }
            cst::Definition::ObjectTypeExtension(ext) => {
                if let Some(name) = ext.name() {
                    let fields = collect_fields(sdl, ext.fields_definition())?;
                    extensions.push((name.text().to_string(), fields));
                }
            }
            cst::Definition::InterfaceTypeExtension(ext) => {
                if let Some(name) = ext.name() {
                    let fields = collect_fields(sdl, ext.fields_definition())?;
                    extensions.push((name.text().to_string(), fields));
                }
            }
            _ => {}
        }
    }

    for (type_name, fields) in extensions {
        let def = types.get_mut(&type_name).ok_or_else(|| {
            SchemaError::Invalid(format!("cannot extend undefined type '{type_name}'"))
        })?;
        for field in fields {
            def.fields.insert(field.name.clone(), field);
        }
    }

    if !roots.explicit {
        roots.query = types.contains_key("Query").then(|| "Query".to_string());
        roots.mutation = types.contains_key("Mutation").then(|| "Mutation".to_string());
    }

    tracing::debug!(types = types.len(), "Collected SDL type definitions");

    let mut builder = Schema::builder();
    for def in types.into_values() {
        builder = builder.add_type(def);
    }
    if let Some(query) = roots.query {
        builder = builder.query_type(query);
    }
    if let Some(mutation) = roots.mutation {
        builder = builder.mutation_type(mutation);
    }
    builder.with_builtin_scalars().build()
}

#[derive(Default)]
struct RootTypes {
    explicit: bool,
    query: Option<String>,
    mutation: Option<String>,
}

fn insert_named(
    types: &mut IndexMap<String, TypeDefinition>,
    name: Option<cst::Name>,
    kind: TypeKind,
) {
    if let Some(name) = name {
        let name = name.text().to_string();
        types.insert(name.clone(), TypeDefinition::new(name, kind));
    }
}

fn collect_fields(
    source: &str,
    fields_def: Option<cst::FieldsDefinition>,
) -> Result<Vec<FieldDefinition>> {
    let Some(fields_def) = fields_def else {
        return Ok(Vec::new());
    };

    let mut fields = Vec::new();
    for field in fields_def.field_definitions() {
        let Some(name) = field.name() else {
            continue;
        };
        let name = name.text().to_string();
        let ty = field
            .ty()
            .and_then(|ty| convert_type(&ty))
            .ok_or_else(|| SchemaError::Invalid(format!("field '{name}' has no type")))?;

        let mut converted = FieldDefinition::new(name, ty);
        for arg in field
            .arguments_definition()
            .into_iter()
            .flat_map(|args| args.input_value_definitions())
        {
            converted = converted.with_argument(convert_argument(source, &arg)?);
        }
        fields.push(converted);
    }
    Ok(fields)
}

fn convert_argument(source: &str, arg: &cst::InputValueDefinition) -> Result<ArgumentDefinition> {
    let name = arg
        .name()
        .map(|n| n.text().to_string())
        .ok_or_else(|| SchemaError::Invalid("argument without a name".into()))?;
    let ty = arg
        .ty()
        .and_then(|ty| convert_type(&ty))
        .ok_or_else(|| SchemaError::Invalid(format!("argument '{name}' has no type")))?;
    let default_value = arg
        .default_value()
        .and_then(|v| v.value())
        .and_then(|val| literal_text(source, val.syntax()));

    Ok(ArgumentDefinition {
        name,
        ty,
        default_value,
    })
}

/// Source text of a value literal without the trailing commas, whitespace and
/// comments the parser attaches to it.
fn literal_text(source: &str, node: &SyntaxNode) -> Option<String> {
    let last = node
        .descendants_with_tokens()
        .filter_map(|element| element.into_token())
        .filter(|token| {
            !matches!(
                token.kind(),
                SyntaxKind::WHITESPACE | SyntaxKind::COMMA | SyntaxKind::COMMENT
            )
        })
        .last()?;
    let start: usize = node.text_range().start().into();
    let end: usize = last.text_range().end().into();
    source.get(start..end).map(ToString::to_string)
}

fn convert_type(ty: &cst::Type) -> Option<TypeRef> {
    match ty {
        cst::Type::NamedType(named) => Some(TypeRef::named(named.name()?.text().to_string())),
        cst::Type::ListType(list) => Some(TypeRef::list(convert_type(&list.ty()?)?)),
        cst::Type::NonNullType(non_null) => {
            let inner = if let Some(named) = non_null.named_type() {
                TypeRef::named(named.name()?.text().to_string())
            } else {
                TypeRef::list(convert_type(&non_null.list_type()?.ty()?)?)
            };
            Some(TypeRef::non_null(inner))
        }
    }
}
