//! Read-only schema model.
//!
//! A [`Schema`] is a snapshot of a GraphQL type system: an ordered type map plus
//! the names of the query and mutation root types. It is built once (by one of
//! the loaders or by hand through [`SchemaBuilder`]) and never mutated
//! afterwards.

use crate::{Result, SchemaError};
use indexmap::IndexMap;
use std::fmt;

/// Built-in GraphQL scalar types, in the order they are appended to SDL schemas.
pub const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// A (possibly wrapped) reference to a named type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn list(of_type: Self) -> Self {
        Self::List(Box::new(of_type))
    }

    #[must_use]
    pub fn non_null(of_type: Self) -> Self {
        Self::NonNull(Box::new(of_type))
    }

    /// Name of the innermost named type, with every wrapper removed.
    #[must_use]
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(of_type) | Self::NonNull(of_type) => of_type.named_type(),
        }
    }

    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Renders the reference in GraphQL type notation.
    ///
    /// ```
    /// # use gqlgen_schema::TypeRef;
    /// let ty = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named("ID"))));
    /// assert_eq!(ty.to_type_string(), "[ID!]!");
    /// ```
    #[must_use]
    pub fn to_type_string(&self) -> String {
        match self {
            Self::Named(name) => name.clone(),
            Self::List(of_type) => format!("[{}]", of_type.to_type_string()),
            Self::NonNull(of_type) => format!("{}!", of_type.to_type_string()),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_type_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    /// Scalars and enums: values with no sub-selection.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Scalar | Self::Enum)
    }

    /// Types that can be the target of a selection set or fragment spread.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::Object | Self::Interface | Self::Union)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDefinition {
    pub name: String,
    pub ty: TypeRef,
    /// Default value as GraphQL literal text, e.g. `10` or `"desc"`.
    pub default_value: Option<String>,
}

impl ArgumentDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            default_value: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub arguments: Vec<ArgumentDefinition>,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_argument(mut self, argument: ArgumentDefinition) -> Self {
        self.arguments.push(argument);
        self
    }

    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    #[must_use]
    pub fn has_argument(&self, name: &str) -> bool {
        self.argument(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    /// Fields of object and interface types, in declaration order.
    pub fields: IndexMap<String, FieldDefinition>,
}

impl TypeDefinition {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Built-in introspection types (`__Schema`, `__Type`, ...).
    #[must_use]
    pub fn is_introspection(&self) -> bool {
        self.name.starts_with("__")
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }
}

/// Immutable GraphQL schema snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    types: IndexMap<String, TypeDefinition>,
    query_type: Option<String>,
    mutation_type: Option<String>,
}

impl Schema {
    #[must_use]
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Every named type, in type-map order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.types.values()
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<TypeKind> {
        self.get_type(name).map(|def| def.kind)
    }

    #[must_use]
    pub fn query_type(&self) -> Option<&TypeDefinition> {
        self.query_type.as_deref().and_then(|name| self.get_type(name))
    }

    #[must_use]
    pub fn mutation_type(&self) -> Option<&TypeDefinition> {
        self.mutation_type
            .as_deref()
            .and_then(|name| self.get_type(name))
    }

    /// Fields of the query root; empty when the schema has none.
    pub fn query_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.query_type().into_iter().flat_map(|def| def.fields.values())
    }

    /// Fields of the mutation root; empty when the schema has none.
    pub fn mutation_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.mutation_type()
            .into_iter()
            .flat_map(|def| def.fields.values())
    }
}

/// Assembles a [`Schema`], checking that the root types exist.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    types: IndexMap<String, TypeDefinition>,
    query_type: Option<String>,
    mutation_type: Option<String>,
}

impl SchemaBuilder {
    /// Adds a type. A later definition with the same name replaces the earlier
    /// one but keeps its position in the type map.
    #[must_use]
    pub fn add_type(mut self, def: TypeDefinition) -> Self {
        self.types.insert(def.name.clone(), def);
        self
    }

    #[must_use]
    pub fn query_type(mut self, name: impl Into<String>) -> Self {
        self.query_type = Some(name.into());
        self
    }

    #[must_use]
    pub fn mutation_type(mut self, name: impl Into<String>) -> Self {
        self.mutation_type = Some(name.into());
        self
    }

    #[must_use]
    pub fn contains_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Appends the built-in scalars that were not declared explicitly.
    #[must_use]
    pub fn with_builtin_scalars(mut self) -> Self {
        for name in BUILTIN_SCALARS {
            if !self.types.contains_key(*name) {
                self.types
                    .insert((*name).to_string(), TypeDefinition::new(*name, TypeKind::Scalar));
            }
        }
        self
    }

    pub fn build(self) -> Result<Schema> {
        for (role, name) in [
            ("query", &self.query_type),
            ("mutation", &self.mutation_type),
        ] {
            let Some(name) = name else {
                continue;
            };
            match self.types.get(name) {
                Some(def) if def.kind == TypeKind::Object => {}
                Some(def) => {
                    return Err(SchemaError::Invalid(format!(
                        "{role} root type '{name}' must be an object type, found {:?}",
                        def.kind
                    )));
                }
                None => {
                    return Err(SchemaError::Invalid(format!(
                        "{role} root type '{name}' is not defined"
                    )));
                }
            }
        }

        tracing::debug!(
            types = self.types.len(),
            query = self.query_type.as_deref(),
            mutation = self.mutation_type.as_deref(),
            "Schema built"
        );

        Ok(Schema {
            types: self.types,
            query_type: self.query_type,
            mutation_type: self.mutation_type,
        })
    }
}
