//! Result-type shape classification.
//!
//! The shape of a root field's result type decides which selection a generated
//! operation gets. Pagination cannot be read off the result type alone, so a
//! field is treated as a connection when it declares an argument literally named
//! [`PAGE_ARGUMENT`].

use gqlgen_schema::{FieldDefinition, Schema, TypeDefinition, TypeKind, TypeRef};

pub const PAGE_ARGUMENT: &str = "page";

/// Selection shape of a root query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryShape<'s> {
    /// Leaf result (scalar or enum, at any wrapping depth); no query is generated.
    Scalar,
    /// List of non-null items: arguments only, no selection.
    NonNullObject,
    /// Composite result with a `page` argument: connection/edges/node selection.
    Paginated { node_type: &'s str },
    /// Composite result without a `page` argument: one fragment spread.
    Single { object_type: &'s str },
}

/// Classifies a root query field.
///
/// Exactly one wrapper level (list or non-null) is removed before checking
/// for non-null, so `T!` selects like `T` while `[T!]` gets no selection.
/// Result types missing from the schema are treated as [`QueryShape::Scalar`].
#[must_use]
pub fn classify_query<'s>(schema: &Schema, field: &'s FieldDefinition) -> QueryShape<'s> {
    let base = field.ty.named_type();
    match schema.kind_of(base) {
        Some(kind) if kind.is_composite() => {}
        // Lists of leaves are skipped too: spreading a scalar's name would
        // reference a fragment that is never generated.
        Some(_) => return QueryShape::Scalar,
        None => {
            tracing::warn!(field = %field.name, ty = base, "Result type is not defined in the schema");
            return QueryShape::Scalar;
        }
    }

    let unwrapped = match &field.ty {
        TypeRef::Named(_) => &field.ty,
        TypeRef::List(of_type) | TypeRef::NonNull(of_type) => of_type.as_ref(),
    };

    if unwrapped.is_non_null() {
        QueryShape::NonNullObject
    } else if field.has_argument(PAGE_ARGUMENT) {
        QueryShape::Paginated { node_type: base }
    } else {
        QueryShape::Single { object_type: base }
    }
}

/// Returns the object type a mutation may select from, if `ty` is a nullable
/// named object type.
#[must_use]
pub fn mutation_payload_type<'s>(schema: &'s Schema, ty: &TypeRef) -> Option<&'s TypeDefinition> {
    match ty {
        TypeRef::Named(name) => schema
            .get_type(name)
            .filter(|def| def.kind == TypeKind::Object),
        TypeRef::List(_) | TypeRef::NonNull(_) => None,
    }
}

/// Selection shape of one field of a mutation payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFieldShape<'s> {
    /// Object (or list of objects): nested selection spreading the type's fragment.
    Nested { object_type: &'s str },
    /// Everything else is selected by name only.
    Bare,
}

/// Classifies a payload field type, unwrapping lists recursively.
///
/// Non-null wrappers stop the search: non-null payload fields are selected bare.
#[must_use]
pub fn classify_payload_field<'s>(schema: &Schema, ty: &'s TypeRef) -> PayloadFieldShape<'s> {
    match ty {
        TypeRef::Named(name) if schema.kind_of(name) == Some(TypeKind::Object) => {
            PayloadFieldShape::Nested { object_type: name }
        }
        TypeRef::Named(_) | TypeRef::NonNull(_) => PayloadFieldShape::Bare,
        TypeRef::List(of_type) => classify_payload_field(schema, of_type),
    }
}
