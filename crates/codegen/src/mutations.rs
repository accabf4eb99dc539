use crate::document::{Operation, OperationKind, Selection};
use crate::shape::{classify_payload_field, mutation_payload_type, PayloadFieldShape};
use crate::Generator;
use gqlgen_schema::{FieldDefinition, Schema, TypeDefinition};

/// Payload error type whose fragment name is fixed regardless of the naming rule.
pub const ERROR_TYPE: &str = "ErrorType";
pub const ERROR_TYPE_FRAGMENT: &str = "ErrorTypeField";

impl Generator {
    /// One mutation per root mutation field returning an object payload.
    pub fn mutations<'a>(&'a self, schema: &'a Schema) -> impl Iterator<Item = Operation> + 'a {
        schema
            .mutation_fields()
            .filter_map(move |field| self.build_mutation(schema, field))
    }

    fn build_mutation(&self, schema: &Schema, field: &FieldDefinition) -> Option<Operation> {
        if self.mutation_exclude.is_excluded(&field.name) {
            tracing::trace!(field = %field.name, "Mutation field excluded");
            return None;
        }
        let Some(payload) = mutation_payload_type(schema, &field.ty) else {
            tracing::trace!(field = %field.name, ty = %field.ty, "Skipping mutation without object payload");
            return None;
        };

        Some(Operation::for_root_field(
            OperationKind::Mutation,
            field,
            self.payload_selections(schema, payload),
        ))
    }

    /// Selects every payload field; object fields spread their fragment.
    /// Fields starting with `_` are left out.
    fn payload_selections(&self, schema: &Schema, payload: &TypeDefinition) -> Vec<Selection> {
        payload
            .fields
            .values()
            .filter(|field| !field.name.starts_with('_'))
            .map(|field| match classify_payload_field(schema, &field.ty) {
                PayloadFieldShape::Nested { object_type } => Selection::nested(
                    &field.name,
                    vec![Selection::spread(self.payload_fragment_name(object_type))],
                ),
                PayloadFieldShape::Bare => Selection::field(&field.name),
            })
            .collect()
    }

    fn payload_fragment_name(&self, type_name: &str) -> String {
        if type_name == ERROR_TYPE {
            ERROR_TYPE_FRAGMENT.to_string()
        } else {
            self.fragment_name(type_name)
        }
    }
}
