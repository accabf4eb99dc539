use crate::document::{Fragment, Selection};
use crate::Generator;
use gqlgen_schema::{Schema, TypeDefinition, TypeKind};

impl Generator {
    /// One shallow fragment per object type, in type-map order.
    ///
    /// Excluded names, non-object types and introspection types are skipped.
    /// Fragment bodies list the type's direct field names only.
    pub fn fragments<'a>(&'a self, schema: &'a Schema) -> impl Iterator<Item = Fragment> + 'a {
        schema.types().filter_map(move |def| self.build_fragment(def))
    }

    fn build_fragment(&self, def: &TypeDefinition) -> Option<Fragment> {
        if self.fragment_exclude.is_excluded(&def.name) {
            tracing::trace!(ty = %def.name, "Type excluded from fragments");
            return None;
        }
        if def.kind != TypeKind::Object || def.is_introspection() {
            return None;
        }

        Some(Fragment {
            name: self.fragment_name(&def.name),
            type_condition: def.name.clone(),
            selections: def.fields.keys().map(Selection::field).collect(),
        })
    }
}
