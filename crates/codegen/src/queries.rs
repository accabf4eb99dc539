use crate::document::{Operation, OperationKind, Selection};
use crate::shape::{classify_query, QueryShape};
use crate::Generator;
use gqlgen_schema::{FieldDefinition, Schema};

/// Fragment spread under `pageInfo` in connection queries. It is not
/// generated; clients define it themselves.
pub const PAGE_INFO_FRAGMENT: &str = "PageInfoField";

impl Generator {
    /// One query per root query field whose result has a selectable shape.
    pub fn queries<'a>(&'a self, schema: &'a Schema) -> impl Iterator<Item = Operation> + 'a {
        schema
            .query_fields()
            .filter_map(move |field| self.build_query(schema, field))
    }

    fn build_query(&self, schema: &Schema, field: &FieldDefinition) -> Option<Operation> {
        if self.query_exclude.is_excluded(&field.name) {
            tracing::trace!(field = %field.name, "Query field excluded");
            return None;
        }

        let selections = match classify_query(schema, field) {
            QueryShape::Scalar => {
                tracing::trace!(field = %field.name, "Skipping query with leaf result");
                return None;
            }
            QueryShape::NonNullObject => Vec::new(),
            QueryShape::Single { object_type } => {
                vec![Selection::spread(self.fragment_name(object_type))]
            }
            QueryShape::Paginated { node_type } => {
                connection_selections(self.fragment_name(node_type))
            }
        };

        Some(Operation::for_root_field(
            OperationKind::Query,
            field,
            selections,
        ))
    }
}

/// `__typename totalCount edgeCount pageInfo { ... } edges { __typename cursor node { ... } }`
fn connection_selections(node_fragment: String) -> Vec<Selection> {
    vec![
        Selection::field("__typename"),
        Selection::field("totalCount"),
        Selection::field("edgeCount"),
        Selection::nested("pageInfo", vec![Selection::spread(PAGE_INFO_FRAGMENT)]),
        Selection::nested(
            "edges",
            vec![
                Selection::field("__typename"),
                Selection::field("cursor"),
                Selection::nested("node", vec![Selection::spread(node_fragment)]),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use crate::{Generator, GeneratorOptions};
    use gqlgen_schema::Schema;

    const SCHEMA: &str = r"
        type Query {
          _debug: DjangoDebug
          version: String
          me: UserType
          user(id: ID!): UserType!
          users(page: Int, limit: Int = 10): [UserType]
          strictUsers(ids: [ID!]!): [UserType!]
        }
        type UserType { id: ID! name: String }
        type DjangoDebug { sql: [String] }
    ";

    fn render(options: &GeneratorOptions) -> Vec<String> {
        let schema = Schema::from_sdl(SCHEMA).unwrap();
        let generator = Generator::new(options).unwrap();
        generator
            .queries(&schema)
            .map(|op| op.to_string())
            .collect()
    }

    #[test]
    fn test_skips_excluded_and_scalar_fields() {
        let schema = Schema::from_sdl(SCHEMA).unwrap();
        let generator = Generator::new(&GeneratorOptions::default()).unwrap();
        let names: Vec<_> = generator.queries(&schema).map(|op| op.name).collect();
        assert_eq!(names, ["me", "user", "users", "strictUsers"]);
    }

    #[test]
    fn test_single_object_query() {
        let queries = render(&GeneratorOptions::default());
        assert_eq!(queries[0], "query me {\n  me {\n    ...UserField\n  }\n}");
    }

    #[test]
    fn test_non_null_object_query_spreads_fragment() {
        let queries = render(&GeneratorOptions::default());
        assert_eq!(
            queries[1],
            "query user($id: ID!) {\n  user(id: $id) {\n    ...UserField\n  }\n}"
        );
    }

    #[test]
    fn test_list_of_non_null_query_has_no_selection() {
        let queries = render(&GeneratorOptions::default());
        assert_eq!(
            queries[3],
            "query strictUsers($ids: [ID!]!) {\n  strictUsers(ids: $ids)\n}"
        );
    }

    #[test]
    fn test_paginated_query() {
        let queries = render(&GeneratorOptions::default());
        insta::assert_snapshot!(queries[2], @r"
        query users($page: Int, $limit: Int = 10) {
          users(page: $page, limit: $limit) {
            __typename
            totalCount
            edgeCount
            pageInfo {
              ...PageInfoField
            }
            edges {
              __typename
              cursor
              node {
                ...UserField
              }
            }
          }
        }
        ");
    }

    #[test]
    fn test_without_exclusions_debug_field_is_generated() {
        let queries = render(&GeneratorOptions {
            query_exclude: Vec::new(),
            ..GeneratorOptions::default()
        });
        assert_eq!(queries.len(), 5);
        assert_eq!(queries[0], "query _debug {\n  _debug {\n    ...DjangoDebug\n  }\n}");
    }
}
