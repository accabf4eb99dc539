//! Typed representation of generated GraphQL documents and its serializer.
//!
//! Builders produce [`Definition`]s; `Display` is the only place that turns
//! them into text, so every shape shares the same indentation and brace
//! handling.

use gqlgen_schema::{FieldDefinition, TypeRef};
use std::fmt::{self, Write};

const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
        }
    }
}

/// `$name: Type = default`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDefinition {
    pub name: String,
    pub ty: TypeRef,
    pub default_value: Option<String>,
}

/// `name: $variable`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub variable: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelection {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub selections: Vec<Selection>,
}

impl FieldSelection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            selections: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_selections(mut self, selections: Vec<Selection>) -> Self {
        self.selections = selections;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Field(FieldSelection),
    FragmentSpread(String),
}

impl Selection {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(FieldSelection::new(name))
    }

    pub fn nested(name: impl Into<String>, selections: Vec<Self>) -> Self {
        Self::Field(FieldSelection::new(name).with_selections(selections))
    }

    pub fn spread(fragment: impl Into<String>) -> Self {
        Self::FragmentSpread(fragment.into())
    }

    /// Field name, or `None` for a fragment spread.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::Field(field) => Some(&field.name),
            Self::FragmentSpread(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub name: String,
    pub type_condition: String,
    pub selections: Vec<Selection>,
}

/// A query or mutation wrapping exactly one root field of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub kind: OperationKind,
    pub name: String,
    pub variables: Vec<VariableDefinition>,
    pub root: FieldSelection,
}

impl Operation {
    /// Builds an operation named after `field`, declaring one variable per
    /// argument and passing each through to the root field.
    #[must_use]
    pub fn for_root_field(
        kind: OperationKind,
        field: &FieldDefinition,
        selections: Vec<Selection>,
    ) -> Self {
        let variables = field
            .arguments
            .iter()
            .map(|arg| VariableDefinition {
                name: arg.name.clone(),
                ty: arg.ty.clone(),
                default_value: arg.default_value.clone(),
            })
            .collect();
        let arguments = field
            .arguments
            .iter()
            .map(|arg| Argument {
                name: arg.name.clone(),
                variable: arg.name.clone(),
            })
            .collect();

        Self {
            kind,
            name: field.name.clone(),
            variables,
            root: FieldSelection {
                name: field.name.clone(),
                arguments,
                selections,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Fragment(Fragment),
    Operation(Operation),
}

/// One generated document: definitions separated by a blank line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<Definition> for Document {
    fn from_iter<I: IntoIterator<Item = Definition>>(iter: I) -> Self {
        Self {
            definitions: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for VariableDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}: {}", self.name, self.ty)?;
        if let Some(default) = &self.default_value {
            write!(f, " = {default}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ${}", self.name, self.variable)
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fragment {} on {} ", self.name, self.type_condition)?;
        write_selection_set(f, &self.selections, 0)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.keyword(), self.name)?;
        write_parenthesized(f, &self.variables)?;
        f.write_str(" {\n")?;
        write_field(f, &self.root, 1)?;
        f.write_char('}')
    }
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fragment(fragment) => fmt::Display::fmt(fragment, f),
            Self::Operation(operation) => fmt::Display::fmt(operation, f),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, definition) in self.definitions.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            writeln!(f, "{definition}")?;
        }
        Ok(())
    }
}

/// Writes `(a, b, c)`, or nothing for an empty list.
fn write_parenthesized<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    f.write_char('(')?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_char(')')
}

/// Writes `{`, one line per selection at `depth + 1`, and a closing `}` at `depth`.
fn write_selection_set(
    f: &mut fmt::Formatter<'_>,
    selections: &[Selection],
    depth: usize,
) -> fmt::Result {
    f.write_str("{\n")?;
    for selection in selections {
        match selection {
            Selection::Field(field) => write_field(f, field, depth + 1)?,
            Selection::FragmentSpread(name) => {
                write_indent(f, depth + 1)?;
                writeln!(f, "...{name}")?;
            }
        }
    }
    write_indent(f, depth)?;
    f.write_char('}')
}

fn write_field(f: &mut fmt::Formatter<'_>, field: &FieldSelection, depth: usize) -> fmt::Result {
    write_indent(f, depth)?;
    f.write_str(&field.name)?;
    write_parenthesized(f, &field.arguments)?;
    if !field.selections.is_empty() {
        f.write_char(' ')?;
        write_selection_set(f, &field.selections, depth)?;
    }
    f.write_char('\n')
}

fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str(INDENT)?;
    }
    Ok(())
}
