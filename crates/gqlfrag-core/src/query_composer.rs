use crate::FieldSelection;
use crate::FragmentDefinition;
use crate::FragmentRegistry;
use crate::RootQuery;
use crate::SelectionSet;
use crate::TYPENAME_FIELD;
use indexmap::IndexMap;
use indexmap::IndexSet;
use serde::Serialize;
use std::fmt::Write;
use thiserror::Error;

type Result<T> = std::result::Result<T, ComposeError>;

const INDENT: &str = "  ";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Insert `__typename` into every nested selection set and fragment body
    /// that does not already select it. The operation's root selection set is
    /// left alone.
    pub add_typename: bool,

    /// Overrides the root query's own name.
    pub operation_name: Option<String>,
}

/// Assembles query documents out of a root query and registered
/// fragments.
#[derive(Clone, Debug)]
pub struct QueryComposer<'reg> {
    options: ComposeOptions,
    registry: &'reg FragmentRegistry,
}

impl<'reg> QueryComposer<'reg> {
    pub fn new(registry: &'reg FragmentRegistry) -> Self {
        Self::with_options(registry, ComposeOptions::default())
    }

    pub fn with_options(registry: &'reg FragmentRegistry, options: ComposeOptions) -> Self {
        Self {
            options,
            registry,
        }
    }

    pub fn options(&self) -> &ComposeOptions {
        &self.options
    }

    /// Compose `root` with every fragment it needs.
    ///
    /// The result includes the transitive closure of the fragments spread in
    /// the root selection and of those listed in `fragment_names`. Each
    /// fragment appears exactly once, in the order it is first reached by a
    /// depth-first walk: the root selection first (fields before the spreads
    /// at the same level), then `fragment_names` in order. Composing the same
    /// inputs always produces the same document.
    ///
    /// Fails if a reached fragment is not registered, if any selection set in
    /// the result would be empty, or if the variables used by the root and
    /// the reached fragments differ from those the root declares.
    pub fn compose(
        &self,
        root: &RootQuery,
        fragment_names: &[&str],
    ) -> Result<ComposedQuery<'reg>> {
        if root.selection_set().is_empty() {
            return Err(ComposeError::EmptySelectionSet {
                field: None,
                fragment_name: None,
            });
        }

        let mut reached = IndexMap::new();
        self.collect_fragments(root.selection_set(), None, &mut reached)?;
        for fragment_name in fragment_names {
            self.visit_fragment(fragment_name, None, &mut reached)?;
        }
        check_variables(root, reached.values().copied())?;

        let composed = ComposedQuery {
            fragments: reached.into_values().collect(),
            options: self.options.clone(),
            root: root.clone(),
        };
        log::debug!(
            "Composed {} with {} fragment(s).",
            composed.operation_name().unwrap_or("anonymous query"),
            composed.fragments.len(),
        );
        Ok(composed)
    }

    fn collect_fragments(
        &self,
        selection_set: &SelectionSet,
        referenced_from: Option<&str>,
        reached: &mut IndexMap<&'reg str, &'reg FragmentDefinition>,
    ) -> Result<()> {
        for field in selection_set.fields() {
            if let Some(sub_selection) = field.selection_set() {
                if sub_selection.is_empty() {
                    return Err(ComposeError::EmptySelectionSet {
                        field: Some(field.selected_name().to_string()),
                        fragment_name: referenced_from.map(str::to_string),
                    });
                }
                self.collect_fragments(sub_selection, referenced_from, reached)?;
            }
        }
        for fragment_name in selection_set.fragment_refs() {
            self.visit_fragment(fragment_name, referenced_from, reached)?;
        }
        Ok(())
    }

    fn visit_fragment(
        &self,
        fragment_name: &str,
        referenced_from: Option<&str>,
        reached: &mut IndexMap<&'reg str, &'reg FragmentDefinition>,
    ) -> Result<()> {
        if reached.contains_key(fragment_name) {
            return Ok(());
        }

        let fragment = self.registry.lookup(fragment_name)
            .map_err(|_| ComposeError::NotFound {
                fragment_name: fragment_name.to_string(),
                referenced_from: referenced_from.map(str::to_string),
            })?;
        if fragment.selection_set().is_empty() {
            return Err(ComposeError::EmptySelectionSet {
                field: None,
                fragment_name: Some(fragment.name().to_string()),
            });
        }

        // Recorded before descending so that cycles terminate.
        reached.insert(fragment.name(), fragment);
        self.collect_fragments(fragment.selection_set(), Some(fragment.name()), reached)
    }
}

/// Every variable used must be declared by the root, and every declared
/// variable must be used somewhere in the document.
fn check_variables<'a>(
    root: &RootQuery,
    fragments: impl Iterator<Item = &'a FragmentDefinition>,
) -> Result<()> {
    let mut used = IndexSet::new();
    let root_usages = root.selection_set().referenced_variable_names()
        .into_iter()
        .map(|name| (name, None));
    let fragment_usages = fragments.flat_map(|fragment| {
        fragment.selection_set().referenced_variable_names()
            .into_iter()
            .map(move |name| (name, Some(fragment.name())))
    });

    for (variable, used_in) in root_usages.chain(fragment_usages) {
        if root.variable_definition(variable).is_none() {
            return Err(ComposeError::UndeclaredVariable {
                used_in: used_in.map(str::to_string),
                variable: variable.to_string(),
            });
        }
        used.insert(variable);
    }

    if let Some(unused) = root.variable_definitions().iter()
        .find(|var_def| !used.contains(var_def.name())) {
        return Err(ComposeError::UnusedVariable {
            variable: unused.name().to_string(),
        });
    }

    Ok(())
}

/// A root query plus the fragments it depends on, ready to be rendered as a
/// GraphQL document or a request body.
#[derive(Clone, Debug, PartialEq)]
pub struct ComposedQuery<'reg> {
    fragments: Vec<&'reg FragmentDefinition>,
    options: ComposeOptions,
    root: RootQuery,
}

impl<'reg> ComposedQuery<'reg> {
    pub fn fragment_names(&self) -> Vec<&'reg str> {
        self.fragments.iter().map(|fragment| fragment.name()).collect()
    }

    pub fn fragments(&self) -> &[&'reg FragmentDefinition] {
        self.fragments.as_slice()
    }

    /// [`ComposeOptions::operation_name`] when set, otherwise the root
    /// query's own name.
    pub fn operation_name(&self) -> Option<&str> {
        self.options.operation_name.as_deref().or(self.root.name())
    }

    pub fn root(&self) -> &RootQuery {
        &self.root
    }

    pub fn to_document_string(&self) -> String {
        let mut out = String::from("query ");
        if let Some(name) = self.operation_name() {
            out.push_str(name);
        }
        let variable_definitions = self.root.variable_definitions();
        if !variable_definitions.is_empty() {
            out.push('(');
            for (idx, var_def) in variable_definitions.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                // Writing into a String cannot fail.
                let _ = write!(out, "{var_def}");
            }
            out.push(')');
        }
        if !out.ends_with(' ') {
            out.push(' ');
        }
        write_selection_set(
            &mut out,
            self.root.selection_set(),
            0,
            TypenameInsertion::NestedOnly(self.options.add_typename),
        );
        out.push('\n');

        for fragment in &self.fragments {
            let _ = write!(
                out,
                "\nfragment {} on {} ",
                fragment.name(),
                fragment.type_condition(),
            );
            write_selection_set(
                &mut out,
                fragment.selection_set(),
                0,
                TypenameInsertion::from_flag(self.options.add_typename),
            );
            out.push('\n');
        }

        out
    }

    /// The JSON body a GraphQL-over-HTTP transport sends for this query.
    pub fn to_request(
        &self,
        variables: serde_json::Map<String, serde_json::Value>,
    ) -> GraphQLRequest {
        GraphQLRequest {
            operation_name: self.operation_name().map(str::to_string),
            query: self.to_document_string(),
            variables,
        }
    }
}

impl std::fmt::Display for ComposedQuery<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_document_string())
    }
}

#[derive(Clone, Copy)]
enum TypenameInsertion {
    Never,
    Everywhere,
    /// Skip this level (the operation root) but insert below it.
    NestedOnly(bool),
}
impl TypenameInsertion {
    fn from_flag(add_typename: bool) -> Self {
        if add_typename { Self::Everywhere } else { Self::Never }
    }

    fn here(self) -> bool {
        matches!(self, Self::Everywhere)
    }

    fn nested(self) -> Self {
        match self {
            Self::NestedOnly(add_typename) => Self::from_flag(add_typename),
            other => other,
        }
    }
}

fn write_selection_set(
    out: &mut String,
    selection_set: &SelectionSet,
    depth: usize,
    typename: TypenameInsertion,
) {
    out.push_str("{\n");
    let inner_indent = INDENT.repeat(depth + 1);

    for field in selection_set.fields() {
        out.push_str(&inner_indent);
        write_field(out, field, depth + 1, typename.nested());
        out.push('\n');
    }
    for fragment_name in selection_set.fragment_refs() {
        out.push_str(&inner_indent);
        out.push_str("...");
        out.push_str(fragment_name);
        out.push('\n');
    }
    if typename.here() && !selection_set.selects_typename() {
        out.push_str(&inner_indent);
        out.push_str(TYPENAME_FIELD);
        out.push('\n');
    }

    out.push_str(&INDENT.repeat(depth));
    out.push('}');
}

fn write_field(
    out: &mut String,
    field: &FieldSelection,
    depth: usize,
    typename: TypenameInsertion,
) {
    if let Some(alias) = field.alias() {
        out.push_str(alias);
        out.push_str(": ");
    }
    out.push_str(field.name());

    if !field.arguments().is_empty() {
        out.push('(');
        for (idx, (name, value)) in field.arguments().iter().enumerate() {
            if idx > 0 {
                out.push_str(", ");
            }
            let _ = write!(out, "{name}: {value}");
        }
        out.push(')');
    }

    for directive in field.directives() {
        let _ = write!(out, " {directive}");
    }

    if let Some(sub_selection) = field.selection_set() {
        out.push(' ');
        write_selection_set(out, sub_selection, depth, typename);
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    pub query: String,
    #[serde(skip_serializing_if = "serde_json::Map::is_empty")]
    pub variables: serde_json::Map<String, serde_json::Value>,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ComposeError {
    #[error(
        "No fragment named '{fragment_name}' is registered{}",
        format_referenced_from(.referenced_from),
    )]
    NotFound {
        fragment_name: String,
        referenced_from: Option<String>,
    },

    #[error("Empty selection set {}", format_selection_owner(.field, .fragment_name))]
    EmptySelectionSet {
        field: Option<String>,
        fragment_name: Option<String>,
    },

    #[error(
        "Variable `${variable}` is used {} but not declared by the root query",
        format_used_in(.used_in),
    )]
    UndeclaredVariable {
        used_in: Option<String>,
        variable: String,
    },

    #[error("Variable `${variable}` is declared by the root query but never used")]
    UnusedVariable {
        variable: String,
    },
}

fn format_referenced_from(referenced_from: &Option<String>) -> String {
    match referenced_from {
        Some(parent) => format!(" (spread in fragment '{parent}')"),
        None => String::new(),
    }
}

fn format_selection_owner(field: &Option<String>, fragment_name: &Option<String>) -> String {
    match (field, fragment_name) {
        (Some(field), Some(fragment_name)) =>
            format!("on field `{field}` in fragment '{fragment_name}'"),
        (Some(field), None) => format!("on field `{field}` in the root selection"),
        (None, Some(fragment_name)) => format!("in fragment '{fragment_name}'"),
        (None, None) => "in the root selection".to_string(),
    }
}

fn format_used_in(used_in: &Option<String>) -> String {
    match used_in {
        Some(fragment_name) => format!("in fragment '{fragment_name}'"),
        None => "in the root selection".to_string(),
    }
}
