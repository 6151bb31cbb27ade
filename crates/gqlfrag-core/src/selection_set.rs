use crate::DocumentLoadError;
use crate::FieldSelection;
use crate::TYPENAME_FIELD;
use crate::ast;
use crate::loc;
use indexmap::IndexSet;
use std::path::Path;

type Result<T> = std::result::Result<T, Vec<DocumentLoadError>>;

/// The fields and fragment spreads requested at one level of a query.
///
/// Fields keep their declaration order. Spreads are kept as an ordered set:
/// spreading the same fragment twice at one level is the same as spreading it
/// once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionSet {
    pub(crate) fields: Vec<FieldSelection>,
    pub(crate) fragment_refs: IndexSet<String>,
}
impl SelectionSet {
    pub fn new(fields: Vec<FieldSelection>) -> Self {
        Self {
            fields,
            fragment_refs: IndexSet::new(),
        }
    }

    pub fn with_field(mut self, field: FieldSelection) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_fragment_ref(mut self, fragment_name: impl Into<String>) -> Self {
        self.fragment_refs.insert(fragment_name.into());
        self
    }

    pub(crate) fn from_ast(
        ast_sel_set: &ast::operation::SelectionSet,
        file_path: Option<&Path>,
    ) -> Result<Self> {
        let mut errors = vec![];
        let mut selection_set = Self::default();
        for ast_selection in &ast_sel_set.items {
            match ast_selection {
                ast::operation::Selection::Field(ast_field) => {
                    match FieldSelection::from_ast(ast_field, file_path) {
                        Ok(field) => selection_set.fields.push(field),
                        Err(mut field_errors) => errors.append(&mut field_errors),
                    }
                },

                ast::operation::Selection::FragmentSpread(spread) => {
                    if !spread.directives.is_empty() {
                        errors.push(DocumentLoadError::UnsupportedSelection {
                            selection_kind: "directive on a fragment spread",
                            location: loc::SourceLocation::from_execdoc_ast_position(
                                file_path,
                                &spread.position,
                            ),
                        });
                        continue;
                    }
                    selection_set.fragment_refs.insert(spread.fragment_name.clone());
                },

                ast::operation::Selection::InlineFragment(inline) => {
                    errors.push(DocumentLoadError::UnsupportedSelection {
                        selection_kind: "inline fragment",
                        location: loc::SourceLocation::from_execdoc_ast_position(
                            file_path,
                            &inline.position,
                        ),
                    });
                },
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(selection_set)
    }

    pub fn fields(&self) -> &[FieldSelection] {
        self.fields.as_slice()
    }

    pub fn fragment_refs(&self) -> &IndexSet<String> {
        &self.fragment_refs
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.fragment_refs.is_empty()
    }

    /// Whether `__typename` is selected directly at this level.
    pub fn selects_typename(&self) -> bool {
        self.fields.iter().any(|field| field.name() == TYPENAME_FIELD && field.alias().is_none())
    }

    /// Every fragment spread anywhere in this selection tree, in first-seen
    /// depth-first order: each field's sub-selection is walked before this
    /// level's own spreads.
    pub fn referenced_fragment_names(&self) -> IndexSet<&str> {
        let mut names = IndexSet::new();
        self.collect_fragment_refs(&mut names);
        names
    }

    fn collect_fragment_refs<'a>(&'a self, names: &mut IndexSet<&'a str>) {
        for field in &self.fields {
            if let Some(sub_selection) = field.selection_set() {
                sub_selection.collect_fragment_refs(names);
            }
        }
        for fragment_ref in &self.fragment_refs {
            names.insert(fragment_ref.as_str());
        }
    }

    /// Every variable referenced by an argument anywhere in this selection
    /// tree (fields, directives and sub-selections, but not spread
    /// fragments), in first-seen order.
    pub fn referenced_variable_names(&self) -> IndexSet<&str> {
        let mut names = IndexSet::new();
        self.collect_variable_refs(&mut names);
        names
    }

    fn collect_variable_refs<'a>(&'a self, names: &mut IndexSet<&'a str>) {
        for field in &self.fields {
            for value in field.arguments().values() {
                value.collect_variables(names);
            }
            for directive in field.directives() {
                for value in directive.arguments().values() {
                    value.collect_variables(names);
                }
            }
            if let Some(sub_selection) = field.selection_set() {
                sub_selection.collect_variable_refs(names);
            }
        }
    }
}
