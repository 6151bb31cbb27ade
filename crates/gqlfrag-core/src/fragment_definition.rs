use crate::DocumentLoadError;
use crate::FieldSelection;
use crate::SelectionSet;
use crate::ast;
use crate::loc;
use indexmap::IndexSet;
use std::path::Path;

/// A named, reusable selection of fields on a single GraphQL type.
///
/// Definitions are immutable once built. The fragments spread at the top
/// level of the fragment are its *nested references*; spreads inside a
/// field's sub-selection belong to that field's [`SelectionSet`].
#[derive(Clone, Debug, PartialEq)]
pub struct FragmentDefinition {
    pub(crate) def_location: loc::SourceLocation,
    pub(crate) name: String,
    pub(crate) selection_set: SelectionSet,
    pub(crate) type_condition: String,
}
impl FragmentDefinition {
    pub fn new(
        name: impl Into<String>,
        type_condition: impl Into<String>,
        selections: Vec<FieldSelection>,
        nested_refs: Vec<String>,
    ) -> Self {
        Self {
            def_location: loc::SourceLocation::Api,
            name: name.into(),
            selection_set: SelectionSet {
                fields: selections,
                fragment_refs: nested_refs.into_iter().collect(),
            },
            type_condition: type_condition.into(),
        }
    }

    pub(crate) fn from_ast(
        ast: &ast::operation::FragmentDefinition,
        file_path: Option<&Path>,
    ) -> Result<Self, Vec<DocumentLoadError>> {
        let ast::operation::TypeCondition::On(type_condition) = &ast.type_condition;
        Ok(Self {
            def_location: loc::SourceLocation::from_execdoc_ast_position(
                file_path,
                &ast.position,
            ),
            name: ast.name.clone(),
            selection_set: SelectionSet::from_ast(&ast.selection_set, file_path)?,
            type_condition: type_condition.clone(),
        })
    }

    pub fn def_location(&self) -> &loc::SourceLocation {
        &self.def_location
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Fragments spread directly at the top level of this fragment.
    pub fn nested_refs(&self) -> &IndexSet<String> {
        self.selection_set.fragment_refs()
    }

    pub fn selections(&self) -> &[FieldSelection] {
        self.selection_set.fields()
    }

    pub fn selection_set(&self) -> &SelectionSet {
        &self.selection_set
    }

    pub fn type_condition(&self) -> &str {
        self.type_condition.as_str()
    }
}
