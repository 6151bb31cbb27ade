//! Client-side plumbing for GraphQL fragments: a registry of named fragment
//! definitions, a composer that turns a root selection plus fragments into a
//! query document, and a validator that checks JSON response payloads against
//! a fragment's declared shape before they are handed to callers.

pub mod ast;
pub mod dashboard;
mod arg_value;
mod directive_annotation;
mod document_load_error;
mod field_selection;
mod file_reader;
mod fragment_definition;
mod fragment_registry;
mod fragment_shape;
pub mod loc;
mod query_composer;
mod registry_integrity;
mod response_path;
mod root_query;
mod selection_set;
mod shape_validator;
mod variable_definition;

pub use arg_value::ArgValue;
pub use directive_annotation::DirectiveAnnotation;
pub use document_load_error::DocumentLoadError;
pub use field_selection::FieldSelection;
pub use file_reader::ReadContentError;
pub use fragment_definition::FragmentDefinition;
pub use fragment_registry::FragmentNotFoundError;
pub use fragment_registry::FragmentRegistry;
pub use fragment_registry::RegisterError;
pub use fragment_shape::DecodeError;
pub use fragment_shape::FragmentShape;
pub use query_composer::ComposeError;
pub use query_composer::ComposeOptions;
pub use query_composer::ComposedQuery;
pub use query_composer::GraphQLRequest;
pub use query_composer::QueryComposer;
pub use registry_integrity::RegistryIntegrityError;
pub use response_path::PathSegment;
pub use response_path::ResponsePath;
pub use root_query::RootQuery;
pub use selection_set::SelectionSet;
pub use shape_validator::ExpectedKind;
pub use shape_validator::ShapeValidator;
pub use shape_validator::ValidationError;
pub use shape_validator::ValidationOptions;
pub use shape_validator::ValueKind;
pub use variable_definition::TypeAnnotation;
pub use variable_definition::VariableDefinition;

/// Name of the client-only directive that marks a field as nullable.
///
/// GraphQL executable documents carry no nullability information, so fragment
/// documents annotate nullable fields with `@nullable`. The directive is never
/// sent to the server.
pub const NULLABLE_DIRECTIVE: &str = "nullable";

/// The introspection field every object type implicitly exposes.
pub const TYPENAME_FIELD: &str = "__typename";

#[cfg(test)]
mod tests;
