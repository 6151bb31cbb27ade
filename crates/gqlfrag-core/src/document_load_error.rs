use crate::ReadContentError;
use crate::ast;
use crate::loc;
use std::sync::Arc;
use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum DocumentLoadError {
    #[error(
        "Duplicate fragment definition: '{fragment_name}' (first defined at \
        {first_def_location}, redefined at {second_def_location})"
    )]
    DuplicateName {
        fragment_name: String,
        first_def_location: loc::SourceLocation,
        second_def_location: loc::SourceLocation,
    },

    #[error("Failed to read fragment document: {0}")]
    FileReadError(Arc<ReadContentError>),

    #[error("Invalid root query document: {reason}")]
    InvalidRootDocument {
        reason: String,
    },

    #[error("Failed to parse GraphQL document: {0}")]
    ParseError(Arc<ast::operation::ParseError>),

    #[error("Unsupported {selection_kind} at {location}")]
    UnsupportedSelection {
        selection_kind: &'static str,
        location: loc::SourceLocation,
    },
}
