use std::path::Path;
use std::path::PathBuf;

/// Very similar to graphql_parser's [Pos](graphql_parser::Pos), except it
/// includes a PathBuf to the file (if the source came from a file).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FilePosition {
    pub col: usize,
    pub file: Option<PathBuf>,
    pub line: usize,
}
impl FilePosition {
    pub(crate) fn from_pos<P: AsRef<Path>>(
        file: Option<P>,
        pos: graphql_parser::Pos,
    ) -> Self {
        Self {
            col: pos.column,
            file: file.map(|f| f.as_ref().to_path_buf()),
            line: pos.line,
        }
    }
}
impl std::fmt::Display for FilePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file.display(), self.line, self.col),
            None => write!(f, "<str>:{}:{}", self.line, self.col),
        }
    }
}

/// Where a fragment (or a piece of one) was defined.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceLocation {
    /// Built in code via [`FragmentRegistry::register`](crate::FragmentRegistry::register).
    Api,
    /// Parsed out of a GraphQL document.
    Document(FilePosition),
}
impl SourceLocation {
    pub(crate) fn from_execdoc_ast_position(
        file_path: Option<&Path>,
        pos: &graphql_parser::Pos,
    ) -> Self {
        Self::Document(FilePosition::from_pos(file_path, *pos))
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Api => write!(f, "<api>"),
            Self::Document(pos) => pos.fmt(f),
        }
    }
}
