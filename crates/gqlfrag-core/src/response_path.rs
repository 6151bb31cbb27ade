/// One step from a payload's root towards a value inside it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// The location of a value inside a response payload, e.g.
/// `futureTicks.results[0].timestamp`. The empty path denotes the payload
/// root and renders as `$`.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct ResponsePath {
    segments: Vec<PathSegment>,
}
impl ResponsePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn with_field(mut self, name: &str) -> Self {
        self.push_field(name);
        self
    }

    pub fn with_index(mut self, idx: usize) -> Self {
        self.push_index(idx);
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        self.segments.as_slice()
    }

    pub(crate) fn pop(&mut self) {
        self.segments.pop();
    }

    pub(crate) fn push_field(&mut self, name: &str) {
        self.segments.push(PathSegment::Field(name.to_string()));
    }

    pub(crate) fn push_index(&mut self, idx: usize) {
        self.segments.push(PathSegment::Index(idx));
    }
}

impl std::fmt::Display for ResponsePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("$");
        }
        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if idx == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}
