use std::path::{Path, PathBuf};

/// Foreign content found in one of a task's output locations
///
/// Produced by the overlap detector that runs before cacheability is
/// resolved. Its presence always disables caching for the execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlappingOutputs {
    property_name: String,
    overlapped_path: PathBuf,
}

impl OverlappingOutputs {
    pub fn new(property_name: impl Into<String>, overlapped_path: impl Into<PathBuf>) -> Self {
        Self {
            property_name: property_name.into(),
            overlapped_path: overlapped_path.into(),
        }
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    pub fn overlapped_path(&self) -> &Path {
        &self.overlapped_path
    }
}
