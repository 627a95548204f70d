use crate::dependency_analysis::domain::ReferenceTree;
use std::path::PathBuf;

/// ReferenceResponse - Internal response DTO from the file reference use case
#[derive(Debug, Clone)]
pub struct ReferenceResponse {
    /// Normalized absolute path of the analysed file
    pub target: PathBuf,
    /// `None` when no file imports the target
    pub tree: Option<ReferenceTree>,
    pub scanned_files: usize,
    pub unreadable_files: usize,
}

impl ReferenceResponse {
    pub fn importer_count(&self) -> usize {
        self.tree.as_ref().map_or(0, ReferenceTree::len)
    }
}
