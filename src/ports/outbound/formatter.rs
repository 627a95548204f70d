use crate::dependency_analysis::domain::{DependencyResult, ReferenceTree};
use crate::shared::Result;
use std::path::Path;

/// ResultFormatter port for rendering analysis results
pub trait ResultFormatter {
    /// Renders a package dependency tree
    fn format_dependencies(&self, result: &DependencyResult) -> Result<String>;

    /// Renders the files importing `target`; `None` means no importer was found
    fn format_references(&self, target: &Path, tree: Option<&ReferenceTree>) -> Result<String>;
}
