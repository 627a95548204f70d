use crate::dependency_analysis::domain::DependencyResult;
use crate::shared::Result;
use std::path::Path;

/// AnalysisCache port for persisting dependency analysis results per directory
///
/// An entry is fresh iff its modification stamp, depth and (when supplied)
/// lockfile hash all match the current values for the directory.
pub trait AnalysisCache {
    /// Checks whether the cached entry for `project_dir` can be used as is
    ///
    /// # Errors
    /// Returns an error if the directory's modification time cannot be read
    fn is_up_to_date(&self, project_dir: &Path, depth: usize, hash: Option<&str>) -> Result<bool>;

    /// Returns the cached result without re-checking freshness
    fn get_dependencies(&self, project_dir: &Path) -> Option<DependencyResult>;

    /// Replaces the entry for `project_dir` and persists the whole cache
    ///
    /// # Errors
    /// Returns an error if the cache cannot be written
    fn update_cache(
        &mut self,
        project_dir: &Path,
        result: &DependencyResult,
        depth: usize,
        hash: Option<&str>,
    ) -> Result<()>;
}
