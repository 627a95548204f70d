use crate::dependency_analysis::domain::SourceFilter;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// SourceFileReader port for enumerating and reading project source files
#[async_trait]
pub trait SourceFileReader: Send + Sync {
    /// Lists every file under `root_dir` accepted by `filter`, as absolute paths
    ///
    /// # Errors
    /// Returns an error if `root_dir` itself cannot be read
    fn list_source_files(&self, root_dir: &Path, filter: &SourceFilter) -> Result<Vec<PathBuf>>;

    /// Reads one source file as UTF-8 text
    async fn read_source(&self, path: &Path) -> Result<String>;

    /// Whether `path` names an existing regular file
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}
