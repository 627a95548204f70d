use crate::dependency_analysis::domain::SourceFilter;
use crate::dependency_analysis::services::DEFAULT_MAX_CONCURRENCY;
use std::path::PathBuf;

/// ReferenceRequest - Internal request DTO for the file reference use case
#[derive(Debug, Clone)]
pub struct ReferenceRequest {
    /// Project root that is walked for importers
    pub root_dir: PathBuf,
    /// File to analyse, as given by the user (the extension may be omitted)
    pub target_file: PathBuf,
    pub filter: SourceFilter,
    pub max_concurrency: usize,
}

impl ReferenceRequest {
    pub fn new(root_dir: PathBuf, target_file: PathBuf, filter: SourceFilter) -> Self {
        Self {
            root_dir,
            target_file,
            filter,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }
}
