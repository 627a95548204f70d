use std::path::PathBuf;

/// DependencyRequest - Internal request DTO for the dependency analysis use case
#[derive(Debug, Clone)]
pub struct DependencyRequest {
    /// Directory whose `package.json` governs the analysis
    pub project_path: PathBuf,
    /// Maximum tree depth; 1 lists direct dependencies only
    pub depth: usize,
    /// Whether the lockfile hash takes part in cache freshness
    pub hash_lockfile: bool,
}

impl DependencyRequest {
    pub fn new(project_path: PathBuf, depth: usize, hash_lockfile: bool) -> Self {
        Self {
            project_path,
            depth: depth.max(1),
            hash_lockfile,
        }
    }
}
