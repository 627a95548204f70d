use std::path::Path;

/// Default source extension appended to extensionless imports
pub const DEFAULT_EXTENSION: &str = "ts";

/// Directories never descended into while walking a project
pub const DEFAULT_IGNORE_DIRS: [&str; 2] = ["node_modules", ".git"];

/// Which files take part in reference analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFilter {
    /// Extensions without the leading dot, in resolution priority order
    pub extensions: Vec<String>,
    /// Directory names skipped during the walk
    pub ignore_dirs: Vec<String>,
}

impl Default for SourceFilter {
    fn default() -> Self {
        Self {
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }
}

impl SourceFilter {
    pub fn new(extensions: Vec<String>, ignore_dirs: Vec<String>) -> Self {
        Self {
            extensions: extensions
                .into_iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
            ignore_dirs,
        }
    }

    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext))
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignore_dirs.iter().any(|ignored| ignored == name)
    }
}
