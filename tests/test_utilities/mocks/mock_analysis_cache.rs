use depscope::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
struct Entry {
    stamp: u64,
    result: DependencyResult,
    depth: usize,
    hash: Option<String>,
}

/// In-memory AnalysisCache whose modification stamp is set by the test
#[derive(Debug, Default)]
pub struct MockAnalysisCache {
    entries: HashMap<PathBuf, Entry>,
    pub stamp: u64,
    pub writes: usize,
}

#[allow(dead_code)]
impl MockAnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates touching the project (manifest or lockfile)
    pub fn touch(&mut self) {
        self.stamp += 1;
    }

    pub fn stored_hash(&self, project_dir: &Path) -> Option<String> {
        self.entries.get(project_dir).and_then(|e| e.hash.clone())
    }
}

impl AnalysisCache for MockAnalysisCache {
    fn is_up_to_date(&self, project_dir: &Path, depth: usize, hash: Option<&str>) -> Result<bool> {
        let Some(entry) = self.entries.get(project_dir) else {
            return Ok(false);
        };
        let hash_matches = match hash {
            Some(hash) => entry.hash.as_deref() == Some(hash),
            None => true,
        };
        Ok(entry.stamp == self.stamp && entry.depth == depth && hash_matches)
    }

    fn get_dependencies(&self, project_dir: &Path) -> Option<DependencyResult> {
        self.entries.get(project_dir).map(|e| e.result.clone())
    }

    fn update_cache(
        &mut self,
        project_dir: &Path,
        result: &DependencyResult,
        depth: usize,
        hash: Option<&str>,
    ) -> Result<()> {
        self.writes += 1;
        self.entries.insert(
            project_dir.to_path_buf(),
            Entry {
                stamp: self.stamp,
                result: result.clone(),
                depth,
                hash: hash.map(str::to_string),
            },
        );
        Ok(())
    }
}
