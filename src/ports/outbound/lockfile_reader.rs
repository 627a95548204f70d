use crate::dependency_analysis::domain::LockfileInfo;
use crate::shared::Result;
use std::path::Path;

/// LockfileReader port for reading a project's lockfile
///
/// Implementations probe `package-lock.json`, `pnpm-lock.yaml` and
/// `yarn.lock` in that order and stop at the first one present.
pub trait LockfileReader {
    /// Reads, hashes and parses the lockfile of `project_dir`
    ///
    /// # Returns
    /// `Ok(None)` when the directory contains no supported lockfile
    ///
    /// # Errors
    /// Returns an error if a lockfile exists but cannot be read or parsed
    fn read_lockfile(&self, project_dir: &Path) -> Result<Option<LockfileInfo>>;
}
