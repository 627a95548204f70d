use depscope::prelude::*;
use std::path::Path;

/// Mock LockfileReader for testing
pub struct MockLockfileReader {
    pub lockfile: Option<LockfileInfo>,
    pub should_fail: bool,
}

#[allow(dead_code)]
impl MockLockfileReader {
    pub fn new(lockfile: LockfileInfo) -> Self {
        Self {
            lockfile: Some(lockfile),
            should_fail: false,
        }
    }

    pub fn missing() -> Self {
        Self {
            lockfile: None,
            should_fail: false,
        }
    }

    pub fn with_failure() -> Self {
        Self {
            lockfile: None,
            should_fail: true,
        }
    }
}

impl LockfileReader for MockLockfileReader {
    fn read_lockfile(&self, _project_dir: &Path) -> Result<Option<LockfileInfo>> {
        if self.should_fail {
            anyhow::bail!("Mock lockfile parse failure");
        }
        Ok(self.lockfile.clone())
    }
}
