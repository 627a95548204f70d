use crate::dependency_analysis::domain::{DependencyResult, LockfileKind, UnresolvedPackage};

/// DependencyResponse - Internal response DTO from the dependency analysis use case
#[derive(Debug, Clone)]
pub struct DependencyResponse {
    pub result: DependencyResult,
    /// True when the result was served from the cache without reading any manifest
    pub from_cache: bool,
    /// Lockfile used during a fresh build (None on a cache hit or without lockfile)
    pub lockfile: Option<LockfileKind>,
    /// Packages whose manifest could not be loaded; always empty on a cache hit
    pub unresolved: Vec<UnresolvedPackage>,
}

impl DependencyResponse {
    pub fn cached(result: DependencyResult) -> Self {
        Self {
            result,
            from_cache: true,
            lockfile: None,
            unresolved: Vec::new(),
        }
    }

    pub fn built(
        result: DependencyResult,
        lockfile: Option<LockfileKind>,
        unresolved: Vec<UnresolvedPackage>,
    ) -> Self {
        Self {
            result,
            from_cache: false,
            lockfile,
            unresolved,
        }
    }
}
