use crate::dependency_analysis::domain::{Manifest, PackageName};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// ManifestReader port for loading `package.json` data
///
/// Both lookups are async so the dependency tree builder can fan out over
/// sibling packages while reads are in flight.
///
/// # Async Support
/// Implementations must be `Send + Sync` to support concurrent access.
#[async_trait]
pub trait ManifestReader: Send + Sync {
    /// Reads the manifest governing `project_dir`, walking parent directories
    /// until one is found
    ///
    /// # Errors
    /// Returns an error if no manifest exists up to the filesystem root, or if
    /// the manifest found cannot be parsed
    async fn read_project_manifest(&self, project_dir: &Path) -> Result<Manifest>;

    /// Reads the installed manifest of a dependency
    ///
    /// # Returns
    /// `Ok(None)` when the package is not installed
    ///
    /// # Errors
    /// Returns an error if a manifest exists but cannot be read or parsed
    async fn read_package_manifest(&self, name: &PackageName) -> Result<Option<Manifest>>;
}
