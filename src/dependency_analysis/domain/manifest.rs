use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name used when a manifest does not declare one
pub const DEFAULT_PROJECT_NAME: &str = "__root__";

/// Version used when a manifest does not declare one
pub const DEFAULT_PROJECT_VERSION: &str = "0.0.0";

/// Which dependency list of a manifest a package was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    #[serde(rename = "dependency")]
    Dependency,
    #[serde(rename = "devDependency")]
    DevDependency,
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DependencyKind::Dependency => write!(f, "dependency"),
            DependencyKind::DevDependency => write!(f, "devDependency"),
        }
    }
}

/// A dependency declared directly by a manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectDependency {
    pub name: String,
    /// Version spec exactly as written in the manifest (`^1.2.0`, `workspace:*`, ...)
    pub version: String,
    pub kind: DependencyKind,
}

impl DirectDependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            kind,
        }
    }
}

/// `package.json`-shaped package metadata
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

fn default_name() -> String {
    DEFAULT_PROJECT_NAME.to_string()
}

fn default_version() -> String {
    DEFAULT_PROJECT_VERSION.to_string()
}

impl Manifest {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            dependencies: BTreeMap::new(),
            dev_dependencies: BTreeMap::new(),
        }
    }

    pub fn with_dependency(mut self, name: &str, version: &str) -> Self {
        self.dependencies.insert(name.to_string(), version.to_string());
        self
    }

    pub fn with_dev_dependency(mut self, name: &str, version: &str) -> Self {
        self.dev_dependencies
            .insert(name.to_string(), version.to_string());
        self
    }

    /// Production dependencies followed by dev dependencies.
    ///
    /// A name present in both lists appears twice; consumers that collect into
    /// a map therefore end up with the dev entry.
    pub fn direct_dependencies(&self) -> Vec<DirectDependency> {
        let production = self
            .dependencies
            .iter()
            .map(|(name, version)| DirectDependency::new(name, version, DependencyKind::Dependency));
        let development = self
            .dev_dependencies
            .iter()
            .map(|(name, version)| DirectDependency::new(name, version, DependencyKind::DevDependency));
        production.chain(development).collect()
    }
}
