use super::DependencyKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Children of a node, keyed by package name
pub type PackageMap = BTreeMap<String, PackageNode>;

/// One package in the expanded dependency tree
///
/// `packages` is reference counted: memoized subtrees are shared between every
/// parent that depends on the same package at the same remaining depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageNode {
    pub version: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
    #[serde(default)]
    pub packages: Arc<PackageMap>,
}

impl PackageNode {
    pub fn new(version: impl Into<String>, kind: DependencyKind, packages: Arc<PackageMap>) -> Self {
        Self {
            version: version.into(),
            kind,
            packages,
        }
    }

    pub fn leaf(version: impl Into<String>, kind: DependencyKind) -> Self {
        Self::new(version, kind, Arc::new(PackageMap::new()))
    }

    /// Number of nodes on the longest path starting at this node (a leaf is 1)
    pub fn depth(&self) -> usize {
        1 + max_depth(&self.packages)
    }
}

/// Longest root-to-leaf path length in a package map (0 when empty)
pub fn max_depth(packages: &PackageMap) -> usize {
    packages.values().map(PackageNode::depth).max().unwrap_or(0)
}

/// Top-level result of a dependency analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyResult {
    pub name: String,
    pub version: String,
    pub packages: PackageMap,
}

impl DependencyResult {
    pub fn new(name: impl Into<String>, version: impl Into<String>, packages: PackageMap) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            packages,
        }
    }

    pub fn depth(&self) -> usize {
        max_depth(&self.packages)
    }

    pub fn direct_dependency_count(&self) -> usize {
        self.packages.len()
    }
}

/// Outcome of expanding one package's own dependencies
#[derive(Debug, Clone, PartialEq)]
pub enum Expansion {
    /// Remaining depth reached zero, the manifest was not consulted
    Exhausted,
    /// No manifest exists for the package
    NotFound,
    /// A manifest exists but could not be read or parsed
    Unresolvable(String),
    Expanded(PackageMap),
}

impl Expansion {
    /// Collapses the outcome to the child map stored in the tree.
    ///
    /// Every non-expanded outcome becomes an empty map, which is what gets
    /// serialized and cached.
    pub fn into_packages(self) -> PackageMap {
        match self {
            Expansion::Expanded(packages) => packages,
            Expansion::Exhausted | Expansion::NotFound | Expansion::Unresolvable(_) => {
                PackageMap::new()
            }
        }
    }
}

/// A package whose manifest could not be loaded during expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedPackage {
    pub name: String,
    pub reason: String,
}

/// Output of one dependency tree build
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyTree {
    pub packages: PackageMap,
    /// Sorted by package name
    pub unresolved: Vec<UnresolvedPackage>,
}
