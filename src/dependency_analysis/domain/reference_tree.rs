use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Recursive map of canonical file paths
///
/// The first level holds the files that import the analysed target; each of
/// them maps to the target itself, which is always a leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ReferenceTree {
    nodes: BTreeMap<PathBuf, ReferenceTree>,
}

impl ReferenceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the edge `importer -> target`; repeated edges are idempotent
    pub fn add_reference(&mut self, importer: PathBuf, target: PathBuf) {
        self.nodes
            .entry(importer)
            .or_default()
            .nodes
            .entry(target)
            .or_default();
    }

    /// Top-level keys (the importers), in path order
    pub fn importers(&self) -> impl Iterator<Item = &Path> {
        self.nodes.keys().map(PathBuf::as_path)
    }

    pub fn contains_importer(&self, path: &Path) -> bool {
        self.nodes.contains_key(path)
    }

    pub fn children(&self) -> impl Iterator<Item = (&Path, &ReferenceTree)> {
        self.nodes.iter().map(|(path, tree)| (path.as_path(), tree))
    }

    pub fn get(&self, path: &Path) -> Option<&ReferenceTree> {
        self.nodes.get(path)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
