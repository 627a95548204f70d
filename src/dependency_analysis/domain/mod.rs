pub mod alias_table;
pub mod canonical_path;
pub mod lockfile;
pub mod manifest;
pub mod package;
pub mod package_tree;
pub mod reference_tree;
pub mod source_filter;

pub use alias_table::{AliasEntry, AliasResolution, AliasTable};
pub use canonical_path::{absolutize, compare_paths, normalize_path};
pub use lockfile::{LockedPackage, LockfileInfo, LockfileKind};
pub use manifest::{DependencyKind, DirectDependency, Manifest};
pub use package::PackageName;
pub use package_tree::{
    max_depth, DependencyResult, DependencyTree, Expansion, PackageMap, PackageNode,
    UnresolvedPackage,
};
pub use reference_tree::ReferenceTree;
pub use source_filter::SourceFilter;
