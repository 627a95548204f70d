use crate::dependency_analysis::domain::{
    DependencyTree, DirectDependency, Expansion, LockfileInfo, Manifest, PackageMap, PackageName,
    PackageNode, UnresolvedPackage,
};
use crate::ports::outbound::ManifestReader;
use dashmap::DashMap;
use futures::future::{join_all, BoxFuture, FutureExt};
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Memoized manifest lookup for one package name
#[derive(Debug, Clone)]
enum ManifestOutcome {
    Found(Arc<Manifest>),
    NotFound,
    Failed(String),
}

/// Subtrees are shared per (package name, remaining depth)
type SubtreeKey = (String, usize);

/// DependencyTreeBuilder service expanding direct dependencies into a nested tree
///
/// One builder corresponds to one analysis run: the manifest and subtree memos
/// live as long as the builder and are discarded with it.
///
/// # Concurrency
/// All siblings of a level are expanded concurrently and the level completes
/// when every sibling has. Each manifest is read at most once per run, even
/// when several siblings ask for it at the same time.
///
/// When a lockfile is attached, packages the reader cannot find are expanded
/// from their lockfile record instead.
pub struct DependencyTreeBuilder<'a, R: ManifestReader + ?Sized> {
    reader: &'a R,
    lockfile: Option<&'a LockfileInfo>,
    manifests: DashMap<String, Arc<OnceCell<ManifestOutcome>>>,
    subtrees: DashMap<SubtreeKey, Arc<PackageMap>>,
    unresolved: DashMap<String, String>,
}

impl<'a, R: ManifestReader + ?Sized> DependencyTreeBuilder<'a, R> {
    pub fn new(reader: &'a R) -> Self {
        Self {
            reader,
            lockfile: None,
            manifests: DashMap::new(),
            subtrees: DashMap::new(),
            unresolved: DashMap::new(),
        }
    }

    pub fn with_lockfile(mut self, lockfile: Option<&'a LockfileInfo>) -> Self {
        self.lockfile = lockfile;
        self
    }

    /// Builds the package tree for `direct` dependencies
    ///
    /// # Arguments
    /// * `direct` - Direct dependencies of the analysed project
    /// * `max_depth` - Maximum number of nodes on any root-to-leaf path; `0` is treated as `1`
    ///
    /// # Returns
    /// The tree plus every package whose manifest could not be loaded; those
    /// packages appear in the tree with an empty subtree.
    pub async fn build(&self, direct: &[DirectDependency], max_depth: usize) -> DependencyTree {
        let remaining = max_depth.max(1) - 1;
        let packages = self.build_level(direct.to_vec(), remaining).await;

        let mut unresolved: Vec<UnresolvedPackage> = self
            .unresolved
            .iter()
            .map(|entry| UnresolvedPackage {
                name: entry.key().clone(),
                reason: entry.value().clone(),
            })
            .collect();
        unresolved.sort_by(|a, b| a.name.cmp(&b.name));

        DependencyTree {
            packages,
            unresolved,
        }
    }

    /// Expands the dependencies of one package, `remaining` levels deep
    ///
    /// Unlike the child maps stored in the tree, the outcome tells apart depth
    /// exhaustion, a missing package and an unreadable manifest.
    pub async fn expand(&self, name: &str, remaining: usize) -> Expansion {
        if remaining == 0 {
            return Expansion::Exhausted;
        }

        match self.load_manifest(name).await {
            ManifestOutcome::NotFound => Expansion::NotFound,
            ManifestOutcome::Failed(reason) => {
                self.unresolved.insert(name.to_string(), reason.clone());
                Expansion::Unresolvable(reason)
            }
            ManifestOutcome::Found(manifest) => Expansion::Expanded(
                self.build_level(manifest.direct_dependencies(), remaining - 1)
                    .await,
            ),
        }
    }

    /// Builds one level of siblings; each sibling's children may go `remaining` levels deeper
    fn build_level(
        &self,
        dependencies: Vec<DirectDependency>,
        remaining: usize,
    ) -> BoxFuture<'_, PackageMap> {
        async move {
            let nodes = join_all(dependencies.into_iter().map(|dependency| async move {
                let packages = self.children_of(dependency.name.clone(), remaining).await;
                (
                    dependency.name,
                    PackageNode::new(dependency.version, dependency.kind, packages),
                )
            }))
            .await;

            // later entries win, so a devDependency overrides a dependency of the same name
            nodes.into_iter().collect()
        }
        .boxed()
    }

    fn children_of(&self, name: String, remaining: usize) -> BoxFuture<'_, Arc<PackageMap>> {
        async move {
            if remaining == 0 {
                return Arc::new(PackageMap::new());
            }

            let key = (name, remaining);
            let cached = self.subtrees.get(&key).map(|entry| Arc::clone(entry.value()));
            if let Some(packages) = cached {
                return packages;
            }

            let packages = Arc::new(self.expand(&key.0, remaining).await.into_packages());

            // a concurrent sibling may have finished the same subtree first; keep its copy
            Arc::clone(self.subtrees.entry(key).or_insert(packages).value())
        }
        .boxed()
    }

    async fn load_manifest(&self, name: &str) -> ManifestOutcome {
        let cell = Arc::clone(self.manifests.entry(name.to_string()).or_default().value());

        cell.get_or_init(|| async {
            let package_name = match PackageName::new(name.to_string()) {
                Ok(package_name) => package_name,
                Err(e) => return ManifestOutcome::Failed(e.to_string()),
            };

            match self.reader.read_package_manifest(&package_name).await {
                Ok(Some(manifest)) => ManifestOutcome::Found(Arc::new(manifest)),
                Ok(None) => match self.lockfile.and_then(|lockfile| lockfile.package(name)) {
                    Some(locked) => ManifestOutcome::Found(Arc::new(locked.to_manifest(name))),
                    None => ManifestOutcome::NotFound,
                },
                Err(e) => ManifestOutcome::Failed(format!("{:#}", e)),
            }
        })
        .await
        .clone()
    }
}
