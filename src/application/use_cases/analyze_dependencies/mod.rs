use crate::application::dto::{DependencyRequest, DependencyResponse};
use crate::dependency_analysis::domain::{DependencyResult, LockfileInfo};
use crate::dependency_analysis::services::DependencyTreeBuilder;
use crate::ports::outbound::{AnalysisCache, LockfileReader, ManifestReader, ProgressReporter};
use crate::shared::Result;

/// AnalyzeDependenciesUseCase - Package dependency tree analysis
///
/// Serves a fresh cache entry when one exists, otherwise builds the tree from
/// installed manifests (falling back to lockfile records) and stores it.
///
/// # Type Parameters
/// * `MR` - ManifestReader implementation
/// * `LR` - LockfileReader implementation
/// * `C` - AnalysisCache implementation (`None` disables caching)
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeDependenciesUseCase<MR, LR, C, PR> {
    manifest_reader: MR,
    lockfile_reader: LR,
    cache: Option<C>,
    progress_reporter: PR,
}

impl<MR, LR, C, PR> AnalyzeDependenciesUseCase<MR, LR, C, PR>
where
    MR: ManifestReader,
    LR: LockfileReader,
    C: AnalysisCache,
    PR: ProgressReporter,
{
    /// Creates a new AnalyzeDependenciesUseCase with injected dependencies
    pub fn new(
        manifest_reader: MR,
        lockfile_reader: LR,
        cache: Option<C>,
        progress_reporter: PR,
    ) -> Self {
        Self {
            manifest_reader,
            lockfile_reader,
            cache,
            progress_reporter,
        }
    }

    /// Gives the cache back, e.g. to inspect it after a run
    pub fn into_cache(self) -> Option<C> {
        self.cache
    }

    /// Executes the dependency analysis use case
    ///
    /// # Errors
    /// Returns an error if the project manifest cannot be found or parsed,
    /// or if the cache cannot be read or written
    pub async fn execute(&mut self, request: DependencyRequest) -> Result<DependencyResponse> {
        // Step 1: Detect, hash and parse the lockfile (a broken one is ignored)
        let lockfile = self.read_and_report_lockfile(&request);
        let hash = if request.hash_lockfile {
            lockfile.as_ref().map(|info| info.hash.clone())
        } else {
            None
        };

        // Step 2: Serve a fresh cache entry
        if let Some(cached) = self.load_from_cache(&request, hash.as_deref())? {
            return Ok(DependencyResponse::cached(cached));
        }

        // Step 3: Read the project manifest
        self.progress_reporter.report(&format!(
            "📖 Loading package.json from: {}",
            request.project_path.display()
        ));
        let manifest = self
            .manifest_reader
            .read_project_manifest(&request.project_path)
            .await?;
        let direct = manifest.direct_dependencies();
        self.progress_reporter.report(&format!(
            "🔍 Resolving {} direct dependenc{} (depth {})...",
            direct.len(),
            if direct.len() == 1 { "y" } else { "ies" },
            request.depth
        ));

        // Step 4: Expand the dependency tree
        let tree = DependencyTreeBuilder::new(&self.manifest_reader)
            .with_lockfile(lockfile.as_ref())
            .build(&direct, request.depth)
            .await;
        for package in &tree.unresolved {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Failed to load package {}: {}",
                package.name, package.reason
            ));
        }
        let result = DependencyResult::new(manifest.name, manifest.version, tree.packages);

        // Step 5: Persist the result
        if let Some(cache) = self.cache.as_mut() {
            cache.update_cache(&request.project_path, &result, request.depth, hash.as_deref())?;
        }

        Ok(DependencyResponse::built(
            result,
            lockfile.map(|info| info.kind),
            tree.unresolved,
        ))
    }

    /// Reads the lockfile, reporting what was found
    ///
    /// A missing lockfile is informational, an unparsable one is reported as
    /// an error; both leave the analysis without lockfile data.
    fn read_and_report_lockfile(&self, request: &DependencyRequest) -> Option<LockfileInfo> {
        match self.lockfile_reader.read_lockfile(&request.project_path) {
            Ok(Some(info)) => {
                self.progress_reporter.report(&format!(
                    "🔒 Using {} ({} locked package(s))",
                    info.kind,
                    info.packages.len()
                ));
                Some(info)
            }
            Ok(None) => {
                self.progress_reporter
                    .report("ℹ️  No lockfile found; continuing without lockfile data");
                None
            }
            Err(e) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Ignoring lockfile: {:#}",
                    e
                ));
                None
            }
        }
    }

    fn load_from_cache(
        &self,
        request: &DependencyRequest,
        hash: Option<&str>,
    ) -> Result<Option<DependencyResult>> {
        let Some(cache) = self.cache.as_ref() else {
            return Ok(None);
        };

        if !cache.is_up_to_date(&request.project_path, request.depth, hash)? {
            return Ok(None);
        }

        let cached = cache.get_dependencies(&request.project_path);
        if cached.is_some() {
            self.progress_reporter
                .report("📦 Loading dependency data from cache...");
        }
        Ok(cached)
    }
}
