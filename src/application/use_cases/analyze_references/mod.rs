use crate::application::dto::{ReferenceRequest, ReferenceResponse};
use crate::dependency_analysis::domain::{absolutize, AliasResolution, AliasTable};
use crate::dependency_analysis::services::ReferenceTreeBuilder;
use crate::ports::outbound::{AliasConfigReader, ProgressReporter, SourceFileReader};
use crate::shared::error::AnalysisError;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// AnalyzeReferencesUseCase - Finds the project files importing one file
///
/// # Type Parameters
/// * `SR` - SourceFileReader implementation
/// * `AR` - AliasConfigReader implementation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeReferencesUseCase<SR, AR, PR> {
    source_reader: SR,
    alias_reader: AR,
    progress_reporter: PR,
}

impl<SR, AR, PR> AnalyzeReferencesUseCase<SR, AR, PR>
where
    SR: SourceFileReader,
    AR: AliasConfigReader,
    PR: ProgressReporter,
{
    /// Creates a new AnalyzeReferencesUseCase with injected dependencies
    pub fn new(source_reader: SR, alias_reader: AR, progress_reporter: PR) -> Self {
        Self {
            source_reader,
            alias_reader,
            progress_reporter,
        }
    }

    /// Executes the file reference use case
    ///
    /// # Errors
    /// Returns `TargetFileMissing` when the target does not exist, even with
    /// a source extension appended, and an error if the root cannot be walked
    pub async fn execute(&self, request: ReferenceRequest) -> Result<ReferenceResponse> {
        // Step 1: Locate the target file
        let target = self.resolve_target(&request)?;

        // Step 2: Load path aliases
        let resolution = self.alias_reader.read_aliases(&request.root_dir);
        self.report_alias_resolution(&resolution, &request.root_dir);
        let aliases: Option<&AliasTable> = resolution.table();

        // Step 3: Scan the project
        self.progress_reporter.report(&format!(
            "🔍 Scanning {} for files importing {}",
            request.root_dir.display(),
            target.display()
        ));
        let scan = ReferenceTreeBuilder::new(&self.source_reader, &request.filter)
            .with_max_concurrency(request.max_concurrency)
            .build(&request.root_dir, &target, aliases, |done, total| {
                self.progress_reporter
                    .report_progress(done, total, Some("Scanning source files"));
            })
            .await?;

        for file in &scan.unreadable {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Skipped unreadable file {}: {}",
                file.path.display(),
                file.reason
            ));
        }

        Ok(ReferenceResponse {
            target: scan.target,
            tree: scan.tree,
            scanned_files: scan.scanned_files,
            unreadable_files: scan.unreadable.len(),
        })
    }

    /// Returns the target as given when it is a file, otherwise the first
    /// `<target>.<ext>` that is
    fn resolve_target(&self, request: &ReferenceRequest) -> Result<PathBuf> {
        let target = absolutize(&request.target_file, &request.root_dir);
        if self.source_reader.is_file(&target) {
            return Ok(target);
        }

        let found = request
            .filter
            .extensions
            .iter()
            .map(|ext| with_extension(&target, ext))
            .find(|candidate| self.source_reader.is_file(candidate));

        found.ok_or_else(|| AnalysisError::TargetFileMissing { path: target }.into())
    }

    fn report_alias_resolution(&self, resolution: &AliasResolution, root_dir: &Path) {
        match resolution {
            AliasResolution::Absent => self.progress_reporter.report(&format!(
                "ℹ️  No tsconfig.json in {}; resolving relative imports only",
                root_dir.display()
            )),
            AliasResolution::Malformed(reason) => {
                self.progress_reporter.report_error(&format!(
                    "⚠️  Warning: Failed to parse tsconfig.json: {}. Continuing without path aliases.",
                    reason
                ))
            }
            AliasResolution::Unconfigured => self
                .progress_reporter
                .report("ℹ️  tsconfig.json defines no path aliases"),
            AliasResolution::Resolved(table) => self
                .progress_reporter
                .report(&format!("🔗 Loaded {} path alias(es)", table.len())),
        }
    }
}

fn with_extension(path: &Path, ext: &str) -> PathBuf {
    let mut file = path.as_os_str().to_owned();
    file.push(".");
    file.push(ext);
    PathBuf::from(file)
}
