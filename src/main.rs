mod cli;
mod config;

use cli::{Args, Command, DepsArgs, RefsArgs};
use config::{load_config, DepsSettings, RefsSettings};
use depscope::adapters::outbound::console::StderrProgressReporter;
use depscope::adapters::outbound::filesystem::{CacheManager, FileSystemReader};
use depscope::application::dto::{DependencyRequest, OutputFormat, ReferenceRequest};
use depscope::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use depscope::application::use_cases::{AnalyzeDependenciesUseCase, AnalyzeReferencesUseCase};
use depscope::dependency_analysis::domain::absolutize;
use depscope::ports::outbound::{ProgressReporter, ResultFormatter};
use depscope::shared::error::{AnalysisError, ExitCode};
use depscope::shared::Result;
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    let exit_code = match run(args).await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(exit_code.as_i32());
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Deps(deps) => run_deps(deps).await,
        Command::Refs(refs) => run_refs(refs).await,
    }
}

async fn run_deps(args: DepsArgs) -> Result<()> {
    let cwd = current_dir()?;
    let reporter = StderrProgressReporter::new();

    // Validate project directory
    let project_path = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let project_dir = validate_project_path(&project_path)?;

    // Merge flags, config file and defaults
    let config = load_config(args.config.as_deref(), &project_dir, &reporter)?;
    let settings = DepsSettings::resolve(&args, &config, &cwd)?;

    let cache = if settings.use_cache {
        Some(CacheManager::open(&settings.cache_path)?)
    } else {
        None
    };

    // Create adapters (Dependency Injection)
    let mut use_case = AnalyzeDependenciesUseCase::new(
        FileSystemReader::new(&project_dir),
        FileSystemReader::new(&project_dir),
        cache,
        StderrProgressReporter::new(),
    );

    let request = DependencyRequest::new(project_dir, settings.depth, settings.hash_lockfile);
    let response = use_case.execute(request).await?;

    reporter.report(&format!(
        "✅ {} direct dependenc{} of {}@{}{}",
        response.result.direct_dependency_count(),
        if response.result.direct_dependency_count() == 1 {
            "y"
        } else {
            "ies"
        },
        response.result.name,
        response.result.version,
        if response.from_cache { " (cached)" } else { "" }
    ));

    present(&reporter, args.output, settings.format, |formatter| {
        formatter.format_dependencies(&response.result)
    })
}

async fn run_refs(args: RefsArgs) -> Result<()> {
    let cwd = current_dir()?;
    let reporter = StderrProgressReporter::new();

    let root_path = args.root.clone().unwrap_or_else(|| cwd.clone());
    let root_dir = validate_project_path(&root_path)?;
    let target_file = canonical_target(&absolutize(&args.file, &cwd));

    let config = load_config(args.config.as_deref(), &root_dir, &reporter)?;
    let settings = RefsSettings::resolve(&args, &config)?;

    let use_case = AnalyzeReferencesUseCase::new(
        FileSystemReader::new(&root_dir),
        FileSystemReader::new(&root_dir),
        StderrProgressReporter::new(),
    );

    let request = ReferenceRequest::new(root_dir, target_file, settings.filter)
        .with_max_concurrency(settings.max_concurrency);
    let response = use_case.execute(request).await?;

    reporter.report(&format!(
        "✅ Scanned {} file(s), {} importer(s) found",
        response.scanned_files,
        response.importer_count()
    ));

    present(&reporter, args.output, settings.format, |formatter| {
        formatter.format_references(&response.target, response.tree.as_ref())
    })
}

/// Renders a result and hands it to stdout or, with `--output`, to a JSON file
fn present<F>(
    reporter: &impl ProgressReporter,
    output: Option<PathBuf>,
    format: OutputFormat,
    render: F,
) -> Result<()>
where
    F: FnOnce(&dyn ResultFormatter) -> Result<String>,
{
    let format = if output.is_some() {
        OutputFormat::Json
    } else {
        format
    };

    reporter.report(FormatterFactory::progress_message(format));
    let formatter = FormatterFactory::create(format);
    let content = render(formatter.as_ref())?;

    let presenter_type = PresenterType::from_output(output);
    let written_to = match &presenter_type {
        PresenterType::File(path) => Some(path.clone()),
        PresenterType::Stdout => None,
    };
    PresenterFactory::create(presenter_type).present(&content)?;

    if let Some(path) = written_to {
        reporter.report_completion(&format!("✅ Output written to: {}", path.display()));
    }
    Ok(())
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| {
        AnalysisError::InvalidProjectPath {
            path: PathBuf::from("."),
            reason: format!("Failed to read current directory: {}", e),
        }
        .into()
    })
}

/// Resolves symlinks in the target's directory so it compares equal to files
/// found under the canonical project root; the file itself may not exist yet
/// when its extension was omitted.
fn canonical_target(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => parent
            .canonicalize()
            .map(|dir| dir.join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

/// Validates a project directory and returns its canonical path
fn validate_project_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        return Err(AnalysisError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| AnalysisError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(AnalysisError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(AnalysisError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    let canonical_path = path
        .canonicalize()
        .map_err(|e| AnalysisError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to canonicalize path: {}", e),
        })?;

    Ok(canonical_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_validate_project_path_valid_directory() {
        let temp_dir = TempDir::new().unwrap();
        let canonical = validate_project_path(temp_dir.path()).unwrap();
        assert!(canonical.is_absolute());
        assert_eq!(canonical, temp_dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_validate_project_path_nonexistent() {
        let nonexistent_path = PathBuf::from("/nonexistent/path/that/does/not/exist");
        let err = validate_project_path(&nonexistent_path).unwrap_err();
        assert!(err.to_string().contains("Directory does not exist"));
    }

    #[test]
    fn test_validate_project_path_file_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("package.json");
        fs::write(&file_path, "{}").unwrap();

        let err = validate_project_path(&file_path).unwrap_err();
        assert!(err.to_string().contains("Not a directory"));
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_project_path_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let real = temp_dir.path().join("real");
        fs::create_dir(&real).unwrap();
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let err = validate_project_path(&link).unwrap_err();
        assert!(err.to_string().contains("symbolic link"));
    }

    #[test]
    fn test_canonical_target_keeps_missing_file_name() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("helper");

        let resolved = canonical_target(&target);

        assert_eq!(
            resolved,
            temp_dir.path().canonicalize().unwrap().join("helper")
        );
    }
}
