/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, cache file).
pub mod alias_config_reader;
pub mod analysis_cache;
pub mod formatter;
pub mod lockfile_reader;
pub mod manifest_reader;
pub mod output_presenter;
pub mod progress_reporter;
pub mod source_file_reader;

pub use alias_config_reader::AliasConfigReader;
pub use analysis_cache::AnalysisCache;
pub use formatter::ResultFormatter;
pub use lockfile_reader::LockfileReader;
pub use manifest_reader::ManifestReader;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use source_file_reader::SourceFileReader;
