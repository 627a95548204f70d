/// Mock implementations for testing
mod mock_analysis_cache;
mod mock_lockfile_reader;
mod mock_manifest_reader;
mod mock_progress_reporter;

#[allow(unused_imports)]
pub use mock_analysis_cache::MockAnalysisCache;
#[allow(unused_imports)]
pub use mock_lockfile_reader::MockLockfileReader;
#[allow(unused_imports)]
pub use mock_manifest_reader::MockManifestReader;
#[allow(unused_imports)]
pub use mock_progress_reporter::MockProgressReporter;
