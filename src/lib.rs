//! depscope - Dependency analysis for Node/TypeScript projects
//!
//! This library answers two questions about a project: which packages it
//! depends on (a depth-bounded, cached package tree built from installed
//! manifests and the lockfile), and which source files import a given file
//! (a reference tree built from `import` statements, relative paths and
//! `tsconfig.json` path aliases).
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_analysis`): Domain models and tree-building services
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use depscope::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<()> {
//! let project_dir = PathBuf::from("/work/web");
//! let cache = CacheManager::open(CacheManager::default_path(&project_dir))?;
//!
//! let mut use_case = AnalyzeDependenciesUseCase::new(
//!     FileSystemReader::new(&project_dir),
//!     FileSystemReader::new(&project_dir),
//!     Some(cache),
//!     StderrProgressReporter::new(),
//! );
//!
//! let response = use_case
//!     .execute(DependencyRequest::new(project_dir, 2, true))
//!     .await?;
//!
//! let output = TreeFormatter::new().format_dependencies(&response.result)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod dependency_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        CacheManager, FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TreeFormatter};
    pub use crate::application::dto::{
        DependencyRequest, DependencyResponse, OutputFormat, ReferenceRequest, ReferenceResponse,
    };
    pub use crate::application::use_cases::{AnalyzeDependenciesUseCase, AnalyzeReferencesUseCase};
    pub use crate::dependency_analysis::domain::{
        AliasResolution, AliasTable, DependencyKind, DependencyResult, DirectDependency, LockedPackage,
        LockfileInfo, LockfileKind, Manifest, PackageMap, PackageName, PackageNode, ReferenceTree,
        SourceFilter,
    };
    pub use crate::dependency_analysis::services::{DependencyTreeBuilder, ReferenceTreeBuilder};
    pub use crate::ports::outbound::{
        AliasConfigReader, AnalysisCache, LockfileReader, ManifestReader, OutputPresenter,
        ProgressReporter, ResultFormatter, SourceFileReader,
    };
    pub use crate::shared::error::{AnalysisError, ExitCode};
    pub use crate::shared::Result;
}
