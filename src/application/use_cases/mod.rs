/// Use cases module containing application business logic orchestration
mod analyze_dependencies;
mod analyze_references;

pub use analyze_dependencies::AnalyzeDependenciesUseCase;
pub use analyze_references::AnalyzeReferencesUseCase;
