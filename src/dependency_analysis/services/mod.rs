pub mod dependency_tree_builder;
pub mod import_extractor;
pub mod path_resolver;
pub mod reference_tree_builder;

pub use dependency_tree_builder::DependencyTreeBuilder;
pub use import_extractor::ImportExtractor;
pub use path_resolver::FilePathResolver;
pub use reference_tree_builder::{
    ReferenceScan, ReferenceTreeBuilder, UnreadableFile, DEFAULT_MAX_CONCURRENCY,
};
