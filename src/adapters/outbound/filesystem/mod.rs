/// Filesystem adapters for project files, the analysis cache and output files
mod cache_manager;
mod file_reader;
mod file_writer;
mod lockfile_parser;

pub use cache_manager::{
    modification_stamp, CacheEntry, CacheManager, CACHE_DIR_NAME, CACHE_FILE_NAME,
};
pub use file_reader::FileSystemReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use lockfile_parser::parse_lockfile;
