use super::{FilePathResolver, ImportExtractor};
use crate::dependency_analysis::domain::{
    absolutize, compare_paths, normalize_path, AliasTable, ReferenceTree, SourceFilter,
};
use crate::ports::outbound::SourceFileReader;
use crate::shared::Result;
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};

/// Default number of source files read and scanned at the same time
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;

/// A source file that could not be read during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning a project for files importing one target
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceScan {
    /// Normalized absolute path of the analysed file
    pub target: PathBuf,
    /// `None` when no file imports the target
    pub tree: Option<ReferenceTree>,
    pub scanned_files: usize,
    pub unreadable: Vec<UnreadableFile>,
}

/// ReferenceTreeBuilder service finding the direct importers of a file
///
/// Files are listed up front and then read with at most `max_concurrency`
/// reads in flight. Unreadable files are skipped and reported in the scan.
pub struct ReferenceTreeBuilder<'a, S: SourceFileReader + ?Sized> {
    reader: &'a S,
    filter: &'a SourceFilter,
    max_concurrency: usize,
}

impl<'a, S: SourceFileReader + ?Sized> ReferenceTreeBuilder<'a, S> {
    pub fn new(reader: &'a S, filter: &'a SourceFilter) -> Self {
        Self {
            reader,
            filter,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Builds the reference tree of `target_file` within `root_dir`
    ///
    /// # Arguments
    /// * `root_dir` - Absolute project root to walk
    /// * `target_file` - File whose importers are wanted; relative paths are taken from `root_dir`
    /// * `aliases` - Path aliases of the project, if any
    /// * `on_progress` - Called with `(files done, files total)` after each file
    ///
    /// # Errors
    /// Returns an error if the project root cannot be walked
    pub async fn build<F>(
        &self,
        root_dir: &Path,
        target_file: &Path,
        aliases: Option<&AliasTable>,
        on_progress: F,
    ) -> Result<ReferenceScan>
    where
        F: Fn(usize, usize),
    {
        let root_dir = normalize_path(root_dir);
        let target = normalize_path(&absolutize(target_file, &root_dir));
        let files = self.reader.list_source_files(&root_dir, self.filter)?;
        let total = files.len();

        let resolver = FilePathResolver::new(&root_dir, aliases, &self.filter.extensions);
        let mut tree = ReferenceTree::new();
        let mut unreadable = Vec::new();

        let mut reads = stream::iter(files)
            .map(|file| async move {
                let source = self.reader.read_source(&file).await;
                (file, source)
            })
            .buffer_unordered(self.max_concurrency);

        let mut done = 0;
        while let Some((file, source)) = reads.next().await {
            done += 1;
            match source {
                Ok(text) => {
                    let importer = normalize_path(&file);
                    for literal in ImportExtractor::extract(&text) {
                        let Some(resolved) = resolver.resolve(&literal, &importer) else {
                            continue;
                        };
                        if compare_paths(&resolved, &target) {
                            tree.add_reference(importer.clone(), target.clone());
                        }
                    }
                }
                Err(e) => unreadable.push(UnreadableFile {
                    path: file,
                    reason: format!("{:#}", e),
                }),
            }
            on_progress(done, total);
        }

        unreadable.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(ReferenceScan {
            target,
            tree: (!tree.is_empty()).then_some(tree),
            scanned_files: total,
            unreadable,
        })
    }
}
