use super::lockfile_parser::parse_lockfile;
use crate::dependency_analysis::domain::{
    AliasResolution, AliasTable, LockfileInfo, LockfileKind, Manifest, PackageName, SourceFilter,
};
use crate::dependency_analysis::services::import_extractor::strip_comments;
use crate::ports::outbound::{
    AliasConfigReader, LockfileReader, ManifestReader, SourceFileReader,
};
use crate::shared::error::AnalysisError;
use crate::shared::security::{read_text_file, validate_file_size, MAX_FILE_SIZE};
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const MANIFEST_FILE: &str = "package.json";
const ALIAS_CONFIG_FILE: &str = "tsconfig.json";
const MODULES_DIR: &str = "node_modules";

/// FileSystemReader adapter for reading project files from the file system
///
/// This adapter implements the ManifestReader, LockfileReader,
/// AliasConfigReader and SourceFileReader ports. Installed packages are looked
/// up in `node_modules` directories starting at `project_dir` and walking up,
/// the same order Node uses.
pub struct FileSystemReader {
    project_dir: PathBuf,
}

impl FileSystemReader {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Finds the nearest `package.json` at or above `start_dir`
    ///
    /// Stops at the filesystem root and returns `None` there.
    pub fn find_manifest(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(MANIFEST_FILE))
            .find(|candidate| candidate.is_file())
    }

    fn parse_manifest(path: &Path, content: &str) -> Result<Manifest> {
        serde_json::from_str(content).map_err(|e| {
            AnalysisError::ManifestParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// Reads a text file asynchronously with the same checks as [`read_text_file`]
    async fn read_text_async(path: &Path, file_description: &str) -> Result<String> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }
        validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_description, e))
    }

    fn detect_lockfile(project_dir: &Path) -> Option<(LockfileKind, PathBuf)> {
        LockfileKind::ALL
            .iter()
            .map(|kind| (*kind, project_dir.join(kind.file_name())))
            .find(|(_, path)| path.is_file())
    }

    /// Path of the lockfile that [`LockfileReader::read_lockfile`] would pick
    pub fn lockfile_path(project_dir: &Path) -> Option<PathBuf> {
        Self::detect_lockfile(project_dir).map(|(_, path)| path)
    }
}

#[async_trait]
impl ManifestReader for FileSystemReader {
    async fn read_project_manifest(&self, project_dir: &Path) -> Result<Manifest> {
        let manifest_path =
            Self::find_manifest(project_dir).ok_or_else(|| AnalysisError::ManifestNotFound {
                path: project_dir.to_path_buf(),
            })?;

        let content = Self::read_text_async(&manifest_path, MANIFEST_FILE)
            .await
            .map_err(|e| AnalysisError::FileReadError {
                path: manifest_path.clone(),
                details: e.to_string(),
            })?;

        Self::parse_manifest(&manifest_path, &content)
    }

    async fn read_package_manifest(&self, name: &PackageName) -> Result<Option<Manifest>> {
        for dir in self.project_dir.ancestors() {
            let candidate = dir
                .join(MODULES_DIR)
                .join(name.as_str())
                .join(MANIFEST_FILE);

            let is_file = tokio::fs::metadata(&candidate)
                .await
                .map(|metadata| metadata.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }

            let content = Self::read_text_async(&candidate, MANIFEST_FILE).await?;
            return Self::parse_manifest(&candidate, &content).map(Some);
        }

        Ok(None)
    }
}

impl LockfileReader for FileSystemReader {
    fn read_lockfile(&self, project_dir: &Path) -> Result<Option<LockfileInfo>> {
        let Some((kind, path)) = Self::detect_lockfile(project_dir) else {
            return Ok(None);
        };

        let content = read_text_file(&path, kind.file_name()).map_err(|e| {
            AnalysisError::LockfileParseError {
                path: path.clone(),
                details: e.to_string(),
            }
        })?;
        let hash = hex::encode(Sha256::digest(content.as_bytes()));

        let (name, packages) =
            parse_lockfile(kind, &content).map_err(|e| AnalysisError::LockfileParseError {
                path: path.clone(),
                details: format!("{:#}", e),
            })?;

        Ok(Some(LockfileInfo {
            kind,
            path,
            name,
            packages,
            hash,
        }))
    }
}

impl AliasConfigReader for FileSystemReader {
    fn read_aliases(&self, root_dir: &Path) -> AliasResolution {
        let config_path = root_dir.join(ALIAS_CONFIG_FILE);
        if !config_path.exists() {
            return AliasResolution::Absent;
        }

        let content = match read_text_file(&config_path, ALIAS_CONFIG_FILE) {
            Ok(content) => content,
            Err(e) => return AliasResolution::Malformed(e.to_string()),
        };

        match parse_alias_config(root_dir, &content) {
            Ok(Some(table)) => AliasResolution::Resolved(table),
            Ok(None) => AliasResolution::Unconfigured,
            Err(e) => AliasResolution::Malformed(e.to_string()),
        }
    }
}

/// Extracts `compilerOptions.paths` / `compilerOptions.baseUrl` from tsconfig text
///
/// The text is read as JSONC (comments and trailing commas allowed), like `tsc` does.
/// Returns `Ok(None)` when the document has no `paths` section.
fn parse_alias_config(root_dir: &Path, content: &str) -> Result<Option<AliasTable>> {
    let json = strip_trailing_commas(&strip_comments(content));
    let config: serde_json::Value = serde_json::from_str(&json)?;

    let Some(options) = config.get("compilerOptions") else {
        return Ok(None);
    };
    let Some(paths) = options.get("paths") else {
        return Ok(None);
    };
    let paths = paths
        .as_object()
        .context("compilerOptions.paths must be an object")?;
    let base_url = match options.get("baseUrl") {
        None => ".",
        Some(value) => value
            .as_str()
            .context("compilerOptions.baseUrl must be a string")?,
    };

    let mut entries = Vec::with_capacity(paths.len());
    for (pattern, targets) in paths {
        let targets = targets
            .as_array()
            .and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect::<Option<Vec<String>>>()
            })
            .with_context(|| format!("targets of {:?} must be an array of strings", pattern))?;
        entries.push((pattern.clone(), targets));
    }

    Ok(Some(AliasTable::from_paths(root_dir, base_url, entries)))
}

/// Drops commas that directly precede `}` or `]`, ignoring string contents
fn strip_trailing_commas(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|next| !next.is_whitespace());
            if !matches!(next, Some('}') | Some(']')) {
                out.push(c);
            }
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}

#[async_trait]
impl SourceFileReader for FileSystemReader {
    fn list_source_files(&self, root_dir: &Path, filter: &SourceFilter) -> Result<Vec<PathBuf>> {
        let walker = WalkDir::new(root_dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !entry.file_type().is_dir()
                    || !filter.is_ignored_dir(&entry.file_name().to_string_lossy())
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(AnalysisError::InvalidProjectPath {
                        path: root_dir.to_path_buf(),
                        reason: e.to_string(),
                    }
                    .into());
                }
                // unreadable subdirectories are skipped
                Err(_) => continue,
            };

            if entry.file_type().is_file() && filter.is_source_file(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    async fn read_source(&self, path: &Path) -> Result<String> {
        Self::read_text_async(path, "source file")
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}
