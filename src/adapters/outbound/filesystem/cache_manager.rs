use super::FileSystemReader;
use crate::dependency_analysis::domain::DependencyResult;
use crate::ports::outbound::AnalysisCache;
use crate::shared::error::AnalysisError;
use crate::shared::security::{read_text_file, validate_not_symlink};
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Directory (relative to the working directory) holding the cache file
pub const CACHE_DIR_NAME: &str = ".cache";

pub const CACHE_FILE_NAME: &str = "dependency-cache.json";

/// One cached analysis of a project directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Freshness stamp, see [`modification_stamp`]
    pub mtime: u64,
    pub dependencies: DependencyResult,
    pub depth: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// CacheManager adapter persisting dependency analyses in a single JSON file
///
/// The whole document is loaded by [`CacheManager::open`] and rewritten on
/// every update. Two processes sharing one cache file race: the last writer wins.
#[derive(Debug)]
pub struct CacheManager {
    path: PathBuf,
    entries: BTreeMap<String, CacheEntry>,
}

impl CacheManager {
    /// Loads the cache file at `path`
    ///
    /// A missing file yields an empty cache.
    ///
    /// # Errors
    /// Returns [`AnalysisError::CacheError`] if the file exists but is not a valid cache document
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let entries = read_text_file(&path, CACHE_FILE_NAME)
            .and_then(|content| Ok(serde_json::from_str(&content)?))
            .map_err(|e| AnalysisError::CacheError {
                path: path.clone(),
                details: e.to_string(),
            })?;

        Ok(Self { path, entries })
    }

    /// `<base_dir>/.cache/dependency-cache.json`
    pub fn default_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CACHE_DIR_NAME).join(CACHE_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, project_dir: &Path) -> Option<&CacheEntry> {
        self.entries.get(&Self::key(project_dir))
    }

    /// Writes the whole cache document, creating the cache directory if needed
    ///
    /// The document goes to a sibling temp file that is then renamed over the
    /// cache file, so readers see either the previous document or the new one.
    ///
    /// # Errors
    /// Returns [`AnalysisError::CacheWriteError`] on any filesystem failure
    pub fn flush(&self) -> Result<()> {
        let write_error = |details: String| AnalysisError::CacheWriteError {
            path: self.path.clone(),
            details,
        };

        self.create_cache_dir()?;
        if self.path.exists() {
            validate_not_symlink(&self.path, "cache write").map_err(|e| write_error(e.to_string()))?;
        }

        let document =
            serde_json::to_string_pretty(&self.entries).map_err(|e| write_error(e.to_string()))?;

        let temp_path = self.temp_path();
        if let Err(e) = write_synced(&temp_path, document.as_bytes()) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_error(e.to_string()).into());
        }
        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            write_error(e.to_string())
        })?;

        Ok(())
    }

    /// `dependency-cache.json` -> `dependency-cache.json.tmp`
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(CACHE_FILE_NAME));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn create_cache_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| AnalysisError::CacheWriteError {
                    path: self.path.clone(),
                    details: e.to_string(),
                })?;
            }
        }
        Ok(())
    }

    fn key(project_dir: &Path) -> String {
        project_dir.to_string_lossy().into_owned()
    }
}

fn write_synced(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content)?;
    file.sync_all()
}

impl AnalysisCache for CacheManager {
    fn is_up_to_date(&self, project_dir: &Path, depth: usize, hash: Option<&str>) -> Result<bool> {
        let Some(entry) = self.entry(project_dir) else {
            return Ok(false);
        };

        if entry.depth != depth {
            return Ok(false);
        }
        if let Some(current) = hash {
            if entry.hash.as_deref() != Some(current) {
                return Ok(false);
            }
        }

        Ok(entry.mtime == modification_stamp(project_dir)?)
    }

    fn get_dependencies(&self, project_dir: &Path) -> Option<DependencyResult> {
        self.entry(project_dir).map(|entry| entry.dependencies.clone())
    }

    fn update_cache(
        &mut self,
        project_dir: &Path,
        result: &DependencyResult,
        depth: usize,
        hash: Option<&str>,
    ) -> Result<()> {
        // creating `.cache` inside the project bumps the directory mtime, so it must precede the stamp
        self.create_cache_dir()?;
        let mtime = modification_stamp(project_dir)?;
        self.entries.insert(
            Self::key(project_dir),
            CacheEntry {
                mtime,
                dependencies: result.clone(),
                depth,
                hash: hash.map(str::to_string),
            },
        );
        self.flush()
    }
}

/// Newest modification time, in nanoseconds since the epoch, among
/// `project_dir`, the `package.json` governing it (possibly in an ancestor)
/// and its lockfile
///
/// # Errors
/// Returns an error if `project_dir` itself cannot be stat'ed
pub fn modification_stamp(project_dir: &Path) -> Result<u64> {
    let dir_time = fs::metadata(project_dir)
        .and_then(|metadata| metadata.modified())
        .map_err(|e| AnalysisError::InvalidProjectPath {
            path: project_dir.to_path_buf(),
            reason: format!("cannot read modification time: {}", e),
        })?;

    let newest = [
        FileSystemReader::find_manifest(project_dir),
        FileSystemReader::lockfile_path(project_dir),
    ]
        .into_iter()
        .flatten()
        .filter_map(|path| fs::metadata(path).and_then(|m| m.modified()).ok())
        .fold(dir_time, SystemTime::max);

    Ok(newest
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0))
}
