//! Configuration file support for depscope.
//!
//! Provides YAML-based configuration through `depscope.config.yml` files,
//! including data structures, file loading, validation and the merge of
//! command-line flags, file values and built-in defaults.

use anyhow::{anyhow, bail, Context};
use depscope::adapters::outbound::filesystem::{CacheManager, CACHE_FILE_NAME};
use depscope::application::dto::OutputFormat;
use depscope::dependency_analysis::domain::SourceFilter;
use depscope::dependency_analysis::services::DEFAULT_MAX_CONCURRENCY;
use depscope::ports::outbound::ProgressReporter;
use depscope::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::{DepsArgs, RefsArgs};

const CONFIG_FILENAME: &str = "depscope.config.yml";

const DEFAULT_DEPTH: usize = 1;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub depth: Option<usize>,
    pub format: Option<String>,
    pub cache: Option<bool>,
    pub cache_dir: Option<PathBuf>,
    pub hash_lockfile: Option<bool>,
    pub extensions: Option<Vec<String>>,
    pub ignore_dirs: Option<Vec<String>>,
    pub max_concurrency: Option<usize>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    // an empty document deserializes to null
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Loads `explicit` when given, otherwise looks for a config file in `dir`
///
/// Reports which file was used and warns about unknown fields.
pub fn load_config(
    explicit: Option<&Path>,
    dir: &Path,
    reporter: &impl ProgressReporter,
) -> Result<ConfigFile> {
    let config = match explicit {
        Some(path) => {
            let config = load_config_from_path(path)?;
            reporter.report(&format!("📄 Loaded config from: {}", path.display()));
            config
        }
        None => match discover_config(dir)? {
            Some(config) => {
                reporter.report(&format!(
                    "📄 Auto-discovered config file: {}",
                    dir.join(CONFIG_FILENAME).display()
                ));
                config
            }
            None => ConfigFile::default(),
        },
    };

    warn_unknown_fields(&config, reporter);
    Ok(config)
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.depth == Some(0) {
        bail!(
            "Invalid config: depth must be at least 1.\n\n\
             💡 Hint: Use depth: 1 to list direct dependencies only."
        );
    }

    if let Some(ref format) = config.format {
        format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow!("Invalid config: {}", e))?;
    }

    if let Some(ref extensions) = config.extensions {
        for (i, ext) in extensions.iter().enumerate() {
            if ext.trim().trim_start_matches('.').is_empty() {
                bail!(
                    "Invalid config: extensions[{}] must not be empty.\n\n\
                     💡 Hint: List extensions without a wildcard (e.g., \"ts\" or \".tsx\").",
                    i
                );
            }
        }
    }

    if config.max_concurrency == Some(0) {
        bail!("Invalid config: max_concurrency must be at least 1.");
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile, reporter: &impl ProgressReporter) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        reporter.report_error(&format!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        ));
    }
}

/// Effective options of the `deps` command
#[derive(Debug, Clone, PartialEq)]
pub struct DepsSettings {
    pub depth: usize,
    pub format: OutputFormat,
    pub use_cache: bool,
    pub hash_lockfile: bool,
    pub cache_path: PathBuf,
}

impl DepsSettings {
    /// Merges flags over config values over defaults; a relative cache
    /// directory is taken from `cwd`
    pub fn resolve(args: &DepsArgs, config: &ConfigFile, cwd: &Path) -> Result<Self> {
        let format = resolve_format(args.format, config)?;
        let cache_dir = args
            .cache_dir
            .clone()
            .or_else(|| config.cache_dir.clone())
            .map(|dir| cwd.join(dir));
        let cache_path = match cache_dir {
            Some(dir) => dir.join(CACHE_FILE_NAME),
            None => CacheManager::default_path(cwd),
        };

        Ok(Self {
            depth: args.depth.or(config.depth).unwrap_or(DEFAULT_DEPTH),
            format,
            use_cache: !args.no_cache && config.cache.unwrap_or(true),
            hash_lockfile: !args.no_hash && config.hash_lockfile.unwrap_or(true),
            cache_path,
        })
    }
}

/// Effective options of the `refs` command
#[derive(Debug, Clone, PartialEq)]
pub struct RefsSettings {
    pub format: OutputFormat,
    pub filter: SourceFilter,
    pub max_concurrency: usize,
}

impl RefsSettings {
    pub fn resolve(args: &RefsArgs, config: &ConfigFile) -> Result<Self> {
        let defaults = SourceFilter::default();
        let filter = SourceFilter::new(
            config.extensions.clone().unwrap_or(defaults.extensions),
            config.ignore_dirs.clone().unwrap_or(defaults.ignore_dirs),
        );

        Ok(Self {
            format: resolve_format(args.format, config)?,
            filter,
            max_concurrency: config.max_concurrency.unwrap_or(DEFAULT_MAX_CONCURRENCY),
        })
    }
}

fn resolve_format(flag: Option<OutputFormat>, config: &ConfigFile) -> Result<OutputFormat> {
    if let Some(format) = flag {
        return Ok(format);
    }
    match config.format {
        Some(ref format) => format.parse().map_err(|e: String| anyhow!(e)),
        None => Ok(OutputFormat::default()),
    }
}
