use super::normalize_path;
use std::path::{Path, PathBuf};

/// One configured path alias, wildcard already stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub prefix: String,
    pub target: PathBuf,
}

/// Ordered prefix → absolute directory mapping built from `compilerOptions.paths`
///
/// Entries keep the order in which they appear in the configuration; lookups
/// take the first matching entry, not the most specific one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from `paths` entries (`"@components/*" -> ["src/components/*", ...]`).
    ///
    /// Only the first target of each pattern is used; patterns with no targets
    /// are skipped. Targets are resolved against `root_dir` joined with `base_url`.
    pub fn from_paths<I>(root_dir: &Path, base_url: &str, paths: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let base = root_dir.join(base_url);
        let entries = paths
            .into_iter()
            .filter_map(|(pattern, targets)| {
                let first = targets.into_iter().next()?;
                Some(AliasEntry {
                    prefix: strip_wildcard(&pattern).to_string(),
                    target: normalize_path(&base.join(strip_wildcard(&first))),
                })
            })
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, prefix: impl Into<String>, target: impl Into<PathBuf>) {
        self.entries.push(AliasEntry {
            prefix: prefix.into(),
            target: target.into(),
        });
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rewrites an import literal whose leading segment is an alias prefix.
    ///
    /// `"@/utils/helper"` with `@ -> /p/src` becomes `/p/src/utils/helper`.
    /// The prefix must end at a path separator (or be the whole literal), so an
    /// `@` alias never captures `@scope/pkg`-style bare imports.
    pub fn rewrite(&self, literal: &str) -> Option<PathBuf> {
        self.entries.iter().find_map(|entry| {
            let rest = literal.strip_prefix(entry.prefix.as_str())?;
            let suffix = if rest.is_empty() {
                ""
            } else if entry.prefix.is_empty() {
                // a bare "*" pattern never captures relative imports
                if rest.starts_with('.') {
                    return None;
                }
                rest
            } else if entry.prefix.ends_with('/') {
                rest
            } else {
                rest.strip_prefix('/')?
            };
            Some(if suffix.is_empty() {
                entry.target.clone()
            } else {
                entry.target.join(suffix)
            })
        })
    }
}

/// `"@components/*"` → `"@components"`, `"src/*"` → `"src"`, `"*"` → `""`
fn strip_wildcard(pattern: &str) -> &str {
    pattern
        .strip_suffix("/*")
        .or_else(|| pattern.strip_suffix('*'))
        .unwrap_or(pattern)
}

/// Result of loading alias configuration for a project root
///
/// Every variant other than `Resolved` means "no aliases": import resolution
/// falls back to plain relative paths. The variants only differ in how the
/// caller should report the situation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasResolution {
    /// No configuration file in the root directory
    Absent,
    /// The configuration file exists but could not be parsed
    Malformed(String),
    /// The configuration parsed but defines no `compilerOptions.paths`
    Unconfigured,
    Resolved(AliasTable),
}

impl AliasResolution {
    pub fn table(&self) -> Option<&AliasTable> {
        match self {
            AliasResolution::Resolved(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<AliasTable> {
        match self {
            AliasResolution::Resolved(table) => Some(table),
            _ => None,
        }
    }
}
