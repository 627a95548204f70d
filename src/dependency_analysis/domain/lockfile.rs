use super::Manifest;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Supported package-manager lockfiles, in probe order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockfileKind {
    Npm,
    Pnpm,
    Yarn,
}

impl LockfileKind {
    pub const ALL: [LockfileKind; 3] = [LockfileKind::Npm, LockfileKind::Pnpm, LockfileKind::Yarn];

    pub fn file_name(self) -> &'static str {
        match self {
            LockfileKind::Npm => "package-lock.json",
            LockfileKind::Pnpm => "pnpm-lock.yaml",
            LockfileKind::Yarn => "yarn.lock",
        }
    }
}

impl std::fmt::Display for LockfileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// A resolved package recorded in a lockfile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockedPackage {
    pub version: String,
    pub dependencies: BTreeMap<String, String>,
}

impl LockedPackage {
    /// Manifest equivalent of this record; lockfiles carry no devDependencies
    pub fn to_manifest(&self, name: &str) -> Manifest {
        let mut manifest = Manifest::new(name, self.version.as_str());
        manifest.dependencies = self.dependencies.clone();
        manifest
    }
}

/// Parsed lockfile plus the SHA-256 of its raw bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockfileInfo {
    pub kind: LockfileKind,
    pub path: PathBuf,
    pub name: String,
    pub packages: BTreeMap<String, LockedPackage>,
    /// Lowercase hex digest
    pub hash: String,
}

impl LockfileInfo {
    pub fn package(&self, name: &str) -> Option<&LockedPackage> {
        self.packages.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_order_and_file_names() {
        let names: Vec<&str> = LockfileKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(names, vec!["package-lock.json", "pnpm-lock.yaml", "yarn.lock"]);
        assert_eq!(LockfileKind::Pnpm.to_string(), "pnpm-lock.yaml");
    }

    #[test]
    fn test_locked_package_to_manifest() {
        let locked = LockedPackage {
            version: "4.1.2".to_string(),
            dependencies: BTreeMap::from([("ansi-styles".to_string(), "^4.1.0".to_string())]),
        };

        let manifest = locked.to_manifest("chalk");

        assert_eq!(manifest.name, "chalk");
        assert_eq!(manifest.version, "4.1.2");
        assert_eq!(manifest.dependencies["ansi-styles"], "^4.1.0");
        assert!(manifest.dev_dependencies.is_empty());
    }
}
