use crate::dependency_analysis::domain::manifest::DEFAULT_PROJECT_NAME;
use crate::dependency_analysis::domain::{LockedPackage, LockfileKind};
use crate::shared::Result;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Project name plus the packages recorded in a lockfile
pub type ParsedLockfile = (String, BTreeMap<String, LockedPackage>);

/// Parses lockfile text according to its kind
///
/// # Errors
/// Returns an error if the text is not a well-formed lockfile of that kind
pub fn parse_lockfile(kind: LockfileKind, content: &str) -> Result<ParsedLockfile> {
    match kind {
        LockfileKind::Npm => parse_npm(content),
        LockfileKind::Pnpm => parse_pnpm(content),
        LockfileKind::Yarn => parse_yarn(content),
    }
}

// ---------------------------------------------------------------------------
// package-lock.json
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct NpmLockfile {
    name: Option<String>,
    /// lockfileVersion 2 and 3
    #[serde(default)]
    packages: BTreeMap<String, NpmPackageEntry>,
    /// lockfileVersion 1 (also present in version 2)
    #[serde(default)]
    dependencies: BTreeMap<String, NpmLegacyEntry>,
}

#[derive(Deserialize)]
struct NpmPackageEntry {
    #[serde(default)]
    version: String,
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct NpmLegacyEntry {
    #[serde(default)]
    version: String,
    #[serde(default)]
    requires: BTreeMap<String, String>,
    #[serde(default)]
    dependencies: BTreeMap<String, NpmLegacyEntry>,
}

fn parse_npm(content: &str) -> Result<ParsedLockfile> {
    let lockfile: NpmLockfile = serde_json::from_str(content)?;
    let mut packages = BTreeMap::new();

    // "node_modules/a" beats "node_modules/b/node_modules/a": the hoisted copy is the one resolved
    let mut nesting: BTreeMap<String, usize> = BTreeMap::new();
    for (key, entry) in lockfile.packages {
        let Some(idx) = key.rfind("node_modules/") else {
            continue;
        };
        let name = key[idx + "node_modules/".len()..].to_string();
        let level = key.matches("node_modules/").count();
        if nesting.get(&name).is_some_and(|&existing| existing <= level) {
            continue;
        }
        nesting.insert(name.clone(), level);
        packages.insert(
            name,
            LockedPackage {
                version: entry.version,
                dependencies: entry.dependencies,
            },
        );
    }

    if packages.is_empty() {
        collect_legacy(&lockfile.dependencies, &mut packages);
    }

    Ok((
        lockfile
            .name
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        packages,
    ))
}

/// Flattens the nested v1 tree, keeping the shallowest record of each name
fn collect_legacy(
    entries: &BTreeMap<String, NpmLegacyEntry>,
    packages: &mut BTreeMap<String, LockedPackage>,
) {
    for (name, entry) in entries {
        packages.entry(name.clone()).or_insert_with(|| LockedPackage {
            version: entry.version.clone(),
            dependencies: entry.requires.clone(),
        });
    }
    for entry in entries.values() {
        collect_legacy(&entry.dependencies, packages);
    }
}

// ---------------------------------------------------------------------------
// pnpm-lock.yaml
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PnpmLockfile {
    name: Option<String>,
    #[serde(default)]
    packages: BTreeMap<String, Option<PnpmPackageEntry>>,
    /// lockfileVersion 9 keeps dependency edges here instead of under `packages`
    #[serde(default)]
    snapshots: BTreeMap<String, Option<PnpmPackageEntry>>,
}

#[derive(Deserialize, Default)]
struct PnpmPackageEntry {
    #[serde(default)]
    dependencies: BTreeMap<String, serde_yaml_ng::Value>,
}

fn parse_pnpm(content: &str) -> Result<ParsedLockfile> {
    let lockfile: PnpmLockfile = serde_yaml_ng::from_str(content)?;
    let mut packages = BTreeMap::new();

    for (key, entry) in lockfile.packages.into_iter().chain(lockfile.snapshots) {
        let Some((name, version)) = split_pnpm_key(&key) else {
            continue;
        };
        let dependencies: BTreeMap<String, String> = entry
            .unwrap_or_default()
            .dependencies
            .into_iter()
            .filter_map(|(dep, value)| yaml_scalar(&value).map(|v| (dep, v)))
            .collect();

        let record = packages.entry(name).or_insert_with(|| LockedPackage {
            version,
            dependencies: BTreeMap::new(),
        });
        if record.dependencies.is_empty() {
            record.dependencies = dependencies;
        }
    }

    Ok((
        lockfile
            .name
            .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        packages,
    ))
}

/// `/lodash@4.17.21`, `/lodash/4.17.21`, `/@babel/core@7.0.0(supports-color@8.1.1)`
/// and the slash-less v9 form all split into `(name, version)`
fn split_pnpm_key(key: &str) -> Option<(String, String)> {
    let key = key.strip_prefix('/').unwrap_or(key);
    let key = key.split('(').next().unwrap_or(key);

    let (name, version) = match key.rfind('@') {
        Some(at) if at > 0 => (&key[..at], &key[at + 1..]),
        _ => {
            let slash = key.rfind('/')?;
            (&key[..slash], &key[slash + 1..])
        }
    };
    if name.is_empty() || version.is_empty() {
        return None;
    }
    Some((name.to_string(), version.to_string()))
}

fn yaml_scalar(value: &serde_yaml_ng::Value) -> Option<String> {
    match value {
        serde_yaml_ng::Value::String(s) => Some(s.clone()),
        serde_yaml_ng::Value::Number(n) => Some(n.to_string()),
        serde_yaml_ng::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// yarn.lock (classic text format and berry's YAML subset)
// ---------------------------------------------------------------------------

fn parse_yarn(content: &str) -> Result<ParsedLockfile> {
    let mut packages = BTreeMap::new();
    let mut current: Vec<String> = Vec::new();
    let mut record = LockedPackage::default();
    let mut in_dependencies = false;

    for (number, raw) in content.lines().enumerate() {
        let line = raw.trim_end();
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let indent = line.len() - line.trim_start().len();
        let text = line.trim();

        if indent == 0 {
            flush_yarn_record(&mut current, &mut record, &mut packages);
            let Some(header) = text.strip_suffix(':') else {
                anyhow::bail!("line {}: expected a package header, found {:?}", number + 1, text);
            };
            current = header
                .split(", ")
                .filter_map(|spec| yarn_spec_name(unquote(spec.trim())))
                .collect();
            in_dependencies = false;
            continue;
        }

        if indent <= 2 {
            in_dependencies = text == "dependencies:";
            if let Some((key, value)) = split_yarn_entry(text) {
                if key == "version" {
                    record.version = value;
                }
            }
            continue;
        }

        if in_dependencies {
            let Some((dep, range)) = split_yarn_entry(text) else {
                anyhow::bail!("line {}: malformed dependency entry {:?}", number + 1, text);
            };
            record.dependencies.insert(dep, range);
        }
    }
    flush_yarn_record(&mut current, &mut record, &mut packages);

    Ok((DEFAULT_PROJECT_NAME.to_string(), packages))
}

fn flush_yarn_record(
    names: &mut Vec<String>,
    record: &mut LockedPackage,
    packages: &mut BTreeMap<String, LockedPackage>,
) {
    let finished = std::mem::take(record);
    for name in names.drain(..) {
        packages.entry(name).or_insert_with(|| finished.clone());
    }
}

/// `"@babel/core@^7.0.0"` → `@babel/core`, `lodash@npm:^4.17.21` → `lodash`
fn yarn_spec_name(spec: &str) -> Option<String> {
    match spec.rfind('@') {
        Some(at) if at > 0 => Some(spec[..at].to_string()),
        _ => None,
    }
}

/// `chalk "^2.0.0"`, `"@babel/x" "^7.0.0"` and `chalk: ^2.0.0` all split into key and value
fn split_yarn_entry(text: &str) -> Option<(String, String)> {
    let (key, rest) = if let Some(quoted) = text.strip_prefix('"') {
        let end = quoted.find('"')?;
        (&quoted[..end], &quoted[end + 1..])
    } else {
        let end = text.find([' ', ':'])?;
        (&text[..end], &text[end..])
    };
    let value = unquote(rest.trim_start_matches(':').trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

fn unquote(text: &str) -> &str {
    text.trim_matches('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_npm_v3_prefers_hoisted_entries() {
        let content = r#"{
  "name": "web-app",
  "lockfileVersion": 3,
  "packages": {
    "": { "name": "web-app", "dependencies": { "chalk": "^4.1.0" } },
    "node_modules/chalk": {
      "version": "4.1.2",
      "dependencies": { "ansi-styles": "^4.1.0", "supports-color": "^7.1.0" }
    },
    "node_modules/chalk/node_modules/ansi-styles": { "version": "3.2.1" },
    "node_modules/ansi-styles": { "version": "4.3.0" }
  }
}"#;
        let (name, packages) = parse_lockfile(LockfileKind::Npm, content).unwrap();

        assert_eq!(name, "web-app");
        assert_eq!(packages.len(), 2);
        assert_eq!(packages["chalk"].dependencies.len(), 2);
        assert_eq!(packages["ansi-styles"].version, "4.3.0");
    }

    #[test]
    fn test_parse_npm_v1_nested_dependencies() {
        let content = r#"{
  "lockfileVersion": 1,
  "dependencies": {
    "debug": {
      "version": "4.3.4",
      "requires": { "ms": "2.1.2" },
      "dependencies": { "ms": { "version": "2.1.2" } }
    }
  }
}"#;
        let (name, packages) = parse_lockfile(LockfileKind::Npm, content).unwrap();

        assert_eq!(name, "__root__");
        assert_eq!(packages["debug"].dependencies["ms"], "2.1.2");
        assert_eq!(packages["ms"].version, "2.1.2");
    }

    #[test]
    fn test_parse_npm_invalid_json() {
        assert!(parse_lockfile(LockfileKind::Npm, "{ not json").is_err());
    }

    #[test]
    fn test_parse_pnpm_key_styles() {
        let content = r#"
lockfileVersion: '6.0'
packages:
  /lodash@4.17.21:
    resolution: {integrity: sha512-abc}
  /@babel/core/7.24.0:
    dependencies:
      '@babel/parser': 7.24.0
      debug: 4.3.4(supports-color@8.1.1)
  /react-dom@18.2.0(react@18.2.0):
    dependencies:
      react: 18.2.0
"#;
        let (name, packages) = parse_lockfile(LockfileKind::Pnpm, content).unwrap();

        assert_eq!(name, "__root__");
        assert_eq!(packages["lodash"].version, "4.17.21");
        assert_eq!(packages["@babel/core"].version, "7.24.0");
        assert_eq!(packages["@babel/core"].dependencies["@babel/parser"], "7.24.0");
        assert_eq!(packages["react-dom"].version, "18.2.0");
        assert_eq!(packages["react-dom"].dependencies["react"], "18.2.0");
    }

    #[test]
    fn test_parse_pnpm_v9_snapshots() {
        let content = r#"
lockfileVersion: '9.0'
packages:
  chalk@4.1.2:
    resolution: {integrity: sha512-abc}
snapshots:
  chalk@4.1.2:
    dependencies:
      ansi-styles: 4.3.0
"#;
        let (_, packages) = parse_lockfile(LockfileKind::Pnpm, content).unwrap();
        assert_eq!(packages["chalk"].dependencies["ansi-styles"], "4.3.0");
    }

    #[test]
    fn test_parse_pnpm_invalid_yaml() {
        assert!(parse_lockfile(LockfileKind::Pnpm, "packages: [unterminated").is_err());
    }

    #[test]
    fn test_parse_yarn_classic() {
        let content = r#"# THIS IS AN AUTOGENERATED FILE. DO NOT EDIT THIS FILE DIRECTLY.
# yarn lockfile v1


"@babel/code-frame@^7.0.0", "@babel/code-frame@^7.10.4":
  version "7.12.13"
  resolved "https://registry.yarnpkg.com/@babel/code-frame/-/code-frame-7.12.13.tgz"
  dependencies:
    "@babel/highlight" "^7.12.13"

chalk@^2.0.0:
  version "2.4.2"
  dependencies:
    ansi-styles "^3.2.1"
    escape-string-regexp "^1.0.5"
"#;
        let (name, packages) = parse_lockfile(LockfileKind::Yarn, content).unwrap();

        assert_eq!(name, "__root__");
        assert_eq!(packages["@babel/code-frame"].version, "7.12.13");
        assert_eq!(
            packages["@babel/code-frame"].dependencies["@babel/highlight"],
            "^7.12.13"
        );
        assert_eq!(packages["chalk"].dependencies.len(), 2);
    }

    #[test]
    fn test_parse_yarn_berry() {
        let content = r#"__metadata:
  version: 8

"lodash@npm:^4.17.21":
  version: 4.17.21
  resolution: "lodash@npm:4.17.21"

"debug@npm:^4.3.4":
  version: 4.3.4
  dependencies:
    ms: "npm:2.1.2"
"#;
        let (_, packages) = parse_lockfile(LockfileKind::Yarn, content).unwrap();

        assert!(!packages.contains_key("__metadata"));
        assert_eq!(packages["lodash"].version, "4.17.21");
        assert_eq!(packages["debug"].dependencies["ms"], "npm:2.1.2");
    }

    #[test]
    fn test_parse_yarn_rejects_garbage_header() {
        assert!(parse_lockfile(LockfileKind::Yarn, "this is not a lockfile\n").is_err());
    }

    #[test]
    fn test_split_pnpm_key() {
        assert_eq!(
            split_pnpm_key("/ms/2.1.2"),
            Some(("ms".to_string(), "2.1.2".to_string()))
        );
        assert_eq!(
            split_pnpm_key("/@types/node@20.1.0"),
            Some(("@types/node".to_string(), "20.1.0".to_string()))
        );
        assert_eq!(split_pnpm_key("/"), None);
    }
}
