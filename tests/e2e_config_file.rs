/// End-to-end tests for config file loading and CLI option merging.
///
/// These tests exercise the full flow from config file on disk through CLI invocation
/// to correct output, using `assert_cmd` and `tempfile` for isolated test environments.
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ============================================================================
// Helper Functions
// ============================================================================

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Create a Node project: app -> express -> accepts
fn create_test_project(dir: &Path) {
    write(
        dir,
        "package.json",
        r#"{"name":"app","version":"0.1.0","dependencies":{"express":"^4.18.0"}}"#,
    );
    write(
        dir,
        "node_modules/express/package.json",
        r#"{"name":"express","version":"4.18.2","dependencies":{"accepts":"~1.3.8"}}"#,
    );
    write(
        dir,
        "node_modules/accepts/package.json",
        r#"{"name":"accepts","version":"1.3.8"}"#,
    );
}

/// Write a config file at the specified path.
fn write_config(path: &Path, content: &str) {
    fs::write(path, content).unwrap();
}

// ============================================================================
// Config File Auto-Discovery Tests
// ============================================================================

mod auto_discovery_tests {
    use super::*;

    #[test]
    fn test_auto_discovery_applies_depth() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(&dir.path().join("depscope.config.yml"), "depth: 2\n");

        cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .args(["deps", "--no-cache"])
            .assert()
            .success()
            .stdout(predicate::str::contains("accepts@~1.3.8"))
            .stderr(predicate::str::contains("Auto-discovered config file"));
    }

    #[test]
    fn test_auto_discovery_applies_format() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(&dir.path().join("depscope.config.yml"), "format: json\n");

        let output = cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .args(["deps", "--no-cache"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["name"], "app");
    }

    #[test]
    fn test_auto_discovery_disables_cache() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(&dir.path().join("depscope.config.yml"), "cache: false\n");

        cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .arg("deps")
            .assert()
            .success();

        assert!(!dir.path().join(".cache").exists());
    }

    #[test]
    fn test_no_config_file_runs_normally() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());

        cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .args(["deps", "--no-cache"])
            .assert()
            .success()
            .stdout(predicate::str::contains("└── express@^4.18.0"))
            .stderr(predicate::str::contains("config file").not());
    }
}

// ============================================================================
// Explicit Config Path (`--config`) Tests
// ============================================================================

mod explicit_config_tests {
    use super::*;

    #[test]
    fn test_explicit_config_path_loads_successfully() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        let config_path = dir.path().join("custom-config.yml");
        write_config(&config_path, "depth: 2\n");

        cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .args(["deps", "--no-cache", "--config", config_path.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("accepts"))
            .stderr(predicate::str::contains("Loaded config from:"));
    }

    #[test]
    fn test_explicit_config_nonexistent_file_error() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());

        cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .args(["deps", "-c", "nonexistent-config.yml"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to read config file"));
    }
}

// ============================================================================
// CLI + Config Merge Tests
// ============================================================================

mod merge_tests {
    use super::*;

    #[test]
    fn test_cli_depth_overrides_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(&dir.path().join("depscope.config.yml"), "depth: 2\n");

        cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .args(["deps", "--no-cache", "-d", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("accepts").not());
    }

    #[test]
    fn test_cli_format_overrides_config() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(&dir.path().join("depscope.config.yml"), "format: json\n");

        cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .args(["deps", "--no-cache", "-f", "tree"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("app@0.1.0"));
    }

    #[test]
    fn test_config_extensions_apply_to_refs() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "src/button.tsx", "export const Button = 1;\n");
        write(dir.path(), "src/page.tsx", "import { Button } from './button';\n");
        write(dir.path(), "src/legacy.ts", "import { Button } from './button';\n");
        write_config(
            &dir.path().join("depscope.config.yml"),
            "extensions:\n  - tsx\n",
        );

        cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .args(["refs", "src/button"])
            .assert()
            .success()
            .stdout(predicate::str::contains("page.tsx"))
            .stdout(predicate::str::contains("legacy.ts").not());
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_zero_depth_in_config_is_rejected() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(&dir.path().join("depscope.config.yml"), "depth: 0\n");

        cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .arg("deps")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("depth must be at least 1"));
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("depscope.config.yml"),
            "depth: [[[broken",
        );

        cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .arg("deps")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to parse config file"));
    }

    #[test]
    fn test_unknown_fields_warn_but_succeed() {
        let dir = TempDir::new().unwrap();
        create_test_project(dir.path());
        write_config(
            &dir.path().join("depscope.config.yml"),
            "depth: 1\nexclude_packages: [lodash]\n",
        );

        cargo_bin_cmd!("depscope")
            .current_dir(dir.path())
            .args(["deps", "--no-cache"])
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "Unknown config field 'exclude_packages' will be ignored",
            ));
    }
}
