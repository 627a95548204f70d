use crate::dependency_analysis::domain::{DependencyResult, ReferenceTree};
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct ReferenceDocument<'a> {
    target: &'a Path,
    references: Option<&'a ReferenceTree>,
}

/// JsonFormatter adapter rendering results as pretty-printed JSON (2-space indent)
///
/// A dependency result is written in the same shape the cache stores it in.
/// A reference scan becomes `{"target": ..., "references": <tree or null>}`.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for JsonFormatter {
    fn format_dependencies(&self, result: &DependencyResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(result)?)
    }

    fn format_references(&self, target: &Path, tree: Option<&ReferenceTree>) -> Result<String> {
        let document = ReferenceDocument {
            target,
            references: tree,
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_analysis::domain::{DependencyKind, PackageMap, PackageNode};
    use std::path::PathBuf;
    use std::sync::Arc;

    #[test]
    fn test_format_dependencies_nested_packages() {
        let mut inner = PackageMap::new();
        inner.insert(
            "loose-envify".to_string(),
            PackageNode::leaf("^1.1.0", DependencyKind::Dependency),
        );
        let mut packages = PackageMap::new();
        packages.insert(
            "react".to_string(),
            PackageNode::new("^18.2.0", DependencyKind::Dependency, Arc::new(inner)),
        );
        let result = DependencyResult::new("web", "1.0.0", packages);

        let output = JsonFormatter::new().format_dependencies(&result).unwrap();

        assert!(output.starts_with("{\n  \"name\": \"web\""));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value["packages"]["react"]["packages"]["loose-envify"]["version"],
            "^1.1.0"
        );
    }

    #[test]
    fn test_format_references_with_and_without_importers() {
        let formatter = JsonFormatter::new();
        let target = PathBuf::from("/p/src/b.ts");

        let empty = formatter.format_references(&target, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&empty).unwrap();
        assert_eq!(value["target"], "/p/src/b.ts");
        assert!(value["references"].is_null());

        let mut tree = ReferenceTree::new();
        tree.add_reference(PathBuf::from("/p/src/a.ts"), target.clone());
        let output = formatter.format_references(&target, Some(&tree)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert!(value["references"]["/p/src/a.ts"]["/p/src/b.ts"]
            .as_object()
            .unwrap()
            .is_empty());
    }
}
