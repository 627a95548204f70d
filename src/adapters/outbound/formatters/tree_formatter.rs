use crate::dependency_analysis::domain::{
    DependencyKind, DependencyResult, PackageMap, ReferenceTree,
};
use crate::ports::outbound::ResultFormatter;
use crate::shared::Result;
use std::fmt::Write;
use std::path::Path;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// TreeFormatter adapter drawing results as an indented console tree
///
/// ```text
/// web@1.0.0
/// ├── react@^18.2.0
/// │   └── loose-envify@^1.1.0
/// └── typescript@^5.4.0 (dev)
/// ```
pub struct TreeFormatter;

impl TreeFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render_packages(output: &mut String, packages: &PackageMap, prefix: &str) {
        let count = packages.len();
        for (index, (name, node)) in packages.iter().enumerate() {
            let last = index + 1 == count;
            let marker = if node.kind == DependencyKind::DevDependency {
                " (dev)"
            } else {
                ""
            };
            let _ = writeln!(
                output,
                "{}{}{}@{}{}",
                prefix,
                if last { LAST_BRANCH } else { BRANCH },
                name,
                node.version,
                marker
            );

            let child_prefix = format!("{}{}", prefix, if last { SPACE } else { PIPE });
            Self::render_packages(output, &node.packages, &child_prefix);
        }
    }

    fn render_references(output: &mut String, tree: &ReferenceTree, prefix: &str) {
        let count = tree.len();
        for (index, (path, children)) in tree.children().enumerate() {
            let last = index + 1 == count;
            let _ = writeln!(
                output,
                "{}{}{}",
                prefix,
                if last { LAST_BRANCH } else { BRANCH },
                path.display()
            );

            let child_prefix = format!("{}{}", prefix, if last { SPACE } else { PIPE });
            Self::render_references(output, children, &child_prefix);
        }
    }
}

impl Default for TreeFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultFormatter for TreeFormatter {
    fn format_dependencies(&self, result: &DependencyResult) -> Result<String> {
        let mut output = format!("{}@{}\n", result.name, result.version);
        if result.packages.is_empty() {
            output.push_str("(no dependencies)\n");
        } else {
            Self::render_packages(&mut output, &result.packages, "");
        }
        Ok(output)
    }

    fn format_references(&self, target: &Path, tree: Option<&ReferenceTree>) -> Result<String> {
        let Some(tree) = tree else {
            return Ok(format!("No files reference {}.\n", target.display()));
        };

        let mut output = format!("The following files reference {}:\n", target.display());
        Self::render_references(&mut output, tree, "");
        Ok(output)
    }
}
