use crate::shared::Result;

/// Maximum length for package names (npm registry limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 214;

/// NewType wrapper for an npm package name with validation
///
/// Names are used to build filesystem paths under `node_modules`, so anything
/// that could escape that directory is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        if !name.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || c == '-'
                || c == '_'
                || c == '.'
                || c == '~'
                || c == '@'
                || c == '/'
        }) {
            anyhow::bail!(
                "Package name '{}' contains invalid characters. Only alphanumerics, '-', '_', '.', '~', '@' and '/' are allowed.",
                name
            );
        }

        // "@scope/name" is the only shape allowed to contain a slash
        let segments: Vec<&str> = name.split('/').collect();
        let well_formed = match segments.as_slice() {
            [single] => !single.starts_with('@') && !single.starts_with('.'),
            [scope, pkg] => {
                scope.len() > 1 && scope.starts_with('@') && !pkg.is_empty() && !pkg.starts_with('.')
            }
            _ => false,
        };
        if !well_formed {
            anyhow::bail!(
                "Package name '{}' is not a valid npm package name",
                name
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Scope of a scoped package (`@types` for `@types/node`)
    pub fn scope(&self) -> Option<&str> {
        self.0
            .split_once('/')
            .map(|(scope, _)| scope)
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_name_new_valid() {
        let name = PackageName::new("lodash".to_string()).unwrap();
        assert_eq!(name.as_str(), "lodash");
        assert_eq!(name.scope(), None);
    }

    #[test]
    fn test_package_name_scoped() {
        let name = PackageName::new("@types/node".to_string()).unwrap();
        assert_eq!(name.as_str(), "@types/node");
        assert_eq!(name.scope(), Some("@types"));
    }

    #[test]
    fn test_package_name_new_empty() {
        assert!(PackageName::new("".to_string()).is_err());
    }

    #[test]
    fn test_package_name_rejects_traversal() {
        assert!(PackageName::new("../etc".to_string()).is_err());
        assert!(PackageName::new("@scope/../../x".to_string()).is_err());
        assert!(PackageName::new("a/b".to_string()).is_err());
        assert!(PackageName::new(".hidden".to_string()).is_err());
    }

    #[test]
    fn test_package_name_rejects_invalid_characters() {
        let result = PackageName::new("bad name".to_string());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("invalid characters"));
    }

    #[test]
    fn test_package_name_too_long() {
        let result = PackageName::new("a".repeat(MAX_PACKAGE_NAME_LENGTH + 1));
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_package_name_display() {
        let name = PackageName::new("react-dom".to_string()).unwrap();
        assert_eq!(format!("{}", name), "react-dom");
    }
}
