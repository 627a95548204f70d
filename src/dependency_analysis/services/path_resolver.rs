use crate::dependency_analysis::domain::{absolutize, normalize_path, AliasTable};
use std::path::{Path, PathBuf};

/// FilePathResolver service mapping import literals to canonical file paths
///
/// Resolution is total but lossy: anything that does not land on an existing
/// regular file yields `None` and is silently dropped by callers.
pub struct FilePathResolver<'a> {
    root_dir: &'a Path,
    aliases: Option<&'a AliasTable>,
    extensions: &'a [String],
}

impl<'a> FilePathResolver<'a> {
    /// # Arguments
    /// * `root_dir` - Absolute project root, used to anchor relative importing files
    /// * `aliases` - Alias table, or `None` for plain relative resolution
    /// * `extensions` - Extensions (without dot) tried in order for extensionless candidates
    pub fn new(root_dir: &'a Path, aliases: Option<&'a AliasTable>, extensions: &'a [String]) -> Self {
        Self {
            root_dir,
            aliases,
            extensions,
        }
    }

    /// Resolves `literal`, as written in `importing_file`, to an existing file
    ///
    /// The first alias whose prefix matches rewrites the literal; otherwise the
    /// literal is taken relative to the importing file's directory.
    pub fn resolve(&self, literal: &str, importing_file: &Path) -> Option<PathBuf> {
        let candidate = self
            .aliases
            .and_then(|table| table.rewrite(literal))
            .unwrap_or_else(|| {
                let importing_dir = importing_file.parent().unwrap_or(self.root_dir);
                importing_dir.join(literal)
            });

        self.locate(&absolutize(&candidate, self.root_dir))
    }

    /// Finds the file a candidate path refers to:
    /// the path itself when it is an existing file (`./data.json`, `./b.ts`),
    /// then `<candidate>.<ext>` for each extension, then `<candidate>/index.<ext>`.
    fn locate(&self, candidate: &Path) -> Option<PathBuf> {
        if candidate.is_file() {
            return Some(normalize_path(candidate));
        }

        let with_extension = self.extensions.iter().map(|ext| {
            let mut file = candidate.as_os_str().to_owned();
            file.push(".");
            file.push(ext);
            PathBuf::from(file)
        });
        let as_index = self
            .extensions
            .iter()
            .map(|ext| candidate.join(format!("index.{}", ext)));

        with_extension
            .chain(as_index)
            .find(|path| path.is_file())
            .map(|path| normalize_path(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ts() -> Vec<String> {
        vec!["ts".to_string()]
    }

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "export {};\n").unwrap();
        path
    }

    #[test]
    fn test_resolve_relative_import_appends_extension() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let importer = touch(root, "src/a.ts");
        let target = touch(root, "src/b.ts");

        let extensions = ts();
        let resolver = FilePathResolver::new(root, None, &extensions);
        assert_eq!(resolver.resolve("./b", &importer), Some(target));
    }

    #[test]
    fn test_resolve_parent_relative_import() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let importer = touch(root, "src/pages/home.ts");
        let target = touch(root, "src/utils/date.ts");

        let extensions = ts();
        let resolver = FilePathResolver::new(root, None, &extensions);
        assert_eq!(resolver.resolve("../utils/date", &importer), Some(target));
    }

    #[test]
    fn test_resolve_explicit_extension() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let importer = touch(root, "a.ts");
        let target = touch(root, "b.ts");

        let extensions = ts();
        let resolver = FilePathResolver::new(root, None, &extensions);
        assert_eq!(resolver.resolve("./b.ts", &importer), Some(target));
    }

    #[test]
    fn test_resolve_existing_non_source_file() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let importer = touch(root, "src/a.ts");
        let data = touch(root, "data.json");
        let styles = touch(root, "src/styles.css");

        let extensions = ts();
        let resolver = FilePathResolver::new(root, None, &extensions);
        assert_eq!(resolver.resolve("../data.json", &importer), Some(data));
        assert_eq!(resolver.resolve("./styles.css", &importer), Some(styles));
        assert_eq!(resolver.resolve("./missing.json", &importer), None);
    }

    #[test]
    fn test_resolve_dotted_basename_gets_extension_appended() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let importer = touch(root, "app.ts");
        let target = touch(root, "user.service.ts");

        let extensions = ts();
        let resolver = FilePathResolver::new(root, None, &extensions);
        assert_eq!(resolver.resolve("./user.service", &importer), Some(target));
    }

    #[test]
    fn test_resolve_directory_index() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let importer = touch(root, "main.ts");
        let target = touch(root, "components/index.ts");

        let extensions = ts();
        let resolver = FilePathResolver::new(root, None, &extensions);
        assert_eq!(resolver.resolve("./components", &importer), Some(target));
    }

    #[test]
    fn test_resolve_alias_existing_and_missing() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let importer = touch(root, "src/pages/home.ts");

        let mut aliases = AliasTable::new();
        aliases.insert("@", root.join("src"));
        let extensions = ts();
        let resolver = FilePathResolver::new(root, Some(&aliases), &extensions);

        assert_eq!(resolver.resolve("@/utils/helper", &importer), None);

        let target = touch(root, "src/utils/helper.ts");
        assert_eq!(
            resolver.resolve("@/utils/helper", &importer),
            Some(root.join("src/utils/helper.ts"))
        );
        assert_eq!(target, root.join("src/utils/helper.ts"));
    }

    #[test]
    fn test_resolve_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let importer = touch(root, "a.ts");

        let extensions = ts();
        let resolver = FilePathResolver::new(root, None, &extensions);
        assert_eq!(resolver.resolve("./nope", &importer), None);
        assert_eq!(resolver.resolve("react", &importer), None);
    }

    #[test]
    fn test_resolve_ignores_directories_without_index() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let importer = touch(root, "a.ts");
        fs::create_dir_all(root.join("empty.ts")).unwrap();

        let extensions = ts();
        let resolver = FilePathResolver::new(root, None, &extensions);
        assert_eq!(resolver.resolve("./empty.ts", &importer), None);
    }
}
