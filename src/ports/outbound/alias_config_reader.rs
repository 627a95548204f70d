use crate::dependency_analysis::domain::AliasResolution;
use std::path::Path;

/// AliasConfigReader port for loading path aliases (`tsconfig.json` `compilerOptions.paths`)
pub trait AliasConfigReader {
    /// Loads the alias table for `root_dir`
    ///
    /// Never fails: a missing or broken configuration is reported through the
    /// returned [`AliasResolution`] variant and means "no aliases".
    fn read_aliases(&self, root_dir: &Path) -> AliasResolution;
}
