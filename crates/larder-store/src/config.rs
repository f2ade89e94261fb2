use std::env;
use std::path::{Path, PathBuf};

/// Store configuration: where the recipe catalog lives.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the JSON recipe catalog.
    pub recipes_path: PathBuf,
}

impl StoreConfig {
    /// Catalog path used when nothing else is configured.
    pub const DEFAULT_RECIPES_PATH: &str = "data/recipes.json";

    /// Environment variable that overrides the catalog path.
    pub const RECIPES_PATH_ENV: &str = "LARDER_RECIPES_PATH";

    /// Catalog path from `LARDER_RECIPES_PATH`, if set and non-empty.
    pub fn recipes_path_from_env() -> Option<PathBuf> {
        env::var_os(Self::RECIPES_PATH_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    /// Build a config from an explicit path (useful for tests and CLI flags).
    pub fn new(recipes_path: impl Into<PathBuf>) -> Self {
        Self {
            recipes_path: recipes_path.into(),
        }
    }

    pub fn recipes_path(&self) -> &Path {
        &self.recipes_path
    }
}
