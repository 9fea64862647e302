//! Content factory for loading a whole data directory.

use std::path::{Path, PathBuf};

use hunt_core::RulesConfig;

use crate::builtin;
use crate::loaders::{
    ConfigLoader, LoadResult, MonsterCatalog, MonsterLoader, WeaponCatalog, WeaponLoader,
};

/// Content factory that loads game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── rules.toml
/// ├── monsters.ron
/// └── weapons.ron
/// ```
///
/// Files missing from the directory fall back to the built-in data.
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Factory serving only the built-in data.
    pub fn builtin() -> Self {
        Self { data_dir: None }
    }

    pub fn load_config(&self) -> LoadResult<RulesConfig> {
        match self.existing("rules.toml") {
            Some(path) => ConfigLoader::load(&path),
            None => ConfigLoader::parse(builtin::RULES),
        }
    }

    pub fn load_monsters(&self) -> LoadResult<MonsterCatalog> {
        match self.existing("monsters.ron") {
            Some(path) => MonsterLoader::load_catalog(&path),
            None => MonsterLoader::parse(builtin::MONSTERS),
        }
    }

    pub fn load_weapons(&self) -> LoadResult<WeaponCatalog> {
        match self.existing("weapons.ron") {
            Some(path) => WeaponLoader::load(&path),
            None => WeaponLoader::parse(builtin::WEAPONS),
        }
    }

    fn existing(&self, file: &str) -> Option<PathBuf> {
        let path = self.data_dir.as_deref().map(|dir: &Path| dir.join(file))?;
        if path.is_file() {
            Some(path)
        } else {
            tracing::debug!(path = %path.display(), "data file missing, using built-in");
            None
        }
    }
}
