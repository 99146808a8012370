//! Content factory for loading every catalog from one data directory.

use std::path::{Path, PathBuf};

use combat_core::CombatConfig;

use crate::loaders::{
    Bestiary, BestiaryLoader, ConfigLoader, HeroLoader, HeroSheet, LoadResult, LootTable,
    LootTableLoader, SpellBook, SpellBookLoader,
};

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── combat.toml
/// ├── bestiary.ron
/// ├── spells.ron
/// ├── loot.ron
/// └── heroes/
///     ├── aldric.ron
///     └── rival.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load combat configuration from `combat.toml`, falling back to defaults
    /// when the file does not exist.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("combat.toml");
        if !path.exists() {
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load monster templates from `bestiary.ron`.
    pub fn load_bestiary(&self) -> LoadResult<Bestiary> {
        BestiaryLoader::load(&self.data_dir.join("bestiary.ron"))
    }

    /// Load the spell book from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<SpellBook> {
        SpellBookLoader::load(&self.data_dir.join("spells.ron"))
    }

    /// Load the loot table from `loot.ron`.
    pub fn load_loot(&self) -> LoadResult<LootTable> {
        LootTableLoader::load(&self.data_dir.join("loot.ron"))
    }

    /// Load a hero sheet from `heroes/{name}.ron`.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the sheet (without `.ron` extension)
    pub fn load_hero(&self, name: &str) -> LoadResult<HeroSheet> {
        let path = self.data_dir.join("heroes").join(format!("{}.ron", name));
        HeroLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
