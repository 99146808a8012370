//! Content loaders for reading combat data from files.
//!
//! Each loader is a unit struct with a `load(path)` function; RON is used for
//! catalogs and TOML for the balance configuration.

pub mod bestiary;
pub mod config;
pub mod factory;
pub mod heroes;
pub mod loot;
pub mod spells;

pub use bestiary::{Bestiary, BestiaryLoader};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use heroes::{HeroLoader, HeroSheet};
pub use loot::{LootEntry, LootTable, LootTableLoader};
pub use spells::{SpellBook, SpellBookLoader, SpellEntry};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Write;

    use tempfile::NamedTempFile;

    /// Writes `content` to a temporary file that lives as long as the handle.
    pub fn write_temp(content: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(content.as_bytes()).expect("write temp file");
        file
    }
}
