//! Monster catalog loader.

use std::path::Path;

use combat_core::{Combatant, CombatantKind};

use crate::loaders::{LoadResult, read_file};
use crate::template::CombatantTemplate;

/// Monster templates keyed by a short identifier (`"goblin"`, `"bat"`).
#[derive(Clone, Debug, Default)]
pub struct Bestiary {
    entries: Vec<(String, CombatantTemplate)>,
}

impl Bestiary {
    pub fn new(entries: Vec<(String, CombatantTemplate)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn template(&self, key: &str) -> Option<&CombatantTemplate> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, template)| template)
    }

    /// Spawns a fresh monster from the template registered under `key`.
    pub fn spawn(&self, key: &str) -> Option<Combatant> {
        self.template(key)
            .map(|template| template.build(CombatantKind::Monster, key))
    }

    /// Spawns one monster per key, failing on the first unknown key.
    pub fn spawn_group<'k>(
        &self,
        keys: impl IntoIterator<Item = &'k str>,
    ) -> LoadResult<Vec<Combatant>> {
        keys.into_iter()
            .map(|key| {
                self.spawn(key)
                    .ok_or_else(|| anyhow::anyhow!("Unknown monster '{}' in bestiary", key))
            })
            .collect()
    }
}

/// Loader for the bestiary from RON files.
pub struct BestiaryLoader;

impl BestiaryLoader {
    /// Load monster templates from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a RON file holding `[(key, CombatantTemplate), ...]`
    ///
    /// # Returns
    ///
    /// Returns a [`Bestiary`]. Duplicate keys are rejected.
    pub fn load(path: &Path) -> LoadResult<Bestiary> {
        let content = read_file(path)?;
        let entries: Vec<(String, CombatantTemplate)> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse bestiary RON: {}", e))?;

        for (i, (key, _)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|(k, _)| k.eq_ignore_ascii_case(key)) {
                anyhow::bail!("Duplicate monster '{}' in {}", key, path.display());
            }
        }

        Ok(Bestiary::new(entries))
    }
}
