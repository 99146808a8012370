//! Hero sheet loader: the player and the teammates travelling with them.

use std::path::Path;

use combat_core::{Combatant, CombatantKind};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};
use crate::template::CombatantTemplate;

/// Player character plus optional party members.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSheet {
    pub name: String,
    pub hero: CombatantTemplate,
    #[serde(default)]
    pub teammates: Vec<(String, CombatantTemplate)>,
}

impl HeroSheet {
    pub fn player(&self) -> Combatant {
        self.hero.build(CombatantKind::Player, &self.name)
    }

    /// Builds an opponent for player-versus-player duels from this sheet.
    pub fn opponent(&self) -> Combatant {
        self.hero.build(CombatantKind::OpposingPlayer, &self.name)
    }

    pub fn party(&self) -> Vec<Combatant> {
        self.teammates
            .iter()
            .map(|(name, template)| template.build(CombatantKind::Teammate, name))
            .collect()
    }
}

/// Loader for hero sheets from RON files.
pub struct HeroLoader;

impl HeroLoader {
    /// Load a hero sheet from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a HeroSheet
    pub fn load(path: &Path) -> LoadResult<HeroSheet> {
        let content = read_file(path)?;
        let sheet: HeroSheet = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse hero sheet RON: {}", e))?;

        if sheet.name.trim().is_empty() {
            anyhow::bail!("Hero sheet {} has an empty name", path.display());
        }
        Ok(sheet)
    }
}
