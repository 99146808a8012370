//! Loot table loader and the [`LootOracle`] it backs.

use std::path::Path;

use combat_core::{Combatant, CombatRng, LootOffer, LootOracle, LootSlot};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// An item that may drop from monsters within a level band.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item: String,
    pub slot: LootSlot,
    pub power: i32,
    #[serde(default)]
    pub power_variance: i32,
    #[serde(default)]
    pub min_level: u32,
    #[serde(default = "LootEntry::any_level")]
    pub max_level: u32,
}

impl LootEntry {
    fn any_level() -> u32 {
        u32::MAX
    }

    fn drops_from(&self, level: u32) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }
}

/// Drop table consulted once per defeated monster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootTable {
    /// Chance (percent) that a defeated monster drops anything.
    pub drop_chance: u32,
    pub entries: Vec<LootEntry>,
}

impl LootTable {
    pub fn eligible(&self, level: u32) -> impl Iterator<Item = &LootEntry> {
        self.entries.iter().filter(move |entry| entry.drops_from(level))
    }
}

impl LootOracle for LootTable {
    fn loot_for(&self, monster: &Combatant, rng: &mut dyn CombatRng) -> Option<LootOffer> {
        if !rng.chance(self.drop_chance) {
            return None;
        }
        let eligible: Vec<&LootEntry> = self.eligible(monster.level).collect();
        if eligible.is_empty() {
            return None;
        }
        let entry = eligible[rng.pick(eligible.len())];
        Some(LootOffer {
            item: entry.item.clone(),
            slot: entry.slot,
            power: entry.power.max(0) + rng.uniform_int(0, entry.power_variance.max(0)),
        })
    }
}

/// Loader for loot tables from RON files.
pub struct LootTableLoader;

impl LootTableLoader {
    /// Load a loot table from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing a LootTable
    pub fn load(path: &Path) -> LoadResult<LootTable> {
        let content = read_file(path)?;
        let table: LootTable = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse loot table RON: {}", e))?;

        if let Some(bad) = table.entries.iter().find(|e| e.min_level > e.max_level) {
            anyhow::bail!(
                "Loot entry '{}' has min_level {} above max_level {}",
                bad.item,
                bad.min_level,
                bad.max_level
            );
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use combat_core::SequenceRng;

    use super::*;
    use crate::loaders::test_support::write_temp;

    fn table() -> LootTable {
        let file = write_temp(
            r#"(
                drop_chance: 40,
                entries: [
                    (item: "Rusty Sword", slot: Weapon, power: 3, max_level: 3),
                    (item: "Chain Mail", slot: Armor, power: 5, power_variance: 2, min_level: 2),
                ],
            )"#,
            ".ron",
        );
        LootTableLoader::load(file.path()).unwrap()
    }

    #[test]
    fn failed_drop_roll_offers_nothing() {
        let table = table();
        let rat = Combatant::monster("Rat", 1, 3);
        let mut rng = SequenceRng::new([41]);
        assert!(table.loot_for(&rat, &mut rng).is_none());
        assert_eq!(rng.drawn(), 1);
    }

    #[test]
    fn offers_items_within_the_level_band() {
        let table = table();

        let rat = Combatant::monster("Rat", 1, 3);
        let mut rng = SequenceRng::new([10]);
        let offer = table.loot_for(&rat, &mut rng).unwrap();
        assert_eq!(offer.item, "Rusty Sword");
        assert_eq!(offer.slot, LootSlot::Weapon);
        assert_eq!(offer.power, 3);

        let knight = Combatant::monster("Knight", 7, 30);
        let mut rng = SequenceRng::new([10, 2]);
        let offer = table.loot_for(&knight, &mut rng).unwrap();
        assert_eq!(offer.item, "Chain Mail");
        assert_eq!(offer.power, 7);
    }

    #[test]
    fn inverted_level_band_is_rejected() {
        let file = write_temp(
            r#"(drop_chance: 10, entries: [(item: "Odd", slot: Armor, power: 1, min_level: 5, max_level: 2)])"#,
            ".ron",
        );
        assert!(LootTableLoader::load(file.path()).is_err());
    }
}
