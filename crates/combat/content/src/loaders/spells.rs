//! Spell book loader and the [`SpellOracle`] it backs.

use std::path::Path;

use combat_core::{Combatant, CombatRng, SpellEffect, SpellId, SpellOracle, SpellOutcome};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One spell as written in the spell book.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellEntry {
    pub name: String,
    pub mana_cost: i32,
    /// Caster level required to know the spell.
    pub min_level: u32,
    pub base_damage: i32,
    /// Extra damage per caster level.
    pub damage_per_level: i32,
    /// Percent of the caster's intelligence added to damage and healing.
    pub intelligence_pct: i32,
    /// Upper bound of the random bonus rolled on top.
    pub variance: i32,
    pub healing: i32,
    pub protection_bonus: i32,
    pub attack_bonus: i32,
    pub effect: SpellEffect,
    pub duration: u8,
    /// Chance (percent) the spell backfires on its caster.
    pub backfire_chance: u32,
}

impl Default for SpellEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            mana_cost: 0,
            min_level: 1,
            base_damage: 0,
            damage_per_level: 0,
            intelligence_pct: 0,
            variance: 0,
            healing: 0,
            protection_bonus: 0,
            attack_bonus: 0,
            effect: SpellEffect::None,
            duration: 1,
            backfire_chance: 0,
        }
    }
}

impl SpellEntry {
    fn scaled(&self, base: i32, caster: &Combatant, rng: &mut dyn CombatRng) -> i32 {
        if base <= 0 {
            return 0;
        }
        let level = caster.level as i32;
        let wits = caster.attributes.intelligence.max(0) * self.intelligence_pct / 100;
        base + level * self.damage_per_level.max(0) + wits + rng.uniform_int(0, self.variance)
    }

    fn resolve(&self, caster: &Combatant, rng: &mut dyn CombatRng) -> SpellOutcome {
        let damage = self.scaled(self.base_damage, caster, rng);
        let healing = self.scaled(self.healing, caster, rng);
        let backfired = self.backfire_chance > 0 && rng.chance(self.backfire_chance);

        SpellOutcome {
            damage,
            healing,
            mana_cost: self.mana_cost.max(0),
            protection_bonus: self.protection_bonus.max(0),
            attack_bonus: self.attack_bonus.max(0),
            effect: if backfired {
                SpellEffect::Backfire
            } else {
                self.effect
            },
            duration: self.duration.max(1),
        }
    }
}

/// Spells known to the world, looked up by case-insensitive name.
#[derive(Clone, Debug, Default)]
pub struct SpellBook {
    spells: Vec<SpellEntry>,
}

impl SpellBook {
    pub fn new(spells: Vec<SpellEntry>) -> Self {
        Self { spells }
    }

    pub fn get(&self, name: &str) -> Option<&SpellEntry> {
        self.spells
            .iter()
            .find(|spell| spell.name.eq_ignore_ascii_case(name.trim()))
    }

    /// Spells a combatant of `level` can cast.
    pub fn known_at(&self, level: u32) -> impl Iterator<Item = &SpellEntry> {
        self.spells.iter().filter(move |spell| spell.min_level <= level)
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }
}

impl SpellOracle for SpellBook {
    fn cast(
        &self,
        caster: &Combatant,
        spell: &SpellId,
        rng: &mut dyn CombatRng,
    ) -> Option<SpellOutcome> {
        let entry = self.get(spell.as_str())?;
        if caster.level < entry.min_level {
            return None;
        }
        Some(entry.resolve(caster, rng))
    }
}

/// Loader for the spell book from RON files.
pub struct SpellBookLoader;

impl SpellBookLoader {
    /// Load spells from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a RON file holding `[SpellEntry, ...]`
    pub fn load(path: &Path) -> LoadResult<SpellBook> {
        let content = read_file(path)?;
        let spells: Vec<SpellEntry> = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell book RON: {}", e))?;

        if let Some(unnamed) = spells.iter().position(|s| s.name.trim().is_empty()) {
            anyhow::bail!("Spell #{} in {} has no name", unnamed, path.display());
        }
        Ok(SpellBook::new(spells))
    }
}

#[cfg(test)]
mod tests {
    use combat_core::SequenceRng;

    use super::*;
    use crate::loaders::test_support::write_temp;

    fn book() -> SpellBook {
        let file = write_temp(
            r#"[
                (name: "Fireball", mana_cost: 10, base_damage: 12, damage_per_level: 2,
                 intelligence_pct: 50, variance: 6),
                (name: "Mend", mana_cost: 6, healing: 15),
                (name: "Chain Lightning", mana_cost: 20, min_level: 5, base_damage: 30,
                 effect: Stun, duration: 2, backfire_chance: 10),
            ]"#,
            ".ron",
        );
        SpellBookLoader::load(file.path()).unwrap()
    }

    #[test]
    fn damage_scales_with_level_and_intelligence() {
        let book = book();
        let mut caster = Combatant::player("Mage", 3, 20);
        caster.attributes.intelligence = 10;

        let mut rng = SequenceRng::new([4]);
        let outcome = book
            .cast(&caster, &SpellId::new("fireball"), &mut rng)
            .unwrap();

        // 12 + 3*2 + 10*50% + 4
        assert_eq!(outcome.damage, 27);
        assert_eq!(outcome.mana_cost, 10);
        assert_eq!(outcome.healing, 0);
        assert_eq!(outcome.effect, SpellEffect::None);
    }

    #[test]
    fn healing_spell_draws_nothing_without_variance() {
        let book = book();
        let caster = Combatant::player("Cleric", 1, 20);
        let mut rng = SequenceRng::new([]);

        let outcome = book.cast(&caster, &SpellId::new("Mend"), &mut rng).unwrap();
        assert_eq!(outcome.healing, 15);
        assert_eq!(rng.drawn(), 0);
    }

    #[test]
    fn level_gate_and_unknown_names() {
        let book = book();
        let novice = Combatant::player("Novice", 2, 20);
        let mut rng = SequenceRng::new([]);

        assert!(book.cast(&novice, &SpellId::new("Chain Lightning"), &mut rng).is_none());
        assert!(book.cast(&novice, &SpellId::new("Meteor"), &mut rng).is_none());
        assert_eq!(book.known_at(2).count(), 2);
    }

    #[test]
    fn backfire_replaces_the_effect() {
        let book = book();
        let archmage = Combatant::player("Archmage", 6, 30);

        let mut rng = SequenceRng::new([5]);
        let outcome = book
            .cast(&archmage, &SpellId::new("chain lightning"), &mut rng)
            .unwrap();
        assert_eq!(outcome.effect, SpellEffect::Backfire);

        let mut rng = SequenceRng::new([50]);
        let outcome = book
            .cast(&archmage, &SpellId::new("chain lightning"), &mut rng)
            .unwrap();
        assert_eq!(outcome.effect, SpellEffect::Stun);
        assert_eq!(outcome.damage, 30);
    }
}
