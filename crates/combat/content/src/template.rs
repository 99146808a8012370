//! Combatant templates as written in content files.

use combat_core::{Attributes, Combatant, CombatantKind, Consumables, Loadout};
use serde::{Deserialize, Serialize};

/// Stat block for a monster, hero or teammate.
///
/// Every field has a default so data files only spell out what differs from
/// a level-1 brawler. `hp` and `mana` default to their maximums.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatantTemplate {
    pub name: Option<String>,
    pub level: u32,
    pub max_hp: i32,
    pub hp: Option<i32>,
    pub max_mana: i32,
    pub attributes: Attributes,
    pub weapon_power: i32,
    pub armor_power: i32,
    /// Shield bonus; `None` means no shield is carried.
    pub shield: Option<i32>,
    pub loadout: Loadout,
    pub attacks_per_turn: u8,
    pub consumables: Consumables,
    pub smite_charges: u32,
    pub experience: u32,
    pub gold: u32,
}

impl Default for CombatantTemplate {
    fn default() -> Self {
        Self {
            name: None,
            level: 1,
            max_hp: 10,
            hp: None,
            max_mana: 0,
            attributes: Attributes::default(),
            weapon_power: 0,
            armor_power: 0,
            shield: None,
            loadout: Loadout::empty(),
            attacks_per_turn: 1,
            consumables: Consumables::default(),
            smite_charges: 0,
            experience: 0,
            gold: 0,
        }
    }
}

impl CombatantTemplate {
    /// Builds a combatant of `kind`. The template's own `name` wins over
    /// `fallback_name` when present.
    pub fn build(&self, kind: CombatantKind, fallback_name: &str) -> Combatant {
        let name = self.name.as_deref().unwrap_or(fallback_name);
        let mut combatant = Combatant::new(kind, name, self.level, self.max_hp)
            .with_attributes(self.attributes)
            .with_weapon(self.weapon_power)
            .with_armor(self.armor_power)
            .with_loadout(self.loadout)
            .with_mana(self.max_mana)
            .with_attacks(self.attacks_per_turn)
            .with_consumables(self.consumables)
            .with_smite_charges(self.smite_charges)
            .with_bounty(self.experience, self.gold);

        if let Some(bonus) = self.shield {
            combatant = combatant.with_shield(bonus);
        }
        if let Some(hp) = self.hp {
            combatant = combatant.with_hp(hp);
        }
        combatant.normalized()
    }
}
