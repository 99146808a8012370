use super::rng::CombatRng;
use crate::state::Combatant;

/// Source of post-victory item offers.
pub trait LootOracle: Send + Sync {
    /// Offer an item dropped by a defeated monster, if any.
    fn loot_for(&self, monster: &Combatant, rng: &mut dyn CombatRng) -> Option<LootOffer>;
}

/// Equipment slot a loot offer fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LootSlot {
    Weapon,
    Armor,
}

/// Item offered to the player, who may accept or decline it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LootOffer {
    pub item: String,
    pub slot: LootSlot,
    pub power: i32,
}

impl LootOffer {
    /// Equips the item, replacing the current weapon or armor power.
    pub fn equip(&self, combatant: &mut Combatant) {
        match self.slot {
            LootSlot::Weapon => combatant.weapon_power = self.power.max(0),
            LootSlot::Armor => combatant.armor_power = self.power.max(0),
        }
    }

    /// Whether the offer beats what the combatant already has.
    pub fn is_upgrade_for(&self, combatant: &Combatant) -> bool {
        match self.slot {
            LootSlot::Weapon => self.power > combatant.weapon_power,
            LootSlot::Armor => self.power > combatant.armor_power,
        }
    }
}
