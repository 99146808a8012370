//! Combatants: players, teammates, monsters and opposing players.
//!
//! All four roles share one struct; [`CombatantKind`] says which role it plays.
//! HP and mana are kept private so every mutation goes through a clamping
//! method and the `0 <= hp <= max_hp` invariant cannot be broken.

use core::fmt;

use super::loadout::Loadout;
use super::status::{StatusEffects, StatusKind};

/// Encounter-scoped combatant identifier.
///
/// Assigned by the session when an encounter starts: the player is always
/// [`CombatantId::PLAYER`], teammates and monsters follow in roster order.
/// Ids stay valid when combatants die, unlike list positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantId(pub u32);

impl CombatantId {
    pub const PLAYER: Self = Self(0);
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role a combatant plays in an encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatantKind {
    Player,
    Teammate,
    #[default]
    Monster,
    #[strum(to_string = "Opposing Player")]
    OpposingPlayer,
}

/// Primary attributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub charisma: i32,
    pub defence: i32,
    /// Paladin-style virtue, feeds Soul Strike.
    pub chivalry: i32,
}

impl Attributes {
    pub const fn new(
        strength: i32,
        dexterity: i32,
        intelligence: i32,
        charisma: i32,
        defence: i32,
    ) -> Self {
        Self {
            strength,
            dexterity,
            intelligence,
            charisma,
            defence,
            chivalry: 0,
        }
    }

    pub const fn with_chivalry(mut self, chivalry: i32) -> Self {
        self.chivalry = chivalry;
        self
    }
}

/// Consumable counters carried into combat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Consumables {
    pub healing_potions: u32,
    pub mana_potions: u32,
    pub antidotes: u32,
}

/// Experience and gold a monster is worth when defeated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Bounty {
    pub experience: u32,
    pub gold: u32,
}

/// Anything that can act and be targeted in a session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Combatant {
    #[cfg_attr(feature = "serde", serde(skip))]
    pub id: CombatantId,
    pub kind: CombatantKind,
    pub name: String,
    pub level: u32,
    hp: i32,
    max_hp: i32,
    mana: i32,
    max_mana: i32,
    pub attributes: Attributes,
    pub weapon_power: i32,
    pub armor_power: i32,
    /// Defence added when the shield blocks.
    pub shield_bonus: i32,
    /// Swings per Attack before haste/slow.
    pub attacks_per_turn: u8,
    pub loadout: Loadout,
    pub status: StatusEffects,
    pub consumables: Consumables,
    /// Smite charges granted at the start of every encounter.
    pub smite_charges: u32,
    pub bounty: Bounty,
}

impl Combatant {
    /// Creates a combatant at full health with no mana.
    pub fn new(kind: CombatantKind, name: impl Into<String>, level: u32, max_hp: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            kind,
            name: name.into(),
            level,
            hp: max_hp,
            max_hp,
            attacks_per_turn: 1,
            ..Self::default()
        }
    }

    pub fn player(name: impl Into<String>, level: u32, max_hp: i32) -> Self {
        Self::new(CombatantKind::Player, name, level, max_hp)
    }

    pub fn teammate(name: impl Into<String>, level: u32, max_hp: i32) -> Self {
        Self::new(CombatantKind::Teammate, name, level, max_hp)
    }

    pub fn monster(name: impl Into<String>, level: u32, max_hp: i32) -> Self {
        Self::new(CombatantKind::Monster, name, level, max_hp)
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_weapon(mut self, weapon_power: i32) -> Self {
        self.weapon_power = weapon_power.max(0);
        self
    }

    pub fn with_armor(mut self, armor_power: i32) -> Self {
        self.armor_power = armor_power.max(0);
        self
    }

    pub fn with_shield(mut self, bonus: i32) -> Self {
        self.loadout.insert(Loadout::SHIELD);
        self.shield_bonus = bonus.max(0);
        self
    }

    pub fn with_loadout(mut self, loadout: Loadout) -> Self {
        self.loadout = loadout;
        self
    }

    pub fn with_mana(mut self, max_mana: i32) -> Self {
        self.max_mana = max_mana.max(0);
        self.mana = self.max_mana;
        self
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.set_hp(hp);
        self
    }

    pub fn with_attacks(mut self, attacks_per_turn: u8) -> Self {
        self.attacks_per_turn = attacks_per_turn.max(1);
        self
    }

    pub fn with_consumables(mut self, consumables: Consumables) -> Self {
        self.consumables = consumables;
        self
    }

    pub fn with_smite_charges(mut self, charges: u32) -> Self {
        self.smite_charges = charges;
        self
    }

    pub fn with_bounty(mut self, experience: u32, gold: u32) -> Self {
        self.bounty = Bounty { experience, gold };
        self
    }

    /// Repairs a combatant built from content data: fills unset HP/mana to
    /// maximum and clamps everything into range.
    pub fn normalized(mut self) -> Self {
        self.max_hp = self.max_hp.max(1);
        if self.hp <= 0 || self.hp > self.max_hp {
            self.hp = self.max_hp;
        }
        self.max_mana = self.max_mana.max(0);
        if self.mana <= 0 || self.mana > self.max_mana {
            self.mana = self.max_mana;
        }
        self.attacks_per_turn = self.attacks_per_turn.max(1);
        self.weapon_power = self.weapon_power.max(0);
        self.armor_power = self.armor_power.max(0);
        self
    }

    // ===== health =====

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_full_health(&self) -> bool {
        self.hp >= self.max_hp
    }

    /// Current HP as a percentage of maximum.
    pub fn hp_percent(&self) -> u32 {
        if self.max_hp <= 0 {
            return 0;
        }
        (self.hp.max(0) as i64 * 100 / self.max_hp as i64) as u32
    }

    /// Sets HP, clamped to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    /// Raises (or lowers) maximum HP, keeping current HP within bounds.
    pub fn set_max_hp(&mut self, max_hp: i32) {
        self.max_hp = max_hp.max(1);
        self.hp = self.hp.clamp(0, self.max_hp);
    }

    /// Removes HP, clamped at zero. Returns the HP actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let lost = amount.max(0).min(self.hp);
        self.hp -= lost;
        lost
    }

    /// Restores HP, clamped at maximum. Returns the HP actually gained.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let gained = amount.max(0).min(self.max_hp - self.hp);
        self.hp += gained;
        gained
    }

    // ===== mana =====

    pub fn mana(&self) -> i32 {
        self.mana
    }

    pub fn max_mana(&self) -> i32 {
        self.max_mana
    }

    /// Spends mana if enough is available; returns false and spends nothing otherwise.
    pub fn spend_mana(&mut self, cost: i32) -> bool {
        let cost = cost.max(0);
        if self.mana < cost {
            return false;
        }
        self.mana -= cost;
        true
    }

    /// Restores mana, clamped at maximum. Returns the mana actually gained.
    pub fn restore_mana(&mut self, amount: i32) -> i32 {
        let gained = amount.max(0).min(self.max_mana - self.mana);
        self.mana += gained;
        gained
    }

    // ===== derived flags =====

    pub fn is_raging(&self) -> bool {
        self.status.has(StatusKind::Raging)
    }

    pub fn is_defending(&self) -> bool {
        self.status.has(StatusKind::Defending)
    }

    pub fn is_hidden(&self) -> bool {
        self.status.has(StatusKind::Hidden)
    }

    /// Weapon power usable right now (zero while disarmed).
    pub fn effective_weapon_power(&self) -> i32 {
        if self.status.has(StatusKind::Disarmed) {
            0
        } else {
            self.weapon_power.max(0)
        }
    }

    /// Swings an Attack makes this turn after haste/slow.
    pub fn attack_count(&self) -> u32 {
        let mut count = u32::from(self.attacks_per_turn.max(1));
        if self.status.has(StatusKind::Hasted) {
            count *= 2;
        }
        if self.status.has(StatusKind::Slowed) {
            count = (count / 2).max(1);
        }
        count
    }

    pub fn is_player_side(&self) -> bool {
        matches!(self.kind, CombatantKind::Player | CombatantKind::Teammate)
    }
}
