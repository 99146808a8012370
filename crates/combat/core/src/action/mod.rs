//! Action catalogue and resolution.
//!
//! [`CombatAction`] is the closed set of things a combatant can do on its
//! turn. [`ActionResolver`] executes exactly one of them through an exhaustive
//! match.
//!
//! Resolution is grouped by family:
//! - `strike`: weapon and holy attacks that deal damage
//! - `tactics`: stances and opposed-roll tricks (disarm, taunt, hide)
//! - `support`: healing and consumables
//! - `spell`: spell casting, single target and area of effect
//! - `flight`: retreat, begging for mercy, swearing to fight on

mod flight;
mod resolver;
mod spell;
mod strike;
mod support;
mod tactics;
pub mod targeting;

pub use resolver::{ActionResolver, TurnUse};

use crate::env::SpellId;
use crate::state::CombatantId;

/// Consumables usable through [`CombatAction::UseItem`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum ItemKind {
    #[strum(to_string = "healing potion", serialize = "potion", serialize = "healing")]
    HealingPotion,
    #[strum(to_string = "mana potion", serialize = "mana")]
    ManaPotion,
    #[strum(to_string = "antidote")]
    Antidote,
}

/// A single combat action. Offensive variants carry an optional target;
/// `None` resolves to a random living foe.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatAction {
    Attack {
        target: Option<CombatantId>,
    },
    PowerAttack {
        target: Option<CombatantId>,
    },
    PreciseStrike {
        target: Option<CombatantId>,
    },
    RangedAttack {
        target: Option<CombatantId>,
    },
    Backstab {
        target: Option<CombatantId>,
    },
    SoulStrike {
        target: Option<CombatantId>,
    },
    Smite {
        target: Option<CombatantId>,
    },
    Disarm {
        target: Option<CombatantId>,
    },
    Taunt {
        target: Option<CombatantId>,
    },
    Hide,
    Rage,
    Defend,
    Heal,
    QuickHeal,
    UseItem {
        item: ItemKind,
    },
    CastSpell {
        spell: SpellId,
        target: Option<CombatantId>,
        affect_all: bool,
    },
    Retreat,
    BegForMercy,
    FightToDeath,
    Status,
}

impl CombatAction {
    /// Attack a random living foe; the auto-combat and fallback action.
    pub const fn attack() -> Self {
        Self::Attack { target: None }
    }

    pub const fn attack_target(target: CombatantId) -> Self {
        Self::Attack {
            target: Some(target),
        }
    }

    pub fn cast(spell: impl Into<String>, target: Option<CombatantId>) -> Self {
        Self::CastSpell {
            spell: SpellId::new(spell),
            target,
            affect_all: false,
        }
    }

    pub fn cast_on_all(spell: impl Into<String>) -> Self {
        Self::CastSpell {
            spell: SpellId::new(spell),
            target: None,
            affect_all: true,
        }
    }

    /// Explicit target, if the action names one.
    pub fn target(&self) -> Option<CombatantId> {
        match self {
            Self::Attack { target }
            | Self::PowerAttack { target }
            | Self::PreciseStrike { target }
            | Self::RangedAttack { target }
            | Self::Backstab { target }
            | Self::SoulStrike { target }
            | Self::Smite { target }
            | Self::Disarm { target }
            | Self::Taunt { target }
            | Self::CastSpell { target, .. } => *target,
            Self::Hide
            | Self::Rage
            | Self::Defend
            | Self::Heal
            | Self::QuickHeal
            | Self::UseItem { .. }
            | Self::Retreat
            | Self::BegForMercy
            | Self::FightToDeath
            | Self::Status => None,
        }
    }

    pub fn tag(&self) -> ActionTag {
        match self {
            Self::Attack { .. } => ActionTag::Attack,
            Self::PowerAttack { .. } => ActionTag::PowerAttack,
            Self::PreciseStrike { .. } => ActionTag::PreciseStrike,
            Self::RangedAttack { .. } => ActionTag::RangedAttack,
            Self::Backstab { .. } => ActionTag::Backstab,
            Self::SoulStrike { .. } => ActionTag::SoulStrike,
            Self::Smite { .. } => ActionTag::Smite,
            Self::Disarm { .. } => ActionTag::Disarm,
            Self::Taunt { .. } => ActionTag::Taunt,
            Self::Hide => ActionTag::Hide,
            Self::Rage => ActionTag::Rage,
            Self::Defend => ActionTag::Defend,
            Self::Heal => ActionTag::Heal,
            Self::QuickHeal => ActionTag::QuickHeal,
            Self::UseItem { .. } => ActionTag::UseItem,
            Self::CastSpell { .. } => ActionTag::CastSpell,
            Self::Retreat => ActionTag::Retreat,
            Self::BegForMercy => ActionTag::BegForMercy,
            Self::FightToDeath => ActionTag::FightToDeath,
            Self::Status => ActionTag::Status,
        }
    }
}

impl Default for CombatAction {
    fn default() -> Self {
        Self::attack()
    }
}

/// Payload-free discriminant of [`CombatAction`], used in events and menus.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum ActionTag {
    #[strum(to_string = "attack", serialize = "a")]
    Attack,
    #[strum(to_string = "power attack", serialize = "power", serialize = "pa")]
    PowerAttack,
    #[strum(to_string = "precise strike", serialize = "precise", serialize = "ps")]
    PreciseStrike,
    #[strum(to_string = "ranged attack", serialize = "ranged", serialize = "shoot")]
    RangedAttack,
    #[strum(to_string = "backstab", serialize = "bs")]
    Backstab,
    #[strum(to_string = "soul strike", serialize = "soul")]
    SoulStrike,
    #[strum(to_string = "smite")]
    Smite,
    #[strum(to_string = "disarm")]
    Disarm,
    #[strum(to_string = "taunt")]
    Taunt,
    #[strum(to_string = "hide")]
    Hide,
    #[strum(to_string = "rage")]
    Rage,
    #[strum(to_string = "defend", serialize = "d")]
    Defend,
    #[strum(to_string = "heal", serialize = "h")]
    Heal,
    #[strum(to_string = "quick heal", serialize = "quick", serialize = "qh")]
    QuickHeal,
    #[strum(to_string = "use item", serialize = "use")]
    UseItem,
    #[strum(to_string = "cast a spell", serialize = "cast", serialize = "c")]
    CastSpell,
    #[strum(to_string = "retreat", serialize = "flee", serialize = "r")]
    Retreat,
    #[strum(to_string = "beg for mercy", serialize = "beg")]
    BegForMercy,
    #[strum(to_string = "fight to the death", serialize = "fight")]
    FightToDeath,
    #[strum(to_string = "status", serialize = "s")]
    Status,
}

impl ActionTag {
    /// Third-person verb used when narrating a landed blow.
    pub const fn verb(self, off_hand: bool) -> &'static str {
        if off_hand {
            return "follows up with the off hand on";
        }
        match self {
            Self::PowerAttack => "power-attacks",
            Self::PreciseStrike => "precisely strikes",
            Self::RangedAttack => "shoots",
            Self::Backstab => "backstabs",
            Self::SoulStrike => "soul-strikes",
            Self::Smite => "smites",
            Self::CastSpell => "blasts",
            _ => "attacks",
        }
    }

    /// Whether the action deals damage to a foe.
    pub const fn is_offensive(self) -> bool {
        matches!(
            self,
            Self::Attack
                | Self::PowerAttack
                | Self::PreciseStrike
                | Self::RangedAttack
                | Self::Backstab
                | Self::SoulStrike
                | Self::Smite
                | Self::CastSpell
        )
    }
}
