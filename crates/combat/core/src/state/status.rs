//! Status effect storage for combatants.
//!
//! One entry per [`StatusKind`]: applying a kind that is already present
//! overwrites it rather than stacking. Timed kinds count down once per turn
//! of their owner (see [`crate::effects`]); the others are consumed by the
//! event that uses them.

use arrayvec::ArrayVec;

use crate::config::CombatConfig;

/// Active status effects on a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffects {
    effects: ArrayVec<StatusEffect, { CombatConfig::MAX_STATUS_EFFECTS }>,
}

/// A single status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Magnitude (penalty, bonus, or absorption pool). Unused by some kinds.
    pub potency: i32,
    /// Turns left for timed kinds; ignored for consumable kinds.
    pub remaining: u8,
}

impl StatusEffect {
    pub const fn new(kind: StatusKind, potency: i32, remaining: u8) -> Self {
        Self {
            kind,
            potency,
            remaining,
        }
    }

    /// Effect that lasts until consumed.
    pub const fn until_used(kind: StatusKind, potency: i32) -> Self {
        Self::new(kind, potency, 0)
    }
}

/// Types of status effects.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumIter,
    strum::EnumCount,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatusKind {
    // ========================================================================
    // Crowd control
    // ========================================================================
    /// Loses the next turn(s).
    Stunned,

    /// Weapon power counts as zero.
    Disarmed,

    /// Defence lowered by `potency`.
    Taunted,

    // ========================================================================
    // Debuffs
    // ========================================================================
    /// Takes 1-4 damage at the start of each turn.
    Poisoned,

    /// Attack power reduced by 4, floored at 1.
    Weakened,

    /// Attack count halved (floored at 1).
    Slowed,

    // ========================================================================
    // Buffs
    // ========================================================================
    /// Strength counts double on attack; struck foes gain defence.
    Raging,

    /// Attackers lose `potency` attack power.
    Blurred,

    /// Attack ×1.5, defence ×1.25.
    #[strum(to_string = "Power Stance")]
    PowerStance,

    /// Attack count doubled.
    Hasted,

    /// +2 attack and +2 defence.
    Blessed,

    /// Defence raised by `potency`.
    Protected,

    /// Attack raised by `potency`.
    Empowered,

    // ========================================================================
    // Consumed on use
    // ========================================================================
    /// Next incoming hit is halved.
    Defending,

    /// Next offensive action rolls with advantage.
    Hidden,

    /// Absorbs up to `potency` damage in total.
    Stoneskin,
}

impl StatusKind {
    /// Kinds that count down each turn rather than waiting to be consumed.
    pub const fn is_timed(self) -> bool {
        !matches!(self, Self::Defending | Self::Hidden | Self::Stoneskin)
    }

    /// Harmful kinds, cleared by cleansing effects.
    pub const fn is_debuff(self) -> bool {
        matches!(
            self,
            Self::Stunned
                | Self::Disarmed
                | Self::Taunted
                | Self::Poisoned
                | Self::Weakened
                | Self::Slowed
        )
    }
}

impl StatusEffects {
    /// Creates an empty status effect set.
    pub fn empty() -> Self {
        Self {
            effects: ArrayVec::new(),
        }
    }

    /// Checks if a specific status effect is active.
    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn get_mut(&mut self, kind: StatusKind) -> Option<&mut StatusEffect> {
        self.effects.iter_mut().find(|e| e.kind == kind)
    }

    /// Potency of an active effect, or 0.
    pub fn potency(&self, kind: StatusKind) -> i32 {
        self.get(kind).map_or(0, |e| e.potency)
    }

    /// Adds an effect, overwriting any entry of the same kind.
    ///
    /// Returns the previous entry if one was replaced.
    pub fn apply(&mut self, effect: StatusEffect) -> Option<StatusEffect> {
        if let Some(existing) = self.get_mut(effect.kind) {
            return Some(core::mem::replace(existing, effect));
        }

        // One slot per kind, so a full set already holds every kind.
        if !self.effects.is_full() {
            self.effects.push(effect);
        }
        None
    }

    /// Removes a status effect immediately.
    pub fn remove(&mut self, kind: StatusKind) -> Option<StatusEffect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(index))
    }

    /// Removes all harmful effects, returning their kinds.
    pub fn clear_debuffs(&mut self) -> Vec<StatusKind> {
        let cleared: Vec<StatusKind> = self
            .effects
            .iter()
            .filter(|e| e.kind.is_debuff())
            .map(|e| e.kind)
            .collect();
        self.effects.retain(|e| !e.kind.is_debuff());
        cleared
    }

    /// Returns an iterator over all effects.
    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }
}
