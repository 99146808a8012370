//! Weapon configuration flags.

bitflags::bitflags! {
    /// What a combatant is wielding. Each flag changes damage or defence
    /// multiplicatively (see [`crate::combat`]).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct Loadout: u8 {
        /// Two-handed weapon: damage ×1.25, defence ×0.85.
        const TWO_HANDED = 1 << 0;
        /// Weapon in each hand: extra off-hand swing at ×0.50, defence ×0.90.
        const DUAL_WIELD = 1 << 1;
        /// Shield: 20% chance to add its bonus to defence against a hit.
        const SHIELD = 1 << 2;
        /// Ranged weapon equipped; required for ranged attacks.
        const RANGED = 1 << 3;
    }
}

impl Loadout {
    pub const fn is_two_handed(self) -> bool {
        self.contains(Self::TWO_HANDED)
    }

    pub const fn is_dual_wielding(self) -> bool {
        self.contains(Self::DUAL_WIELD)
    }

    pub const fn has_shield(self) -> bool {
        self.contains(Self::SHIELD)
    }
}
