use super::arena::{Battlefield, SessionFlags};
use crate::state::{Combatant, CombatantId, CombatantKind, StatusKind};

/// Read-only snapshot of one combatant, handed to action providers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSnapshot {
    pub id: CombatantId,
    pub kind: CombatantKind,
    pub name: String,
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub statuses: Vec<StatusKind>,
}

impl CombatantSnapshot {
    pub fn of(combatant: &Combatant) -> Self {
        Self {
            id: combatant.id,
            kind: combatant.kind,
            name: combatant.name.clone(),
            level: combatant.level,
            hp: combatant.hp(),
            max_hp: combatant.max_hp(),
            mana: combatant.mana(),
            max_mana: combatant.max_mana(),
            statuses: combatant.status.iter().map(|e| e.kind).collect(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// What a decision maker can see when the player is up.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionView {
    pub round: u32,
    pub player: CombatantSnapshot,
    pub teammates: Vec<CombatantSnapshot>,
    pub monsters: Vec<CombatantSnapshot>,
    pub flags: SessionFlags,
    /// Free actions already taken this turn.
    pub free_actions: u32,
}

impl SessionView {
    pub(crate) fn capture(field: &Battlefield<'_>, round: u32, free_actions: u32) -> Self {
        let snapshot = |id| field.get(id).map(CombatantSnapshot::of);
        Self {
            round,
            player: CombatantSnapshot::of(field.player()),
            teammates: field.teammate_ids().filter_map(snapshot).collect(),
            monsters: field.monster_ids().filter_map(snapshot).collect(),
            flags: field.flags(),
            free_actions,
        }
    }

    pub fn living_monsters(&self) -> impl Iterator<Item = &CombatantSnapshot> {
        self.monsters.iter().filter(|m| m.is_alive())
    }

    /// The `n`th living monster (0-based), as numbered in menus.
    pub fn nth_living_monster(&self, n: usize) -> Option<&CombatantSnapshot> {
        self.living_monsters().nth(n)
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&CombatantSnapshot> {
        core::iter::once(&self.player)
            .chain(&self.teammates)
            .chain(&self.monsters)
            .find(|c| c.id == id)
    }
}
