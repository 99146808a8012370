//! The battlefield: every combatant of one encounter, addressed by id.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::event::{CombatEvent, CombatLog};
use crate::state::{Combatant, CombatantId};

/// Session-wide flags. They only ever go from `false` to `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionFlags {
    pub escaped: bool,
    pub player_killed: bool,
    pub begged_already: bool,
    pub fight_to_death: bool,
}

/// Mutable view over the combatants of one encounter.
///
/// The roster is indexed by [`CombatantId`]: the player is id 0, teammates
/// follow in list order, monsters after them. Combatants are borrowed from the
/// caller, so every change lands on the caller's objects.
pub struct Battlefield<'a> {
    roster: Vec<&'a mut Combatant>,
    teammates: Range<usize>,
    monsters: Range<usize>,
    fallen: BTreeSet<CombatantId>,
    defeated: Vec<CombatantId>,
    /// Smite charges left this encounter, refilled from each combatant's
    /// allowance when the battlefield is built.
    smite_charges: Vec<u32>,
    pub(crate) log: CombatLog,
    pub(crate) flags: SessionFlags,
}

impl<'a> Battlefield<'a> {
    pub(crate) fn new(
        player: &'a mut Combatant,
        teammates: &'a mut [Combatant],
        monsters: &'a mut [Combatant],
    ) -> Self {
        let teammate_count = teammates.len();
        let monster_count = monsters.len();

        let mut roster: Vec<&'a mut Combatant> = Vec::with_capacity(1 + teammate_count + monster_count);
        roster.push(player);
        roster.extend(teammates.iter_mut());
        roster.extend(monsters.iter_mut());

        let smite_charges = roster.iter().map(|c| c.smite_charges).collect();
        let mut log = CombatLog::new();
        let mut fallen = BTreeSet::new();
        for (index, combatant) in roster.iter_mut().enumerate() {
            combatant.id = CombatantId(index as u32);
            log.register(combatant.id, combatant.name.clone());
            // Already dead on arrival: never acts, never counted as a kill.
            if !combatant.is_alive() {
                fallen.insert(combatant.id);
            }
        }

        Self {
            roster,
            teammates: 1..1 + teammate_count,
            monsters: 1 + teammate_count..1 + teammate_count + monster_count,
            fallen,
            defeated: Vec::new(),
            smite_charges,
            log,
            flags: SessionFlags::default(),
        }
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id.0 as usize).map(|c| &**c)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.roster.get_mut(id.0 as usize).map(|c| &mut **c)
    }

    /// A combatant together with the log, for mutations that record events.
    pub(crate) fn with_log(&mut self, id: CombatantId) -> Option<(&mut Combatant, &mut CombatLog)> {
        let log = &mut self.log;
        self.roster
            .get_mut(id.0 as usize)
            .map(move |c| (&mut **c, log))
    }

    pub fn contains(&self, id: CombatantId) -> bool {
        (id.0 as usize) < self.roster.len()
    }

    pub fn is_alive(&self, id: CombatantId) -> bool {
        self.get(id).is_some_and(Combatant::is_alive)
    }

    /// Two distinct combatants borrowed mutably at once.
    pub fn pair_mut(
        &mut self,
        first: CombatantId,
        second: CombatantId,
    ) -> Option<(&mut Combatant, &mut Combatant)> {
        let (i, j) = (first.0 as usize, second.0 as usize);
        if i == j || i >= self.roster.len() || j >= self.roster.len() {
            return None;
        }
        if i < j {
            let (left, right) = self.roster.split_at_mut(j);
            Some((&mut *left[i], &mut *right[0]))
        } else {
            let (left, right) = self.roster.split_at_mut(i);
            Some((&mut *right[0], &mut *left[j]))
        }
    }

    pub fn player(&self) -> &Combatant {
        &self.roster[0]
    }

    pub fn player_mut(&mut self) -> &mut Combatant {
        &mut self.roster[0]
    }

    pub fn teammate_ids(&self) -> impl Iterator<Item = CombatantId> + use<> {
        self.teammates.clone().map(|i| CombatantId(i as u32))
    }

    pub fn monster_ids(&self) -> impl Iterator<Item = CombatantId> + use<> {
        self.monsters.clone().map(|i| CombatantId(i as u32))
    }

    pub fn is_monster(&self, id: CombatantId) -> bool {
        self.monsters.contains(&(id.0 as usize))
    }

    /// Position of a monster in the caller's monster list.
    pub fn monster_index(&self, id: CombatantId) -> Option<usize> {
        self.is_monster(id)
            .then(|| id.0 as usize - self.monsters.start)
    }

    pub fn living_monsters(&self) -> Vec<CombatantId> {
        self.monster_ids().filter(|id| self.is_alive(*id)).collect()
    }

    pub fn living_teammates(&self) -> Vec<CombatantId> {
        self.teammate_ids().filter(|id| self.is_alive(*id)).collect()
    }

    pub fn all_monsters_dead(&self) -> bool {
        self.monster_ids().all(|id| !self.is_alive(id))
    }

    /// Living combatants on the other side from `actor`, in roster order.
    pub fn foes_of(&self, actor: CombatantId) -> Vec<CombatantId> {
        if self.is_monster(actor) {
            core::iter::once(CombatantId::PLAYER)
                .chain(self.teammate_ids())
                .filter(|id| self.is_alive(*id))
                .collect()
        } else {
            self.living_monsters()
        }
    }

    pub fn smite_charges(&self, id: CombatantId) -> u32 {
        self.smite_charges.get(id.0 as usize).copied().unwrap_or(0)
    }

    /// Spends one smite charge. Returns `false` when none are left.
    pub(crate) fn spend_smite(&mut self, id: CombatantId) -> bool {
        match self.smite_charges.get_mut(id.0 as usize) {
            Some(left) if *left > 0 => {
                *left -= 1;
                true
            }
            _ => false,
        }
    }

    /// Records a death once: logs it and, for monsters, appends it to the
    /// defeated list in the order deaths happen. Living combatants are ignored.
    pub fn settle(&mut self, id: CombatantId) {
        if self.is_alive(id) || !self.contains(id) || !self.fallen.insert(id) {
            return;
        }

        self.log.push(CombatEvent::Defeated { combatant: id });
        if id == CombatantId::PLAYER {
            self.flags.player_killed = true;
        } else if self.is_monster(id) {
            self.defeated.push(id);
        }
    }

    /// Monsters killed during the encounter, in death order.
    pub fn defeated(&self) -> &[CombatantId] {
        &self.defeated
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn flags(&self) -> SessionFlags {
        self.flags
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    pub(crate) fn into_log(self) -> CombatLog {
        self.log
    }
}

impl core::fmt::Debug for Battlefield<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Battlefield")
            .field("combatants", &self.roster.len())
            .field("teammates", &self.teammates)
            .field("monsters", &self.monsters)
            .field("defeated", &self.defeated)
            .field("flags", &self.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_roster_order() {
        let mut player = Combatant::player("Hero", 1, 20);
        let mut teammates = vec![Combatant::teammate("Squire", 1, 10)];
        let mut monsters = vec![
            Combatant::monster("Rat", 1, 5),
            Combatant::monster("Bat", 1, 5),
        ];
        let field = Battlefield::new(&mut player, &mut teammates, &mut monsters);

        assert_eq!(field.teammate_ids().collect::<Vec<_>>(), vec![CombatantId(1)]);
        assert_eq!(
            field.monster_ids().collect::<Vec<_>>(),
            vec![CombatantId(2), CombatantId(3)]
        );
        assert_eq!(field.monster_index(CombatantId(3)), Some(1));
        assert_eq!(field.get(CombatantId(3)).map(|c| c.name.as_str()), Some("Bat"));
    }

    #[test]
    fn pair_mut_borrows_both_directions() {
        let mut player = Combatant::player("Hero", 1, 20);
        let mut monsters = vec![Combatant::monster("Rat", 1, 5)];
        let mut field = Battlefield::new(&mut player, &mut [], &mut monsters);

        let (rat, hero) = field
            .pair_mut(CombatantId(1), CombatantId::PLAYER)
            .expect("distinct ids");
        assert_eq!(rat.name, "Rat");
        assert_eq!(hero.name, "Hero");
        assert!(field.pair_mut(CombatantId(1), CombatantId(1)).is_none());
        assert!(field.pair_mut(CombatantId(1), CombatantId(9)).is_none());
    }

    #[test]
    fn settle_records_each_death_once() {
        let mut player = Combatant::player("Hero", 1, 20);
        let mut monsters = vec![
            Combatant::monster("Rat", 1, 5),
            Combatant::monster("Bat", 1, 5),
        ];
        let mut field = Battlefield::new(&mut player, &mut [], &mut monsters);

        if let Some(bat) = field.get_mut(CombatantId(2)) {
            bat.set_hp(0);
        }
        field.settle(CombatantId(2));
        field.settle(CombatantId(2));
        field.settle(CombatantId(1));

        assert_eq!(field.defeated(), &[CombatantId(2)]);
        assert_eq!(field.log().len(), 1);
        assert!(!field.all_monsters_dead());
    }

    #[test]
    fn smite_pool_is_per_battlefield() {
        let mut player = Combatant::player("Paladin", 1, 20).with_smite_charges(1);
        let mut monsters = vec![Combatant::monster("Ghoul", 1, 5)];

        let mut field = Battlefield::new(&mut player, &mut [], &mut monsters);
        assert!(field.spend_smite(CombatantId::PLAYER));
        assert!(!field.spend_smite(CombatantId::PLAYER));
        assert!(!field.spend_smite(CombatantId(1)));
        drop(field);

        assert_eq!(player.smite_charges, 1);
        let field = Battlefield::new(&mut player, &mut [], &mut monsters);
        assert_eq!(field.smite_charges(CombatantId::PLAYER), 1);
    }

    #[test]
    fn monsters_see_player_side_as_foes() {
        let mut player = Combatant::player("Hero", 1, 20);
        let mut teammates = vec![
            Combatant::teammate("Squire", 1, 10),
            Combatant::teammate("Ghost", 1, 10).with_hp(0),
        ];
        let mut monsters = vec![Combatant::monster("Rat", 1, 5)];
        let field = Battlefield::new(&mut player, &mut teammates, &mut monsters);

        assert_eq!(
            field.foes_of(CombatantId(3)),
            vec![CombatantId::PLAYER, CombatantId(1)]
        );
        assert_eq!(field.foes_of(CombatantId(1)), vec![CombatantId(3)]);
    }
}
