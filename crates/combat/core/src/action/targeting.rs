//! Target selection against a roster that shrinks as combatants die.
//!
//! Targets are always re-resolved against the living set at the moment of
//! use; nothing caches list positions across a turn.

use crate::engine::Battlefield;
use crate::env::CombatRng;
use crate::state::CombatantId;

/// Resolves the target for an offensive action by `actor`.
///
/// A requested target is honored while it is a living foe; otherwise a random
/// living foe is chosen. `None` when the other side is wiped out.
pub fn resolve_target(
    field: &Battlefield<'_>,
    actor: CombatantId,
    requested: Option<CombatantId>,
    rng: &mut dyn CombatRng,
) -> Option<CombatantId> {
    let foes = field.foes_of(actor);
    if foes.is_empty() {
        return None;
    }
    if let Some(id) = requested.filter(|id| foes.contains(id)) {
        return Some(id);
    }
    Some(foes[rng.pick(foes.len())])
}

/// Living monster with the lowest current HP; ties go to the earlier one.
pub fn weakest_monster(field: &Battlefield<'_>) -> Option<CombatantId> {
    field
        .living_monsters()
        .into_iter()
        .min_by_key(|id| (field.get(*id).map_or(i32::MAX, |c| c.hp()), *id))
}

/// Living foe of `actor` with the highest intelligence, for opposed rolls
/// against the whole enemy side.
pub fn keenest_foe(field: &Battlefield<'_>, actor: CombatantId) -> Option<CombatantId> {
    field
        .foes_of(actor)
        .into_iter()
        .max_by_key(|id| {
            (
                field
                    .get(*id)
                    .map_or(i32::MIN, |c| c.attributes.intelligence),
                core::cmp::Reverse(*id),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequenceRng;
    use crate::state::Combatant;

    #[test]
    fn weakest_monster_prefers_first_on_ties() {
        let mut player = Combatant::player("Hero", 1, 20);
        let mut monsters = vec![
            Combatant::monster("Rat", 1, 9),
            Combatant::monster("Bat", 1, 4),
            Combatant::monster("Newt", 1, 4),
        ];
        let field = Battlefield::new(&mut player, &mut [], &mut monsters);
        assert_eq!(weakest_monster(&field), Some(CombatantId(2)));
    }

    #[test]
    fn dead_requested_target_falls_back_to_living() {
        let mut player = Combatant::player("Hero", 1, 20);
        let mut monsters = vec![
            Combatant::monster("Rat", 1, 9).with_hp(0),
            Combatant::monster("Bat", 1, 4),
        ];
        let field = Battlefield::new(&mut player, &mut [], &mut monsters);
        let mut rng = SequenceRng::default();

        assert_eq!(
            resolve_target(&field, CombatantId::PLAYER, Some(CombatantId(1)), &mut rng),
            Some(CombatantId(2))
        );
        assert_eq!(rng.drawn(), 0);
    }
}
