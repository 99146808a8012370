//! Action choice for combatants the player does not control.

use super::arena::Battlefield;
use crate::action::{CombatAction, targeting};
use crate::config::CombatConfig;
use crate::env::CombatRng;
use crate::state::{CombatantId, CombatantKind};

/// Picks the action for a monster-side combatant.
///
/// Opposing players drink a potion when badly hurt. Otherwise the actor goes
/// for the player, turning on a random living teammate
/// `teammate_target_chance`% of the time when there is one.
pub fn monster_action(
    field: &Battlefield<'_>,
    actor: CombatantId,
    config: &CombatConfig,
    rng: &mut dyn CombatRng,
) -> CombatAction {
    if let Some(monster) = field.get(actor) {
        let wounded = monster.hp_percent() < config.opponent_heal_threshold_pct;
        if monster.kind == CombatantKind::OpposingPlayer
            && wounded
            && monster.consumables.healing_potions > 0
        {
            return CombatAction::Heal;
        }
    }

    let teammates = field.living_teammates();
    if !teammates.is_empty() && rng.chance(config.teammate_target_chance) {
        return CombatAction::attack_target(teammates[rng.pick(teammates.len())]);
    }
    CombatAction::attack_target(CombatantId::PLAYER)
}

/// Companions focus the weakest living monster.
pub fn teammate_action(field: &Battlefield<'_>) -> CombatAction {
    CombatAction::Attack {
        target: targeting::weakest_monster(field),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::SequenceRng;
    use crate::state::{Combatant, Consumables};

    #[test]
    fn monsters_go_for_the_player_without_teammates() {
        let mut player = Combatant::player("Hero", 1, 10);
        let mut monsters = vec![Combatant::monster("Rat", 1, 5)];
        let field = Battlefield::new(&mut player, &mut [], &mut monsters);
        let mut rng = SequenceRng::default();

        assert_eq!(
            monster_action(&field, CombatantId(1), &CombatConfig::default(), &mut rng),
            CombatAction::attack_target(CombatantId::PLAYER)
        );
        assert_eq!(rng.drawn(), 0);
    }

    #[test]
    fn monsters_sometimes_turn_on_teammates() {
        let mut player = Combatant::player("Hero", 1, 10);
        let mut teammates = vec![Combatant::teammate("Squire", 1, 10)];
        let mut monsters = vec![Combatant::monster("Rat", 1, 5)];
        let field = Battlefield::new(&mut player, &mut teammates, &mut monsters);
        let config = CombatConfig::default();

        let mut rng = SequenceRng::new([25]);
        assert_eq!(
            monster_action(&field, CombatantId(2), &config, &mut rng),
            CombatAction::attack_target(CombatantId(1))
        );

        let mut rng = SequenceRng::new([26]);
        assert_eq!(
            monster_action(&field, CombatantId(2), &config, &mut rng),
            CombatAction::attack_target(CombatantId::PLAYER)
        );
    }

    #[test]
    fn wounded_opponent_drinks_a_potion() {
        let mut player = Combatant::player("Hero", 1, 10);
        let mut rival = Combatant::new(CombatantKind::OpposingPlayer, "Rival", 3, 100)
            .with_hp(20)
            .with_consumables(Consumables {
                healing_potions: 1,
                ..Consumables::default()
            });
        let field = Battlefield::new(&mut player, &mut [], core::slice::from_mut(&mut rival));
        let mut rng = SequenceRng::default();

        assert_eq!(
            monster_action(&field, CombatantId(1), &CombatConfig::default(), &mut rng),
            CombatAction::Heal
        );
    }
}
