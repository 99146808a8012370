use super::arena::Battlefield;

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Victory,
    #[strum(to_string = "Player Died")]
    PlayerDied,
    #[strum(to_string = "Player Escaped")]
    PlayerEscaped,
    /// The round limit ran out.
    Stalemate,
    /// The driver stopped the session.
    Interrupted,
}

impl Outcome {
    pub const fn is_victory(self) -> bool {
        matches!(self, Self::Victory)
    }

    /// Whether the player walks away alive.
    pub const fn player_survived(self) -> bool {
        !matches!(self, Self::PlayerDied)
    }
}

/// Terminal guards, in priority order: a dead player, a cleared field, then
/// a successful escape. `None` while the fight goes on.
pub fn evaluate(field: &Battlefield<'_>) -> Option<Outcome> {
    if !field.player().is_alive() {
        Some(Outcome::PlayerDied)
    } else if field.all_monsters_dead() {
        Some(Outcome::Victory)
    } else if field.flags().escaped {
        Some(Outcome::PlayerEscaped)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Combatant;

    #[test]
    fn death_outranks_victory() {
        let mut player = Combatant::player("Hero", 1, 10).with_hp(0);
        let mut monsters = vec![Combatant::monster("Rat", 1, 5).with_hp(0)];
        let field = Battlefield::new(&mut player, &mut [], &mut monsters);
        assert_eq!(evaluate(&field), Some(Outcome::PlayerDied));
    }

    #[test]
    fn victory_outranks_escape() {
        let mut player = Combatant::player("Hero", 1, 10);
        let mut monsters = vec![Combatant::monster("Rat", 1, 5).with_hp(0)];
        let mut field = Battlefield::new(&mut player, &mut [], &mut monsters);
        field.flags.escaped = true;
        assert_eq!(evaluate(&field), Some(Outcome::Victory));
    }

    #[test]
    fn ongoing_fight_has_no_outcome() {
        let mut player = Combatant::player("Hero", 1, 10);
        let mut monsters = vec![Combatant::monster("Rat", 1, 5)];
        let field = Battlefield::new(&mut player, &mut [], &mut monsters);
        assert_eq!(evaluate(&field), None);
    }
}
