use crate::env::CombatRng;
use crate::state::Combatant;

/// Even share of `total` for each of `targets` living targets.
///
/// Integer division: up to `targets - 1` points of the total are dropped.
pub fn split_evenly(total: i32, targets: usize) -> i32 {
    if targets == 0 {
        return 0;
    }
    total.max(0) / targets as i32
}

/// Damage left after the target's own armor roll, floored at 1.
pub fn armor_soak(defender: &Combatant, amount: i32, rng: &mut dyn CombatRng) -> i32 {
    (amount - rng.uniform_int(0, defender.armor_power)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    #[test]
    fn shares_cover_the_total_within_rounding() {
        for total in 0..200 {
            for targets in 1..9usize {
                let share = split_evenly(total, targets);
                let dealt = share * targets as i32;
                assert!(dealt <= total);
                assert!(total - dealt <= targets as i32 - 1);
            }
        }
        assert_eq!(split_evenly(30, 0), 0);
    }

    #[test]
    fn armor_soak_never_drops_below_one() {
        let mut rng = PcgRng::seeded(3);
        let tank = Combatant::monster("Tank", 1, 10).with_armor(50);
        for _ in 0..200 {
            assert!(armor_soak(&tank, 2, &mut rng) >= 1);
        }
    }
}
