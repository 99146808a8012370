/// Combat configuration constants and tunable balance parameters.
///
/// Compile-time constants size fixed-capacity containers; the fields are
/// balance knobs that content files may override (see `combat-content`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Critical hit multiplier, in percent of the final attack power.
    pub critical_multiplier_pct: u32,
    /// Multiplier applied to `strength + weapon power` on a successful backstab.
    pub backstab_multiplier: i32,
    /// Chance (percent) that an equipped shield blocks an incoming hit.
    pub shield_block_chance: u32,
    /// Chance (percent) that a retreat succeeds.
    pub retreat_chance: u32,
    /// Minimum damage taken when a retreat or plea fails.
    pub escape_penalty_base: i32,
    /// Rounds after which the encounter is declared a stalemate.
    pub max_rounds: u32,
    /// Free actions (e.g. Status) a player may take before the turn defaults to Attack.
    pub max_free_actions: u32,
    /// HP restored by a healing potion before the level roll.
    pub potion_heal: i32,
    /// Mana spent by QuickHeal.
    pub quick_heal_mana: i32,
    /// Mana restored by a mana potion.
    pub mana_potion_restore: i32,
    /// Turns a stance or rage lasts.
    pub stance_duration: u8,
    /// Turns a successful disarm lasts.
    pub disarm_duration: u8,
    /// Turns a successful taunt lasts.
    pub taunt_duration: u8,
    /// Defence lost by a taunted combatant.
    pub taunt_defence_penalty: i32,
    /// Attack power lost when striking a blurred combatant.
    pub blur_penalty: i32,
    /// Absorption pool granted by a stoneskin effect.
    pub stoneskin_pool: i32,
    /// Chance (percent) that a monster turns on a teammate instead of the player.
    pub teammate_target_chance: u32,
    /// HP percentage below which an opposing player drinks a potion.
    pub opponent_heal_threshold_pct: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per status kind.
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== fixed rules =====
    pub const CRIT_DIE: i32 = 20;
    pub const RAGE_DEFENCE_BONUS: i32 = 4;
    pub const BLESS_BONUS: i32 = 2;
    pub const WEAKEN_PENALTY: i32 = 4;
    pub const POISON_TICK_MAX: i32 = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CRITICAL_MULTIPLIER_PCT: u32 = 200;
    pub const DEFAULT_BACKSTAB_MULTIPLIER: i32 = 3;
    pub const DEFAULT_SHIELD_BLOCK_CHANCE: u32 = 20;
    pub const DEFAULT_RETREAT_CHANCE: u32 = 50;
    pub const DEFAULT_ESCAPE_PENALTY_BASE: i32 = 3;
    pub const DEFAULT_MAX_ROUNDS: u32 = 200;

    pub fn new() -> Self {
        Self {
            critical_multiplier_pct: Self::DEFAULT_CRITICAL_MULTIPLIER_PCT,
            backstab_multiplier: Self::DEFAULT_BACKSTAB_MULTIPLIER,
            shield_block_chance: Self::DEFAULT_SHIELD_BLOCK_CHANCE,
            retreat_chance: Self::DEFAULT_RETREAT_CHANCE,
            escape_penalty_base: Self::DEFAULT_ESCAPE_PENALTY_BASE,
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            max_free_actions: 3,
            potion_heal: 25,
            quick_heal_mana: 8,
            mana_potion_restore: 20,
            stance_duration: 3,
            disarm_duration: 2,
            taunt_duration: 3,
            taunt_defence_penalty: 4,
            blur_penalty: 5,
            stoneskin_pool: 15,
            teammate_target_chance: 25,
            opponent_heal_threshold_pct: 30,
        }
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
