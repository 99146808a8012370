//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use combat_runtime::RunnerConfig;

/// Everything the `skirmish` binary needs before it starts a run.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub runner: RunnerConfig,
    /// Directory holding `combat.toml`, `bestiary.ron`, `spells.ron`,
    /// `loot.ron` and `heroes/`.
    pub data_dir: PathBuf,
    /// Hero sheet name under `heroes/`.
    pub hero: String,
    /// Opponent sheet for duels.
    pub rival: String,
    /// Floors in a campaign; each floor is one encounter one level deeper.
    pub floors: u32,
    pub session_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            runner: RunnerConfig::default(),
            data_dir: PathBuf::from("data"),
            hero: "aldric".to_owned(),
            rival: "rival".to_owned(),
            floors: 5,
            session_id: None,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SKIRMISH_DATA_DIR` - Content directory (default: `data`)
    /// - `SKIRMISH_HERO` - Hero sheet name (default: `aldric`)
    /// - `SKIRMISH_RIVAL` - Duel opponent sheet name (default: `rival`)
    /// - `SKIRMISH_FLOORS` - Campaign length (default: 5)
    /// - `SKIRMISH_SESSION_ID` - Log session identifier (default: timestamp)
    /// - `COMBAT_*` - See [`RunnerConfig::from_env`]
    pub fn from_env() -> Self {
        let mut config = Self {
            runner: RunnerConfig::from_env(),
            ..Self::default()
        };

        if let Some(dir) = env::var_os("SKIRMISH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(hero) = env::var("SKIRMISH_HERO") {
            config.hero = hero;
        }
        if let Ok(rival) = env::var("SKIRMISH_RIVAL") {
            config.rival = rival;
        }
        if let Some(floors) = read_env::<u32>("SKIRMISH_FLOORS") {
            config.floors = floors.max(1);
        }
        config.session_id = env::var("SKIRMISH_SESSION_ID").ok();

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
