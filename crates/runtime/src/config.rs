//! Runner configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for driving encounters from the runtime.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Base seed; each encounter derives its own stream from it.
    /// `None` draws a fresh seed from the operating system.
    pub seed: Option<u64>,
    /// Delay between narrated lines.
    pub pacing: Duration,
    /// Skip the prompt and let the player auto-attack.
    pub auto_combat: bool,
    /// Capacity of each event bus topic.
    pub event_capacity: usize,
    /// File that receives every log entry as a JSON line.
    pub export_path: Option<PathBuf>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            pacing: Duration::ZERO,
            auto_combat: false,
            event_capacity: Self::DEFAULT_EVENT_CAPACITY,
            export_path: None,
        }
    }
}

impl RunnerConfig {
    pub const DEFAULT_EVENT_CAPACITY: usize = 256;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_SEED` - Base RNG seed (default: random)
    /// - `COMBAT_PACING_MS` - Milliseconds between narrated lines (default: 0)
    /// - `COMBAT_AUTO` - Auto-combat instead of prompting (default: false)
    /// - `COMBAT_EVENT_CAPACITY` - Event bus capacity per topic (default: 256)
    /// - `COMBAT_EXPORT` - Path of a JSON-lines event export (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.seed = read_env::<u64>("COMBAT_SEED");

        if let Some(millis) = read_env::<u64>("COMBAT_PACING_MS") {
            config.pacing = Duration::from_millis(millis);
        }

        if let Some(auto) = read_env::<bool>("COMBAT_AUTO") {
            config.auto_combat = auto;
        } else if env::var("COMBAT_AUTO").is_ok() {
            // A bare `COMBAT_AUTO=` still opts in.
            config.auto_combat = true;
        }

        if let Some(capacity) = read_env::<usize>("COMBAT_EVENT_CAPACITY") {
            config.event_capacity = capacity.max(1);
        }

        config.export_path = env::var_os("COMBAT_EXPORT").map(PathBuf::from);

        config
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
