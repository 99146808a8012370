//! Topic-based event bus for encounter events.
//!
//! Every log entry is published on [`Topic::Combat`]; round boundaries, player
//! prompts and the final outcome go to [`Topic::Turn`]. Consumers subscribe
//! only to the topics they need.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{CombatMessage, TurnEvent};
