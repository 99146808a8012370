//! Presentation layer: turning structured combat events into output.
//!
//! The core never formats text for a screen. [`Narrator`] renders log entries
//! through a [`Display`] with a [`Style`] hint and optional pacing, and
//! [`JsonLinesSink`] exports the raw entries for replay or debugging.

mod narrator;
mod sink;

pub use narrator::{Display, MemoryDisplay, Narrator, Style};
pub use sink::JsonLinesSink;
