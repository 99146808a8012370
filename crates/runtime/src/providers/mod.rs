//! Action providers backed by interactive input.

pub mod command;
pub mod prompt;

pub use command::{menu_lines, parse_command};
pub use prompt::{InputSource, PromptProvider, ScriptedInput};
