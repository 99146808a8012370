//! Terminal display and line input built on crossterm.

use std::io::{self, BufRead, Write};

use async_trait::async_trait;
use combat_runtime::{Display, InputSource, Style};
use crossterm::queue;
use crossterm::style::{Print, PrintStyledContent, StyledContent, Stylize};

/// Writes narrated lines to stdout with colors per [`Style`].
pub struct TerminalDisplay;

impl TerminalDisplay {
    fn paint(text: &str, style: Style) -> StyledContent<&str> {
        match style {
            Style::Normal => text.stylize(),
            Style::Header => text.bold().cyan(),
            Style::Damage => text.yellow(),
            Style::Danger => text.red(),
            Style::Positive => text.green(),
            Style::Warning => text.magenta(),
            Style::Emphasis => text.bold(),
            Style::Muted => text.dark_grey(),
        }
    }
}

impl Display for TerminalDisplay {
    fn write(&self, text: &str, style: Style) {
        let mut out = io::stdout().lock();
        let written = queue!(out, PrintStyledContent(Self::paint(text, style)), Print("\n"))
            .and_then(|()| out.flush());
        if let Err(err) = written {
            tracing::warn!(error = %err, "failed to write to terminal");
        }
    }
}

/// Reads one line from stdin per choice on a blocking thread.
pub struct StdinInput;

#[async_trait]
impl InputSource for StdinInput {
    async fn get_choice(&self, prompt: &str) -> io::Result<Option<String>> {
        let prompt = prompt.to_owned();
        tokio::task::spawn_blocking(move || {
            let mut out = io::stdout().lock();
            queue!(out, PrintStyledContent(prompt.as_str().bold()))?;
            out.flush()?;

            let mut line = String::new();
            match io::stdin().lock().read_line(&mut line)? {
                0 => Ok(None),
                _ => Ok(Some(line.trim_end().to_owned())),
            }
        })
        .await
        .map_err(io::Error::other)?
    }
}
