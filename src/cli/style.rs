//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escapes when stdout is
//! not a terminal.

use owo_colors::{OwoColorize, Style};
use std::fmt::Display;

/// Check mark used for success lines
pub const CHECK: &str = "✓";

/// Cross used for rejection lines
pub const CROSS: &str = "✗";

/// Semantic styles for CLI output
pub trait Stylize {
    /// Bold text for headings
    fn emphasis(&self) -> String;
    /// Cyan text for names and values
    fn accent(&self) -> String;
    /// Dimmed secondary text
    fn muted(&self) -> String;
    /// Green text
    fn success(&self) -> String;
    /// Yellow text
    fn warn(&self) -> String;
}

fn paint(text: impl Display, style: Style) -> String {
    text.style(style).to_string()
}

impl<T: Display + ?Sized> Stylize for T {
    fn emphasis(&self) -> String {
        paint(self, Style::new().bold())
    }

    fn accent(&self) -> String {
        paint(self, Style::new().cyan())
    }

    fn muted(&self) -> String {
        paint(self, Style::new().dimmed())
    }

    fn success(&self) -> String {
        paint(self, Style::new().green())
    }

    fn warn(&self) -> String {
        paint(self, Style::new().yellow())
    }
}

/// Styled check mark
pub fn check() -> String {
    CHECK.success()
}

/// Styled cross
pub fn cross() -> String {
    CROSS.warn()
}
