//! Message styles: the glyph and color each severity renders with.

use owo_colors::AnsiColors;
use serde::{Deserialize, Serialize};

/// Severity-like tag selecting the accent glyph and color of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStyle {
    General,
    Notice,
    Success,
    Warning,
    Error,
    #[default]
    None,
}

impl MessageStyle {
    pub const ALL: [MessageStyle; 6] = [
        Self::General,
        Self::Notice,
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::None,
    ];

    /// Glyph shown inside the `[ ]` accent.
    pub fn glyph(&self) -> Option<char> {
        match self {
            Self::General => Some('-'),
            Self::Notice => Some('*'),
            Self::Success => Some('+'),
            Self::Warning => Some('!'),
            Self::Error => Some('x'),
            Self::None => None,
        }
    }

    /// Foreground color; `None` keeps the terminal default.
    pub fn color(&self) -> Option<AnsiColors> {
        match self {
            // ANSI 37 renders as light gray on most terminals
            Self::General => Some(AnsiColors::White),
            Self::Notice => Some(AnsiColors::Cyan),
            Self::Success => Some(AnsiColors::Green),
            Self::Warning => Some(AnsiColors::Yellow),
            Self::Error => Some(AnsiColors::Red),
            Self::None => None,
        }
    }

    /// The `[g]: ` accent prefix, if this style has a glyph.
    pub fn accent(&self) -> Option<String> {
        self.glyph().map(|g| format!("[{}]: ", g))
    }
}

/// Reset all styles
pub const RESET: &str = "\x1b[0m";
