//! Styled line writer.

use std::fmt::Write as _;
use std::io::{self, IsTerminal, Stdout, Write};

use chrono::{DateTime, Local};
use owo_colors::OwoColorize;

use super::style::{MessageStyle, RESET};

/// Decoration applied to a single printed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOptions {
    /// Prefix the message with the `[glyph]: ` accent
    pub accents: bool,
    /// Prefix the line with the local date and time
    pub timestamp: bool,
    /// Color the whole line instead of just the glyph
    pub whole_line: bool,
    pub style: MessageStyle,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            accents: true,
            timestamp: false,
            whole_line: false,
            style: MessageStyle::None,
        }
    }
}

impl PrintOptions {
    /// Default decoration with the given style.
    pub fn styled(style: MessageStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn accents(mut self, accents: bool) -> Self {
        self.accents = accents;
        self
    }

    pub fn timestamp(mut self, timestamp: bool) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn whole_line(mut self, whole_line: bool) -> Self {
        self.whole_line = whole_line;
        self
    }
}

/// Format a timestamp prefix, e.g. `6/22/2017 3:04:05 PM`.
pub fn format_timestamp(now: &DateTime<Local>) -> String {
    now.format("%-m/%-d/%Y %-I:%M:%S %p").to_string()
}

/// Writes decorated lines to an output stream.
///
/// Colored spans are closed inside each rendered line, so no color state
/// survives a call. If the stream fails partway through a colored line, a
/// reset sequence is still attempted before `print` returns.
#[derive(Debug)]
pub struct StyledWriter<W: Write> {
    out: W,
    color: bool,
}

impl StyledWriter<Stdout> {
    /// Writer on stdout, colored only when stdout is a terminal and
    /// `NO_COLOR` is unset.
    pub fn stdout() -> Self {
        let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(io::stdout()).with_color(color)
    }
}

impl<W: Write> StyledWriter<W> {
    /// Wrap a stream. Color starts disabled.
    pub fn new(out: W) -> Self {
        Self { out, color: false }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Render a line (without the trailing newline) as it would be printed at `now`.
    pub fn render(&self, message: &str, options: &PrintOptions, now: DateTime<Local>) -> String {
        let mut line = String::new();
        if options.timestamp {
            line.push_str(&format_timestamp(&now));
            line.push(' ');
        }

        let glyph = if options.accents {
            options.style.glyph()
        } else {
            None
        };
        let color = if self.color {
            options.style.color()
        } else {
            None
        };

        match color {
            Some(color) if options.whole_line => {
                if let Some(glyph) = glyph {
                    let _ = write!(line, "[{}]: ", glyph);
                }
                line.push_str(message);
                line.color(color).to_string()
            }
            Some(color) => {
                if let Some(glyph) = glyph {
                    let _ = write!(line, "[{}]: ", glyph.color(color));
                }
                line.push_str(message);
                line
            }
            None => {
                if let Some(glyph) = glyph {
                    let _ = write!(line, "[{}]: ", glyph);
                }
                line.push_str(message);
                line
            }
        }
    }

    /// Print one decorated line.
    pub fn print(&mut self, message: &str, options: PrintOptions) -> io::Result<()> {
        let line = self.render(message, &options, Local::now());
        let colored = self.color && options.style.color().is_some();
        let mut scope = ColorScope::new(&mut self.out, colored);
        scope.write_line(&line)
    }
}

/// Holds the stream while a colored line is in flight; emits a reset on
/// drop unless the line completed.
struct ColorScope<'a, W: Write> {
    out: &'a mut W,
    pending_reset: bool,
}

impl<'a, W: Write> ColorScope<'a, W> {
    fn new(out: &'a mut W, colored: bool) -> Self {
        Self {
            out,
            pending_reset: colored,
        }
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        self.pending_reset = false;
        Ok(())
    }
}

impl<W: Write> Drop for ColorScope<'_, W> {
    fn drop(&mut self) {
        if self.pending_reset {
            let _ = self.out.write_all(RESET.as_bytes());
            let _ = self.out.flush();
        }
    }
}
