//! UI context for environment detection and configuration.

use std::io::IsTerminal;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether the stream styled lines go to is a TTY
    pub is_tty: bool,
    /// Whether color output is enabled
    pub color: bool,
    /// Styled lines go to stderr so stdout carries only JSON
    pub json: bool,
}

impl UiContext {
    /// Create context from environment, CLI flags and config.
    ///
    /// # Arguments
    /// * `json_flag` - Whether `--json` was passed
    /// * `no_color_flag` - Whether `--no-color` was passed
    /// * `config_color` - `[ui] color` from the config file, if set
    pub fn from_env(json_flag: bool, no_color_flag: bool, config_color: Option<bool>) -> Self {
        let is_tty = if json_flag {
            std::io::stderr().is_terminal()
        } else {
            std::io::stdout().is_terminal()
        };
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var_os("NO_COLOR").is_some();

        Self {
            is_tty,
            color: resolve_color(
                is_tty,
                no_color_flag,
                no_color_env,
                term_is_dumb,
                config_color,
            ),
            json: json_flag,
        }
    }
}

/// Color only on a TTY, and only when nothing asks for it to be off.
fn resolve_color(
    is_tty: bool,
    no_color_flag: bool,
    no_color_env: bool,
    term_is_dumb: bool,
    config_color: Option<bool>,
) -> bool {
    is_tty && !no_color_flag && !no_color_env && !term_is_dumb && config_color != Some(false)
}
