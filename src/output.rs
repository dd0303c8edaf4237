//! # Terminal Output
//!
//! Controls how the CLI decorates its status lines. Decoration is turned off
//! for non-terminals and when the user asks for plain output.
//!
//! ## Respected Settings
//!
//! - `--color=never|always|auto`
//! - `NO_COLOR` (any value, including empty)
//! - `CLICOLOR=0` and `CLICOLOR_FORCE=1`
//! - `TERM=dumb`

use std::env;

use console::style;

/// Output decoration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Build from the `--color` flag value, falling back to environment
    /// detection for `auto` and unrecognized values.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stderr().features().colors_supported()
    }

    /// Prefix for a successful step.
    pub fn ok(&self) -> String {
        self.marker("✔", "[OK]", Tone::Good)
    }

    /// Prefix for a skipped or degraded step.
    pub fn warn(&self) -> String {
        self.marker("!", "[WARN]", Tone::Warn)
    }

    /// Prefix for a failed step.
    pub fn err(&self) -> String {
        self.marker("✘", "[ERR]", Tone::Bad)
    }

    fn marker(&self, symbol: &str, plain: &str, tone: Tone) -> String {
        if !self.use_color {
            return plain.to_string();
        }
        let styled = style(symbol).force_styling(true);
        match tone {
            Tone::Good => styled.green().to_string(),
            Tone::Warn => styled.yellow().to_string(),
            Tone::Bad => styled.red().to_string(),
        }
    }
}

enum Tone {
    Good,
    Warn,
    Bad,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
