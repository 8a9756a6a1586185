//! Terminal styling for status lines and errors.

use std::io::IsTerminal;

use owo_colors::OwoColorize;

/// Terminal and environment context for UI decisions.
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether stdout output may be colored
    pub color: bool,
    /// Whether stderr output may be colored
    pub color_stderr: bool,
    /// Whether `--json` was passed
    pub json: bool,
    /// Whether `--quiet` was passed
    pub quiet: bool,
}

impl UiContext {
    /// Create context from environment and CLI flags.
    ///
    /// Color is disabled by `NO_COLOR`, `TERM=dumb`, or a non-terminal stream.
    pub fn from_env(json: bool, quiet: bool) -> Self {
        let term_is_dumb = std::env::var("TERM").map(|v| v == "dumb").unwrap_or(false);
        let no_color_env = std::env::var("NO_COLOR").is_ok();
        let color_allowed = !no_color_env && !term_is_dumb;

        Self {
            color: color_allowed && std::io::stdout().is_terminal(),
            color_stderr: color_allowed && std::io::stderr().is_terminal(),
            json,
            quiet,
        }
    }
}

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Warn,
    Err,
}

impl Badge {
    /// Get badge text (e.g., "[OK]")
    pub fn text(&self) -> &'static str {
        match self {
            Self::Ok => "[OK]",
            Self::Warn => "[WARN]",
            Self::Err => "[ERR]",
        }
    }

    fn paint(&self, color: bool) -> String {
        if !color {
            return self.text().to_string();
        }
        match self {
            Self::Ok => self.text().green().bold().to_string(),
            Self::Warn => self.text().yellow().bold().to_string(),
            Self::Err => self.text().red().bold().to_string(),
        }
    }
}

/// Render a badge followed by a message.
pub fn badge(color: bool, kind: Badge, message: &str) -> String {
    format!("{} {}", kind.paint(color), message)
}

/// Render a `key: value` line.
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.color {
        format!("{:>14}: {}", key.dimmed(), value)
    } else {
        format!("{:>14}: {}", key, value)
    }
}

/// Print an error (and optional hint) to stderr.
pub fn print_error(ctx: &UiContext, message: &str) {
    let (message, hint) = match message.find("\nHint:") {
        Some(idx) => (&message[..idx], Some(&message[idx + 1..])),
        None => (message, None),
    };
    eprintln!("{}", badge(ctx.color_stderr, Badge::Err, message));
    if let Some(hint) = hint {
        if ctx.color_stderr {
            eprintln!("{}", hint.dimmed());
        } else {
            eprintln!("{}", hint);
        }
    }
}

/// Print a warning to stderr unless quiet.
pub fn print_warning(ctx: &UiContext, message: &str) {
    if !ctx.quiet {
        eprintln!("{}", badge(ctx.color_stderr, Badge::Warn, message));
    }
}
