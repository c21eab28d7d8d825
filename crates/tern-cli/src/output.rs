// SPDX-License-Identifier: (MIT OR Apache-2.0)

//! Terminal styling.
//!
//! Respects NO_COLOR and FORCE_COLOR. Colors are off when piped.

use colored::{ColoredString, Colorize};

pub fn init() {
    if std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
    } else if std::env::var("FORCE_COLOR").is_ok() {
        colored::control::set_override(true);
    }
}

pub fn error_label() -> ColoredString {
    "error".red().bold()
}

pub fn note_label() -> ColoredString {
    "note".cyan()
}

pub fn banner_ok(phase: &str, count: usize) -> String {
    let msg = if count == 1 {
        format!("{} OK: 1 thunk", phase)
    } else {
        format!("{} OK: {} thunks", phase, count)
    };
    format!("{} {} {}", "===".dimmed(), msg.green().bold(), "===".dimmed())
}

pub fn banner_fail(phase: &str) -> String {
    format!(
        "{} {} {}",
        "===".dimmed(),
        format!("{} FAILED", phase).red().bold(),
        "===".dimmed()
    )
}
