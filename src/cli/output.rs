//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::{ColoredString, Colorize};

use crate::domain::{split_heading, LabelStyle};

/// Force colors off (e.g. `--no-color` or `color = false`)
pub fn disable_colors() {
    colored::control::set_override(false);
}

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print failure status (red X)
pub fn failure(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✗".red(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Print a comment popup as a framed block
pub fn comment(text: &str) {
    println!("{}", "┌─ comment".blue());
    for line in text.lines() {
        println!("{} {}", "│".blue(), line);
    }
    println!("{}", "└─ (c to close)".blue());
}

/// Apply the label's marker style, emphasising the part before the first `;`
pub fn styled_label(label: &str) -> String {
    let paint = |s: &str| -> ColoredString {
        match LabelStyle::classify(label) {
            LabelStyle::Highlight => s.yellow(),
            LabelStyle::Negative => s.red(),
            LabelStyle::Positive => s.green(),
            LabelStyle::Plain => s.normal(),
        }
    };
    match split_heading(label) {
        (Some(heading), rest) => format!("{} {}", paint(heading).bold(), paint(rest)),
        (None, text) => paint(text).to_string(),
    }
}
