//! Interactive questionnaire loop

use colored::Colorize;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ClickOutcome, LevelItem, Navigator};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::domain::NodeId;
use crate::infrastructure::traits::Prompter;
use crate::infrastructure::InfraError;

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionInput {
    /// Click the item at a 1-based position
    Click(usize),
    /// Confirm the item at a 1-based position
    Activate(usize),
    Back,
    /// Close the comment popup
    Dismiss,
    Help,
    Quit,
}

/// Parse a command line: `N`, `a N`, `b`, `c`, `h`/`?`, `q`.
pub fn parse_input(line: &str) -> Option<SessionInput> {
    let mut words = line.split_whitespace();
    let first = words.next()?;
    let input = match first {
        "b" | "back" => SessionInput::Back,
        "c" | "close" => SessionInput::Dismiss,
        "h" | "help" | "?" => SessionInput::Help,
        "q" | "quit" | "exit" => SessionInput::Quit,
        "a" | "activate" => SessionInput::Activate(words.next()?.parse().ok()?),
        n => SessionInput::Click(n.parse().ok()?),
    };
    if words.next().is_some() {
        return None;
    }
    match input {
        SessionInput::Click(0) | SessionInput::Activate(0) => None,
        other => Some(other),
    }
}

/// Render one option line.
pub fn render_item(position: usize, item: &LevelItem<'_>) -> String {
    if !item.effectively_visible {
        return format!("{position:>3}. {}", "░░░░░░ (click to reveal)".dimmed());
    }
    let check = if !item.node.requires_activation {
        "   "
    } else if item.is_activated {
        "[x]"
    } else {
        "[ ]"
    };
    let more = if item.has_children { " ›" } else { "" };
    format!(
        "{position:>3}. {check} {}{more}",
        output::styled_label(&item.node.label)
    )
}

fn render_level(navigator: &Navigator) {
    let crumbs = navigator
        .breadcrumb()
        .iter()
        .map(|node| node.label.as_str())
        .join(" > ");
    println!();
    output::header(&crumbs);
    let items = navigator.current_items();
    if items.is_empty() {
        output::detail(&"(no further options)");
    }
    for (index, item) in items.iter().enumerate() {
        output::info(&render_item(index + 1, item));
    }
}

fn print_help() {
    output::detail(&"N      click option N (reveal, select or descend)");
    output::detail(&"a N    confirm option N (marked [ ])");
    output::detail(&"b      back one level");
    output::detail(&"c      close comment");
    output::detail(&"q      quit");
}

/// Run the read-render loop until quit or end of input.
#[instrument(level = "debug", skip_all)]
pub fn run_session(navigator: &mut Navigator, prompter: &dyn Prompter) -> CliResult<()> {
    loop {
        render_level(navigator);
        if let Some(text) = navigator.shown_comment() {
            output::comment(text);
        }

        let Some(line) = prompter
            .read_line(">")
            .map_err(|e| CliError::Infra(InfraError::io("read input", e)))?
        else {
            debug!("end of input");
            return Ok(());
        };
        let Some(input) = parse_input(&line) else {
            if !line.trim().is_empty() {
                output::warning(&format!("unknown input: {line} (h for help)"));
            }
            continue;
        };
        if !apply_input(navigator, input) {
            return Ok(());
        }
    }
}

/// The option shown at a 1-based position, detached from the navigator borrow.
struct Target {
    id: NodeId,
    comment: Option<String>,
    requires_activation: bool,
    visible: bool,
}

fn target(navigator: &Navigator, position: usize) -> Option<Target> {
    navigator
        .current_items()
        .get(position.checked_sub(1)?)
        .map(|item| Target {
            id: item.node.id,
            comment: item.node.comment.clone(),
            requires_activation: item.node.requires_activation,
            visible: item.effectively_visible,
        })
}

/// Apply one input; returns false on quit.
pub fn apply_input(navigator: &mut Navigator, input: SessionInput) -> bool {
    match input {
        SessionInput::Quit => return false,
        SessionInput::Help => print_help(),
        SessionInput::Dismiss => navigator.dismiss_comment(),
        SessionInput::Back => {
            if !navigator.back() {
                output::warning(&"already at the first question");
            }
        }
        SessionInput::Activate(position) => match target(navigator, position) {
            Some(item) if !item.visible => {
                output::warning(&format!("option {position} is hidden, click it to reveal first"))
            }
            Some(item) if !item.requires_activation => {
                output::warning(&format!("option {position} needs no confirmation"))
            }
            Some(item) => {
                navigator.activate(item.id, item.comment.as_deref());
            }
            None => output::warning(&format!("no option {position}")),
        },
        SessionInput::Click(position) => match target(navigator, position) {
            Some(item) => {
                let result = navigator.click(item.id);
                match result.outcome {
                    ClickOutcome::Rejected(rejection) => output::warning(&rejection),
                    ClickOutcome::LeafSelected => {
                        output::success(&"end of this branch (b to go back)")
                    }
                    ClickOutcome::Revealed
                    | ClickOutcome::Descended(_)
                    | ClickOutcome::Ignored => {}
                }
            }
            None => output::warning(&format!("no option {position}")),
        },
    }
    true
}
