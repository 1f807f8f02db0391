//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Guided questionnaire: reveal, confirm and descend a graph of questions level by level
#[derive(Parser, Debug)]
#[command(name = "leitfaden")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub debug: u8,

    /// Local config file (default: ./.leitfaden.toml)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory or http(s) URL holding the collections
    #[arg(long, global = true, env = "LEITFADEN_DATA")]
    pub data: Option<String>,

    /// Start node id
    #[arg(long, global = true)]
    pub start: Option<i64>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk the questionnaire interactively
    Run,

    /// Load the dataset and report its state
    Check {
        /// Print the debug snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the question graph from the root
    Tree,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show config file locations
    Path,
}
