//! Interactive terminal front-end.

pub mod app;
pub mod console;

pub use app::TerminalApp;
pub use console::Console;

use clap::Parser;
use std::path::PathBuf;

/// GerAI on the terminal: generate, revise and save texts from a menu.
#[derive(Parser, Debug)]
#[command(name = "gerai", version, about)]
pub struct Cli {
    /// Model name; overrides GENERATION_MODEL.
    #[arg(long)]
    pub model: Option<String>,

    /// History database; overrides DATABASE_URL.
    #[arg(long)]
    pub database_url: Option<String>,

    /// Do not read or write the history database.
    #[arg(long)]
    pub no_history: bool,

    /// Directory where saved texts are written.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Log at the configured level instead of warnings only.
    #[arg(short, long)]
    pub verbose: bool,
}

/// An entry of the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Generate,
    Correct,
    History,
    Exit,
}

impl MenuAction {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuAction::Generate),
            "2" => Some(MenuAction::Correct),
            "3" => Some(MenuAction::History),
            "4" => Some(MenuAction::Exit),
            _ => None,
        }
    }
}
