//! # tasklist - Interactive Task List
//!
//! A single-user command-line task tracker. Tasks carry a priority, a due date,
//! a due time and a free-text description, and are kept in `tasklist.json` in
//! the working directory between runs.
//!
//! ## Session
//!
//! ```text
//! Input an action (add, print, edit, delete, end):
//! add
//! Input the task priority (C, H, N, L):
//! h
//! Input the date (yyyy-mm-dd):
//! 2024-03-01
//! Input the time (hh:mm):
//! 9:30
//! Input a new task (enter a blank line to end):
//! Buy milk
//!
//! Input an action (add, print, edit, delete, end):
//! end
//! Tasklist exiting!
//! ```
//!
//! ## Table
//!
//! `print` shows every task as a bordered row. The `P` column is colored by
//! priority (Critical red, High yellow, Normal green, Low blue) and the `D`
//! column by due status (overdue red, today yellow, incoming green).
//! Descriptions wrap at 44 characters.
//!
//! ## Environment
//!
//! - `TASKLIST_DB` - use another file instead of `./tasklist.json`.
//! - `TASKLIST_LOG` - log specification for stderr diagnostics (default `warn`).
//! - `NO_COLOR` - suppress ANSI colors in the table.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod fields;
pub mod logging;
pub mod prompt;
pub mod table;
pub mod task;

use cli::Cli;
use config::Config;
use db::Database;
use logging::init_logging;
use prompt::Console;
use table::ColorMode;

const FAREWELL: &str = "Tasklist exiting!";

fn main() {
    let _cli = Cli::parse();
    let config = Config::from_env();

    let _logger = match init_logging(&config.log_spec) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Warning: {e}");
            None
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<()> {
    let mut db = Database::load(&config.db_path)
        .with_context(|| format!("failed to load {}", config.db_path.display()))?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout().lock());
    cmd::run(&mut db, &config.db_path, &mut console, ColorMode::Ansi)?;
    console.say(FAREWELL)?;
    Ok(())
}
