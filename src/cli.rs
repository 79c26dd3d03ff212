use clap::Parser;

/// Interactive task list kept in ./tasklist.json.
/// Takes no arguments; run it and follow the prompts.
#[derive(Parser)]
#[command(name = "tasklist", version, about = "Interactive task list with due-date coloring")]
pub struct Cli {}
