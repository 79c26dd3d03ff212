//! Fixed-width bordered table view of the task list.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use crossterm::style::{style, Color, Stylize};

use crate::task::Task;

pub const DESCRIPTION_WIDTH: usize = 44;

const BORDER: &str =
    "+----+------------+-------+---+---+--------------------------------------------+";
const HEADER: &str =
    "| N  |    Date    | Time  | P | D |                   Task                     |";
const CONTINUATION: &str = "|    |            |       |   |   |";

pub const NO_TASKS: &str = "No tasks have been input";

/// How the priority and due-status cells are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// A blank cell with an ANSI background color.
    Ansi,
    /// The single-letter tag, no escape sequences.
    Plain,
}

fn cell(tag: &str, color: Option<Color>, mode: ColorMode) -> String {
    match (mode, color) {
        (ColorMode::Ansi, Some(c)) => style(" ").on(c).to_string(),
        (ColorMode::Ansi, None) => " ".to_string(),
        (ColorMode::Plain, _) => tag.to_string(),
    }
}

/// Split one line into fixed-width chunks. An empty line yields no chunks.
fn chunks(line: &str) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    chars
        .chunks(DESCRIPTION_WIDTH)
        .map(|c| c.iter().collect())
        .collect()
}

/// Rows for one task, without the trailing border. `position` is 1-based.
pub fn task_rows(task: &Task, position: usize, now: DateTime<Utc>, mode: ColorMode) -> Vec<String> {
    let status = task.due_status(now);
    let first = format!(
        "| {:<3}| {} | {} | {} | {} |",
        position,
        task.date_str(),
        task.time_str(),
        cell(task.priority.code(), task.priority.color(), mode),
        cell(status.code(), status.color(), mode),
    );

    let mut pieces: Vec<String> = task.description.lines().flat_map(chunks).collect();
    if pieces.is_empty() {
        pieces.push(String::new());
    }

    pieces
        .iter()
        .enumerate()
        .map(|(i, piece)| {
            let lead = if i == 0 { first.as_str() } else { CONTINUATION };
            format!("{lead}{piece:<width$}|", width = DESCRIPTION_WIDTH)
        })
        .collect()
}

/// Print the table and return how many tasks were shown.
pub fn print_table<W: Write>(
    out: &mut W,
    tasks: &[Task],
    now: DateTime<Utc>,
    mode: ColorMode,
) -> io::Result<usize> {
    if tasks.is_empty() {
        writeln!(out, "{NO_TASKS}")?;
        return Ok(0);
    }
    writeln!(out, "{BORDER}")?;
    writeln!(out, "{HEADER}")?;
    writeln!(out, "{BORDER}")?;
    for (i, task) in tasks.iter().enumerate() {
        for row in task_rows(task, i + 1, now, mode) {
            writeln!(out, "{row}")?;
        }
        writeln!(out, "{BORDER}")?;
    }
    Ok(tasks.len())
}
