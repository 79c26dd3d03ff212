//! Interactive command loop.
//!
//! This module reads top-level actions from the console and dispatches them to
//! the add/print/edit/delete handlers until `end` is entered, at which point
//! the task list is written back to disk.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};

use crate::db::Database;
use crate::prompt::{fold, Console};
use crate::table::{print_table, ColorMode};
use crate::task::Task;

pub const ACTION_PROMPT: &str = "Input an action (add, print, edit, delete, end):";
pub const ACTION_INVALID: &str = "The input action is invalid";
pub const TASK_BLANK: &str = "The task is blank";
pub const TASK_NUMBER_INVALID: &str = "Invalid task number";
pub const TASK_DELETED: &str = "The task is deleted";
pub const FIELD_PROMPT: &str = "Input a field to edit (priority, date, time, task):";
pub const FIELD_INVALID: &str = "Invalid field";
pub const TASK_CHANGED: &str = "The task is changed";

/// Top-level actions accepted at the command prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    Print,
    Edit,
    Delete,
    End,
}

impl Action {
    /// Case-insensitive; tabs fold to spaces and surrounding whitespace is ignored.
    pub fn parse(line: &str) -> Option<Self> {
        match fold(line).to_lowercase().as_str() {
            "add" => Some(Action::Add),
            "print" => Some(Action::Print),
            "edit" => Some(Action::Edit),
            "delete" => Some(Action::Delete),
            "end" => Some(Action::End),
            _ => None,
        }
    }
}

/// Task fields that can be changed by `edit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Priority,
    Date,
    Time,
    Description,
}

impl Field {
    pub fn parse(line: &str) -> Option<Self> {
        match fold(line).to_lowercase().as_str() {
            "priority" => Some(Field::Priority),
            "date" => Some(Field::Date),
            "time" => Some(Field::Time),
            "task" => Some(Field::Description),
            _ => None,
        }
    }
}

/// Parse a 1-based task number. Only plain digits within `1..=count` are accepted.
pub fn parse_position(line: &str, count: usize) -> Option<usize> {
    let s = fold(line);
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<usize>().ok().filter(|n| (1..=count).contains(n))
}

/// Run the loop until `end`, then save the task list to `db_path`.
pub fn run<R: BufRead, W: Write>(
    db: &mut Database,
    db_path: &Path,
    console: &mut Console<R, W>,
    mode: ColorMode,
) -> Result<()> {
    loop {
        let line = console.ask(ACTION_PROMPT)?;
        let Some(action) = Action::parse(&line) else {
            console.say(ACTION_INVALID)?;
            continue;
        };
        debug!("action {action:?}");
        match action {
            Action::Add => cmd_add(db, console)?,
            Action::Print => {
                cmd_print(db, console, mode)?;
            }
            Action::Edit => cmd_edit(db, console, mode)?,
            Action::Delete => cmd_delete(db, console, mode)?,
            Action::End => break,
        }
    }
    db.save(db_path)
        .with_context(|| format!("failed to save {}", db_path.display()))?;
    Ok(())
}

/// Prompt for every field and append the task unless its description is blank.
pub fn cmd_add<R: BufRead, W: Write>(db: &mut Database, console: &mut Console<R, W>) -> io::Result<()> {
    let priority = console.ask_priority()?;
    let date = console.ask_date()?;
    let time = console.ask_time()?;
    let description = console.ask_description()?;
    if description.is_empty() {
        return console.say(TASK_BLANK);
    }
    db.push(Task::new(priority, date, time, description));
    info!("added task {}", db.len());
    Ok(())
}

/// Render the table against the current time and return the task count.
pub fn cmd_print<R: BufRead, W: Write>(
    db: &Database,
    console: &mut Console<R, W>,
    mode: ColorMode,
) -> io::Result<usize> {
    let count = print_table(console.output(), &db.tasks, Utc::now(), mode)?;
    console.output().flush()?;
    Ok(count)
}

/// Show the table and ask for a task number. `None` when the list is empty.
fn select_position<R: BufRead, W: Write>(
    db: &Database,
    console: &mut Console<R, W>,
    mode: ColorMode,
) -> io::Result<Option<usize>> {
    let count = cmd_print(db, console, mode)?;
    if count == 0 {
        return Ok(None);
    }
    let prompt = format!("Input the task number (1-{count}):");
    loop {
        let line = console.ask(&prompt)?;
        match parse_position(&line, count) {
            Some(position) => return Ok(Some(position)),
            None => console.say(TASK_NUMBER_INVALID)?,
        }
    }
}

pub fn cmd_delete<R: BufRead, W: Write>(
    db: &mut Database,
    console: &mut Console<R, W>,
    mode: ColorMode,
) -> io::Result<()> {
    let Some(position) = select_position(db, console, mode)? else {
        return Ok(());
    };
    if db.remove(position).is_some() {
        info!("deleted task {position}");
        console.say(TASK_DELETED)?;
    }
    Ok(())
}

/// Change exactly one field of the chosen task.
pub fn cmd_edit<R: BufRead, W: Write>(
    db: &mut Database,
    console: &mut Console<R, W>,
    mode: ColorMode,
) -> io::Result<()> {
    let Some(position) = select_position(db, console, mode)? else {
        return Ok(());
    };
    let field = console.ask_until(FIELD_PROMPT, Some(FIELD_INVALID), Field::parse)?;
    let Some(task) = db.get_mut(position) else {
        return Ok(());
    };
    match field {
        Field::Priority => task.priority = console.ask_priority()?,
        Field::Date => task.date = console.ask_date()?,
        Field::Time => task.time = console.ask_time()?,
        Field::Description => task.description = console.ask_description()?,
    }
    info!("edited {field:?} of task {position}");
    console.say(TASK_CHANGED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Priority;
    use crate::table::NO_TASKS;
    use chrono::{NaiveDate, NaiveTime};
    use std::io::Cursor;

    type TestConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

    fn console(input: &str) -> TestConsole {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn output(c: TestConsole) -> String {
        String::from_utf8(c.into_output()).unwrap()
    }

    fn milk() -> Task {
        Task::new(
            Priority::High,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            "Buy milk\n".into(),
        )
    }

    fn run_session(db: &mut Database, input: &str) -> (String, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasklist.json");
        let mut c = console(input);
        run(db, &path, &mut c, ColorMode::Plain).unwrap();
        (output(c), dir)
    }

    #[test]
    fn action_parsing() {
        assert_eq!(Action::parse("ADD"), Some(Action::Add));
        assert_eq!(Action::parse("\tprint "), Some(Action::Print));
        assert_eq!(Action::parse("End"), Some(Action::End));
        assert_eq!(Action::parse("remove"), None);
        assert_eq!(Field::parse("Task"), Some(Field::Description));
        assert_eq!(Field::parse("description"), None);
    }

    #[test]
    fn position_parsing() {
        assert_eq!(parse_position("2", 3), Some(2));
        assert_eq!(parse_position(" 3 ", 3), Some(3));
        assert_eq!(parse_position("0", 3), None);
        assert_eq!(parse_position("4", 3), None);
        assert_eq!(parse_position("-1", 3), None);
        assert_eq!(parse_position("+1", 3), None);
        assert_eq!(parse_position("one", 3), None);
        assert_eq!(parse_position("", 3), None);
    }

    #[test]
    fn add_then_print_shows_the_row() {
        let mut db = Database::default();
        let (out, _dir) = run_session(&mut db, "add\nh\n2024-03-01\n9:30\nBuy milk\n\nprint\nend\n");
        assert_eq!(db.tasks, vec![milk()]);
        assert!(out.contains("| 1  | 2024-03-01 | 09:30 | H |"));
        assert!(out.contains("|Buy milk                                    |"));
    }

    #[test]
    fn add_with_blank_description_is_rejected() {
        let mut db = Database::default();
        let (out, _dir) = run_session(&mut db, "add\nc\n2024-03-01\n10:00\n\nend\n");
        assert!(db.is_empty());
        assert!(out.contains(TASK_BLANK));
    }

    #[test]
    fn unknown_action_is_reported() {
        let mut db = Database::default();
        let (out, _dir) = run_session(&mut db, "list\nend\n");
        assert!(out.contains(ACTION_INVALID));
    }

    #[test]
    fn delete_and_edit_on_empty_list_do_not_prompt() {
        let mut db = Database::default();
        let (out, _dir) = run_session(&mut db, "delete\nedit\nend\n");
        assert_eq!(out.matches(NO_TASKS).count(), 2);
        assert!(!out.contains("Input the task number"));
    }

    #[test]
    fn delete_retries_bad_numbers() {
        let mut db = Database {
            tasks: vec![milk(), milk()],
        };
        db.tasks[1].description = "Second\n".into();
        let (out, _dir) = run_session(&mut db, "delete\nx\n3\n\n1\nend\n");
        assert_eq!(out.matches(TASK_NUMBER_INVALID).count(), 3);
        assert!(out.contains("Input the task number (1-2):"));
        assert!(out.contains(TASK_DELETED));
        assert_eq!(db.len(), 1);
        assert_eq!(db.tasks[0].description, "Second\n");
    }

    #[test]
    fn edit_priority_changes_only_that_field() {
        let mut db = Database { tasks: vec![milk()] };
        let (out, _dir) = run_session(&mut db, "edit\n1\ncolour\npriority\nl\nend\n");
        assert!(out.contains(FIELD_INVALID));
        assert!(out.contains(TASK_CHANGED));
        let expected = Task {
            priority: Priority::Low,
            ..milk()
        };
        assert_eq!(db.tasks, vec![expected]);
    }

    #[test]
    fn edit_description_and_time() {
        let mut db = Database { tasks: vec![milk()] };
        let (_out, _dir) = run_session(
            &mut db,
            "edit\n1\ntask\nBuy bread\nand eggs\n\nedit\n1\nTIME\n0745\nend\n",
        );
        assert_eq!(db.tasks[0].description, "Buy bread\nand eggs\n");
        assert_eq!(db.tasks[0].time_str(), "07:45");
        assert_eq!(db.tasks[0].date_str(), "2024-03-01");
    }

    #[test]
    fn end_saves_even_without_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasklist.json");
        let mut db = Database { tasks: vec![milk()] };
        let mut c = console("end\n");
        run(&mut db, &path, &mut c, ColorMode::Plain).unwrap();
        assert_eq!(Database::load(&path).unwrap(), db);
    }

    #[test]
    fn closed_input_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasklist.json");
        let mut db = Database::default();
        let mut c = console("print\n");
        assert!(run(&mut db, &path, &mut c, ColorMode::Plain).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn invalid_utf8_line_is_an_invalid_action() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasklist.json");
        let mut input = b"add\nH\n2024-03-01\n9:30\nBuy milk\n\n".to_vec();
        input.extend_from_slice(b"pr\xe9nt\n");
        input.extend_from_slice(b"end\n");
        let mut c = Console::new(Cursor::new(input), Vec::new());
        let mut db = Database::default();
        run(&mut db, &path, &mut c, ColorMode::Plain).unwrap();
        assert!(output(c).contains(ACTION_INVALID));
        assert_eq!(Database::load(&path).unwrap().tasks, vec![milk()]);
    }
}
