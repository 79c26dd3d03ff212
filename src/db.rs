//! Task store backed by a flat JSON file.
//!
//! The whole list is read once at startup and written back once on exit.
//! There is no incremental save and no locking.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use log::{debug, info};
use serde_json::Value;

use crate::task::Task;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Io(io::Error),
    Json(serde_json::Error),
    Malformed { index: Option<usize>, reason: String },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "invalid JSON: {err}"),
            Self::Malformed {
                index: Some(i),
                reason,
            } => write!(f, "task #{}: {reason}", i + 1),
            Self::Malformed { index: None, reason } => f.write_str(reason),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<io::Error> for DbError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DbError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// In-memory ordered task list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    /// Load the task list, or start empty when the file doesn't exist.
    pub fn load(path: &Path) -> DbResult<Self> {
        if !path.exists() {
            debug!("no task file at {}, starting empty", path.display());
            return Ok(Database::default());
        }
        let buf = fs::read_to_string(path)?;
        let db = Self::from_json_str(&buf)?;
        info!("loaded {} task(s) from {}", db.len(), path.display());
        Ok(db)
    }

    /// Save the task list using atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> DbResult<()> {
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        f.write_all(self.to_json_string()?.as_bytes())?;
        f.flush()?;
        fs::rename(&tmp, path)?;
        info!("saved {} task(s) to {}", self.len(), path.display());
        Ok(())
    }

    pub fn from_json_str(s: &str) -> DbResult<Self> {
        let value: Value = serde_json::from_str(s)?;
        let Value::Array(items) = value else {
            return Err(DbError::Malformed {
                index: None,
                reason: "expected a JSON array of tasks".into(),
            });
        };
        let tasks = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                Task::from_json(item).map_err(|reason| DbError::Malformed {
                    index: Some(i),
                    reason,
                })
            })
            .collect::<DbResult<Vec<_>>>()?;
        Ok(Database { tasks })
    }

    pub fn to_json_string(&self) -> DbResult<String> {
        let items: Vec<Value> = self.tasks.iter().map(Task::to_json).collect();
        Ok(serde_json::to_string_pretty(&Value::Array(items))?)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Get a mutable reference to a task by its 1-based position.
    pub fn get_mut(&mut self, position: usize) -> Option<&mut Task> {
        self.tasks.get_mut(position.checked_sub(1)?)
    }

    /// Remove a task by its 1-based position; later tasks shift up by one.
    pub fn remove(&mut self, position: usize) -> Option<Task> {
        let idx = position.checked_sub(1)?;
        (idx < self.tasks.len()).then(|| self.tasks.remove(idx))
    }
}
