//! Task data structure and related functionality.
//!
//! This module defines the `Task` record, its due-status computation and the
//! explicit field-by-field JSON encoding used by the persistence file.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::{json, Map, Value};

use crate::fields::{DueStatus, Priority};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

/// A single entry in the task list. Identity is its position in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub priority: Priority,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Multi-line text; every line is stored with a trailing newline.
    pub description: String,
}

impl Task {
    pub fn new(priority: Priority, date: NaiveDate, time: NaiveTime, description: String) -> Self {
        Self {
            priority,
            date,
            time,
            description,
        }
    }

    /// Due instant, interpreted as UTC.
    pub fn due_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// Whole days elapsed between the due instant and `now`, truncated toward zero.
    pub fn days_elapsed(&self, now: DateTime<Utc>) -> i64 {
        (now.naive_utc() - self.due_at()).num_days()
    }

    pub fn due_status(&self, now: DateTime<Utc>) -> DueStatus {
        DueStatus::from_days_elapsed(self.days_elapsed(now))
    }

    pub fn date_str(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }

    pub fn to_json(&self) -> Value {
        json!({
            "priority": self.priority.code(),
            "date": self.date_str(),
            "time": self.time_str(),
            "description": self.description,
        })
    }

    /// Decode one task object. The error is a human-readable reason.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        let obj = value
            .as_object()
            .ok_or_else(|| "expected a JSON object".to_string())?;

        let priority = string_field(obj, "priority")?;
        let priority = Priority::from_code(priority)
            .ok_or_else(|| format!("unknown priority `{priority}`"))?;

        let date = string_field(obj, "date")?;
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|e| format!("invalid date `{date}`: {e}"))?;

        let time = string_field(obj, "time")?;
        let time = NaiveTime::parse_from_str(time, TIME_FORMAT)
            .map_err(|e| format!("invalid time `{time}`: {e}"))?;

        let description = string_field(obj, "description")?.to_string();

        Ok(Task::new(priority, date, time, description))
    }
}

fn string_field<'a>(obj: &'a Map<String, Value>, name: &str) -> Result<&'a str, String> {
    match obj.get(name) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(_) => Err(format!("field `{name}` must be a string")),
        None => Err(format!("missing field `{name}`")),
    }
}
