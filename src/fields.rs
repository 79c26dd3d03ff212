//! Enumerations and field types for the task list.
//!
//! This module defines the priority levels a task can carry, the due-status tags
//! computed at render time, and the pure mapping from either of them to the
//! background color used in the table.

use std::fmt;

use crossterm::style::Color;

/// Priority classification for task importance, entered as a single letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Critical,
    High,
    Normal,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 4] = [
        Priority::Critical,
        Priority::High,
        Priority::Normal,
        Priority::Low,
    ];

    /// Single-letter code used both at the prompt and in the JSON file.
    pub fn code(self) -> &'static str {
        match self {
            Priority::Critical => "C",
            Priority::High => "H",
            Priority::Normal => "N",
            Priority::Low => "L",
        }
    }

    /// Parse a single-letter code. Matching is exact; callers normalise case.
    pub fn from_code(code: &str) -> Option<Self> {
        Priority::ALL.into_iter().find(|p| p.code() == code)
    }

    pub fn color(self) -> Option<Color> {
        Some(match self {
            Priority::Critical => Color::Red,
            Priority::High => Color::Yellow,
            Priority::Normal => Color::Green,
            Priority::Low => Color::Blue,
        })
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Where a task's due instant sits relative to the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Today,
    Incoming,
}

impl DueStatus {
    /// Classify a signed whole-day difference measured as `now - due`.
    pub fn from_days_elapsed(days: i64) -> Self {
        match days {
            0 => DueStatus::Today,
            d if d > 0 => DueStatus::Overdue,
            _ => DueStatus::Incoming,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            DueStatus::Overdue => "O",
            DueStatus::Today => "T",
            DueStatus::Incoming => "I",
        }
    }

    pub fn color(self) -> Option<Color> {
        Some(match self {
            DueStatus::Overdue => Color::Red,
            DueStatus::Today => Color::Yellow,
            DueStatus::Incoming => Color::Green,
        })
    }
}
