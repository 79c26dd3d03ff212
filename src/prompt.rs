//! Line-oriented console I/O and the field prompt validators.
//!
//! Each validator is a pure parser (`parse_*`) wrapped by a `Console::ask_*`
//! loop that re-prompts until the parser accepts the line.

use std::io::{self, BufRead, Write};

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::Priority;

pub const PRIORITY_PROMPT: &str = "Input the task priority (C, H, N, L):";
pub const DATE_PROMPT: &str = "Input the date (yyyy-mm-dd):";
pub const DATE_INVALID: &str = "The input date is invalid";
pub const TIME_PROMPT: &str = "Input the time (hh:mm):";
pub const TIME_INVALID: &str = "The input time is invalid";
pub const DESCRIPTION_PROMPT: &str = "Input a new task (enter a blank line to end):";

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0?[0-9]|1[0-9]|2[0-3]):?([0-5][0-9])$").expect("valid time regex")
});

/// Replace tabs with spaces and trim surrounding whitespace.
pub fn fold(line: &str) -> String {
    line.replace('\t', " ").trim().to_string()
}

/// Case-insensitive single-letter code. Surrounding whitespace and tabs are ignored.
pub fn parse_priority(line: &str) -> Option<Priority> {
    Priority::from_code(&fold(line).to_uppercase())
}

/// Parse `yyyy-mm-dd` with integer segments into a valid calendar date.
pub fn parse_date(line: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = line.trim().split('-').collect();
    let [y, m, d] = parts.as_slice() else {
        return None;
    };
    let year = y.parse::<i32>().ok()?;
    let month = m.parse::<u32>().ok()?;
    let day = d.parse::<u32>().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse `h:mm`/`hh:mm` (colon optional) into a time of day.
pub fn parse_time(line: &str) -> Option<NaiveTime> {
    let caps = TIME_RE.captures(line.trim())?;
    let hour = caps[1].parse::<u32>().ok()?;
    let minute = caps[2].parse::<u32>().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Prompt/answer channel. Production wraps stdin/stdout; tests use in-memory buffers.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.output, "{msg}")?;
        self.output.flush()
    }

    /// Read one raw line without its line terminator.
    /// Invalid UTF-8 is replaced rather than rejected, so a garbled line is just
    /// another bad answer. A closed input stream is an `UnexpectedEof` error.
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "standard input closed",
            ));
        }
        let line = String::from_utf8_lossy(&bytes);
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.say(prompt)?;
        self.read_line()
    }

    /// Prompt until `parse` accepts the answer, printing `invalid` after each rejection.
    pub fn ask_until<T>(
        &mut self,
        prompt: &str,
        invalid: Option<&str>,
        parse: impl Fn(&str) -> Option<T>,
    ) -> io::Result<T> {
        loop {
            let line = self.ask(prompt)?;
            match parse(&line) {
                Some(value) => return Ok(value),
                None => {
                    if let Some(msg) = invalid {
                        self.say(msg)?;
                    }
                }
            }
        }
    }

    pub fn ask_priority(&mut self) -> io::Result<Priority> {
        self.ask_until(PRIORITY_PROMPT, None, parse_priority)
    }

    pub fn ask_date(&mut self) -> io::Result<NaiveDate> {
        self.ask_until(DATE_PROMPT, Some(DATE_INVALID), parse_date)
    }

    pub fn ask_time(&mut self) -> io::Result<NaiveTime> {
        self.ask_until(TIME_PROMPT, Some(TIME_INVALID), parse_time)
    }

    /// Collect lines until a blank one. Each kept line is folded and newline-terminated.
    pub fn ask_description(&mut self) -> io::Result<String> {
        self.say(DESCRIPTION_PROMPT)?;
        let mut text = String::new();
        loop {
            let line = fold(&self.read_line()?);
            if line.is_empty() {
                return Ok(text);
            }
            text.push_str(&line);
            text.push('\n');
        }
    }
}
