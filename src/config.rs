//! Runtime configuration resolved from the environment.

use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_FILE: &str = "tasklist.json";
pub const DB_ENV: &str = "TASKLIST_DB";
pub const LOG_ENV: &str = "TASKLIST_LOG";
pub const DEFAULT_LOG_SPEC: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON file the task list is loaded from and saved to.
    pub db_path: PathBuf,
    /// flexi_logger specification string, e.g. `info` or `tasklist=debug`.
    pub log_spec: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Config {
            db_path: get(DB_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)),
            log_spec: get(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_SPEC.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_working_directory_file() {
        let cfg = Config::from_lookup(lookup(&[]));
        assert_eq!(cfg.db_path, PathBuf::from("tasklist.json"));
        assert_eq!(cfg.log_spec, "warn");
    }

    #[test]
    fn env_overrides() {
        let cfg = Config::from_lookup(lookup(&[
            (DB_ENV, "/tmp/other.json"),
            (LOG_ENV, "debug"),
        ]));
        assert_eq!(cfg.db_path, PathBuf::from("/tmp/other.json"));
        assert_eq!(cfg.log_spec, "debug");
    }

    #[test]
    fn blank_values_are_ignored() {
        let cfg = Config::from_lookup(lookup(&[(DB_ENV, "  "), (LOG_ENV, "")]));
        assert_eq!(cfg, Config::from_lookup(lookup(&[])));
    }
}
