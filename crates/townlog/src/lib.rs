//! Persistent town record: how often each mailbox task has ever been
//! completed, kept across sessions.

use common::GameResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from task id to lifetime completion count.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TownLog {
    records: HashMap<String, u32>,
}

impl TownLog {
    /// Loads the record from a JSON map file. A missing file is an empty
    /// record, not an error.
    pub fn load(path: &str) -> GameResult<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    /// Saves the record back to disk.
    pub fn save(&self, path: &str) -> GameResult<()> {
        let out = serde_json::to_string_pretty(self)?;
        std::fs::write(path, out)?;
        Ok(())
    }

    /// Increments the completion count for a task id and saves immediately.
    pub fn record_completion(&mut self, path: &str, id: &str) -> GameResult<()> {
        *self.records.entry(id.to_string()).or_insert(0) += 1;
        self.save(path)
    }

    /// Returns the completion count for a task id.
    pub fn count(&self, id: &str) -> u32 {
        *self.records.get(id).unwrap_or(&0)
    }

    /// Returns the total completion count across all tasks.
    pub fn total_completions(&self) -> u32 {
        self.records.values().copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_nonexistent_returns_empty() {
        let log = TownLog::load("/tmp/no_such_townlog.json").expect("load");
        assert_eq!(log.total_completions(), 0);
    }

    #[test]
    fn record_and_load() {
        let path = "/tmp/townlog_record_test.json";
        let mut log = TownLog::default();
        log.record_completion(path, "greet_plaza").expect("record");
        log.record_completion(path, "greet_plaza").expect("record");
        let loaded = TownLog::load(path).expect("load");
        fs::remove_file(path).expect("cleanup");
        assert_eq!(loaded.count("greet_plaza"), 2);
        assert_eq!(loaded.count("unknown"), 0);
    }

    #[test]
    fn total_sums_all_tasks() {
        let mut log = TownLog::default();
        log.records.insert("a".into(), 2);
        log.records.insert("b".into(), 3);
        assert_eq!(log.total_completions(), 5);
    }

    #[test]
    fn file_format_is_a_plain_map() {
        let mut log = TownLog::default();
        log.records.insert("a".into(), 1);
        let json = serde_json::to_string(&log).expect("json");
        assert_eq!(json, r#"{"a":1}"#);
    }
}
