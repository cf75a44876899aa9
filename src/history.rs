//! Command history
//!
//! Append-only log of submitted lines with `!N` recall and an up/down cursor.

use lazy_static::lazy_static;
use regex_lite::Regex;
use thiserror::Error;

lazy_static! {
    static ref RECALL: Regex = Regex::new(r"^!(\d+)$").unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("!{0}: invalid history index")]
    InvalidIndex(String),
}

/// If `line` is a recall request (`!` followed by digits), the digits.
pub fn recall_index(line: &str) -> Option<&str> {
    RECALL.captures(line.trim()).and_then(|c| c.get(1)).map(|m| m.as_str())
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    /// Position of the navigation cursor; `None` means "past the end".
    cursor: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `line` unless it equals the previous entry. Resets the cursor.
    pub fn push(&mut self, line: &str) -> bool {
        self.cursor = None;
        if self.entries.last().map(String::as_str) == Some(line) {
            return false;
        }
        self.entries.push(line.to_string());
        true
    }

    /// Entry at a 1-based position.
    pub fn get(&self, index: &str) -> Result<&str, ShellError> {
        index
            .parse::<usize>()
            .ok()
            .filter(|&i| i >= 1)
            .and_then(|i| self.entries.get(i - 1))
            .map(String::as_str)
            .ok_or_else(|| ShellError::InvalidIndex(index.to_string()))
    }

    /// Follow `!N` through history until it names a line that is not itself
    /// a recall. A chain that loops back on itself is an invalid index.
    pub fn resolve(&self, index: &str) -> Result<&str, ShellError> {
        let invalid = || ShellError::InvalidIndex(index.to_string());
        let mut entry = self.get(index)?;
        for _ in 0..self.entries.len() {
            match recall_index(entry) {
                Some(next) => entry = self.get(next).map_err(|_| invalid())?,
                None => return Ok(entry),
            }
        }
        Err(invalid())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Step back through history (arrow up).
    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let next = match self.cursor {
            None => self.entries.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.cursor = Some(next);
        self.entries.get(next).map(String::as_str)
    }

    /// Step forward (arrow down). Returns `""` once past the newest entry.
    pub fn next(&mut self) -> Option<&str> {
        match self.cursor {
            None => None,
            Some(i) if i + 1 >= self.entries.len() => {
                self.cursor = None;
                Some("")
            }
            Some(i) => {
                self.cursor = Some(i + 1);
                self.entries.get(i + 1).map(String::as_str)
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_skips_consecutive_duplicates() {
        let mut h = History::new();
        assert!(h.push("ls"));
        assert!(!h.push("ls"));
        assert!(h.push("pwd"));
        assert!(h.push("ls"));
        assert_eq!(h.entries(), &["ls", "pwd", "ls"]);
    }

    #[test]
    fn test_get_is_one_based() {
        let mut h = History::new();
        h.push("echo a");
        h.push("echo b");
        assert_eq!(h.get("1"), Ok("echo a"));
        assert_eq!(h.get("2"), Ok("echo b"));
        assert_eq!(h.get("0"), Err(ShellError::InvalidIndex("0".into())));
        assert_eq!(h.get("9"), Err(ShellError::InvalidIndex("9".into())));
        assert!(h.get("99999999999999999999999").is_err());
    }

    #[test]
    fn test_recall_pattern() {
        assert_eq!(recall_index("!1"), Some("1"));
        assert_eq!(recall_index("  !12 "), Some("12"));
        assert_eq!(recall_index("!"), None);
        assert_eq!(recall_index("!x"), None);
        assert_eq!(recall_index("!1 2"), None);
        assert_eq!(recall_index("echo !1"), None);
    }

    #[test]
    fn test_resolve_follows_recall_entries() {
        let mut h = History::new();
        h.push("echo a");
        h.push("!1");
        h.push("echo a");
        assert_eq!(h.resolve("1"), Ok("echo a"));
        assert_eq!(h.resolve("2"), Ok("echo a"));
        assert_eq!(h.resolve("4"), Err(ShellError::InvalidIndex("4".into())));
    }

    #[test]
    fn test_resolve_rejects_self_reference() {
        let mut h = History::new();
        h.push("pwd");
        h.push("!2");
        h.push("!3");
        assert_eq!(h.resolve("2"), Err(ShellError::InvalidIndex("2".into())));
        assert_eq!(h.resolve("3"), Err(ShellError::InvalidIndex("3".into())));
    }

    #[test]
    fn test_navigation() {
        let mut h = History::new();
        h.push("cmd1");
        h.push("cmd2");
        assert_eq!(h.previous(), Some("cmd2"));
        assert_eq!(h.previous(), Some("cmd1"));
        assert_eq!(h.previous(), Some("cmd1"));
        assert_eq!(h.next(), Some("cmd2"));
        assert_eq!(h.next(), Some(""));
        assert_eq!(h.next(), None);
    }

    #[test]
    fn test_navigation_empty() {
        let mut h = History::new();
        assert_eq!(h.previous(), None);
        assert_eq!(h.next(), None);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(ShellError::InvalidIndex("9".into()).to_string(), "!9: invalid history index");
    }
}
