//! Chat transcript persistence.
//!
//! An ordered list of `{sender, text}` records stored as JSON at a fixed
//! path. Saved synchronously after each completed exchange; a corrupt or
//! unreadable file resets to an empty transcript rather than erroring.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub sender: Sender,
    pub text: String,
}

impl ChatRecord {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// Restore the transcript, or an empty one when the file is missing or
/// unparseable.
pub fn load_history(path: impl AsRef<Path>) -> Vec<ChatRecord> {
    let path = path.as_ref();
    if !path.exists() {
        return Vec::new();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            warn!("failed to read {}: {e}; starting fresh", path.display());
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(records) => records,
        Err(e) => {
            warn!("discarding corrupt transcript {}: {e}", path.display());
            Vec::new()
        }
    }
}

pub fn save_history(path: impl AsRef<Path>, records: &[ChatRecord]) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_round_trip_preserves_order_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chat_history.json");

        let transcript = vec![
            ChatRecord::bot("Hello! Ask me about your finances."),
            ChatRecord::user("How's my spending?"),
            ChatRecord::bot("Spending analysis ..."),
            ChatRecord::user("thanks"),
        ];
        save_history(&path, &transcript).unwrap();

        let restored = load_history(&path);
        assert_eq!(restored, transcript);
    }

    #[test]
    fn test_missing_file_is_empty() {
        assert!(load_history("/nonexistent/chat_history.json").is_empty());
    }

    #[test]
    fn test_corrupt_file_resets_to_empty() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"[{\"sender\": \"bot\"").unwrap();
        assert!(load_history(f.path()).is_empty());
    }
}
