//! JSON feedback log on disk.
//!
//! The whole log is one pretty-printed JSON array. Writes go to a sibling
//! temp file which is then renamed over the target, so a reader never sees a
//! half-written log.

use std::io::Write;
use std::path::Path;

use querent_core::errors::PersistenceError;
use querent_core::models::FeedbackEvent;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Load the log at `path`. Missing, unreadable, or corrupt logs load as empty.
pub fn load_log(path: &Path) -> Vec<FeedbackEvent> {
    if !path.exists() {
        debug!(path = %path.display(), "no feedback log yet");
        return Vec::new();
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "feedback log unreadable, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<FeedbackEvent>>(&content) {
        Ok(events) => events,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "feedback log corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Replace the log at `path` with `events`.
pub fn write_log(path: &Path, events: &[FeedbackEvent]) -> Result<(), PersistenceError> {
    let json = serde_json::to_vec_pretty(events).map_err(|e| PersistenceError::SerializeFailed {
        reason: e.to_string(),
    })?;

    let write_failed = |reason: String| PersistenceError::WriteFailed {
        path: path.display().to_string(),
        reason,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_failed(e.to_string()))?;
    tmp.write_all(&json)
        .and_then(|_| tmp.flush())
        .map_err(|e| write_failed(e.to_string()))?;
    tmp.persist(path)
        .map_err(|e| write_failed(e.error.to_string()))?;
    debug!(path = %path.display(), events = events.len(), "feedback log written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use querent_core::models::Vote;

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_log(&dir.path().join("absent.json")).is_empty());
    }

    #[test]
    fn corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(load_log(&path).is_empty());
    }

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback.json");
        let events = vec![
            FeedbackEvent::new("top 5 products", "SELECT 1", Vote::Up),
            FeedbackEvent::new("revenue", "SELECT 2", Vote::Down),
        ];
        write_log(&path, &events).unwrap();
        assert_eq!(load_log(&path), events);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"feedback\": \"up\""));
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("feedback.json");
        let err = write_log(&path, &[]).unwrap_err();
        assert!(matches!(err, PersistenceError::WriteFailed { .. }));
    }
}
