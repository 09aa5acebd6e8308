//! The results file: resume checkpoint and periodic flushes
//!
//! Entries already on disk are held as raw JSON values, so rewriting the
//! file reproduces them exactly.

use crate::error::PipelineError;
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// In-memory copy of the results array plus the path it is flushed to
#[derive(Debug)]
pub struct ResultsFile {
    path: PathBuf,
    entries: Vec<Value>,
    dirty: bool,
}

impl ResultsFile {
    /// Open `path`, loading any entries a previous run left behind
    ///
    /// A missing file starts empty. A file that is not a JSON array is
    /// logged and treated as empty; it is overwritten on the next flush.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PipelineError> {
        let path = path.into();
        let (entries, dirty) = match load_checkpoint(&path)? {
            Some(entries) => (entries, false),
            None => (Vec::new(), true),
        };
        Ok(Self {
            path,
            entries,
            dirty,
        })
    }

    /// Path of the results file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries are held
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries held, in input order
    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    /// Whether the file on disk is behind the entries held
    ///
    /// True after a push, and from the start when there was no readable
    /// results file to resume from.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Append the entry for the next item
    pub fn push(&mut self, entry: Value) {
        self.entries.push(entry);
        self.dirty = true;
    }

    /// Overwrite the file with every entry held
    ///
    /// Written to a temporary file in the same directory, then renamed
    /// over the target.
    pub fn flush(&mut self) -> Result<(), PipelineError> {
        let json = serde_json::to_string_pretty(&self.entries)?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        self.dirty = false;

        debug!("Flushed {} entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}

fn load_checkpoint(path: &Path) -> Result<Option<Vec<Value>>, PipelineError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str::<Vec<Value>>(&content) {
        Ok(entries) => Ok(Some(entries)),
        Err(e) => {
            warn!(
                "Ignoring unreadable results file {} ({}); starting from index 0",
                path.display(),
                e
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let results = ResultsFile::open(dir.path().join("out.json")).unwrap();
        assert!(results.is_empty());
        assert!(results.is_dirty());
    }

    #[test]
    fn test_open_existing_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, r#"[[], {"error": "boom"}]"#).unwrap();

        let results = ResultsFile::open(&path).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results.entries()[1], json!({"error": "boom"}));
        assert!(!results.is_dirty());
    }

    #[test]
    fn test_push_and_flush_track_dirty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "[]").unwrap();

        let mut results = ResultsFile::open(&path).unwrap();
        assert!(!results.is_dirty());
        results.push(json!([]));
        assert!(results.is_dirty());
        results.flush().unwrap();
        assert!(!results.is_dirty());
    }

    #[test]
    fn test_open_garbage_starts_over() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "[[], {\"trunc").unwrap();

        let results = ResultsFile::open(&path).unwrap();
        assert!(results.is_empty());
        assert!(results.is_dirty());
    }

    #[test]
    fn test_open_non_array_starts_over() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, r#"{"done": 3}"#).unwrap();

        assert!(ResultsFile::open(&path).unwrap().is_empty());
    }

    #[test]
    fn test_flush_writes_pretty_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        let mut results = ResultsFile::open(&path).unwrap();
        results.push(json!([]));
        results.push(json!({"error": "Zürich timeout"}));
        results.flush().unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, "[\n  [],\n  {\n    \"error\": \"Zürich timeout\"\n  }\n]");
    }

    #[test]
    fn test_flush_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        ResultsFile::open(&path).unwrap().flush().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_flush_leaves_no_temp_files() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");

        let mut results = ResultsFile::open(&path).unwrap();
        results.push(json!([]));
        results.flush().unwrap();
        results.flush().unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("out.json")]);
    }
}
