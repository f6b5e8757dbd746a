use crate::error::AppError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Supplies the raw match records for one player.
///
/// Records stay as untyped JSON so that the aggregator can discard a single
/// malformed match instead of the whole collection failing to decode.
pub trait MatchRecordSource {
    fn fetch_matches(&self, puuid: &str) -> Result<Vec<Value>, AppError>;
}

/// Match-V5 payloads previously dumped to disk, one match or an array of
/// matches per `.json` file.
pub struct MatchDirectory {
    dir: PathBuf,
}

impl MatchDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        MatchDirectory { dir: dir.into() }
    }

    fn json_files(&self) -> Result<Vec<PathBuf>, AppError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            AppError::IoError(format!("Failed to read {}: {}", self.dir.display(), e))
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().map(|ext| ext == "json").unwrap_or(false))
            .collect();
        files.sort();
        Ok(files)
    }

    fn read_file(path: &Path) -> Option<Vec<Value>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Skipping unreadable file {}: {}", path.display(), e);
                return None;
            }
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Array(items)) => Some(items),
            Ok(value) => Some(vec![value]),
            Err(e) => {
                log::warn!("Skipping invalid JSON in {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl MatchRecordSource for MatchDirectory {
    // The directory is assumed to hold one player's matches; the identity is
    // resolved later by the aggregator.
    fn fetch_matches(&self, _puuid: &str) -> Result<Vec<Value>, AppError> {
        let mut matches = Vec::new();
        for path in self.json_files()? {
            if let Some(records) = Self::read_file(&path) {
                matches.extend(records);
            }
        }
        log::info!("Loaded {} match records from {}", matches.len(), self.dir.display());
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rift_recap_{}_{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn reads_objects_and_arrays_in_name_order() {
        let dir = scratch_dir("reads");
        fs::write(dir.join("b.json"), r#"[{"n": 2}, {"n": 3}]"#).unwrap();
        fs::write(dir.join("a.json"), r#"{"n": 1}"#).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();
        fs::write(dir.join("c.json"), "{ not json").unwrap();

        let matches = MatchDirectory::new(&dir).fetch_matches("anyone").unwrap();
        let ns: Vec<i64> = matches.iter().map(|m| m["n"].as_i64().unwrap()).collect();
        assert_eq!(ns, vec![1, 2, 3]);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let source = MatchDirectory::new("/definitely/not/here/rift_recap");
        assert!(matches!(source.fetch_matches("p"), Err(AppError::IoError(_))));
    }
}
