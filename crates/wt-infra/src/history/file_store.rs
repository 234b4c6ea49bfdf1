use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use wt_core::ports::{HistoryStorePort, StoreError};
use wt_core::ClipboardItem;

use super::codec::{decode_line, encode_line};

/// History store backed by a single text file, rewritten in full on save.
pub struct FileHistoryStore {
    path: PathBuf,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    /// Write to a sibling temp file, then rename over the target.
    fn atomic_write(&self, content: &str) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let tmp_path = self.path.with_extension("txt.tmp");
        fs::write(&tmp_path, content).map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_error(e))
    }
}

impl HistoryStorePort for FileHistoryStore {
    fn load(&self) -> Result<Vec<ClipboardItem>, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_error(e)),
        };
        let text = String::from_utf8_lossy(&raw);

        let items = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .filter_map(|(n, line)| {
                let item = decode_line(line);
                if item.is_none() {
                    debug!(line = n + 1, path = %self.path.display(), "skipping malformed history line");
                }
                item
            })
            .collect();

        Ok(items)
    }

    fn save(&self, items: &[ClipboardItem]) -> Result<(), StoreError> {
        let mut content = String::new();
        for item in items {
            content.push_str(&encode_line(item));
            content.push('\n');
        }
        self.atomic_write(&content)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
