use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::info;

/// Subdirectory of the user's download folder that receives saved files.
pub const DOWNLOADS_SUBDIR: &str = "wetools";

#[derive(Debug, Error)]
pub enum DownloadsError {
    #[error("unable to locate a download or home directory")]
    NoDownloadDir,

    #[error("invalid file name {0:?}")]
    InvalidFileName(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes user-requested files into `<downloads>/wetools`.
pub struct DownloadsWriter {
    dir: PathBuf,
}

impl DownloadsWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The platform download folder, or `~/download` when the platform has none.
    pub fn from_system() -> Result<Self, DownloadsError> {
        let base = dirs::download_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("download")))
            .ok_or(DownloadsError::NoDownloadDir)?;
        Ok(Self::new(base.join(DOWNLOADS_SUBDIR)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save `content` as `filename`, replacing an existing file of that name.
    ///
    /// `filename` must be a bare file name; anything that could escape the
    /// target directory is rejected.
    pub async fn save(&self, filename: &str, content: &str) -> Result<PathBuf, DownloadsError> {
        let name = validate_file_name(filename)?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| DownloadsError::Io {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.dir.join(name);
        fs::write(&path, content)
            .await
            .map_err(|source| DownloadsError::Io {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), bytes = content.len(), "saved file to downloads");
        Ok(path)
    }
}

fn validate_file_name(filename: &str) -> Result<&str, DownloadsError> {
    let trimmed = filename.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\', '\0'])
        || Path::new(trimmed).is_absolute();

    if invalid {
        Err(DownloadsError::InvalidFileName(filename.to_string()))
    } else {
        Ok(trimmed)
    }
}
