use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use wt_core::{
    ports::{SettingsError, SettingsPort},
    settings::Settings,
};

pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    /// Creates a repository that stores settings at `path` (usually `settings.json`).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(path: &Path, source: std::io::Error) -> SettingsError {
        SettingsError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    async fn ensure_parent_dir(&self) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| Self::io_error(dir, e))?;
        }
        Ok(())
    }

    /// Writes `content` to a temp file next to the target and renames it into
    /// place, so readers see either the old or the new file.
    async fn atomic_write(&self, content: &str) -> Result<(), SettingsError> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .map_err(|e| Self::io_error(&tmp_path, e))?;

        // TODO: rename over an open target can fail on Windows; retry once the target handle is released.
        fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| Self::io_error(&self.path, e))
    }
}

#[async_trait]
impl SettingsPort for FileSettingsRepository {
    async fn load(&self, defaults: Settings) -> Result<Settings, SettingsError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(defaults),
            Err(e) => return Err(Self::io_error(&self.path, e)),
        };

        // Keys absent from the file keep the caller's defaults.
        let mut merged = serde_json::to_value(&defaults)?;
        let saved: serde_json::Value = serde_json::from_str(&content)?;
        if let (Some(base), serde_json::Value::Object(saved)) = (merged.as_object_mut(), saved) {
            base.extend(saved);
        }
        Ok(serde_json::from_value(merged)?)
    }

    async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(settings)?;
        self.atomic_write(&content).await
    }
}
