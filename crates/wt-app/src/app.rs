//! Application facade.
//!
//! `WeToolsApp` is the single method surface the UI shell calls. It owns
//! explicitly wired services; nothing here is global.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument, warn};
use wt_core::ports::{
    ClipboardError, FileOpenerPort, OpenerError, SettingsError, SettingsPort, SystemClipboardPort,
};
use wt_core::{ClipboardItem, HistoryError, HistoryPage, ProxyConfig, Settings};
use wt_infra::{DownloadsError, DownloadsWriter};
use wt_network::{ForwardingProxy, ProxyError};

use crate::{AppPaths, ClipboardHistoryEngine};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Proxy(#[from] ProxyError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Opener(#[from] OpenerError),

    #[error(transparent)]
    Downloads(#[from] DownloadsError),

    #[error("failed to prepare {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Settings to boot with: saved values over `defaults`.
///
/// Read before the history engine exists so the engine is created with the
/// saved cap and never truncates records the user chose to keep. An
/// unreadable settings file falls back to `defaults`.
pub async fn load_startup_settings(settings: &dyn SettingsPort, defaults: Settings) -> Settings {
    match settings.load(defaults.clone()).await {
        Ok(saved) => saved,
        Err(err) => {
            warn!(error = %err, "failed to load saved settings; using defaults");
            defaults
        }
    }
}

/// Services the facade is built from.
pub struct WeToolsDeps {
    pub engine: Arc<ClipboardHistoryEngine>,
    pub proxy: Arc<ForwardingProxy>,
    pub clipboard: Arc<dyn SystemClipboardPort>,
    pub opener: Arc<dyn FileOpenerPort>,
    pub settings: Arc<dyn SettingsPort>,
    pub downloads: Arc<DownloadsWriter>,
    pub paths: AppPaths,
}

pub struct WeToolsApp {
    engine: Arc<ClipboardHistoryEngine>,
    proxy: Arc<ForwardingProxy>,
    clipboard: Arc<dyn SystemClipboardPort>,
    opener: Arc<dyn FileOpenerPort>,
    settings: Arc<dyn SettingsPort>,
    downloads: Arc<DownloadsWriter>,
    paths: AppPaths,
}

impl WeToolsApp {
    pub fn new(deps: WeToolsDeps) -> Self {
        Self {
            engine: deps.engine,
            proxy: deps.proxy,
            clipboard: deps.clipboard,
            opener: deps.opener,
            settings: deps.settings,
            downloads: deps.downloads,
            paths: deps.paths,
        }
    }

    pub fn engine(&self) -> Arc<ClipboardHistoryEngine> {
        self.engine.clone()
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    fn current_settings(&self) -> Settings {
        Settings {
            proxy: self.proxy.config(),
            max_records: self.engine.max_records(),
        }
    }

    async fn save_settings(&self) -> Result<(), AppError> {
        self.settings.save(&self.current_settings()).await?;
        Ok(())
    }

    /// Load saved settings and apply them; an enabled proxy is started.
    #[instrument(name = "app.apply_saved_settings", skip(self))]
    pub async fn apply_saved_settings(&self) -> Result<Settings, AppError> {
        let saved = self.settings.load(self.current_settings()).await?;
        self.apply_settings(saved.clone()).await?;
        Ok(saved)
    }

    /// Apply already loaded settings without saving them again.
    pub async fn apply_settings(&self, settings: Settings) -> Result<(), AppError> {
        info!(
            proxy_enabled = settings.proxy.enabled,
            max_records = settings.max_records,
            "applying settings"
        );

        let max = i64::try_from(settings.max_records).unwrap_or(i64::MAX);
        self.engine.set_max_records(max)?;
        self.proxy.set_config(settings.proxy).await?;
        Ok(())
    }

    // ----- proxy -----

    pub fn proxy_config(&self) -> ProxyConfig {
        self.proxy.config()
    }

    /// Apply and persist `config`. The config is saved even when starting
    /// or stopping the server fails; that failure is still returned.
    #[instrument(name = "app.set_proxy_config", skip_all, fields(enabled = config.enabled))]
    pub async fn set_proxy_config(&self, config: ProxyConfig) -> Result<(), AppError> {
        let applied = self.proxy.set_config(config).await;
        self.save_settings().await?;
        applied.map_err(AppError::from)
    }

    pub fn proxy_url(&self) -> String {
        self.proxy.upstream_url()
    }

    pub async fn start_proxy_server(&self) -> Result<(), AppError> {
        self.proxy.start().await?;
        Ok(())
    }

    pub async fn stop_proxy_server(&self) -> Result<(), AppError> {
        self.proxy.stop().await?;
        Ok(())
    }

    pub async fn proxy_server_port(&self) -> Result<u16, AppError> {
        Ok(self.proxy.port().await?)
    }

    pub async fn proxy_request(&self, target_url: &str) -> Result<String, AppError> {
        Ok(self.proxy.request_url(target_url).await?)
    }

    pub async fn test_proxy_connection(&self) -> Result<(bool, String), AppError> {
        Ok(self.proxy.test_connection().await?)
    }

    // ----- clipboard history -----

    pub fn clipboard_history(&self) -> Vec<ClipboardItem> {
        self.engine.history()
    }

    pub fn clipboard_history_page(&self, page: i64, page_size: i64) -> HistoryPage {
        self.engine.history_page(page, page_size)
    }

    pub fn clear_clipboard_history(&self) -> Result<(), AppError> {
        Ok(self.engine.clear()?)
    }

    pub fn remove_clipboard_item(&self, index: i64) -> Result<(), AppError> {
        Ok(self.engine.remove_item(index)?)
    }

    #[instrument(name = "app.copy_to_clipboard", skip_all, fields(len = content.len()))]
    pub async fn copy_to_clipboard(&self, content: String) -> Result<(), AppError> {
        let clipboard = self.clipboard.clone();
        tokio::task::spawn_blocking(move || clipboard.write_text(&content)).await??;
        Ok(())
    }

    pub async fn set_max_records(&self, max: i64) -> Result<(), AppError> {
        self.engine.set_max_records(max)?;
        self.save_settings().await
    }

    pub fn max_records(&self) -> usize {
        self.engine.max_records()
    }

    /// Open the history file with the OS default handler, creating it first
    /// when nothing has been recorded yet.
    #[instrument(name = "app.open_clipboard_file", skip(self))]
    pub async fn open_clipboard_file(&self) -> Result<(), AppError> {
        let path = self.engine.store_path().to_path_buf();
        let io_err = |source| AppError::Io {
            path: path.clone(),
            source,
        };

        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir).await.map_err(io_err)?;
        }
        tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(io_err)?;

        let opener = self.opener.clone();
        let target = path.clone();
        tokio::task::spawn_blocking(move || opener.open(&target))
            .await?
            .inspect_err(|e| warn!(error = %e, "failed to open clipboard file"))?;
        Ok(())
    }

    pub async fn save_file_to_downloads(
        &self,
        filename: &str,
        content: &str,
    ) -> Result<PathBuf, AppError> {
        Ok(self.downloads.save(filename, content).await?)
    }

    /// Stop the proxy listener if it is running.
    pub async fn shutdown(&self) -> Result<(), AppError> {
        self.proxy.stop().await?;
        Ok(())
    }
}
