//! Dependency wiring
//!
//! The only place that depends on `wt-infra`, `wt-platform`, `wt-network`
//! and `wt-app` together. It assembles; it does not decide.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::warn;
use wt_app::{load_startup_settings, AppPaths, ClipboardHistoryEngine, WeToolsApp, WeToolsDeps};
use wt_core::config::AppConfig;
use wt_core::ports::{ClipboardCaptureHandler, SystemClipboardPort};
use wt_core::{ProxyConfig, Settings};
use wt_infra::{DownloadsWriter, FileHistoryStore, FileSettingsRepository, SystemClock};
use wt_network::{ForwardingProxy, ProxyOptions};
use wt_platform::{ClipboardPoller, ClipboardRsClipboard, SystemFileOpener};

/// The assembled application, its not-yet-started clipboard poller and the
/// settings it should start with.
pub struct WiredApp {
    pub app: Arc<WeToolsApp>,
    pub poller: ClipboardPoller,
    pub settings: Settings,
}

pub async fn wire_dependencies(config: &AppConfig, paths: AppPaths) -> anyhow::Result<WiredApp> {
    let settings_repo = Arc::new(FileSettingsRepository::new(paths.settings_path.clone()));
    let defaults = Settings {
        proxy: ProxyConfig::default(),
        max_records: config.clipboard_max_records,
    };
    let settings = load_startup_settings(settings_repo.as_ref(), defaults).await;

    let store = Arc::new(FileHistoryStore::new(paths.history_path.clone()));
    let engine = Arc::new(ClipboardHistoryEngine::new(
        store,
        Arc::new(SystemClock),
        settings.max_records,
    ));

    let proxy_options =
        ProxyOptions::from_app_config(config).context("Invalid [proxy] configuration")?;
    let proxy = Arc::new(
        ForwardingProxy::new(proxy_options).context("Failed to create forwarding proxy")?,
    );

    let downloads = DownloadsWriter::from_system().unwrap_or_else(|err| {
        let fallback = paths.data_dir.join("downloads");
        warn!(error = %err, fallback = %fallback.display(), "no download directory; using data directory");
        DownloadsWriter::new(fallback)
    });

    let clipboard: Arc<dyn SystemClipboardPort> = Arc::new(ClipboardRsClipboard::new());
    let handler: Arc<dyn ClipboardCaptureHandler> = engine.clone();
    let poller = ClipboardPoller::new(
        clipboard.clone(),
        handler,
        Duration::from_millis(config.clipboard_poll_interval_ms),
    );

    let app = Arc::new(WeToolsApp::new(WeToolsDeps {
        engine,
        proxy,
        clipboard,
        opener: Arc::new(SystemFileOpener::new()),
        settings: settings_repo,
        downloads: Arc::new(downloads),
        paths,
    }));

    Ok(WiredApp {
        app,
        poller,
        settings,
    })
}
