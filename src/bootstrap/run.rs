use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use wt_app::AppPaths;
use wt_core::app_dirs::AppDirs;
use wt_core::ports::AppDirsPort;
use wt_platform::DirsAppDirsAdapter;

use super::tracing::init_tracing_subscriber;
use super::{load_config, resolve_config_path, wire_dependencies, WiredApp};

/// Run until Ctrl-C: resolve directories and configuration, install
/// tracing, wire services, apply saved settings, then poll the clipboard.
pub async fn run_app() -> anyhow::Result<()> {
    let default_dirs = DirsAppDirsAdapter::new()
        .get_app_dirs()
        .context("Failed to resolve application directories")?;
    let config_path = resolve_config_path(&default_dirs.app_data_root);
    let config = load_config(&config_path)?;

    let app_dirs = match &config.data_dir {
        Some(dir) => AppDirs {
            app_data_root: dir.clone(),
        },
        None => default_dirs,
    };
    let paths = AppPaths::from_app_dirs(&app_dirs);

    init_tracing_subscriber(Some(&paths.logs_dir)).context("Failed to initialize tracing")?;
    info!(
        data_dir = %paths.data_dir.display(),
        config = %config_path.display(),
        "starting wetools"
    );

    let WiredApp {
        app,
        poller,
        settings,
    } = wire_dependencies(&config, paths).await?;

    if let Err(err) = app.apply_settings(settings).await {
        warn!(error = %err, "failed to apply saved settings; continuing");
    }

    let shutdown = CancellationToken::new();
    let poller_task = tokio::spawn(poller.run(shutdown.clone()));

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("shutdown requested");

    shutdown.cancel();
    if let Err(err) = poller_task.await {
        warn!(error = %err, "clipboard poller task failed");
    }
    if let Err(err) = app.shutdown().await {
        warn!(error = %err, "proxy did not stop cleanly");
    }

    info!("wetools stopped");
    Ok(())
}
