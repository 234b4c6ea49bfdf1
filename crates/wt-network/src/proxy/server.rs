//! Lifecycle of the local forwarding listener.

use std::convert::Infallible;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::{Arc, RwLock};

use hyper::service::{make_service_fn, service_fn};
use hyper::Server;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};
use wt_core::proxy::query_escape;
use wt_core::ProxyConfig;

use super::handler::handle;
use super::upstream::{configured_upstream, env_proxies};
use super::{ProxyError, ProxyOptions};

struct RunningServer {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Local HTTP forwarding proxy.
///
/// Holds the user's [`ProxyConfig`] and at most one running listener.
/// Lifecycle transitions are serialized on the `server` lock, and a config
/// change holds that lock until the listener matches `enabled`. The outbound
/// client reads the configuration on every request to pick its upstream.
pub struct ForwardingProxy {
    options: ProxyOptions,
    config: Arc<RwLock<ProxyConfig>>,
    client: reqwest::Client,
    server: Mutex<Option<RunningServer>>,
}

impl ForwardingProxy {
    pub fn new(options: ProxyOptions) -> Result<Self, ProxyError> {
        let config = Arc::new(RwLock::new(ProxyConfig::default()));

        let resolver_config = config.clone();
        let upstream = reqwest::Proxy::custom(move |_target| {
            let config = resolver_config
                .read()
                .map(|c| c.clone())
                .unwrap_or_else(|poisoned| poisoned.into_inner().clone());
            configured_upstream(&config)
        });

        let mut builder = reqwest::Client::builder()
            .timeout(options.forward_timeout)
            .proxy(upstream);
        for proxy in env_proxies(|key| std::env::var(key).ok()) {
            builder = builder.proxy(proxy);
        }
        let client = builder.build().map_err(ProxyError::Client)?;

        Ok(Self {
            options,
            config,
            client,
            server: Mutex::new(None),
        })
    }

    pub fn options(&self) -> &ProxyOptions {
        &self.options
    }

    pub fn config(&self) -> ProxyConfig {
        match self.config.read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Upstream proxy URL derived from the current config; empty when none applies.
    pub fn upstream_url(&self) -> String {
        self.config().upstream_url().unwrap_or_default()
    }

    /// Replace the configuration, then start or stop the listener to match `enabled`.
    #[instrument(skip_all, fields(enabled = config.enabled, host = %config.host))]
    pub async fn set_config(&self, config: ProxyConfig) -> Result<(), ProxyError> {
        let mut server = self.server.lock().await;
        let enabled = config.enabled;
        match self.config.write() {
            Ok(mut current) => *current = config,
            Err(poisoned) => *poisoned.into_inner() = config,
        }

        if enabled {
            self.start_locked(&mut server).map(|_| ())
        } else {
            self.stop_locked(&mut server).await
        }
    }

    /// Bind and serve. Returns the bound address; a running server is left as is.
    pub async fn start(&self) -> Result<SocketAddr, ProxyError> {
        let mut server = self.server.lock().await;
        self.start_locked(&mut server)
    }

    /// Shut down gracefully, aborting after the configured timeout.
    /// The listener is gone when this returns, error or not.
    pub async fn stop(&self) -> Result<(), ProxyError> {
        let mut server = self.server.lock().await;
        self.stop_locked(&mut server).await
    }

    fn start_locked(&self, guard: &mut Option<RunningServer>) -> Result<SocketAddr, ProxyError> {
        if let Some(running) = guard.as_ref() {
            if !running.handle.is_finished() {
                return Ok(running.addr);
            }
            warn!(addr = %running.addr, "proxy server task exited unexpectedly; restarting");
            guard.take();
        }

        let client = self.client.clone();
        let make_svc = make_service_fn(move |_conn| {
            let client = client.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |req| handle(client.clone(), req)))
            }
        });

        let builder = Server::try_bind(&self.options.bind_addr).map_err(|source| ProxyError::Bind {
            addr: self.options.bind_addr,
            source,
        })?;
        let server = builder.serve(make_svc);
        let addr = server.local_addr();

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let graceful = server.with_graceful_shutdown(async move {
            let _ = shutdown_rx.await;
        });
        let handle = tokio::spawn(async move {
            if let Err(e) = graceful.await {
                error!(error = %e, "proxy server error");
            }
        });

        info!(%addr, "proxy server started");
        *guard = Some(RunningServer {
            addr,
            shutdown_tx,
            handle,
        });
        Ok(addr)
    }

    async fn stop_locked(&self, guard: &mut Option<RunningServer>) -> Result<(), ProxyError> {
        let Some(running) = guard.take() else {
            return Ok(());
        };

        let _ = running.shutdown_tx.send(());
        let mut handle = running.handle;
        let timeout = self.options.shutdown_timeout;

        match tokio::time::timeout(timeout, &mut handle).await {
            Ok(_) => {
                info!(addr = %running.addr, "proxy server stopped");
                Ok(())
            }
            Err(_) => {
                handle.abort();
                // the listener is dropped with the task
                let _ = handle.await;
                warn!(addr = %running.addr, ?timeout, "proxy server shutdown timed out; aborted");
                Err(ProxyError::ShutdownTimeout(timeout))
            }
        }
    }

    pub async fn is_running(&self) -> bool {
        self.server
            .lock()
            .await
            .as_ref()
            .is_some_and(|running| !running.handle.is_finished())
    }

    pub async fn local_addr(&self) -> Result<SocketAddr, ProxyError> {
        self.server
            .lock()
            .await
            .as_ref()
            .map(|running| running.addr)
            .ok_or(ProxyError::NotRunning)
    }

    pub async fn port(&self) -> Result<u16, ProxyError> {
        self.local_addr().await.map(|addr| addr.port())
    }

    /// Local URL that fetches `target` through this proxy, starting it if needed.
    #[instrument(skip(self))]
    pub async fn request_url(&self, target: &str) -> Result<String, ProxyError> {
        let addr = {
            let mut server = self.server.lock().await;
            if !self.config().enabled {
                return Err(ProxyError::NotEnabled);
            }
            self.start_locked(&mut server)?
        };
        Ok(format!(
            "http://localhost:{}/proxy?url={}",
            addr.port(),
            query_escape(target)
        ))
    }

    /// Fetch the check URL through the local proxy.
    ///
    /// `Ok((false, _))` for a disabled proxy or a non-2xx check response;
    /// `Err` when the server cannot start or the check request cannot be sent.
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> Result<(bool, String), ProxyError> {
        let addr = {
            let mut server = self.server.lock().await;
            if !self.config().enabled {
                return Ok((false, ProxyError::NotEnabled.to_string()));
            }
            self.start_locked(&mut server)?
        };
        let local_ip: IpAddr = if addr.ip().is_unspecified() {
            Ipv4Addr::LOCALHOST.into()
        } else {
            addr.ip()
        };
        let check = format!(
            "http://{}/proxy?url={}",
            SocketAddr::new(local_ip, addr.port()),
            query_escape(&self.options.check_url)
        );

        let client = reqwest::Client::builder()
            .timeout(self.options.check_timeout)
            .no_proxy()
            .build()
            .map_err(ProxyError::Client)?;

        let resp = client
            .get(&check)
            .send()
            .await
            .map_err(|e| ProxyError::Upstream(format!("proxy connection test failed: {e}")))?;

        let status = resp.status();
        if status.is_success() {
            info!(%status, "proxy connection test succeeded");
            Ok((true, "proxy connection test succeeded".to_string()))
        } else {
            warn!(%status, "proxy connection test failed");
            Ok((false, format!("proxy connection test failed: {status}")))
        }
    }
}
