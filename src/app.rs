//! Application assembly: config, relay, router, and serving.

use crate::cli::{CommonArgs, RunArgs};
use relay_core::config::Config;
use relay_core::lifecycle::signal::SignalHandler;
use relay_core::lifecycle::{self, Lifecycle};
use relay_core::provider::InferenceClient;
use relay_provider::bedrock::{BedrockExecutor, BedrockSettings};
use relay_server::relay::ChatRelay;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

/// Load the config file (falling back to defaults) and apply CLI overrides.
pub fn load_config(args: &CommonArgs) -> Config {
    let mut config = Config::load(&args.config).unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to load config from '{}': {e}, using defaults",
            args.config
        );
        Config::default()
    });

    if let Some(variant) = args.variant {
        config.variant = variant;
    }
    if let Some(ref region) = args.region {
        config.bedrock.region = Some(region.clone());
    }
    config
}

/// Build the relay for the configured variant on top of a Bedrock executor.
/// The executor resolves credentials lazily on its first call.
pub fn build_relay(config: &Config) -> ChatRelay {
    let client: Arc<dyn InferenceClient> =
        Arc::new(BedrockExecutor::new(BedrockSettings::from_config(config)));
    let relay = ChatRelay::for_variant(client, config.variant);
    tracing::info!(
        variant = %relay.variant(),
        model = relay.model_id(),
        "Chat relay configured"
    );
    relay
}

pub struct Application {
    addr: String,
    app_router: axum::Router,
    lifecycle: Box<dyn Lifecycle>,
    shutdown_timeout: u64,
}

impl Application {
    /// Build the application from CLI args: config, relay, router.
    pub fn build(mut config: Config, args: &RunArgs) -> anyhow::Result<Self> {
        if let Some(ref host) = args.host {
            config.host = host.clone();
        }
        if let Some(port) = args.port {
            config.port = port;
        }
        config.validate()?;
        let body_limit_bytes = config.body_limit_bytes().ok_or_else(|| {
            anyhow::anyhow!("body-limit-mb {} is too large", config.body_limit_mb)
        })?;

        let relay = Arc::new(build_relay(&config));
        let state = relay_server::AppState {
            relay,
            body_limit_bytes,
        };

        Ok(Self {
            addr: format!("{}:{}", config.host, config.port),
            app_router: relay_server::build_router(state),
            lifecycle: lifecycle::detect_lifecycle(),
            shutdown_timeout: config.shutdown_timeout,
        })
    }

    /// Serve HTTP until SIGINT/SIGTERM, then drain gracefully.
    pub async fn serve(self) -> anyhow::Result<()> {
        let Self {
            addr,
            app_router,
            lifecycle,
            shutdown_timeout,
        } = self;

        let (signal_handler, mut shutdown_rx) = SignalHandler::new();
        tokio::spawn(signal_handler.run());

        tracing::info!("Starting HTTP server on {addr}");
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        lifecycle.on_ready();

        let mut drain_rx = shutdown_rx.clone();
        let shutdown = async move {
            let _ = shutdown_rx.wait_for(|v| *v).await;
        };
        // In-flight requests get `shutdown_timeout` seconds once the signal lands.
        let drain_deadline = async move {
            let _ = drain_rx.wait_for(|v| *v).await;
            tokio::time::sleep(Duration::from_secs(shutdown_timeout)).await;
        };

        let server = axum::serve(listener, app_router)
            .with_graceful_shutdown(shutdown)
            .into_future();

        tokio::select! {
            result = server => result?,
            _ = drain_deadline => {
                tracing::warn!("Graceful shutdown timed out after {shutdown_timeout}s");
            }
        }

        lifecycle.on_stopping();
        tracing::info!("Server shut down.");
        Ok(())
    }
}
