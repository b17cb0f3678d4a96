//! Pagehook HTTP Server
//!
//! Main entry point: serves the Messenger webhook with the greeting bot.

use std::sync::Arc;

use infrastructure::{AppConfig, GraphMessengerAdapter, ServerConfig, StaticPageTokenResolver};
use integration_messenger::WebhookDispatcher;
use presentation_http::{GreetingBot, routes, serve, state::AppState};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str =
    "pagehook_server=debug,presentation_http=debug,integration_messenger=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config comes first so the log format can be chosen; load errors are reported once tracing is up.
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_tracing(&config.server);

    info!("Pagehook v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(e) = load_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    info!(
        host = %config.server.host,
        port = %config.server.port,
        graph_api_url = %config.messenger.graph_api_url,
        "Configuration loaded"
    );

    if !config.messenger.has_verify_token() {
        warn!("messenger.verify_token is not set; handshakes only match an empty hub.verify_token");
    }

    let resolver = StaticPageTokenResolver::new(config.messenger.page_token.clone());
    if !resolver.is_configured() {
        warn!("messenger.page_token is not set; every event batch will be answered with not ok");
    }

    let graph = Arc::new(
        GraphMessengerAdapter::new(config.messenger.client_config())
            .map_err(|e| anyhow::anyhow!("Failed to initialize Messenger client: {e}"))?,
    );

    let bot = Arc::new(GreetingBot::new(graph.clone()));

    let mut dispatcher = WebhookDispatcher::new(graph);
    dispatcher
        .on_page_token(Arc::new(resolver))
        .on_message(bot.clone())
        .on_delivery(bot);

    let state = AppState::new(dispatcher, config.messenger.handshake_verifier());

    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Webhook endpoint: http://{}/webhook", addr);

    serve(listener, app, shutdown_signal(), config.server.shutdown_timeout()).await?;

    info!("Server shutdown complete");

    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let registry = tracing_subscriber::registry().with(filter);

    if server.json_logs() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Wait for shutdown signals (SIGINT, SIGTERM) and handle graceful shutdown
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
