//! Pirinku HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use ai_core::{GeminiInferenceEngine, InferenceEngine};
use anyhow::Context;
use application::{ImageService, SuggestionService, ToolUsageService};
use axum::http::HeaderValue;
use infrastructure::{
    AppConfig, GeminiImageAdapter, GeminiSuggestionAdapter, JsonFileToolFrequencyStore,
    ServerConfig, init_logging,
};
use presentation_http::{AppState, create_router, middleware::request_id};
use tokio::{net::TcpListener, signal, sync::Notify};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_logging(&config.logging)?;
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    info!("Pirinku v{} starting...", env!("CARGO_PKG_VERSION"));
    info!(
        host = %config.server.host,
        port = config.server.port,
        text_model = %config.inference.text_model,
        image_model = %config.inference.image_model,
        tool_mode = ?config.tools.mode,
        "Configuration loaded"
    );

    let state = build_state(&config)?;
    let app = create_router(state)
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_size_json_bytes,
        ))
        .layer(TraceLayer::new_for_http());
    let app = match cors_layer(&config.server) {
        Some(cors) => app.layer(cors),
        None => app,
    };
    // Outermost, so every trace line carries the request id
    let app = app.layer(axum::middleware::from_fn(request_id));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let stopping = Arc::new(Notify::new());
    let serve = axum::serve(listener, app).with_graceful_shutdown({
        let stopping = Arc::clone(&stopping);
        async move {
            shutdown_signal().await;
            stopping.notify_one();
        }
    });

    tokio::select! {
        result = serve.into_future() => result?,
        () = async {
            stopping.notified().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!(timeout = ?shutdown_timeout, "Connections still open after shutdown timeout, exiting");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Wire adapters and services from configuration
fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let engine: Arc<dyn InferenceEngine> = Arc::new(
        GeminiInferenceEngine::new(config.inference.clone())
            .context("Failed to initialize inference")?,
    );

    let suggestions = SuggestionService::new(Arc::new(GeminiSuggestionAdapter::from_engine(
        Arc::clone(&engine),
    )))
    .with_placeholder(&config.images.placeholder_url);

    let images = ImageService::new(Arc::new(GeminiImageAdapter::from_engine(engine)))
        .with_placeholder(&config.images.placeholder_url)
        .with_timeout(Duration::from_millis(config.images.timeout_ms));

    let store = Arc::new(JsonFileToolFrequencyStore::new(&config.tools.store_path));
    let usage = ToolUsageService::with_key(store, &config.tools.storage_key);

    let vocabulary = config
        .tools
        .predefined_tools()
        .context("Invalid tool vocabulary")?;

    Ok(AppState {
        suggestions: Arc::new(suggestions),
        images: Arc::new(images),
        usage: Arc::new(usage),
        vocabulary: Arc::new(vocabulary),
        tool_mode: config.tools.mode,
        voice: config.voice.recognition_options(),
    })
}

/// CORS policy; an empty origin list allows any origin
fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    if !server.cors_enabled {
        return None;
    }

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if server.allowed_origins.is_empty() {
        return Some(layer.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(_) => {
                warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();
    Some(layer.allow_origin(origins))
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
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
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
