//! Application startup and lifecycle management.
//!
//! Wires configuration into collaborators, builds the HTTP router and runs it
//! until a shutdown signal arrives.

use crate::config::RelayConfig;
use crate::handlers::{
    chat::chat,
    health::{health_check, metrics_endpoint, readiness_check},
    medical::{search_conditions, search_drugs},
    symptoms::analyze_symptoms,
};
use crate::services::medical::{ClinicalTablesClient, OpenFdaClient};
use crate::services::providers::gemini::{GeminiConfig, GeminiProvider};
use crate::services::{CompletionProvider, MedicalDatabase, SymptomClassifier};
use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware, security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub classifier: SymptomClassifier,
    pub completion_provider: Arc<dyn CompletionProvider>,
    pub conditions_db: Arc<dyn MedicalDatabase>,
    pub drugs_db: Arc<dyn MedicalDatabase>,
}

impl AppState {
    /// Build the production collaborators from configuration.
    pub fn from_config(config: &RelayConfig) -> Result<Self, AppError> {
        let completion_provider = GeminiProvider::new(GeminiConfig {
            api_key: config.gemini.api_key.clone(),
            model: config.gemini.model.clone(),
            api_base: config.gemini.api_base.clone(),
            timeout: config.upstream_timeout,
        })?;

        tracing::info!(
            model = %config.gemini.model,
            "Initialized Gemini completion provider"
        );

        let conditions_db = ClinicalTablesClient::new(
            &config.medical.clinical_tables_url,
            config.upstream_timeout,
        )?;
        let drugs_db = OpenFdaClient::new(
            &config.medical.openfda_url,
            config.medical.openfda_result_limit,
            config.upstream_timeout,
        )?;

        tracing::info!(
            clinical_tables = %config.medical.clinical_tables_url,
            openfda = %config.medical.openfda_url,
            "Initialized medical database clients"
        );

        Ok(Self {
            classifier: SymptomClassifier::default(),
            completion_provider: Arc::new(completion_provider),
            conditions_db: Arc::new(conditions_db),
            drugs_db: Arc::new(drugs_db),
        })
    }
}

/// CORS policy admitting only the configured browser origins.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .route("/symptoms-analysis", post(analyze_symptoms))
        .route("/chat", post(chat))
        .route("/medical/conditions", get(search_conditions))
        .route("/medical/drugs", get(search_drugs))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors_layer(allowed_origins))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri().path(),
                    version = ?request.version(),
                )
            }),
        )
        // Outermost, so the trace span already sees the request id.
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

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
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with production collaborators.
    pub async fn build(config: RelayConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(&config)?;
        Self::build_with_state(config, state).await
    }

    /// Build the application around a prepared state (used by tests to inject
    /// mock collaborators).
    pub async fn build_with_state(config: RelayConfig, state: AppState) -> Result<Self, AppError> {
        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            service = %config.service_name,
            allowed_origins = ?config.security.allowed_origins,
            "Health relay listening on port {}",
            port
        );

        let router = build_router(state, &config.security.allowed_origins);

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}
