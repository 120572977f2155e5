//! Test helpers for health-relay integration tests.

#![allow(dead_code)]

use axum::Router;
use health_relay::config::{GeminiSettings, MedicalSettings, RelayConfig, SecuritySettings};
use health_relay::services::medical::mock::MockMedicalDatabase;
use health_relay::services::providers::mock::MockCompletionProvider;
use health_relay::services::{MedicalDatabase, SymptomClassifier};
use health_relay::startup::{build_router, AppState, Application};
use secrecy::Secret;
use service_core::config::Config as CoreConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

pub const TEST_ORIGIN: &str = "http://localhost:3000";

pub fn test_config() -> RelayConfig {
    RelayConfig {
        common: CoreConfig { port: 0 },
        service_name: "health-relay-test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        gemini: GeminiSettings {
            api_key: Secret::new("test-api-key".to_string()),
            model: "gemini-test".to_string(),
            api_base: "http://127.0.0.1:9/v1beta".to_string(),
        },
        medical: MedicalSettings {
            clinical_tables_url: "http://127.0.0.1:9".to_string(),
            openfda_url: "http://127.0.0.1:9".to_string(),
            openfda_result_limit: 5,
        },
        security: SecuritySettings {
            allowed_origins: vec![TEST_ORIGIN.to_string()],
        },
        upstream_timeout: Duration::from_secs(5),
    }
}

/// State backed entirely by mocks; `upstreams_up` toggles collaborator failure.
pub fn mock_state(upstreams_up: bool) -> AppState {
    AppState {
        classifier: SymptomClassifier::default(),
        completion_provider: Arc::new(MockCompletionProvider::new(upstreams_up)),
        conditions_db: Arc::new(MockMedicalDatabase::new("conditions", upstreams_up)),
        drugs_db: Arc::new(MockMedicalDatabase::new("drugs", upstreams_up)),
    }
}

pub fn mock_router(upstreams_up: bool) -> Router {
    build_router(mock_state(upstreams_up), &[TEST_ORIGIN.to_string()])
}

/// State whose medical clients talk to real HTTP endpoints.
pub fn state_with_databases(
    conditions_db: Arc<dyn MedicalDatabase>,
    drugs_db: Arc<dyn MedicalDatabase>,
) -> AppState {
    AppState {
        conditions_db,
        drugs_db,
        ..mock_state(true)
    }
}

/// Spawn the application on a random port and return its base URL.
pub async fn spawn_app(state: AppState) -> String {
    let app = Application::build_with_state(test_config(), state)
        .await
        .expect("Failed to build application");
    let port = app.port();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    format!("http://127.0.0.1:{}", port)
}

/// Serve `router` on a random local port, standing in for a remote API.
pub async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub listener");
    let addr = listener.local_addr().expect("Stub has no local address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Stub server failed");
    });

    format!("http://{}", addr)
}
