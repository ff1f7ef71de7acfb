use crate::config::WellnessConfig;
use crate::handlers;
use crate::services::providers::openrouter::{OpenRouterConfig, OpenRouterProvider};
use crate::services::providers::CompletionProvider;
use crate::services::{PgStore, Store};
use axum::{
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: WellnessConfig,
    pub store: Arc<dyn Store>,
    pub provider: Arc<dyn CompletionProvider>,
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
}

impl Application {
    /// Build the application against PostgreSQL and the OpenRouter API.
    pub async fn build(config: WellnessConfig) -> Result<Self, AppError> {
        let store = PgStore::new(&config.database.url, config.database.max_connections)
            .await
            .map_err(|e| {
                tracing::error!("Failed to connect to PostgreSQL: {}", e);
                e
            })?;
        store.run_migrations().await.map_err(|e| {
            tracing::error!("Failed to run database migrations: {}", e);
            e
        })?;

        let provider: Arc<dyn CompletionProvider> =
            Arc::new(OpenRouterProvider::new(OpenRouterConfig {
                api_url: config.provider.api_url.clone(),
                api_key: config.provider.api_key.clone(),
            }));

        tracing::info!(
            model = %config.provider.model,
            "Initialized OpenRouter completion provider"
        );

        Self::build_with(config, Arc::new(store), provider).await
    }

    /// Build the application with injected store and provider implementations.
    pub async fn build_with(
        config: WellnessConfig,
        store: Arc<dyn Store>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Result<Self, AppError> {
        let state = AppState {
            config: config.clone(),
            store,
            provider,
        };

        let app = Router::new()
            .route("/", get(handlers::liveness))
            .route("/health", get(handlers::health_check))
            .route("/ready", get(handlers::readiness_check))
            .route("/metrics", get(handlers::metrics_endpoint))
            .route("/daily-plan/:user_id", get(handlers::daily_plan))
            .route("/weekly-summary/:user_id", get(handlers::weekly_summary))
            .route("/image-analysis", post(handlers::analyze_image))
            .route("/chat/:user_id", post(handlers::chat))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, app);

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
