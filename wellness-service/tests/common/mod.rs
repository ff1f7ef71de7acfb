use async_trait::async_trait;
use service_core::error::AppError;
use std::sync::Arc;
use wellness_service::config::WellnessConfig;
use wellness_service::models::{CachedResponse, ChatMessage, ChatRole};
use wellness_service::services::providers::mock::MockCompletionProvider;
use wellness_service::services::{MemoryStore, Store};
use wellness_service::startup::Application;

pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryStore>,
    pub provider: Arc<MockCompletionProvider>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::spawn_with(store.clone(), store, MockCompletionProvider::new(true)).await
    }

    /// Spawn with a provider that fails every completion call.
    #[allow(dead_code)]
    pub async fn spawn_failing() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::spawn_with(store.clone(), store, MockCompletionProvider::new(false)).await
    }

    /// Spawn with a store whose writes always fail; reads pass through to
    /// the inner memory store exposed as `self.store`.
    #[allow(dead_code)]
    pub async fn spawn_failing_writes() -> Self {
        let store = Arc::new(MemoryStore::new());
        let failing = Arc::new(FailingWritesStore {
            inner: store.clone(),
        });
        Self::spawn_with(failing, store, MockCompletionProvider::new(true)).await
    }

    async fn spawn_with(
        app_store: Arc<dyn Store>,
        store: Arc<MemoryStore>,
        provider: MockCompletionProvider,
    ) -> Self {
        std::env::set_var("DATABASE_URL", "postgres://localhost/wellness_test");
        std::env::set_var("OPENROUTER_API_KEY", "test-key");

        let mut config = WellnessConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing

        let provider = Arc::new(provider);

        let app = Application::build_with(config, app_store, provider.clone())
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            store,
            provider,
        }
    }
}

/// Store double whose write operations always fail. Reads delegate to the
/// wrapped memory store so tests can assert on what was (not) persisted.
pub struct FailingWritesStore {
    inner: Arc<MemoryStore>,
}

#[async_trait]
impl Store for FailingWritesStore {
    async fn get_cached(
        &self,
        user_id: &str,
        bucket_key: &str,
    ) -> Result<Option<CachedResponse>, AppError> {
        self.inner.get_cached(user_id, bucket_key).await
    }

    async fn put_cached(
        &self,
        _user_id: &str,
        _bucket_key: &str,
        _payload: &str,
    ) -> Result<(), AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "injected cache write failure"
        )))
    }

    async fn append_chat_message(
        &self,
        _user_id: &str,
        _role: ChatRole,
        _content: &str,
    ) -> Result<(), AppError> {
        Err(AppError::DatabaseError(anyhow::anyhow!(
            "injected history write failure"
        )))
    }

    async fn chat_history(&self, user_id: &str) -> Result<Vec<ChatMessage>, AppError> {
        self.inner.chat_history(user_id).await
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.inner.health_check().await
    }
}
