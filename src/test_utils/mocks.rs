//! Mock implementations for testing.
//!
//! These mocks provide in-memory implementations of domain traits
//! that can be configured to simulate success and failure.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{
    AppError, ClientError, ClientMode, DatabaseClient, HostedClientProvider, QueryExecutor,
    QueryResult, QuerySpec, TableHandle,
};

/// Configuration for mock behavior.
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// If true, operations will fail.
    pub should_fail: bool,
    /// Custom error message for failures.
    pub error_message: Option<String>,
}

impl MockConfig {
    /// Creates a config that always succeeds.
    #[must_use]
    pub fn success() -> Self {
        Self::default()
    }

    /// Creates a config that always fails.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            should_fail: true,
            error_message: Some(message.into()),
        }
    }

    fn message(&self, fallback: &str) -> String {
        self.error_message
            .clone()
            .unwrap_or_else(|| fallback.to_string())
    }
}

/// Records every query it is asked to run and answers with a canned result.
#[derive(Default)]
pub struct RecordingExecutor {
    queries: Mutex<Vec<QuerySpec>>,
    response: Mutex<QueryResult>,
    config: MockConfig,
}

impl RecordingExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Sets the result returned by subsequent executions.
    pub fn respond_with(&self, result: QueryResult) {
        *self.response.lock().unwrap() = result;
    }

    /// All queries executed so far, oldest first.
    pub fn queries(&self) -> Vec<QuerySpec> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueryExecutor for RecordingExecutor {
    async fn execute(&self, query: QuerySpec) -> Result<QueryResult, AppError> {
        self.queries.lock().unwrap().push(query);
        if self.config.should_fail {
            return Err(AppError::Client(ClientError::Request {
                status: 500,
                message: self.config.message("Mock query error"),
            }));
        }
        Ok(self.response.lock().unwrap().clone())
    }
}

/// Mock hosted database client for testing.
///
/// Table handles share one [`RecordingExecutor`], so tests can inspect what
/// was built.
///
/// # Example
///
/// ```
/// use db_client_factory::test_utils::MockDatabaseClient;
///
/// let mock = MockDatabaseClient::new();
/// assert!(mock.executor().queries().is_empty());
/// ```
pub struct MockDatabaseClient {
    executor: Arc<RecordingExecutor>,
    is_healthy: AtomicBool,
}

impl MockDatabaseClient {
    /// Creates a new mock with default (success) configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    /// Creates a new mock with the given configuration.
    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            executor: Arc::new(RecordingExecutor::with_config(config)),
            is_healthy: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub fn executor(&self) -> &RecordingExecutor {
        &self.executor
    }

    /// Sets the health status.
    pub fn set_healthy(&self, healthy: bool) {
        self.is_healthy.store(healthy, Ordering::Relaxed);
    }
}

impl Default for MockDatabaseClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    fn table(&self, name: &str) -> TableHandle {
        TableHandle::new(name, Arc::clone(&self.executor) as Arc<dyn QueryExecutor>)
    }

    fn mode(&self) -> ClientMode {
        ClientMode::Hosted
    }

    async fn health_check(&self) -> Result<(), AppError> {
        if !self.is_healthy.load(Ordering::Relaxed) {
            return Err(AppError::Client(ClientError::Unhealthy(
                "Mock database unhealthy".to_string(),
            )));
        }
        Ok(())
    }
}

/// Hosted-client provider that records the credentials it receives.
///
/// # Example
///
/// ```
/// use db_client_factory::test_utils::MockHostedProvider;
///
/// let provider = MockHostedProvider::new();
/// let failing = MockHostedProvider::failing("Invalid API key");
/// assert_eq!(provider.call_count(), 0);
/// ```
pub struct MockHostedProvider {
    calls: Mutex<Vec<(String, String)>>,
    config: MockConfig,
    call_count: AtomicU64,
}

impl MockHostedProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MockConfig::success())
    }

    #[must_use]
    pub fn with_config(config: MockConfig) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            config,
            call_count: AtomicU64::new(0),
        }
    }

    /// Creates a provider whose construction always fails.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_config(MockConfig::failure(message))
    }

    /// Gets the number of construction attempts.
    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// `(url, key)` pairs passed to `create_client`, oldest first.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockHostedProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HostedClientProvider for MockHostedProvider {
    fn create_client(
        &self,
        url: &str,
        key: &SecretString,
    ) -> Result<Arc<dyn DatabaseClient>, AppError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), key.expose_secret().to_string()));

        if self.config.should_fail {
            return Err(AppError::Client(ClientError::Initialization(
                self.config.message("Mock client construction error"),
            )));
        }
        Ok(Arc::new(MockDatabaseClient::new()))
    }
}
