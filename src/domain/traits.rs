//! Domain traits defining contracts for external systems.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;

use super::error::AppError;
use super::query::{QuerySpec, TableHandle};
use super::types::{ClientMode, QueryResult};

/// Runs a finished table query against some backend.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Execute the accumulated query and return its rows
    async fn execute(&self, query: QuerySpec) -> Result<QueryResult, AppError>;
}

/// Database client trait shared by every backend variant
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Start a query against the named table
    fn table(&self, name: &str) -> TableHandle;

    /// Which backend this client talks to
    fn mode(&self) -> ClientMode;

    /// Check backend connectivity
    async fn health_check(&self) -> Result<(), AppError>;
}

/// Constructs hosted clients from a project URL and service key.
///
/// This is the seam where the hosted SDK plugs in; tests substitute a
/// recording implementation.
pub trait HostedClientProvider: Send + Sync {
    fn create_client(
        &self,
        url: &str,
        key: &SecretString,
    ) -> Result<Arc<dyn DatabaseClient>, AppError>;
}
