//! Domain layer containing core types, traits, and error definitions.

pub mod error;
pub mod query;
pub mod traits;
pub mod types;

pub use error::{AppError, ClientError, ConfigError};
pub use query::{QuerySpec, TableHandle};
pub use traits::{DatabaseClient, HostedClientProvider, QueryExecutor};
pub use types::{
    ClientMode, ConnectionInfo, DEFAULT_DATABASE, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_USER,
    Filter, Operation, QueryResult, normalize_insert_payload,
};
