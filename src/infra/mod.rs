//! Infrastructure layer implementations.

pub mod direct;
pub mod hosted;
pub mod observability;

pub use direct::{DirectConnectionStub, POSTGRES_URL_PREFIX, parse_database_url};
pub use hosted::{HostedClient, HostedClientConfig, RestClientProvider, project_id_from_url};
