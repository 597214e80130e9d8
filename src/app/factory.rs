//! Chooses and builds the database client for the current configuration.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tracing::{error, info, instrument};

use super::config::ClientSettings;
use crate::domain::{
    AppError, ClientError, ClientMode, ConfigError, DatabaseClient, HostedClientProvider,
    TableHandle,
};
use crate::infra::direct::{DirectConnectionStub, POSTGRES_URL_PREFIX};
use crate::infra::hosted::{RestClientProvider, project_id_from_url};

/// A resolved client: either the hosted backend or the direct-connection stub.
#[derive(Clone)]
pub enum ClientHandle {
    Hosted(Arc<dyn DatabaseClient>),
    Direct(Arc<DirectConnectionStub>),
}

impl ClientHandle {
    /// The stub, when the direct mode was selected.
    #[must_use]
    pub fn as_direct(&self) -> Option<&DirectConnectionStub> {
        match self {
            ClientHandle::Direct(stub) => Some(stub),
            ClientHandle::Hosted(_) => None,
        }
    }

    #[must_use]
    pub fn is_hosted(&self) -> bool {
        matches!(self, ClientHandle::Hosted(_))
    }

    fn inner(&self) -> &dyn DatabaseClient {
        match self {
            ClientHandle::Hosted(client) => client.as_ref(),
            ClientHandle::Direct(stub) => stub.as_ref() as &dyn DatabaseClient,
        }
    }
}

impl std::fmt::Debug for ClientHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientHandle::Hosted(client) => f.debug_tuple("Hosted").field(&client.mode()).finish(),
            ClientHandle::Direct(stub) => f.debug_tuple("Direct").field(stub).finish(),
        }
    }
}

#[async_trait]
impl DatabaseClient for ClientHandle {
    fn table(&self, name: &str) -> TableHandle {
        self.inner().table(name)
    }

    fn mode(&self) -> ClientMode {
        match self {
            ClientHandle::Hosted(_) => ClientMode::Hosted,
            ClientHandle::Direct(_) => ClientMode::Direct,
        }
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.inner().health_check().await
    }
}

/// Builds database clients from [`ClientSettings`].
///
/// Each call re-reads the settings it is given and returns a fresh handle;
/// nothing is cached between calls.
#[derive(Clone)]
pub struct ClientFactory {
    provider: Arc<dyn HostedClientProvider>,
}

impl ClientFactory {
    /// Creates a factory that builds hosted clients through `provider`.
    #[must_use]
    pub fn new(provider: Arc<dyn HostedClientProvider>) -> Self {
        Self { provider }
    }

    /// Resolve a client for `settings`.
    ///
    /// A `DATABASE_URL` starting with `postgresql://` selects the direct stub;
    /// otherwise both Supabase variables are required.
    #[instrument(skip_all)]
    pub fn get_client(&self, settings: &ClientSettings) -> Result<ClientHandle, AppError> {
        let direct_url = settings
            .database_url
            .as_ref()
            .map(|url| url.expose_secret())
            .filter(|url| url.starts_with(POSTGRES_URL_PREFIX));

        let handle = match direct_url {
            Some(url) => {
                info!(
                    mode = ClientMode::Direct.as_str(),
                    "Using direct PostgreSQL connection via DATABASE_URL"
                );
                let stub = DirectConnectionStub::from_url(url).map_err(|e| {
                    error!(error = %e, "Failed to configure direct PostgreSQL client");
                    e
                })?;
                ClientHandle::Direct(Arc::new(stub))
            }
            None => self.hosted_client(settings)?,
        };

        metrics::counter!("db_clients_created_total", "mode" => handle.mode().as_str())
            .increment(1);
        Ok(handle)
    }

    /// Resolve a client from the process environment.
    pub fn get_client_from_env(&self) -> Result<ClientHandle, AppError> {
        self.get_client(&ClientSettings::from_env())
    }

    fn hosted_client(&self, settings: &ClientSettings) -> Result<ClientHandle, AppError> {
        let (Some(url), Some(key)) = (&settings.supabase_url, &settings.supabase_service_key)
        else {
            return Err(ConfigError::MissingHostedCredentials.into());
        };

        let client = self.provider.create_client(url, key).map_err(|e| {
            error!(error = %e, "Failed to create Supabase client");
            match e {
                AppError::Client(ClientError::Initialization(_)) => e,
                other => ClientError::Initialization(other.to_string()).into(),
            }
        })?;

        if let Some(project_id) = project_id_from_url(url) {
            info!(
                mode = ClientMode::Hosted.as_str(),
                project_id = %project_id,
                "Supabase client initialized - project_id={}",
                project_id
            );
        }

        Ok(ClientHandle::Hosted(client))
    }
}

impl Default for ClientFactory {
    fn default() -> Self {
        Self::new(Arc::new(RestClientProvider::default()))
    }
}

/// Resolve a client from the process environment with the default REST provider.
pub fn get_client() -> Result<ClientHandle, AppError> {
    ClientFactory::default().get_client_from_env()
}
