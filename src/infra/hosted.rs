//! Supabase client speaking to the project's PostgREST API.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_RANGE;
use reqwest::{Client, RequestBuilder, Response, Url};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::domain::{
    AppError, ClientError, ClientMode, DatabaseClient, HostedClientProvider, Operation,
    QueryExecutor, QueryResult, QuerySpec, TableHandle,
};

const REST_PATH: &str = "rest/v1/";
/// Asks PostgREST to echo affected rows and report an exact total in `Content-Range`.
const PREFER: &str = "return=representation,count=exact";

/// Configuration for the hosted client
#[derive(Debug, Clone)]
pub struct HostedClientConfig {
    pub timeout: Duration,
}

impl Default for HostedClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

/// Extract the project id from a `https://<id>.supabase.co` URL.
///
/// Only the prefix has to match; anything after `supabase.co` is ignored.
#[must_use]
pub fn project_id_from_url(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("https://")?;
    let (id, domain) = rest.split_once('.')?;
    if id.is_empty() || !domain.starts_with("supabase.co") {
        return None;
    }
    Some(id)
}

/// Supabase client backed by PostgREST
pub struct HostedClient {
    url: String,
    backend: Arc<RestBackend>,
}

struct RestBackend {
    http_client: Client,
    rest_url: Url,
    service_key: SecretString,
}

impl HostedClient {
    /// Create a new hosted client with custom configuration
    pub fn new(
        url: &str,
        service_key: SecretString,
        config: HostedClientConfig,
    ) -> Result<Self, AppError> {
        if service_key.expose_secret().is_empty() {
            return Err(ClientError::Initialization("supabase_key is required".to_string()).into());
        }

        let base = Url::parse(url)
            .map_err(|e| ClientError::Initialization(format!("Invalid URL '{url}': {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::Initialization(format!(
                "Invalid URL '{url}': expected http or https"
            ))
            .into());
        }

        let rest_url = Url::parse(&format!("{}/{REST_PATH}", url.trim_end_matches('/')))
            .map_err(|e| ClientError::Initialization(format!("Invalid URL '{url}': {e}")))?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Initialization(e.to_string()))?;

        debug!(rest_url = %rest_url, "Created hosted client");
        Ok(Self {
            url: url.to_string(),
            backend: Arc::new(RestBackend {
                http_client,
                rest_url,
                service_key,
            }),
        })
    }

    /// Create a new hosted client with default configuration
    pub fn with_defaults(url: &str, service_key: SecretString) -> Result<Self, AppError> {
        Self::new(url, service_key, HostedClientConfig::default())
    }

    /// The project URL this client was built with
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Base URL of the REST API, e.g. `https://abc.supabase.co/rest/v1/`
    #[must_use]
    pub fn rest_url(&self) -> &Url {
        &self.backend.rest_url
    }
}

impl fmt::Debug for HostedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostedClient")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DatabaseClient for HostedClient {
    fn table(&self, name: &str) -> TableHandle {
        TableHandle::new(name, Arc::clone(&self.backend) as Arc<dyn QueryExecutor>)
    }

    fn mode(&self) -> ClientMode {
        ClientMode::Hosted
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn health_check(&self) -> Result<(), AppError> {
        let response = self
            .backend
            .authorize(self.backend.http_client.get(self.backend.rest_url.clone()))
            .send()
            .await
            .map_err(ClientError::from)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClientError::Unhealthy(format!("status {}", response.status())).into())
        }
    }
}

impl RestBackend {
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let key = self.service_key.expose_secret();
        request.header("apikey", key).bearer_auth(key)
    }

    fn table_url(&self, query: &QuerySpec) -> Result<Url, ClientError> {
        let mut url = self.rest_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Transport(format!("cannot address table '{}'", query.table)))?
            .pop_if_empty()
            .push(&query.table);

        {
            let mut pairs = url.query_pairs_mut();
            match (&query.operation, &query.columns) {
                (_, Some(columns)) => {
                    pairs.append_pair("select", columns);
                }
                (Operation::Select, None) => {
                    pairs.append_pair("select", "*");
                }
                _ => {}
            }
            for filter in &query.filters {
                pairs.append_pair(&filter.column, &filter.to_postgrest_value());
            }
        }
        // Drop a dangling "?" when no pairs were appended.
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    async fn read_result(response: Response) -> Result<QueryResult, AppError> {
        let status = response.status();
        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);
        let body = response.text().await.map_err(ClientError::from)?;

        if !status.is_success() {
            return Err(ClientError::Request {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        let data = if body.trim().is_empty() {
            Vec::new()
        } else {
            match serde_json::from_str::<Value>(&body)? {
                Value::Array(rows) => rows,
                Value::Null => Vec::new(),
                row => vec![row],
            }
        };
        let count = total.unwrap_or(data.len());
        Ok(QueryResult::new(data, count))
    }
}

/// Total row count from a `Content-Range` header such as `0-24/3573`.
fn parse_content_range_total(header: &str) -> Option<usize> {
    header.rsplit_once('/')?.1.parse().ok()
}

#[async_trait]
impl QueryExecutor for RestBackend {
    #[instrument(skip(self, query), fields(table = %query.table, operation = query.operation.name()))]
    async fn execute(&self, query: QuerySpec) -> Result<QueryResult, AppError> {
        let url = self.table_url(&query)?;

        let request = match &query.operation {
            Operation::Select => self.http_client.get(url),
            Operation::Insert(rows) => self.http_client.post(url).json(rows),
            Operation::Update(values) => self.http_client.patch(url).json(values),
            Operation::Delete => self.http_client.delete(url),
        };

        let response = self
            .authorize(request.header("Prefer", PREFER))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClientError::Transport(format!("timeout: {e}"))
                } else {
                    ClientError::from(e)
                }
            })?;

        let result = Self::read_result(response).await?;
        debug!(rows = result.data.len(), count = result.count, "PostgREST request completed");
        Ok(result)
    }
}

/// Default provider: builds [`HostedClient`]s over `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct RestClientProvider {
    config: HostedClientConfig,
}

impl RestClientProvider {
    #[must_use]
    pub fn new(config: HostedClientConfig) -> Self {
        Self { config }
    }
}

impl HostedClientProvider for RestClientProvider {
    fn create_client(
        &self,
        url: &str,
        key: &SecretString,
    ) -> Result<Arc<dyn DatabaseClient>, AppError> {
        let client = HostedClient::new(
            url,
            SecretString::from(key.expose_secret()),
            self.config.clone(),
        )?;
        info!(url = %url, "Supabase REST client created");
        Ok(Arc::new(client))
    }
}
