pub mod request;
pub mod response;

pub use response::{ApiResponse, ResponseFormat};

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use assembly_core::{envelope, ApiSpec, ServiceResolver};
use assembly_store::{FileSpecStore, SpecStore};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ClientConfig, API_KEY_ENV};
use crate::error::{AssemblyError, TransportError};
use crate::http::{HttpClient, HttpRequestParts, HttpResponseParts, ReqwestHttpClient};
use crate::retry::{decide_retry, RetryDecision};
use crate::spec::{DocumentSpecFetcher, SpecDocumentDownloader, SpecFetcher, SpecResolver};

/// Client for the National Assembly open API.
///
/// Each call resolves the caller's token to a service id, looks up the live endpoint through
/// the specification cache, and issues the request with retries on transient failures.
pub struct AssemblyClient {
    config: ClientConfig,
    http: Arc<dyn HttpClient>,
    services: ServiceResolver,
    specs: SpecResolver,
}

impl AssemblyClient {
    /// Client backed by reqwest, the built-in service registry, and a file cache at
    /// `config.cache_dir`.
    pub fn new(config: ClientConfig) -> Result<Self, AssemblyError> {
        let http: Arc<dyn HttpClient> = Arc::new(
            ReqwestHttpClient::new(&config.user_agent).map_err(TransportError::from)?,
        );
        let store: Arc<dyn SpecStore> = Arc::new(FileSpecStore::new(config.cache_dir.clone()));
        Ok(Self::with_http(config, http, ServiceResolver::default(), store))
    }

    /// Client that downloads specifications through `http`.
    pub fn with_http(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        services: ServiceResolver,
        store: Arc<dyn SpecStore>,
    ) -> Self {
        let downloader = Arc::new(SpecDocumentDownloader::new(
            http.clone(),
            config.spec_url.clone(),
            config.user_agent.clone(),
            config.request_timeout,
            config.max_response_bytes,
        ));
        let fetcher: Arc<dyn SpecFetcher> =
            Arc::new(DocumentSpecFetcher::new(downloader, config.revision));
        Self::from_parts(config, http, services, fetcher, store)
    }

    pub fn from_parts(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        services: ServiceResolver,
        fetcher: Arc<dyn SpecFetcher>,
        store: Arc<dyn SpecStore>,
    ) -> Self {
        if config.api_key.is_none() {
            warn!("no API key configured ({API_KEY_ENV} is not set); requests are sent without KEY");
        }
        Self {
            config,
            http,
            services,
            specs: SpecResolver::new(fetcher, store),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn services(&self) -> &ServiceResolver {
        &self.services
    }

    /// Services whose id or name contains `keyword`, ignoring case.
    pub fn search(&self, keyword: &str) -> BTreeMap<String, String> {
        self.services.search(keyword)
    }

    pub fn resolve_service(&self, token: &str) -> Result<String, AssemblyError> {
        Ok(self.services.resolve(token)?)
    }

    pub async fn spec(&self, token: &str) -> Result<Arc<ApiSpec>, AssemblyError> {
        let service_id = self.resolve_service(token)?;
        self.with_deadline(self.specs.resolve(&service_id)).await
    }

    /// Live endpoint name for `token`.
    pub async fn endpoint(&self, token: &str) -> Result<String, AssemblyError> {
        Ok(self.spec(token).await?.endpoint.clone())
    }

    /// Drops the cached specification so the next call downloads it again.
    pub async fn invalidate(&self, token: &str) -> Result<(), AssemblyError> {
        let service_id = self.resolve_service(token)?;
        self.specs.invalidate(&service_id).await
    }

    pub async fn get_data(
        &self,
        token: &str,
        params: &BTreeMap<String, String>,
        format: ResponseFormat,
    ) -> Result<ApiResponse, AssemblyError> {
        let (_, response) = self.with_deadline(self.call(token, params, format)).await?;
        Ok(response)
    }

    pub async fn get_json(
        &self,
        token: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Value, AssemblyError> {
        let (_, response) = self
            .with_deadline(self.call(token, params, ResponseFormat::Json))
            .await?;
        Ok(response.into_json().unwrap_or(Value::Null))
    }

    /// Data rows of the response, deserialized into `T`. An `INFO-200` response yields no rows.
    pub async fn get_rows<T: DeserializeOwned>(
        &self,
        token: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Vec<T>, AssemblyError> {
        let (spec, response) = self
            .with_deadline(self.call(token, params, ResponseFormat::Json))
            .await?;
        let body = response.into_json().unwrap_or(Value::Null);
        envelope::rows(&body, &spec.endpoint)
            .iter()
            .map(|row| {
                serde_json::from_value::<T>(row.clone()).map_err(|e| {
                    AssemblyError::from(TransportError::Decode {
                        endpoint: spec.endpoint.clone(),
                        message: e.to_string(),
                    })
                })
            })
            .collect()
    }

    async fn call(
        &self,
        token: &str,
        params: &BTreeMap<String, String>,
        format: ResponseFormat,
    ) -> Result<(Arc<ApiSpec>, ApiResponse), AssemblyError> {
        let service_id = self.resolve_service(token)?;
        let spec = self.specs.resolve(&service_id).await?;

        let missing = spec.missing_required(params);
        if !missing.is_empty() {
            let names: Vec<&str> = missing.iter().map(|p| p.name.as_str()).collect();
            warn!(service_id = %service_id, missing = ?names, "required request parameters not supplied");
        }

        let query = request::merge_params(&self.config, format, params);
        let url = request::build_url(&self.config.base_url, &spec.endpoint, &query)?;
        let resp = self.dispatch(url, &spec.endpoint).await?;
        let response = response::decode(resp, format, &spec.endpoint, &service_id)?;
        Ok((spec, response))
    }

    /// Sends the GET, retrying timeouts, connection failures and retryable statuses with
    /// exponential backoff. The last failure is returned once attempts run out.
    async fn dispatch(
        &self,
        url: url::Url,
        endpoint: &str,
    ) -> Result<HttpResponseParts, TransportError> {
        let retry = &self.config.retry;
        let mut attempt_no = 1usize;
        loop {
            let result = self
                .http
                .send(
                    HttpRequestParts::get(url.clone()),
                    self.config.request_timeout,
                    self.config.max_response_bytes,
                )
                .await;

            let failure = match result {
                Ok(resp) if resp.is_success() => {
                    debug!(endpoint, attempt = attempt_no, status = resp.status, "request succeeded");
                    return Ok(resp);
                }
                Ok(resp) => TransportError::Status {
                    status: resp.status,
                    endpoint: endpoint.to_string(),
                },
                Err(e) => TransportError::Http(e),
            };

            let (status, network_failed) = match &failure {
                TransportError::Status { status, .. } => (Some(*status), false),
                TransportError::Http(e) => (None, e.is_retryable()),
                _ => (None, false),
            };

            match decide_retry(retry, attempt_no, status, network_failed) {
                RetryDecision::RetryAfter { delay, reason } => {
                    warn!(
                        endpoint,
                        attempt = attempt_no,
                        max_attempts = retry.max_attempts,
                        ?reason,
                        delay_ms = delay.as_millis() as u64,
                        error = %failure,
                        "request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt_no += 1;
                }
                RetryDecision::Stop { reason } => {
                    debug!(endpoint, attempt = attempt_no, ?reason, "giving up");
                    return Err(failure);
                }
            }
        }
    }

    async fn with_deadline<T, F>(&self, fut: F) -> Result<T, AssemblyError>
    where
        F: Future<Output = Result<T, AssemblyError>>,
    {
        match self.config.call_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| AssemblyError::Timeout(limit))?,
            None => fut.await,
        }
    }
}
