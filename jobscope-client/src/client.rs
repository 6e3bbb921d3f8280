use jobscope_core::ApiConfig;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use validator::Validate;

use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::interceptor::{PassThrough, RequestInterceptor};

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Prefix for every request path. May carry a path of its own
    /// (`https://host/api/v2`), which is kept.
    pub base_url: String,
    /// Limit for the whole exchange, from connect to the last body byte.
    /// Zero disables the limit.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }
}

/// Concatenates `base` and `path` with exactly one `/` between them.
pub fn join_url(base: &str, path: &str) -> Result<Url, ApiError> {
    let joined = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    Url::parse(&joined).map_err(|source| ApiError::InvalidUrl {
        url: joined,
        source,
    })
}

/// The single configured transport. Cheap to clone; clones share the
/// connection pool and interceptor.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    interceptor: Arc<dyn RequestInterceptor>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        Self::with_interceptor(config, PassThrough)
    }

    pub fn with_interceptor(
        config: ClientConfig,
        interceptor: impl RequestInterceptor + 'static,
    ) -> Result<Self, ApiError> {
        Url::parse(&config.base_url).map_err(|source| ApiError::InvalidUrl {
            url: config.base_url.clone(),
            source,
        })?;
        let mut builder = Client::builder();
        if !config.timeout.is_zero() {
            builder = builder.timeout(config.timeout);
        }
        let http = builder.build().map_err(ApiError::Client)?;

        Ok(Self {
            http,
            base_url: config.base_url,
            timeout: config.timeout,
            interceptor: Arc::new(interceptor),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        join_url(&self.base_url, path)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::GET, path, |builder| builder).await
    }

    /// GET with `query` serialized into the URL query string.
    pub async fn get_with<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(Method::GET, path, |builder| builder.query(query))
            .await
    }

    /// POST with `body` sent as JSON.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, |builder| builder.json(body))
            .await
    }

    pub(crate) async fn get_checked<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + Validate,
    {
        check(path, query)?;
        self.get_with(path, query).await
    }

    pub(crate) async fn post_checked<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + Validate,
    {
        check(path, body)?;
        self.post(path, body).await
    }

    /// Runs one call through the interceptor and envelope chain, logging
    /// any failure once.
    async fn send<T, F>(&self, method: Method, path: &str, prepare: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        match self.dispatch(method, path, prepare).await {
            Ok(envelope) => envelope.into_data(),
            Err(err) => {
                if err.is_transport() {
                    error!(error = ?err, "Network or Server Error: {}", err);
                } else {
                    error!(error = ?err, "API request to {} not sent: {}", path, err);
                }
                Err(err)
            }
        }
    }

    /// Builds, intercepts and executes the request, then parses the envelope.
    async fn dispatch<F>(&self, method: Method, path: &str, prepare: F) -> Result<Envelope, ApiError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.url(path)?;
        let request = prepare(self.http.request(method, url))
            .build()
            .map_err(ApiError::Request)?;
        let request = self.interceptor.intercept(request)?;
        debug!(method = %request.method(), url = %request.url(), "Sending API request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| self.classify(e))?
            .error_for_status()
            .map_err(|e| self.classify(e))?;
        let body = response.bytes().await.map_err(|e| self.classify(e))?;

        serde_json::from_slice(&body).map_err(ApiError::Decode)
    }

    /// Sorts a `reqwest` failure into timeout, status or plain transport.
    fn classify(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout {
                timeout: self.timeout,
                source: err,
            }
        } else if let Some(status) = err.status() {
            ApiError::Status {
                status,
                source: err,
            }
        } else {
            ApiError::Transport(err)
        }
    }
}

/// Rejects invalid parameters before any request is built.
fn check<V: Validate>(path: &str, params: &V) -> Result<(), ApiError> {
    params.validate().map_err(|e| {
        warn!("Refusing to call {} with invalid parameters: {}", path, e);
        ApiError::Validate(e)
    })
}
