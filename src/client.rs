//! Autotask API client.
//!
//! Low-level HTTP transport that handles authentication and raw requests.
//! Entity-specific operations live on [`Service`](crate::Service).

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use url::Url;

use crate::config::{ClientConfig, Credentials, NullPolicy};
use crate::error::{AutotaskError, Result};

pub(crate) const USER_AGENT: &str = concat!("autotask-rs/", env!("CARGO_PKG_VERSION"));

/// Low-level Autotask API client.
///
/// Sends the integration code, user name and secret headers on every
/// request and converts non-success statuses into errors.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use autotask::{AutotaskClient, ClientConfig, Credentials};
///
/// # fn example() -> autotask::Result<()> {
/// // Create from environment variables
/// let client = AutotaskClient::from_env()?;
///
/// // Or configure manually
/// let credentials = Credentials::new("api@example.com", "secret", "TRACKING");
/// let client = AutotaskClient::new(
///     ClientConfig::new(credentials)
///         .with_base_url("https://webservices15.autotask.net/ATServicesRest/V1.0/"),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AutotaskClient {
    http: Client,
    base_url: Arc<Url>,
    credentials: Arc<Credentials>,
    null_policy: NullPolicy,
}

impl std::fmt::Debug for AutotaskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutotaskClient")
            .field("base_url", &self.base_url.as_str())
            .field("null_policy", &self.null_policy)
            .finish_non_exhaustive()
    }
}

impl AutotaskClient {
    /// Create a client from environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is not set.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Create a new client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if config.base_url.ends_with('/') {
            config.base_url
        } else {
            format!("{}/", config.base_url)
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(config.timeout)
            .build()
            .map_err(AutotaskError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            credentials: Arc::new(config.credentials),
            null_policy: config.null_policy,
        })
    }

    /// Create a client for the given credentials and base URL with defaults
    /// for everything else.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_credentials(credentials: Credentials, base_url: &str) -> Result<Self> {
        Self::new(ClientConfig::new(credentials).with_base_url(base_url))
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Policy applied to unset fields in create/update bodies.
    pub fn null_policy(&self) -> NullPolicy {
        self.null_policy
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(self.http.get(url)).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(self.http.get(url).query(query)).await
    }

    /// Make a GET request against an absolute URL, such as a
    /// `pageDetails.nextPageUrl` handed back by the API.
    #[tracing::instrument(skip(self))]
    pub async fn get_url(&self, url: Url) -> Result<Response> {
        self.send(self.http.get(url)).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(self.http.post(url).json(body)).await
    }

    /// Make a PUT request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(self.http.put(url).json(body)).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<Response> {
        let url = self.base_url.join(path)?;
        self.send(self.http.delete(url)).await
    }

    /// Attach credentials, send, and check the status.
    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .header("ApiIntegrationcode", &self.credentials.integration_code)
            .header("UserName", &self.credentials.username)
            .header("Secret", &self.credentials.secret)
            .send()
            .await
            .map_err(AutotaskError::HttpError)?;

        Self::check_response(response).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(AutotaskError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let message = Self::extract_error_message(response, status).await;
        Err(AutotaskError::ApiError {
            message,
            status_code: Some(status.as_u16()),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            // Autotask reports failures as {"errors": ["..."]}
            if let Some(errors) = json.get("errors").and_then(|e| e.as_array()) {
                let messages: Vec<&str> = errors.iter().filter_map(|e| e.as_str()).collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            if let Some(msg) = json.get("message").and_then(|m| m.as_str()) {
                return msg.to_string();
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}
