//! HTTP client wrapper for the Lens backend.

use std::fmt;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{ApiError, Error, Result};
use crate::models::{
    AggregateRequest, AggregateResponse, AttributeOption, LensConfig, ReadRequest, ReadResponse,
    View,
};

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of a single view. The id is percent-encoded so it stays one segment.
fn view_endpoint(id: &str) -> String {
    format!("/views/{}", urlencoding::encode(id))
}

/// Client for a Lens backend.
#[derive(Clone)]
pub struct LensClient {
    token: Option<String>,
    http_client: reqwest::Client,
    base_url: String,
}

/// Builder for [`LensClient`].
#[derive(Debug)]
pub struct LensClientBuilder {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl LensClientBuilder {
    /// Starts a builder for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Sets the bearer token sent with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the client.
    pub fn build(self) -> Result<LensClient> {
        let http_client = reqwest::Client::builder().timeout(self.timeout).build()?;

        Ok(LensClient {
            token: self.token,
            http_client,
            base_url: self.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl LensClient {
    /// Creates a client with default settings.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let builder = LensClientBuilder::new(base_url);
        match token {
            Some(token) => builder.token(token).build(),
            None => builder.build(),
        }
    }

    /// Returns a builder.
    pub fn builder(base_url: impl Into<String>) -> LensClientBuilder {
        LensClientBuilder::new(base_url)
    }

    /// Returns the API token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the base URL (without trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches the attribute configuration of the data set.
    pub async fn fetch_config(&self) -> Result<LensConfig> {
        self.get("/config").await
    }

    /// Reads one page of records.
    pub async fn read(&self, request: &ReadRequest) -> Result<ReadResponse> {
        self.post("/read", request).await
    }

    /// Lists saved views.
    pub async fn list_views(&self) -> Result<Vec<View>> {
        self.get("/views").await
    }

    /// Fetches a single view.
    pub async fn get_view(&self, id: &str) -> Result<View> {
        self.get(&view_endpoint(id)).await
    }

    /// Creates the view when it has no id yet, otherwise replaces it.
    pub async fn save_view(&self, view: &View) -> Result<View> {
        if view.id.is_empty() {
            self.post("/views", view).await
        } else {
            self.put(&view_endpoint(&view.id), view).await
        }
    }

    /// Deletes a view.
    pub async fn delete_view(&self, id: &str) -> Result<()> {
        self.delete(&view_endpoint(id)).await
    }

    /// Fetches the option list of an attribute from the backend aggregator.
    pub async fn aggregate_options(
        &self,
        request: &AggregateRequest,
    ) -> Result<Vec<AttributeOption>> {
        let response: AggregateResponse = self.post("/aggregate", request).await?;
        Ok(response.options)
    }

    /// Performs a GET request to the given endpoint.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let request = self.http_client.get(self.url(endpoint));
        let response = self.authorize(request).send().await?;
        self.handle_response(endpoint, response).await
    }

    /// Performs a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.http_client.post(self.url(endpoint)).json(body);
        let response = self.authorize(request).send().await?;
        self.handle_response(endpoint, response).await
    }

    /// Performs a PUT request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.http_client.put(self.url(endpoint)).json(body);
        let response = self.authorize(request).send().await?;
        self.handle_response(endpoint, response).await
    }

    /// Performs a DELETE request.
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        let request = self.http_client.delete(self.url(endpoint));
        let response = self.authorize(request).send().await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(self.parse_error_response(endpoint, response).await)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        if response.status().is_success() {
            // Read as text first so decode failures surface as JSON errors.
            let body = response.text().await?;
            return Ok(serde_json::from_str(&body)?);
        }

        Err(self.parse_error_response(endpoint, response).await)
    }

    /// Converts an error response into an [`ApiError`].
    async fn parse_error_response(&self, endpoint: &str, response: reqwest::Response) -> Error {
        let status = response.status();
        let status_code = status.as_u16();

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let message = response.text().await.unwrap_or_default();

        let api_error = match status_code {
            401 | 403 => ApiError::Auth {
                message: if message.is_empty() {
                    "Authentication failed".to_string()
                } else {
                    message
                },
            },
            404 => ApiError::NotFound {
                resource: endpoint.to_string(),
            },
            429 => ApiError::RateLimit { retry_after },
            400 | 422 => ApiError::Validation {
                message: if message.is_empty() {
                    "Bad request".to_string()
                } else {
                    message
                },
            },
            _ => ApiError::Http {
                status: status_code,
                message: if message.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    message
                },
            },
        };

        Error::Api(api_error)
    }
}

impl fmt::Debug for LensClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LensClient")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
