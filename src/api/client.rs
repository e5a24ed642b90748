//! HTTP client for the user directory REST API.
//!
//! Every call unwraps the `{success, message, data}` envelope and folds any
//! failure into a single [`ApiError`] whose message is ready for display.
//! There are no retries: a failed call is reported once and the user decides
//! whether to try again.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{ApiResponse, CreateUserRequest, ErrorEnvelope, UpdateUserRequest, User};

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// The four operations the directory needs from a backend.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// `GET /users`. A missing `data` field yields an empty list.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// `POST /users`. Returns the created record.
    async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ApiError>;

    /// `PUT /users/{id}`. Returns the updated record.
    async fn update_user(&self, id: &str, request: &UpdateUserRequest) -> Result<User, ApiError>;

    /// `DELETE /users/{id}`.
    async fn delete_user(&self, id: &str) -> Result<(), ApiError>;
}

/// [`UserApi`] backed by reqwest.
pub struct HttpUserApi {
    base_url: Url,
    timeout_ms: u64,
    client: reqwest::Client,
}

impl HttpUserApi {
    /// Creates a client for `base_url` (e.g. `http://localhost:3000/api`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid API base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "API base URL '{base_url}' cannot carry a path"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        info!(
            "User API client ready: base_url={}, timeout={}ms",
            base_url,
            timeout.as_millis()
        );

        Ok(Self {
            base_url,
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base}/users` or `{base}/users/{id}` with `id` escaped as one segment.
    fn users_url(&self, id: Option<&str>) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| ApiError::Config(format!("API base URL '{}' cannot carry a path", self.base_url)))?;
            segments.pop_if_empty().push("users");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<Response, ApiError> {
        debug!("{} {}", method, url.path());
        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            let err = ApiError::from_reqwest(&e, self.timeout_ms);
            warn!("{} {} failed: {}", method, url.path(), err);
            err
        })?;

        let status = response.status();
        debug!("{} {} -> {}", method, url.path(), status);
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let envelope_message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|envelope| envelope.message);
        let err = ApiError::status(status.as_u16(), envelope_message);
        warn!("{} {} rejected: HTTP {} - {}", method, url.path(), status.as_u16(), err);
        Err(err)
    }

    async fn read_envelope<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<ApiResponse<T>, ApiError> {
        response
            .json::<ApiResponse<T>>()
            .await
            .map_err(|e| ApiError::from_reqwest(&e, self.timeout_ms))
    }
}

/// Serializes a request body up front so `send` stays non-generic.
fn json_body<T: Serialize>(value: &T) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(value).map_err(|e| ApiError::Parse(e.to_string()))
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let url = self.users_url(None)?;
        let response = self.send(Method::GET, url, None).await?;
        let envelope: ApiResponse<Vec<User>> = self.read_envelope(response).await?;
        let users = envelope.data.unwrap_or_default();
        debug!("Listed {} users (count field: {:?})", users.len(), envelope.count);
        Ok(users)
    }

    async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ApiError> {
        let url = self.users_url(None)?;
        let response = self.send(Method::POST, url, Some(json_body(request)?)).await?;
        let envelope: ApiResponse<User> = self.read_envelope(response).await?;
        envelope.data.ok_or_else(|| {
            warn!("Create succeeded without a record: {}", envelope.message);
            ApiError::EmptyResponse
        })
    }

    async fn update_user(&self, id: &str, request: &UpdateUserRequest) -> Result<User, ApiError> {
        let url = self.users_url(Some(id))?;
        let response = self.send(Method::PUT, url, Some(json_body(request)?)).await?;
        let envelope: ApiResponse<User> = self.read_envelope(response).await?;
        envelope.data.ok_or_else(|| {
            warn!("Update of {} succeeded without a record: {}", id, envelope.message);
            ApiError::EmptyResponse
        })
    }

    async fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let url = self.users_url(Some(id))?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }
}
