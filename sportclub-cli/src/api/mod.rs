use anyhow::{Context, Result};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::models::{
    collection, LoginRequest, Member, NewTraining, Recommendation, RegisterRequest, Section,
    TrainingEntry,
};
use crate::session::{self, Credential, SharedSession};

mod error;

pub use error::ApiError;

/// API client for the SportCenter backend
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SharedSession,
    logout_on_reject: bool,
}

impl ApiClient {
    /// Create a new API client bound to the shared session
    pub fn new(config: &ApiConfig, session: SharedSession) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
            logout_on_reject: true,
        })
    }

    /// Whether a 401/403 on a protected call logs the session out
    pub fn with_logout_on_reject(mut self, enabled: bool) -> Self {
        self.logout_on_reject = enabled;
        self
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request and classify the outcome.
    ///
    /// A protected call without a credential fails with `Unauthenticated`
    /// before anything touches the network. A successful body is returned as
    /// parsed JSON, or `Value::Null` when it is empty or not JSON.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        requires_auth: bool,
    ) -> Result<Value, ApiError> {
        let credential = if requires_auth {
            let current = session::lock(&self.session).credential().cloned();
            Some(current.ok_or(ApiError::Unauthenticated)?)
        } else {
            None
        };

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method.clone(), &url);
        if let Some(credential) = &credential {
            request = request.bearer_auth(credential.as_str());
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("{} {} failed: {}", method, url, e);
            ApiError::from(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
                tracing::debug!("{} {} returned a non-JSON body: {}", method, url, e);
                Value::Null
            }));
        }

        let error = ApiError::from_status(status, &text);
        tracing::debug!("{} {} -> {}: {}", method, url, status, error);

        if requires_auth && self.logout_on_reject && error.is_auth_rejection() {
            tracing::warn!("Credential rejected with {}, logging out", status);
            if let Err(e) = session::lock(&self.session).logout() {
                tracing::warn!("Failed to clear rejected credential: {:#}", e);
            }
        }

        Err(error)
    }

    async fn send<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &T,
        requires_auth: bool,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Validation(e.to_string()))?;
        self.request(method, path, Some(&body), requires_auth).await
    }

    /// `GET /`: backend liveness
    pub async fn ping(&self) -> Result<String, ApiError> {
        let body = self.request(Method::GET, "/", None, false).await?;
        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("ok")
            .to_string())
    }

    /// Log in and store the issued credential in the session
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, ApiError> {
        tracing::debug!("Logging in as {}", username);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let body = self.send(Method::POST, "/users/login", &request, false).await?;

        let token = body
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Api {
                status: reqwest::StatusCode::OK,
                message: "Login response did not include a token".to_string(),
            })?;

        let credential = Credential::new(token);
        session::lock(&self.session)
            .login(credential.clone())
            .map_err(|e| ApiError::Validation(format!("Could not store credential: {:#}", e)))?;

        tracing::info!("Successfully logged in as {}", username);
        Ok(credential)
    }

    /// Register a new member; returns the backend's confirmation message
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, ApiError> {
        let body = self
            .send(Method::POST, "/users/register", request, false)
            .await?;

        Ok(body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Registration complete")
            .to_string())
    }

    pub async fn members(&self) -> Result<Vec<Member>, ApiError> {
        let body = self.request(Method::GET, "/users/", None, true).await?;
        Ok(collection(&body, "users"))
    }

    pub async fn sections(&self) -> Result<Vec<Section>, ApiError> {
        let body = self.request(Method::GET, "/sections/", None, false).await?;
        Ok(collection(&body, "sections"))
    }

    pub async fn join_section(&self, section_id: i64) -> Result<(), ApiError> {
        let body = serde_json::json!({ "section_id": section_id });
        self.request(Method::POST, "/sections/join", Some(&body), true)
            .await
            .map(|_| ())
    }

    pub async fn trainings(&self) -> Result<Vec<TrainingEntry>, ApiError> {
        let body = self.request(Method::GET, "/training/", None, true).await?;
        Ok(collection(&body, "trainings"))
    }

    /// Create a diary entry. The stored entry is read from `training` or
    /// `data`; `None` when the backend accepted it without echoing it back.
    pub async fn create_training(
        &self,
        training: &NewTraining,
    ) -> Result<Option<TrainingEntry>, ApiError> {
        let body = self.send(Method::POST, "/training/", training, true).await?;

        Ok(["training", "data"]
            .iter()
            .filter_map(|key| body.get(key))
            .find_map(|entry| serde_json::from_value(entry.clone()).ok()))
    }

    pub async fn recommendation(&self) -> Result<Recommendation, ApiError> {
        let body = self.request(Method::GET, "/ai/recommend", None, true).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Api {
            status: reqwest::StatusCode::OK,
            message: format!("Unexpected recommendation format: {}", e),
        })
    }
}
