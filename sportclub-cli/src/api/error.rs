use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Every way a call through the API client can fail. None of them is fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Protected call attempted without a credential; nothing was sent
    #[error("You are not logged in")]
    Unauthenticated,

    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    /// Transport failure: DNS, refused connection, timeout, broken body
    #[error("Connection to the server failed")]
    Network(String),

    /// Local required-field check failed; nothing was sent
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    /// Build an error from a rejected response, preferring the backend's own
    /// `error` (or `message`) field
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let from_body = serde_json::from_str::<Value>(body).ok().and_then(|json| {
            ["error", "message"]
                .iter()
                .find_map(|key| json.get(key).and_then(Value::as_str).map(str::to_string))
        });

        let message = from_body.filter(|m| !m.trim().is_empty()).unwrap_or_else(|| {
            format!(
                "Request failed ({} {})",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown error")
            )
        });

        ApiError::Api { status, message }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend refused the credential
    pub fn is_auth_rejection(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_backend_error() {
        let error = ApiError::from_status(StatusCode::CONFLICT, r#"{"error":"already joined"}"#);
        assert_eq!(error.to_string(), "already joined");
        assert_eq!(error.status(), Some(StatusCode::CONFLICT));
    }

    #[test]
    fn test_from_status_falls_back_to_message_field() {
        let error = ApiError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"duration must be positive"}"#,
        );
        assert_eq!(error.to_string(), "duration must be positive");
    }

    #[test]
    fn test_from_status_generic_message() {
        let error = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(error.to_string(), "Request failed (500 Internal Server Error)");

        let error = ApiError::from_status(StatusCode::BAD_REQUEST, r#"{"error":"  "}"#);
        assert_eq!(error.to_string(), "Request failed (400 Bad Request)");
    }

    #[test]
    fn test_auth_rejection() {
        assert!(ApiError::from_status(StatusCode::UNAUTHORIZED, "").is_auth_rejection());
        assert!(ApiError::from_status(StatusCode::FORBIDDEN, "").is_auth_rejection());
        assert!(!ApiError::from_status(StatusCode::NOT_FOUND, "").is_auth_rejection());
        assert!(!ApiError::Unauthenticated.is_auth_rejection());
    }
}
