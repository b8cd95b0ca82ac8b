//! Shared HTTP transport for the HausPet API.
//!
//! Every request carries JSON headers and, when one is stored, the user's
//! bearer token. Transient server errors are retried with exponential backoff;
//! everything else surfaces immediately as an [`ApiError`].

use std::sync::OnceLock;

use regex::Regex;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ClientConfig;
use crate::storage::{SecureStore, USER_TOKEN_KEY};
use crate::util::{error_snippet, normalize_text_option};

const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{message} ({status})")]
    Status { status: u16, message: String },
    #[error("Failed to encode or decode JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Clone)]
pub struct ApiClient<C: SecureStore> {
    config: ClientConfig,
    client: Client,
    credentials: C,
}

impl<C: SecureStore> ApiClient<C> {
    pub fn new(config: ClientConfig, credentials: C) -> ApiResult<Self> {
        Ok(Self {
            config,
            client: Client::builder().build()?,
            credentials,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let body = self.request(Method::GET, path, None).await?;
        decode(body)
    }

    pub async fn post<B, T>(&self, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_string(payload)?;
        let body = self.request(Method::POST, path, Some(payload)).await?;
        decode(body)
    }

    pub async fn put<B, T>(&self, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_string(payload)?;
        let body = self.request(Method::PUT, path, Some(payload)).await?;
        decode(body)
    }

    /// Issue a DELETE; any response body is discarded.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.request(Method::DELETE, path, None).await?;
        Ok(())
    }

    fn bearer_token(&self) -> Option<String> {
        match self.credentials.get(USER_TOKEN_KEY) {
            Ok(token) => normalize_text_option(token),
            Err(error) => {
                tracing::warn!("Failed to read stored API token: {}", error);
                None
            }
        }
    }

    /// Send a request, retrying transient server errors. Returns the response
    /// body, or `None` for `204 No Content`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<String>,
    ) -> ApiResult<Option<String>> {
        let url = self.config.endpoint(path);
        let token = self.bearer_token();
        let retry = self.config.retry;
        let mut attempt = 0;

        loop {
            let mut request = self
                .client
                .request(method.clone(), &url)
                .header(CONTENT_TYPE, "application/json")
                .header(ACCEPT, "application/json");
            if let Some(token) = token.as_deref() {
                request = request.bearer_auth(token);
            }
            if let Some(payload) = payload.as_ref() {
                request = request.body(payload.clone());
            }

            let response = request.send().await?;
            let status = response.status();
            if status.is_success() {
                if status == StatusCode::NO_CONTENT {
                    return Ok(None);
                }
                return Ok(Some(response.text().await?));
            }

            let body = response.text().await.unwrap_or_default();
            let message = parse_error_message(status, &body);
            log_failure(&method, &url, status, &message);

            if is_retryable(status) && attempt + 1 < retry.max_attempts {
                let delay = retry.delay_for(attempt);
                tracing::debug!(
                    "Retrying {} {} in {:?} (attempt {} of {})",
                    method,
                    url,
                    delay,
                    attempt + 2,
                    retry.max_attempts
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
    }
}

fn decode<T: DeserializeOwned>(body: Option<String>) -> ApiResult<T> {
    let body = body.unwrap_or_default();
    let body = if body.trim().is_empty() { "null" } else { body.as_str() };
    Ok(serde_json::from_str(body)?)
}

/// Statuses retried by the transport; every other failure is final.
pub const fn is_retryable(status: StatusCode) -> bool {
    matches!(status.as_u16(), 500 | 502 | 503 | 504)
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Pick the most useful message from an error response: the JSON `message`,
/// then `error`, then the status reason phrase.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = normalize_text_option(payload.message.or(payload.error)) {
            return message;
        }
    }

    status
        .canonical_reason()
        .unwrap_or(UNKNOWN_ERROR_MESSAGE)
        .to_string()
}

/// "Current" location/health lookups 404 routinely when a collar has not
/// reported yet.
pub fn is_expected_not_found(url: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"/pets/[^/]+/(location|health)/current$").expect("Invalid regex")
        })
        .is_match(url)
}

fn log_failure(method: &Method, url: &str, status: StatusCode, message: &str) {
    if status == StatusCode::NOT_FOUND {
        if !is_expected_not_found(url) {
            tracing::debug!("API 404: {} {} - {}", method, url, error_snippet(message));
        }
        return;
    }
    tracing::warn!(
        "API error: {} {} for {} {} - {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or_default(),
        method,
        url,
        error_snippet(message)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_message_then_error() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            parse_error_message(status, r#"{"message":"Name is required","error":"bad"}"#),
            "Name is required"
        );
        assert_eq!(
            parse_error_message(status, r#"{"error":"Invalid species"}"#),
            "Invalid species"
        );
    }

    #[test]
    fn error_message_falls_back_to_reason_phrase() {
        assert_eq!(
            parse_error_message(StatusCode::NOT_FOUND, "<html>nope</html>"),
            "Not Found"
        );
        assert_eq!(
            parse_error_message(StatusCode::SERVICE_UNAVAILABLE, r#"{"message":"  "}"#),
            "Service Unavailable"
        );
    }

    #[test]
    fn only_gateway_and_server_errors_are_retryable() {
        for code in [500, 502, 503, 504] {
            assert!(is_retryable(StatusCode::from_u16(code).unwrap()));
        }
        for code in [400, 401, 404, 422, 501] {
            assert!(!is_retryable(StatusCode::from_u16(code).unwrap()));
        }
    }

    #[test]
    fn current_lookups_are_expected_not_found() {
        assert!(is_expected_not_found(
            "https://api.hauspet.net/pets/7/location/current"
        ));
        assert!(is_expected_not_found(
            "https://api.hauspet.net/pets/abc/health/current"
        ));
        assert!(!is_expected_not_found("https://api.hauspet.net/api/v1/pets/7"));
        assert!(!is_expected_not_found(
            "https://api.hauspet.net/pets/7/location/history"
        ));
    }

    #[test]
    fn api_error_exposes_status() {
        let error = ApiError::Status {
            status: 422,
            message: "Weight must be positive".to_string(),
        };
        assert_eq!(error.status(), Some(422));
        assert_eq!(error.to_string(), "Weight must be positive (422)");
    }

    #[test]
    fn decode_treats_empty_body_as_null() {
        let value: Option<u32> = decode(None).unwrap();
        assert_eq!(value, None);
        let value: Vec<u32> = decode(Some("[1,2]".to_string())).unwrap();
        assert_eq!(value, vec![1, 2]);
    }
}
