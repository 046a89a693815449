//! HTTP client for the price test backend.
//!
//! Every call attaches `Authorization: Bearer <id token>` when a user is
//! signed in (the token is taken once the session has resolved its first
//! auth state) and maps non-2xx responses to [`ApiError`].

use crate::shared::api_utils::api_url;
use crate::system::auth::session::session;
use gloo_net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Authentication failed. Please sign in again.")]
    Unauthorized,
    #[error("Authorization failed. You do not have access to this resource.")]
    Forbidden,
    #[error("Resource not found.")]
    NotFound,
    #[error("Request failed with status {}{}", .status, detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {}", detail),
        None => String::new(),
    }
}

impl ApiError {
    /// Error for a non-2xx response. `body` is searched for a `detail` field
    /// (`{"detail": "..."}`); a non-JSON body is used as the detail verbatim.
    pub fn from_status(status: u16, body: &str) -> Self {
        match status {
            401 => ApiError::Unauthorized,
            403 => ApiError::Forbidden,
            404 => ApiError::NotFound,
            _ => ApiError::Status {
                status,
                detail: extract_detail(body),
            },
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::Forbidden)
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(detail)) => Some(detail.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        },
        Err(_) => Some(body.to_string()),
    }
}

/// Interprets a finished response: `None` for 204 or an empty 2xx body
pub fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_status(status, body));
    }
    if status == 204 || body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body)
        .map(Some)
        .map_err(|e| ApiError::Parse(e.to_string()))
}

async fn send(
    builder: RequestBuilder,
    url: &str,
    body: Option<String>,
) -> Result<(u16, String), ApiError> {
    let mut builder = builder.header("Accept", "application/json");
    if let Some(token) = session().id_token().await {
        builder = builder.header("Authorization", &format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder.header("Content-Type", "application/json").body(body),
        None => builder.build(),
    }
    .map_err(|e| ApiError::Network(e.to_string()))?;

    log::debug!("request {}", url);
    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    Ok((status, text))
}

fn finish<T: DeserializeOwned>(url: &str, status: u16, text: &str) -> Result<Option<T>, ApiError> {
    let result = decode_body(status, text);
    match &result {
        Err(e) if e.is_auth_error() => log::warn!("{} rejected the session: {}", url, e),
        Err(e) => log::warn!("{} failed: {}", url, e),
        Ok(_) => {}
    }
    result
}

pub async fn get<T: DeserializeOwned>(path: &str) -> Result<Option<T>, ApiError> {
    let url = api_url(path);
    let (status, text) = send(Request::get(&url), &url, None).await?;
    finish(&url, status, &text)
}

/// GET for collection endpoints; an empty response is an empty list
pub async fn get_list<T: DeserializeOwned>(path: &str) -> Result<Vec<T>, ApiError> {
    Ok(get::<Vec<T>>(path).await?.unwrap_or_default())
}

/// GET for a single resource; an empty response counts as not found
pub async fn get_one<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    get(path).await?.ok_or(ApiError::NotFound)
}

pub async fn post<B, T>(path: &str, body: &B) -> Result<Option<T>, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let payload = serde_json::to_string(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    let url = api_url(path);
    let (status, text) = send(Request::post(&url), &url, Some(payload)).await?;
    finish(&url, status, &text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: i64,
    }

    #[test]
    fn status_codes_map_to_messages() {
        assert_eq!(
            ApiError::from_status(401, "").to_string(),
            "Authentication failed. Please sign in again."
        );
        assert_eq!(
            ApiError::from_status(403, "{}").to_string(),
            "Authorization failed. You do not have access to this resource."
        );
        assert_eq!(ApiError::from_status(404, "").to_string(), "Resource not found.");
        assert_eq!(
            ApiError::from_status(500, "").to_string(),
            "Request failed with status 500"
        );
        assert!(ApiError::from_status(401, "").is_auth_error());
        assert!(!ApiError::from_status(404, "").is_auth_error());
    }

    #[test]
    fn server_detail_is_appended() {
        let err = ApiError::from_status(422, r#"{"detail":"name already exists"}"#);
        assert_eq!(err.to_string(), "Request failed with status 422: name already exists");

        let err = ApiError::from_status(502, "Bad gateway");
        assert_eq!(err.to_string(), "Request failed with status 502: Bad gateway");

        let err = ApiError::from_status(400, r#"{"detail":[{"loc":["body","name"]}]}"#);
        assert!(err.to_string().starts_with("Request failed with status 400: [{"));

        let err = ApiError::from_status(409, r#"{"message":"conflict"}"#);
        assert_eq!(err.to_string(), "Request failed with status 409");
    }

    #[test]
    fn no_content_is_none() {
        assert_eq!(decode_body::<Item>(204, "").unwrap(), None);
        assert_eq!(decode_body::<Item>(200, "  ").unwrap(), None);
    }

    #[test]
    fn success_body_is_parsed() {
        assert_eq!(decode_body::<Item>(200, r#"{"id":7}"#).unwrap(), Some(Item { id: 7 }));
        assert_eq!(
            decode_body::<Vec<Item>>(201, r#"[{"id":1},{"id":2}]"#).unwrap().map(|v| v.len()),
            Some(2)
        );
    }

    #[test]
    fn malformed_body_is_parse_error() {
        let err = decode_body::<Item>(200, "<html>").unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse response: "));
    }

    #[test]
    fn error_status_wins_over_body() {
        assert_eq!(decode_body::<Item>(401, r#"{"id":1}"#).unwrap_err(), ApiError::Unauthorized);
    }

    #[test]
    fn network_error_message() {
        assert_eq!(
            ApiError::Network("connection refused".into()).to_string(),
            "Network error: connection refused"
        );
    }
}
