//! Firebase Authentication REST calls

use contracts::system::auth::{FirebaseErrorBody, RefreshResponse, SignInRequest, SignInResponse};
use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::shared::config::config;

const SIGN_IN_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword";
const REFRESH_URL: &str = "https://securetoken.googleapis.com/v1/token";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Enter a valid email address.")]
    InvalidEmail,
    #[error("This account has been disabled.")]
    UserDisabled,
    #[error("Too many unsuccessful attempts. Try again later.")]
    TooManyAttempts,
    #[error("Your session has expired. Please sign in again.")]
    SessionExpired,
    #[error("Sign-in is not configured.")]
    NotConfigured,
    #[error("Sign-in failed: {0}")]
    Provider(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl AuthError {
    /// Maps the provider's error message, e.g.
    /// `"TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account..."`
    pub fn from_provider_message(message: &str) -> Self {
        let code = message
            .split(|c: char| c == ':' || c.is_whitespace())
            .next()
            .unwrap_or_default();
        match code {
            "INVALID_PASSWORD" | "EMAIL_NOT_FOUND" | "INVALID_LOGIN_CREDENTIALS"
            | "MISSING_PASSWORD" => AuthError::InvalidCredentials,
            "INVALID_EMAIL" => AuthError::InvalidEmail,
            "USER_DISABLED" => AuthError::UserDisabled,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
            "TOKEN_EXPIRED" | "INVALID_REFRESH_TOKEN" | "USER_NOT_FOUND" => {
                AuthError::SessionExpired
            }
            _ => AuthError::Provider(message.to_string()),
        }
    }

    /// Error for a non-2xx provider response
    pub fn from_response_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<FirebaseErrorBody>(body) {
            Ok(parsed) => Self::from_provider_message(&parsed.error.message),
            Err(_) => AuthError::Provider(format!("status {}", status)),
        }
    }
}

fn endpoint(base: &str) -> Result<String, AuthError> {
    let firebase = &config().firebase;
    if !firebase.is_configured() {
        return Err(AuthError::NotConfigured);
    }
    Ok(format!("{}?key={}", base, urlencoding::encode(&firebase.api_key)))
}

async fn read_response<T: DeserializeOwned>(response: gloo_net::http::Response) -> Result<T, AuthError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    if !response.ok() {
        return Err(AuthError::from_response_body(status, &body));
    }
    serde_json::from_str(&body).map_err(|e| AuthError::Parse(e.to_string()))
}

pub async fn sign_in_with_password(email: &str, password: &str) -> Result<SignInResponse, AuthError> {
    let request = SignInRequest::new(email, password);
    let response = Request::post(&endpoint(SIGN_IN_URL)?)
        .json(&request)
        .map_err(|e| AuthError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    read_response(response).await
}

/// Form body of the token refresh call
pub fn refresh_form(refresh_token: &str) -> String {
    format!(
        "grant_type=refresh_token&refresh_token={}",
        urlencoding::encode(refresh_token)
    )
}

pub async fn refresh_id_token(refresh_token: &str) -> Result<RefreshResponse, AuthError> {
    let response = Request::post(&endpoint(REFRESH_URL)?)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(refresh_form(refresh_token))
        .map_err(|e| AuthError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    read_response(response).await
}
