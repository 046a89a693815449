//! Firebase Authentication REST payloads

use serde::{Deserialize, Serialize};

/// Body of `accounts:signInWithPassword`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
    pub return_secure_token: bool,
}

impl SignInRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            return_secure_token: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub id_token: String,
    pub email: String,
    pub refresh_token: String,
    /// Token lifetime in seconds, sent as a string
    pub expires_in: String,
    pub local_id: String,
}

/// Response of the secure token endpoint (snake_case on the wire)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub id_token: String,
    pub refresh_token: String,
    pub expires_in: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseErrorBody {
    pub error: FirebaseErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseErrorDetail {
    pub code: u16,
    pub message: String,
}

/// Signed-in user as seen by the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub uid: String,
    pub email: String,
}

/// Parses the `expires_in` string; Firebase ID tokens live one hour
pub fn parse_expires_in(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_request_uses_camel_case() {
        let json = serde_json::to_value(SignInRequest::new("a@b.c", "pw")).unwrap();
        assert_eq!(json["returnSecureToken"], true);
        assert_eq!(json["email"], "a@b.c");
    }

    #[test]
    fn expires_in_falls_back_to_one_hour() {
        assert_eq!(parse_expires_in("1800"), 1800);
        assert_eq!(parse_expires_in("soon"), 3600);
    }
}
