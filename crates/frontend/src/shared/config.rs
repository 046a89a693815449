//! Build-time configuration of the dashboard.
//!
//! Values are baked in at compile time (`trunk build` forwards the process
//! environment), so a deployment is configured with:
//!
//! ```text
//! PRICE_TEST_API_BASE=https://api.example.com FIREBASE_API_KEY=... trunk build --release
//! ```

use once_cell::sync::Lazy;

use super::api_utils::window_api_base;

/// Identity provider settings (Firebase project)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
}

impl FirebaseConfig {
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL of the REST backend, without trailing slash
    pub api_base: String,
    pub firebase: FirebaseConfig,
}

static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_build_env);

/// Process-wide configuration, resolved on first use
pub fn config() -> &'static AppConfig {
    &CONFIG
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        let config = Self {
            api_base: resolve_api_base(option_env!("PRICE_TEST_API_BASE"), window_api_base),
            firebase: FirebaseConfig {
                api_key: option_env!("FIREBASE_API_KEY").unwrap_or_default().to_string(),
                auth_domain: option_env!("FIREBASE_AUTH_DOMAIN")
                    .unwrap_or_default()
                    .to_string(),
                project_id: option_env!("FIREBASE_PROJECT_ID")
                    .unwrap_or_default()
                    .to_string(),
            },
        };
        if !config.firebase.is_configured() {
            log::warn!("FIREBASE_API_KEY is not set; sign-in will fail");
        }
        log::info!("API base: {}", config.api_base);
        config
    }
}

/// Explicit base URL wins; otherwise fall back to the one derived from the window
pub fn resolve_api_base(explicit: Option<&str>, fallback: impl FnOnce() -> String) -> String {
    let base = match explicit.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => fallback(),
    };
    base.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_base_wins_and_is_normalized() {
        let base = resolve_api_base(Some(" https://api.example.com/ "), || {
            panic!("fallback must not run")
        });
        assert_eq!(base, "https://api.example.com");
    }

    #[test]
    fn empty_base_uses_fallback() {
        let base = resolve_api_base(Some(""), || "http://localhost:8000".to_string());
        assert_eq!(base, "http://localhost:8000");
        let base = resolve_api_base(None, || "http://127.0.0.1:8000/".to_string());
        assert_eq!(base, "http://127.0.0.1:8000");
    }
}
