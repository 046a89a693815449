//! URL helpers for frontend-backend communication

use super::config::config;

/// Port the backend listens on when no explicit base URL is configured
pub const DEFAULT_API_PORT: u16 = 8000;

/// Base URL derived from the current window location
///
/// Returns e.g. "http://localhost:8000", or an empty string outside a browser.
pub fn window_api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT)
}

/// Full API URL for a resource path
///
/// ```ignore
/// let url = api_url("/product-groups/3");
/// ```
pub fn api_url(path: &str) -> String {
    join_url(&config().api_base, path)
}

/// Joins a base URL and a path with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_single_slash() {
        assert_eq!(join_url("http://h:8000", "/products/"), "http://h:8000/products/");
        assert_eq!(join_url("http://h:8000/", "products/"), "http://h:8000/products/");
        assert_eq!(join_url("http://h:8000/", ""), "http://h:8000");
    }
}
