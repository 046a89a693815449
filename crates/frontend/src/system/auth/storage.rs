//! Browser-side persistence of the session: the refresh token and email in
//! localStorage, and the session flag cookie read by the route guard.

use wasm_bindgen::JsCast;
use web_sys::{window, HtmlDocument};

const REFRESH_TOKEN_KEY: &str = "price_test_refresh_token";
const USER_EMAIL_KEY: &str = "price_test_user_email";

pub const SESSION_COOKIE: &str = "price_test_session";
pub const SESSION_MAX_AGE_SECS: u32 = 3600;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn html_document() -> Option<HtmlDocument> {
    window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

pub fn save_refresh_token(token: &str, email: &str) {
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(REFRESH_TOKEN_KEY, token);
        let _ = storage.set_item(USER_EMAIL_KEY, email);
    }
}

pub fn get_refresh_token() -> Option<String> {
    get_local_storage()?.get_item(REFRESH_TOKEN_KEY).ok()?
}

pub fn get_user_email() -> Option<String> {
    get_local_storage()?.get_item(USER_EMAIL_KEY).ok()?
}

pub fn clear_tokens() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
        let _ = storage.remove_item(USER_EMAIL_KEY);
    }
}

/// `document.cookie` assignment that sets or expires the session flag
pub fn session_cookie(active: bool) -> String {
    if active {
        format!(
            "{}=1; path=/; max-age={}; SameSite=Lax",
            SESSION_COOKIE, SESSION_MAX_AGE_SECS
        )
    } else {
        format!("{}=; path=/; max-age=0; SameSite=Lax", SESSION_COOKIE)
    }
}

/// Looks for `price_test_session=1` in a `document.cookie` string
pub fn has_session_flag(cookies: &str) -> bool {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(name, value)| name == SESSION_COOKIE && value == "1")
}

pub fn set_session_flag(active: bool) {
    match html_document() {
        Some(document) => {
            if let Err(e) = document.set_cookie(&session_cookie(active)) {
                log::warn!("failed to write session cookie: {:?}", e);
            }
        }
        None => log::warn!("no document; session cookie not written"),
    }
}

pub fn session_flag_present() -> bool {
    html_document()
        .and_then(|document| document.cookie().ok())
        .map(|cookies| has_session_flag(&cookies))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_strings() {
        assert_eq!(
            session_cookie(true),
            "price_test_session=1; path=/; max-age=3600; SameSite=Lax"
        );
        assert!(session_cookie(false).contains("max-age=0"));
    }

    #[test]
    fn flag_is_found_among_other_cookies() {
        assert!(has_session_flag("theme=dark; price_test_session=1; lang=en"));
        assert!(has_session_flag("price_test_session=1"));
        assert!(!has_session_flag("price_test_session="));
        assert!(!has_session_flag("other_price_test_session=1"));
        assert!(!has_session_flag(""));
    }
}
