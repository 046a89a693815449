//! Client-side route guard driven by the session cookie flag

use crate::system::auth::context::use_auth;
use crate::system::auth::storage::session_flag_present;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Where to send the browser for `path`, if anywhere.
///
/// API paths are never touched. Without the flag every other non-login path
/// goes to the login page; with it the login page goes home.
pub fn guard_redirect(path: &str, has_session: bool) -> Option<&'static str> {
    if path == "/api" || path.starts_with("/api/") {
        return None;
    }
    let is_login = path == LOGIN_PATH || path.starts_with("/login/");
    match (is_login, has_session) {
        (true, true) => Some(HOME_PATH),
        (false, false) => Some(LOGIN_PATH),
        _ => None,
    }
}

/// Re-checks the guard on every navigation and auth-state change
#[component]
pub fn RouteGuard() -> impl IntoView {
    let pathname = use_location().pathname;
    let navigate = use_navigate();
    let auth_state = use_auth();

    Effect::new(move |_| {
        let path = pathname.get();
        auth_state.track();
        if let Some(target) = guard_redirect(&path, session_flag_present()) {
            log::debug!("route guard: {} -> {}", path, target);
            navigate(
                target,
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protected_paths_need_the_flag() {
        assert_eq!(guard_redirect("/", false), Some("/login"));
        assert_eq!(guard_redirect("/test-groups/4", false), Some("/login"));
        assert_eq!(guard_redirect("/products", true), None);
    }

    #[test]
    fn login_page_is_open_without_session() {
        assert_eq!(guard_redirect("/login", false), None);
        assert_eq!(guard_redirect("/login", true), Some("/"));
    }

    #[test]
    fn api_paths_are_never_redirected() {
        assert_eq!(guard_redirect("/api/products", false), None);
        assert_eq!(guard_redirect("/api", true), None);
        assert_eq!(guard_redirect("/apiary", false), Some("/login"));
    }
}
