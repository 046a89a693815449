//! Sign-in, sign-out, restore at startup and scheduled token refresh.
//!
//! Every transition ends in [`AuthSession::resolve`](super::session::AuthSession::resolve)
//! and keeps the session cookie flag in step with it.

use contracts::system::auth::{parse_expires_in, RefreshResponse, SessionUser};
use gloo_timers::callback::Timeout;
use leptos::task::spawn_local;
use std::cell::RefCell;

use super::api::{self, AuthError};
use super::session::{session, Tokens};
use super::storage;

/// Refresh this many seconds before the ID token expires
pub const REFRESH_MARGIN_SECS: u32 = 300;
const MIN_REFRESH_DELAY_SECS: u32 = 30;

thread_local! {
    static REFRESH_TIMER: RefCell<Option<Timeout>> = const { RefCell::new(None) };
}

/// Delay before refreshing a token that lives `expires_in` seconds
pub fn refresh_delay_ms(expires_in: u32) -> u32 {
    expires_in
        .saturating_sub(REFRESH_MARGIN_SECS)
        .max(MIN_REFRESH_DELAY_SECS)
        .saturating_mul(1000)
}

fn schedule_refresh(expires_in: u32) {
    let delay = refresh_delay_ms(expires_in);
    log::debug!("token refresh scheduled in {} s", delay / 1000);
    let timeout = Timeout::new(delay, || spawn_local(refresh_now()));
    // replacing the old timeout cancels it
    REFRESH_TIMER.with(|timer| *timer.borrow_mut() = Some(timeout));
}

fn cancel_refresh() {
    REFRESH_TIMER.with(|timer| timer.borrow_mut().take());
}

fn tokens_from_refresh(response: &RefreshResponse) -> Tokens {
    Tokens {
        id_token: response.id_token.clone(),
        refresh_token: response.refresh_token.clone(),
    }
}

fn establish(user: SessionUser, tokens: Tokens, expires_in: u32) {
    storage::save_refresh_token(&tokens.refresh_token, &user.email);
    storage::set_session_flag(true);
    schedule_refresh(expires_in);
    log::info!("signed in as {}", user.email);
    session().resolve(Some(user), Some(tokens));
}

/// Ends the session. Stored credentials are kept when `forget` is false so a
/// later reload can try again.
fn end_session(forget: bool) {
    cancel_refresh();
    if forget {
        storage::clear_tokens();
    }
    storage::set_session_flag(false);
    session().resolve(None, None);
}

async fn refresh_now() {
    let Some(refresh_token) = session().refresh_token() else {
        return;
    };
    match api::refresh_id_token(&refresh_token).await {
        Ok(response) => {
            let tokens = tokens_from_refresh(&response);
            let email = session().current_user().map(|u| u.email).unwrap_or_default();
            storage::save_refresh_token(&tokens.refresh_token, &email);
            storage::set_session_flag(true);
            session().update_tokens(tokens);
            schedule_refresh(parse_expires_in(&response.expires_in));
        }
        Err(e) => {
            log::warn!("token refresh failed: {}", e);
            end_session(!matches!(e, AuthError::Network(_)));
        }
    }
}

/// Resolves the first auth state from the stored refresh token
pub async fn restore_session() {
    let Some(refresh_token) = storage::get_refresh_token() else {
        log::debug!("no stored session");
        end_session(false);
        return;
    };
    match api::refresh_id_token(&refresh_token).await {
        Ok(response) => {
            let user = SessionUser {
                uid: response.user_id.clone(),
                email: storage::get_user_email().unwrap_or_default(),
            };
            let expires_in = parse_expires_in(&response.expires_in);
            establish(user, tokens_from_refresh(&response), expires_in);
        }
        Err(e) => {
            log::info!("stored session could not be restored: {}", e);
            end_session(!matches!(e, AuthError::Network(_)));
        }
    }
}

pub async fn sign_in(email: &str, password: &str) -> Result<SessionUser, AuthError> {
    let response = api::sign_in_with_password(email.trim(), password).await?;
    let user = SessionUser {
        uid: response.local_id.clone(),
        email: response.email.clone(),
    };
    let tokens = Tokens {
        id_token: response.id_token,
        refresh_token: response.refresh_token,
    };
    establish(user.clone(), tokens, parse_expires_in(&response.expires_in));
    Ok(user)
}

pub fn sign_out() {
    log::info!("signing out");
    end_session(true);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_fires_five_minutes_early() {
        assert_eq!(refresh_delay_ms(3600), 3_300_000);
    }

    #[test]
    fn short_lived_tokens_still_wait_a_little() {
        assert_eq!(refresh_delay_ms(200), 30_000);
        assert_eq!(refresh_delay_ms(0), 30_000);
    }
}
