use contracts::system::auth::SessionUser;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::lifecycle::restore_session;
use super::session::session;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthState {
    /// First auth-state event not received yet
    #[default]
    Pending,
    SignedOut,
    SignedIn(SessionUser),
}

impl AuthState {
    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            AuthState::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, AuthState::SignedIn(_))
    }
}

impl From<Option<&SessionUser>> for AuthState {
    fn from(user: Option<&SessionUser>) -> Self {
        match user {
            Some(user) => AuthState::SignedIn(user.clone()),
            None => AuthState::SignedOut,
        }
    }
}

/// Mirrors the session into a signal for the component tree and starts the
/// restore of a stored session.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth_state = RwSignal::new(AuthState::Pending);

    let subscription = session().subscribe(move |user| {
        // the provider may already be gone when a late event arrives
        let _ = auth_state.try_set(AuthState::from(user));
    });
    let subscription = StoredValue::new_local(Some(subscription));
    on_cleanup(move || subscription.update_value(|s| drop(s.take())));

    if !session().is_resolved() {
        spawn_local(restore_session());
    }

    provide_context(auth_state);

    children()
}

pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().expect("AuthProvider not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_from_user() {
        let user = SessionUser {
            uid: "u".into(),
            email: "a@b.c".into(),
        };
        let state = AuthState::from(Some(&user));
        assert!(state.is_signed_in());
        assert_eq!(state.user().map(|u| u.email.as_str()), Some("a@b.c"));
        assert_eq!(AuthState::from(None), AuthState::SignedOut);
        assert!(!AuthState::default().is_signed_in());
    }
}
