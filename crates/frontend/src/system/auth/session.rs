//! Auth session observer.
//!
//! The session starts unresolved. The first call to [`AuthSession::resolve`]
//! is the first auth-state event; callers of [`AuthSession::id_token`] wait
//! for it. Listeners registered with [`AuthSession::subscribe`] get the
//! current state right away once resolved and every change after that, until
//! their [`Subscription`] is dropped.

use contracts::system::auth::SessionUser;
use futures::channel::oneshot;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tokens {
    pub id_token: String,
    pub refresh_token: String,
}

type Listener = Rc<dyn Fn(Option<&SessionUser>)>;

#[derive(Default)]
struct Inner {
    resolved: bool,
    user: Option<SessionUser>,
    tokens: Option<Tokens>,
    listeners: Vec<(u64, Listener)>,
    next_listener_id: u64,
    waiters: Vec<oneshot::Sender<()>>,
}

#[derive(Clone, Default)]
pub struct AuthSession {
    inner: Rc<RefCell<Inner>>,
}

/// Keeps a listener registered; dropping it unsubscribes
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    inner: Weak<RefCell<Inner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

thread_local! {
    static SESSION: AuthSession = AuthSession::new();
}

/// The application's session
pub fn session() -> AuthSession {
    SESSION.with(|s| s.clone())
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, listener: impl Fn(Option<&SessionUser>) + 'static) -> Subscription {
        let listener: Listener = Rc::new(listener);
        let (id, current) = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, listener.clone()));
            (id, inner.resolved.then(|| inner.user.clone()))
        };
        if let Some(user) = current {
            listener(user.as_ref());
        }
        Subscription {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Publishes a new auth state (signed in with tokens, or signed out)
    pub fn resolve(&self, user: Option<SessionUser>, tokens: Option<Tokens>) {
        let (listeners, waiters) = {
            let mut inner = self.inner.borrow_mut();
            inner.resolved = true;
            inner.user = user.clone();
            inner.tokens = if user.is_some() { tokens } else { None };
            let listeners: Vec<Listener> = inner.listeners.iter().map(|(_, l)| l.clone()).collect();
            (listeners, std::mem::take(&mut inner.waiters))
        };
        for waiter in waiters {
            let _ = waiter.send(());
        }
        for listener in listeners {
            listener(user.as_ref());
        }
    }

    /// Replaces the tokens after a refresh without notifying listeners
    pub fn update_tokens(&self, tokens: Tokens) {
        let mut inner = self.inner.borrow_mut();
        if inner.user.is_some() {
            inner.tokens = Some(tokens);
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.inner.borrow().resolved
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.inner.borrow().user.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner
            .borrow()
            .tokens
            .as_ref()
            .map(|t| t.refresh_token.clone())
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// ID token of the signed-in user, after the first auth-state event.
    /// `None` when signed out.
    pub async fn id_token(&self) -> Option<String> {
        let pending = {
            let mut inner = self.inner.borrow_mut();
            if inner.resolved {
                None
            } else {
                let (tx, rx) = oneshot::channel();
                inner.waiters.push(tx);
                Some(rx)
            }
        };
        if let Some(rx) = pending {
            // a dropped session counts as signed out
            let _ = rx.await;
        }
        self.inner
            .borrow()
            .tokens
            .as_ref()
            .map(|t| t.id_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;

    fn user() -> SessionUser {
        SessionUser {
            uid: "u1".into(),
            email: "ops@example.com".into(),
        }
    }

    fn tokens() -> Tokens {
        Tokens {
            id_token: "id-1".into(),
            refresh_token: "refresh-1".into(),
        }
    }

    #[test]
    fn id_token_waits_for_first_event() {
        let session = AuthSession::new();
        let result: Rc<RefCell<Option<Option<String>>>> = Rc::new(RefCell::new(None));

        let mut pool = LocalPool::new();
        let waiting = session.clone();
        let out = result.clone();
        pool.spawner()
            .spawn_local(async move {
                *out.borrow_mut() = Some(waiting.id_token().await);
            })
            .unwrap();

        pool.run_until_stalled();
        assert!(result.borrow().is_none());

        session.resolve(Some(user()), Some(tokens()));
        pool.run_until_stalled();
        assert_eq!(*result.borrow(), Some(Some("id-1".to_string())));
    }

    #[test]
    fn signed_out_session_has_no_token() {
        let session = AuthSession::new();
        session.resolve(None, Some(tokens()));
        let token = futures::executor::block_on(session.id_token());
        assert_eq!(token, None);
    }

    #[test]
    fn subscriber_gets_current_state_and_changes() {
        let session = AuthSession::new();
        let seen: Rc<RefCell<Vec<Option<String>>>> = Rc::new(RefCell::new(Vec::new()));

        let log = seen.clone();
        let _sub = session.subscribe(move |u| log.borrow_mut().push(u.map(|u| u.email.clone())));
        assert!(seen.borrow().is_empty());

        session.resolve(Some(user()), Some(tokens()));
        session.resolve(None, None);
        assert_eq!(
            *seen.borrow(),
            vec![Some("ops@example.com".to_string()), None]
        );

        let late = Rc::new(Cell::new(0));
        let counter = late.clone();
        let _late_sub = session.subscribe(move |u| {
            assert!(u.is_none());
            counter.set(counter.get() + 1);
        });
        assert_eq!(late.get(), 1);
    }

    #[test]
    fn dropping_subscription_stops_callbacks() {
        let session = AuthSession::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let sub = session.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(session.listener_count(), 1);

        session.resolve(Some(user()), Some(tokens()));
        drop(sub);
        assert_eq!(session.listener_count(), 0);
        session.resolve(None, None);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn listener_may_subscribe_during_notification() {
        let session = AuthSession::new();
        let nested: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
        let holder = nested.clone();
        let inner_session = session.clone();
        let _sub = session.subscribe(move |_| {
            holder.borrow_mut().push(inner_session.subscribe(|_| {}));
        });
        session.resolve(None, None);
        assert_eq!(session.listener_count(), 2);
    }

    #[test]
    fn token_update_keeps_user() {
        let session = AuthSession::new();
        session.resolve(Some(user()), Some(tokens()));
        session.update_tokens(Tokens {
            id_token: "id-2".into(),
            refresh_token: "refresh-2".into(),
        });
        assert_eq!(session.current_user(), Some(user()));
        assert_eq!(session.refresh_token().as_deref(), Some("refresh-2"));
        assert_eq!(
            futures::executor::block_on(session.id_token()).as_deref(),
            Some("id-2")
        );
    }
}
