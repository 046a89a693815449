//! Drops responses that arrive after a newer request was started or after
//! the page that issued them was torn down.
//!
//! ```ignore
//! let guard = RequestGuard::for_component();
//! let ticket = guard.begin();
//! spawn_local(async move {
//!     let result = fetch_products().await;
//!     ticket.apply("products", || rows.set(result));
//! });
//! ```

use leptos::prelude::on_cleanup;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct GuardState {
    generation: AtomicU64,
    closed: AtomicBool,
}

#[derive(Clone, Debug, Default)]
pub struct RequestGuard {
    state: Arc<GuardState>,
}

/// Handle of one started request
#[derive(Clone, Debug)]
pub struct Ticket {
    generation: u64,
    state: Arc<GuardState>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard closed automatically when the current reactive owner is cleaned up
    pub fn for_component() -> Self {
        let guard = Self::new();
        let on_unmount = guard.clone();
        on_cleanup(move || on_unmount.close());
        guard
    }

    /// Starts a request; every earlier ticket becomes stale
    pub fn begin(&self) -> Ticket {
        let generation = self.state.generation.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            state: self.state.clone(),
        }
    }

    pub fn close(&self) {
        self.state.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::SeqCst)
    }
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        !self.state.closed.load(Ordering::SeqCst)
            && self.state.generation.load(Ordering::SeqCst) == self.generation
    }

    /// Runs `apply` only while the ticket is current. Returns whether it ran.
    pub fn apply(&self, label: &str, apply: impl FnOnce()) -> bool {
        if self.is_current() {
            apply();
            true
        } else {
            log::debug!("dropping stale response for {}", label);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_ticket_wins() {
        let guard = RequestGuard::new();
        let first = guard.begin();
        let second = guard.begin();
        assert!(!first.is_current());
        assert!(second.is_current());

        let mut applied = Vec::new();
        assert!(!first.apply("first", || applied.push(1)));
        assert!(second.apply("second", || applied.push(2)));
        assert_eq!(applied, vec![2]);
    }

    #[test]
    fn closed_guard_rejects_everything() {
        let guard = RequestGuard::new();
        let ticket = guard.begin();
        guard.close();
        assert!(guard.is_closed());
        assert!(!ticket.is_current());
        assert!(!guard.begin().is_current());
    }

    #[test]
    fn clones_share_generation() {
        let guard = RequestGuard::new();
        let ticket = guard.begin();
        guard.clone().begin();
        assert!(!ticket.is_current());
    }
}
