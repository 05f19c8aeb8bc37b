//! # Coin Selector Overlay Model
//!
//! Open/close bookkeeping for the token selection modal. While the overlay is
//! open the page behind it must not scroll; the lock is held by a
//! [`ScrollLockGuard`] stored inside the overlay, so every close path (outside
//! click, selection, drop of the overlay itself) releases it exactly once.

use crate::tokens::{filter_tokens, Token};

/// Something that can freeze background scrolling (the document body in the
/// browser).
pub trait ScrollLock {
    fn lock(&self);
    fn unlock(&self);
}

/// Holds a [`ScrollLock`] for as long as it lives.
#[must_use = "the scroll lock is released as soon as the guard is dropped"]
pub struct ScrollLockGuard<L: ScrollLock> {
    lock: L,
}

impl<L: ScrollLock> ScrollLockGuard<L> {
    pub fn acquire(lock: L) -> Self {
        lock.lock();
        Self { lock }
    }
}

impl<L: ScrollLock> Drop for ScrollLockGuard<L> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

/// How the overlay was closed, for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    OutsideClick,
    Selected,
}

/// Token selection modal state.
pub struct CoinOverlay<L: ScrollLock> {
    guard: Option<ScrollLockGuard<L>>,
    filter: String,
}

impl<L: ScrollLock> Default for CoinOverlay<L> {
    fn default() -> Self {
        Self { guard: None, filter: String::new() }
    }
}

impl<L: ScrollLock> CoinOverlay<L> {
    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    /// Open the overlay and lock background scroll. No-op when already open.
    pub fn open(&mut self, lock: L) {
        if self.guard.is_none() {
            self.filter.clear();
            self.guard = Some(ScrollLockGuard::acquire(lock));
        }
    }

    /// Close the overlay, releasing the scroll lock. Returns `false` if it
    /// was not open.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        match self.guard.take() {
            Some(guard) => {
                drop(guard);
                log::debug!("Coin selector closed: {:?}", reason);
                true
            }
            None => false,
        }
    }

    /// Close, then hand `token` to `notify`. The parent is never notified
    /// while the overlay is still open.
    pub fn select<F>(&mut self, token: &'static Token, notify: F)
    where
        F: FnOnce(&'static Token),
    {
        self.close(CloseReason::Selected);
        notify(token);
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Tokens matching the current search text.
    pub fn visible_tokens(&self) -> Vec<&'static Token> {
        filter_tokens(&self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::token_list;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records lock/unlock calls into a shared event log.
    #[derive(Clone, Default)]
    struct RecordingLock {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl ScrollLock for RecordingLock {
        fn lock(&self) {
            self.events.borrow_mut().push("lock".to_string());
        }

        fn unlock(&self) {
            self.events.borrow_mut().push("unlock".to_string());
        }
    }

    impl RecordingLock {
        fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }
    }

    #[test]
    fn test_outside_click_releases_once() {
        let lock = RecordingLock::default();
        let mut overlay = CoinOverlay::default();

        overlay.open(lock.clone());
        assert!(overlay.is_open());
        assert_eq!(lock.events(), vec!["lock"]);

        assert!(overlay.close(CloseReason::OutsideClick));
        assert!(!overlay.close(CloseReason::OutsideClick));
        assert!(!overlay.is_open());
        assert_eq!(lock.events(), vec!["lock", "unlock"]);
    }

    #[test]
    fn test_selection_closes_before_notifying() {
        let lock = RecordingLock::default();
        let mut overlay = CoinOverlay::default();
        overlay.open(lock.clone());

        let token = &token_list()[2];
        let events = lock.events.clone();
        overlay.select(token, |chosen| {
            events.borrow_mut().push(format!("notify {}", chosen.address));
        });

        assert!(!overlay.is_open());
        assert_eq!(
            lock.events(),
            vec!["lock".to_string(), "unlock".to_string(), format!("notify {}", token.address)]
        );
    }

    #[test]
    fn test_double_open_locks_once() {
        let lock = RecordingLock::default();
        let mut overlay = CoinOverlay::default();
        overlay.open(lock.clone());
        overlay.open(lock.clone());
        drop(overlay);

        assert_eq!(lock.events(), vec!["lock", "unlock"]);
    }

    #[test]
    fn test_dropping_open_overlay_releases_lock() {
        let lock = RecordingLock::default();
        {
            let mut overlay = CoinOverlay::default();
            overlay.open(lock.clone());
        }
        assert_eq!(lock.events(), vec!["lock", "unlock"]);
    }

    #[test]
    fn test_reopen_clears_filter() {
        let lock = RecordingLock::default();
        let mut overlay = CoinOverlay::default();
        overlay.open(lock.clone());
        overlay.set_filter("usd");
        assert!(overlay.visible_tokens().iter().all(|t| t.code.to_lowercase().contains("usd")
            || t.name.to_lowercase().contains("usd")));

        overlay.close(CloseReason::OutsideClick);
        overlay.open(lock);
        assert_eq!(overlay.filter(), "");
        assert_eq!(overlay.visible_tokens().len(), token_list().len());
    }
}
