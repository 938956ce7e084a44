//! # Session State
//!
//! Shared ownership wrapper around the draft-session book.
//!
//! ## Thread Safety
//! The book is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple service calls may access/modify the sessions
//! 2. Only one call should modify them at a time
//! 3. Callers can run operations concurrently
//!
//! ## Why Not RwLock?
//! Session operations are quick and most of them modify state.
//! A RwLock would add complexity with minimal benefit.

use std::sync::{Arc, Mutex};

use kasir_core::SessionBook;

/// Shared draft-session state.
///
/// Locks are taken inside the closure accessors and never held across an
/// await point; database work happens outside the lock.
#[derive(Debug, Clone)]
pub struct SessionState {
    book: Arc<Mutex<SessionBook>>,
}

impl SessionState {
    /// Creates session state holding a fresh book ("Sesi 1", active).
    pub fn new() -> Self {
        SessionState {
            book: Arc::new(Mutex::new(SessionBook::new())),
        }
    }

    /// Executes a function with read access to the session book.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let names: Vec<String> =
    ///     state.with_sessions(|book| book.drafts().iter().map(|d| d.name.clone()).collect());
    /// ```
    pub fn with_sessions<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SessionBook) -> R,
    {
        let book = self.book.lock().expect("Session mutex poisoned");
        f(&book)
    }

    /// Executes a function with write access to the session book.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// state.with_sessions_mut(|book| book.create_draft("Meja 4"));
    /// ```
    pub fn with_sessions_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SessionBook) -> R,
    {
        let mut book = self.book.lock().expect("Session mutex poisoned");
        f(&mut book)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_has_one_active_draft() {
        let state = SessionState::new();
        let count = state.with_sessions(|book| book.drafts().len());
        assert_eq!(count, 1);
    }

    #[test]
    fn test_clones_share_the_same_book() {
        let state = SessionState::new();
        let twin = state.clone();

        let id = twin.with_sessions_mut(|book| book.create_draft("Meja 4"));
        let seen = state.with_sessions(|book| book.get(&id).is_ok());
        assert!(seen);
    }
}
