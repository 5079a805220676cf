//! Shared, atomically replaced token slot
//!
//! Readers take a cloned `Arc<Token>` snapshot; writers swap in a new
//! `Arc`. A reader therefore always sees either the old token or the new
//! one, never a mix of the two.

use std::sync::Arc;

use parking_lot::RwLock;

use super::token::Token;

/// Current token held by a client session.
#[derive(Debug, Default, Clone)]
pub struct SharedToken {
    current: Arc<RwLock<Option<Arc<Token>>>>,
}

impl SharedToken {
    #[must_use]
    pub fn new(initial: Option<Token>) -> Self {
        Self { current: Arc::new(RwLock::new(initial.map(Arc::new))) }
    }

    /// Snapshot of the current token.
    #[must_use]
    pub fn current(&self) -> Option<Arc<Token>> {
        self.current.read().clone()
    }

    /// Current access token string.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.current.read().as_ref().map(|token| token.access_token().to_string())
    }

    /// Current refresh token string.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.current.read().as_ref().and_then(|token| token.refresh_token().map(str::to_string))
    }

    /// Install a new token, returning the one it replaced.
    pub fn replace(&self, token: Token) -> Option<Arc<Token>> {
        let next = Arc::new(token);
        std::mem::replace(&mut *self.current.write(), Some(next))
    }

    /// Drop the current token.
    pub fn clear(&self) -> Option<Arc<Token>> {
        self.current.write().take()
    }

    #[must_use]
    pub fn is_present(&self) -> bool {
        self.current.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(id: &str) -> Token {
        Token::new(id, Some(format!("{id}-refresh")), Some(3600), None).unwrap()
    }

    #[test]
    fn starts_empty_by_default() {
        let shared = SharedToken::default();

        assert!(!shared.is_present());
        assert!(shared.access_token().is_none());
        assert!(shared.refresh_token().is_none());
    }

    #[test]
    fn replace_swaps_whole_token() {
        let shared = SharedToken::new(Some(token("first")));
        let snapshot = shared.current().unwrap();

        let previous = shared.replace(token("second")).unwrap();

        assert_eq!(previous.access_token(), "first");
        // Earlier snapshots are unaffected by the swap.
        assert_eq!(snapshot.access_token(), "first");
        assert_eq!(shared.access_token().as_deref(), Some("second"));
        assert_eq!(shared.refresh_token().as_deref(), Some("second-refresh"));
    }

    #[test]
    fn clones_share_the_same_slot() {
        let shared = SharedToken::default();
        let reader = shared.clone();

        shared.replace(token("abc"));
        assert_eq!(reader.access_token().as_deref(), Some("abc"));

        reader.clear();
        assert!(!shared.is_present());
    }

    #[test]
    fn concurrent_readers_see_consistent_pairs() {
        let shared = SharedToken::new(Some(token("t0")));

        std::thread::scope(|scope| {
            let writer = shared.clone();
            scope.spawn(move || {
                for i in 1..200 {
                    writer.replace(token(&format!("t{i}")));
                }
            });

            for _ in 0..4 {
                let reader = shared.clone();
                scope.spawn(move || {
                    for _ in 0..200 {
                        let snapshot = reader.current().unwrap();
                        let expected = format!("{}-refresh", snapshot.access_token());
                        assert_eq!(snapshot.refresh_token(), Some(expected.as_str()));
                    }
                });
            }
        });
    }
}
