//! Tracking of in-flight included templates
//!
//! When a partial template is requested its URL is marked pending; the code
//! that wires validation into the loaded content consumes the mark once, so
//! each inclusion is processed a single time.

use indexmap::IndexSet;

/// Insertion-ordered set of resource identifiers currently loading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingResources {
    urls: IndexSet<String>,
}

impl PendingResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `url` as loading; a no-op if it is already pending
    pub fn mark_pending(&mut self, url: impl Into<String>) {
        let url = url.into();
        if self.urls.contains(&url) {
            return;
        }
        tracing::debug!(url = %url, "Resource marked pending");
        self.urls.insert(url);
    }

    /// Remove `url` if it is pending, returning whether it was
    pub fn consume_if_pending(&mut self, url: &str) -> bool {
        let consumed = self.urls.shift_remove(url);
        if consumed {
            tracing::debug!(url, "Pending resource consumed");
        }
        consumed
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Pending identifiers, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_succeeds_once() {
        let mut pending = PendingResources::new();
        pending.mark_pending("x");

        assert!(pending.consume_if_pending("x"));
        assert!(!pending.consume_if_pending("x"));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_consume_unknown_is_false() {
        let mut pending = PendingResources::new();
        assert!(!pending.consume_if_pending("never-added"));
    }

    #[test]
    fn test_mark_is_idempotent() {
        let mut pending = PendingResources::new();
        pending.mark_pending("/partials/address.html");
        pending.mark_pending("/partials/address.html");

        assert_eq!(pending.len(), 1);
        assert!(pending.consume_if_pending("/partials/address.html"));
        assert!(!pending.consume_if_pending("/partials/address.html"));
    }

    #[test]
    fn test_order_survives_removal() {
        let mut pending = PendingResources::new();
        pending.mark_pending("a");
        pending.mark_pending("b");
        pending.mark_pending("c");
        pending.mark_pending("a");

        assert!(pending.consume_if_pending("b"));
        let remaining: Vec<&str> = pending.iter().collect();
        assert_eq!(remaining, vec!["a", "c"]);
        assert!(pending.contains("c"));
    }
}
