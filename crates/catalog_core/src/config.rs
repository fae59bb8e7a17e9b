use std::time::Duration;

use crate::Messages;

/// Quiet period before a typed query is sent.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);
/// Shorter queries (without a filter) show the default content instead of searching.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Path the page lives at; the address bar is rewritten relative to it.
    pub base_path: String,
    /// Prefix for per-item detail links.
    pub detail_path: String,
    pub min_query_chars: usize,
    pub debounce: Duration,
    pub messages: Messages,
}

impl ControllerConfig {
    /// Public catalog search: nothing is fetched until the query is long enough.
    pub fn public_catalog() -> Self {
        Self {
            base_path: "/public_catalog".to_string(),
            detail_path: "/book".to_string(),
            min_query_chars: MIN_QUERY_CHARS,
            debounce: DEBOUNCE_DELAY,
            messages: Messages::default(),
        }
    }

    /// Staff book list: an empty query lists the whole catalog.
    pub fn staff_listing() -> Self {
        Self {
            base_path: "/books".to_string(),
            min_query_chars: 0,
            ..Self::public_catalog()
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::public_catalog()
    }
}
