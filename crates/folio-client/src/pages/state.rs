//! Per-page fetch state and lifetime tokens
//!
//! Every page instance owns a [`PageSlot`]. Starting a load hands out a
//! [`PageToken`]; a response is applied only while its token is still the
//! slot's current one, so a late answer for a page the visitor already left
//! is dropped instead of overwriting newer state.

use serde::Serialize;
use std::future::Future;
use tokio::sync::RwLock;

use crate::error::{ClientError, Result};

/// What a page shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "page", rename_all = "snake_case")]
pub enum PageState<T> {
    Loading,
    Ready(T),
    /// Lookup found nothing (unknown slug, unpublished profile, unknown path)
    NotFound,
    /// Fetch failed; carries a message for the visitor
    Failed(String),
}

impl<T> PageState<T> {
    /// Single-entity pages: `None` becomes `NotFound`.
    pub fn from_lookup(result: Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => Self::Ready(value),
            Ok(None) => Self::NotFound,
            Err(e) => Self::failed(&e),
        }
    }

    /// List pages: an empty list is still a ready page.
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(e) => Self::failed(&e),
        }
    }

    fn failed(error: &ClientError) -> Self {
        tracing::warn!(error = %error, "page load failed");
        Self::Failed(error.to_string())
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PageState<U> {
        match self {
            Self::Loading => PageState::Loading,
            Self::Ready(value) => PageState::Ready(f(value)),
            Self::NotFound => PageState::NotFound,
            Self::Failed(message) => PageState::Failed(message),
        }
    }
}

/// Identifies one load of one page instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageToken(u64);

impl PageToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

struct SlotInner<T> {
    generation: u64,
    state: PageState<T>,
}

/// Page-local state guarded by lifetime tokens
pub struct PageSlot<T> {
    inner: RwLock<SlotInner<T>>,
}

impl<T> PageSlot<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SlotInner {
                generation: 0,
                state: PageState::Loading,
            }),
        }
    }

    /// Start a new load. Earlier tokens stop being current.
    pub async fn begin(&self) -> PageToken {
        let mut inner = self.inner.write().await;
        inner.generation += 1;
        inner.state = PageState::Loading;
        PageToken(inner.generation)
    }

    /// Apply a result if `token` is still current. Returns whether it was applied.
    pub async fn complete(&self, token: PageToken, state: PageState<T>) -> bool {
        let mut inner = self.inner.write().await;
        if inner.generation != token.0 {
            tracing::debug!(
                stale = token.0,
                current = inner.generation,
                "discarding response for a page that is no longer current"
            );
            return false;
        }
        inner.state = state;
        true
    }

    pub async fn is_current(&self, token: PageToken) -> bool {
        self.inner.read().await.generation == token.0
    }

    /// Begin, await `load`, and apply its result if still current.
    pub async fn load<F>(&self, load: F) -> bool
    where
        F: Future<Output = PageState<T>>,
    {
        let token = self.begin().await;
        let state = load.await;
        self.complete(token, state).await
    }
}

impl<T: Clone> PageSlot<T> {
    /// Snapshot of the current state.
    pub async fn state(&self) -> PageState<T> {
        self.inner.read().await.state.clone()
    }
}

impl<T> Default for PageSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_lookup() {
        assert!(PageState::<u32>::from_lookup(Ok(None)).is_not_found());
        assert_eq!(PageState::from_lookup(Ok(Some(3))).ready(), Some(&3));

        let failed = PageState::<u32>::from_lookup(Err(ClientError::Server {
            status: 500,
            message: "boom".into(),
        }));
        assert!(failed.is_failed());
    }

    #[test]
    fn test_map_keeps_variant() {
        assert_eq!(PageState::Ready(2).map(|n| n * 2), PageState::Ready(4));
        assert_eq!(PageState::<u32>::NotFound.map(|n| n * 2), PageState::NotFound);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(PageState::Ready(1)).unwrap();
        assert_eq!(json, serde_json::json!({"state": "ready", "page": 1}));

        let json = serde_json::to_value(PageState::<u32>::NotFound).unwrap();
        assert_eq!(json, serde_json::json!({"state": "not_found"}));
    }

    #[tokio::test]
    async fn test_stale_token_discarded() {
        let slot = PageSlot::new();

        let first = slot.begin().await;
        let second = slot.begin().await;

        assert!(!slot.complete(first, PageState::Ready("old")).await);
        assert!(slot.state().await.is_loading());

        assert!(slot.complete(second, PageState::Ready("new")).await);
        assert_eq!(slot.state().await, PageState::Ready("new"));
        assert!(slot.is_current(second).await);
        assert!(!slot.is_current(first).await);
    }

    #[tokio::test]
    async fn test_load_applies_when_current() {
        let slot = PageSlot::new();
        assert!(slot.load(async { PageState::Ready(7) }).await);
        assert_eq!(slot.state().await, PageState::Ready(7));
    }
}
