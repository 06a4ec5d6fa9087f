//! Mock transport for testing
//!
//! Serves canned `data` payloads per collection and honours the parts of
//! the query a test can observe: slug equality filters and result limits.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use super::ContentTransport;
use crate::error::{ClientError, Result};
use crate::query::Collection;

/// Mock content backend.
pub struct MockTransport {
    collections: HashMap<Collection, Value>,
    available: AtomicBool,
    delay: Option<Duration>,
    call_count: AtomicU32,
    requests: Mutex<Vec<Url>>,
}

impl MockTransport {
    /// Create a mock with no collections.
    pub fn new() -> Self {
        Self {
            collections: HashMap::new(),
            available: AtomicBool::new(true),
            delay: None,
            call_count: AtomicU32::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serve `data` for `collection` (an array, an object, or null).
    pub fn with_collection(mut self, collection: Collection, data: Value) -> Self {
        self.collections.insert(collection, data);
        self
    }

    /// Set availability. An unavailable mock answers 503.
    pub fn with_available(self, available: bool) -> Self {
        self.available.store(available, Ordering::SeqCst);
        self
    }

    /// Delay every response.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Toggle availability after construction.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of requests received.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Every URL requested, in arrival order.
    pub fn requests(&self) -> Vec<Url> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn respond(&self, url: &Url) -> Result<Value> {
        let segment = url
            .path_segments()
            .and_then(|segments| segments.last())
            .unwrap_or_default();

        let collection = Collection::from_api_path(segment).ok_or_else(|| ClientError::Server {
            status: 404,
            message: format!("unknown collection {:?}", segment),
        })?;
        let data = self
            .collections
            .get(&collection)
            .cloned()
            .ok_or_else(|| ClientError::Server {
                status: 404,
                message: format!("no data for {}", collection),
            })?;

        let data = match data {
            Value::Array(items) => Value::Array(apply_query(items, url)),
            other => other,
        };

        Ok(json!({ "data": data, "meta": {} }))
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentTransport for MockTransport {
    async fn get_json(&self, url: &Url) -> Result<Value> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if !self.available.load(Ordering::SeqCst) {
            return Err(ClientError::Server {
                status: 503,
                message: "Mock backend disabled".to_string(),
            });
        }

        self.respond(url)
    }
}

fn apply_query(mut items: Vec<Value>, url: &Url) -> Vec<Value> {
    for (key, value) in url.query_pairs() {
        if let Some(field) = key
            .strip_prefix("filters[")
            .and_then(|rest| rest.strip_suffix("][$eq]"))
        {
            items.retain(|item| field_text(item, field).as_deref() == Some(&*value));
        } else if key == "pagination[limit]" {
            if let Ok(limit) = value.parse::<usize>() {
                items.truncate(limit);
            }
        }
    }
    items
}

/// A scalar field in either wire shape, as text.
fn field_text(item: &Value, field: &str) -> Option<String> {
    let value = item
        .get(field)
        .or_else(|| item.get("attributes").and_then(|a| a.get(field)))?;
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
