//! Media URL resolution
//!
//! The backend hands out upload paths relative to its own host
//! (`/uploads/x.png`). Anything already absolute is passed through.

use crate::model::Media;

/// Turns media references into absolute URLs against one base host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaResolver {
    base: String,
}

impl MediaResolver {
    /// Create a resolver. Trailing slashes on `base` are dropped.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// The base host, without trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Resolve a raw reference.
    ///
    /// - `None` or `""` → `None`
    /// - `http…` or `//…` → unchanged
    /// - anything else → `{base}/{path}` with exactly one joining slash
    ///
    /// A path that already embeds the base host is not de-duplicated.
    pub fn resolve(&self, reference: Option<&str>) -> Option<String> {
        let reference = reference?;
        if reference.is_empty() {
            return None;
        }
        if is_absolute(reference) {
            return Some(reference.to_string());
        }
        Some(format!("{}/{}", self.base, reference.trim_start_matches('/')))
    }

    /// Resolve the URL of a media record.
    pub fn resolve_media(&self, media: Option<&Media>) -> Option<String> {
        self.resolve(media.and_then(|m| m.url.as_deref()))
    }

    /// Resolve every media record, dropping those without a usable URL.
    pub fn resolve_all<'a>(&self, media: impl IntoIterator<Item = &'a Media>) -> Vec<String> {
        media
            .into_iter()
            .filter_map(|m| self.resolve_media(Some(m)))
            .collect()
    }
}

fn is_absolute(reference: &str) -> bool {
    reference.starts_with("http") || reference.starts_with("//")
}
