//! Site routing table
//!
//! ```text
//! /                      -> Home
//! /about                 -> About
//! /contact               -> Contact
//! /art-archive           -> Archive (optional ?category=slug)
//! /art-archive/{slug}    -> Artwork
//! /exhibitions           -> Exhibitions
//! /exhibitions/{slug}    -> Exhibition
//! anything else          -> NotFound
//! ```

use reqwest::Url;
use std::fmt;

const ROUTE_BASE: &str = "http://folio.local";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Contact,
    Archive { category: Option<String> },
    Artwork(String),
    Exhibitions,
    Exhibition(String),
    /// Unmatched path, kept for the not-found view
    NotFound(String),
}

impl Route {
    /// Match a site path (with optional query string).
    pub fn parse(path: &str) -> Self {
        let raw = if path.starts_with('/') {
            format!("{}{}", ROUTE_BASE, path)
        } else {
            format!("{}/{}", ROUTE_BASE, path)
        };
        let url = match Url::parse(&raw) {
            Ok(url) => url,
            Err(_) => return Self::NotFound(path.to_string()),
        };

        let segments: Vec<String> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).map(decode).collect())
            .unwrap_or_default();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["about"] => Self::About,
            ["contact"] => Self::Contact,
            ["art-archive"] => Self::Archive {
                category: url
                    .query_pairs()
                    .find(|(key, _)| key == "category")
                    .map(|(_, value)| value.into_owned())
                    .filter(|value| !value.is_empty()),
            },
            ["art-archive", slug] => Self::Artwork(slug.to_string()),
            ["exhibitions"] => Self::Exhibitions,
            ["exhibitions", slug] => Self::Exhibition(slug.to_string()),
            _ => Self::NotFound(url.path().to_string()),
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::About => "/about".to_string(),
            Self::Contact => "/contact".to_string(),
            Self::Archive { category: None } => "/art-archive".to_string(),
            Self::Archive {
                category: Some(category),
            } => format!("/art-archive?category={}", urlencoding::encode(category)),
            Self::Artwork(slug) => format!("/art-archive/{}", urlencoding::encode(slug)),
            Self::Exhibitions => "/exhibitions".to_string(),
            Self::Exhibition(slug) => format!("/exhibitions/{}", urlencoding::encode(slug)),
            Self::NotFound(path) => path.clone(),
        }
    }
}

/// Percent-decode one path segment; undecodable input is kept as sent.
fn decode(segment: &str) -> String {
    urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
