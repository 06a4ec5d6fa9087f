//! Canonical content records
//!
//! These are decoded from the flattened JSON produced by [`crate::wire`].
//! Every field is optional: a missing field is not an error, and display
//! fallbacks belong to whoever renders the record.

use crate::richtext::Description;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Entity identifier (numeric in older APIs, string in some deployments)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A media asset. The URL is still backend-relative; see [`crate::MediaResolver`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "MediaRepr")]
pub struct Media {
    pub id: Option<EntityId>,
    pub url: Option<String>,
    pub alternative_text: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mime: Option<String>,
}

impl Media {
    /// Media known only by its path.
    pub fn from_path(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Default::default()
        }
    }
}

/// Media arrives either as a bare path or as an upload object.
#[derive(Deserialize)]
#[serde(untagged)]
enum MediaRepr {
    Path(String),
    Object {
        #[serde(default)]
        id: Option<EntityId>,
        #[serde(default, deserialize_with = "lenient_string")]
        url: Option<String>,
        #[serde(default, rename = "alternativeText", deserialize_with = "lenient_string")]
        alternative_text: Option<String>,
        #[serde(default, deserialize_with = "lenient_u32")]
        width: Option<u32>,
        #[serde(default, deserialize_with = "lenient_u32")]
        height: Option<u32>,
        #[serde(default, deserialize_with = "lenient_string")]
        mime: Option<String>,
    },
}

impl From<MediaRepr> for Media {
    fn from(repr: MediaRepr) -> Self {
        match repr {
            MediaRepr::Path(path) => Self::from_path(path),
            MediaRepr::Object {
                id,
                url,
                alternative_text,
                width,
                height,
                mime,
            } => Self {
                id,
                url,
                alternative_text,
                width,
                height,
                mime,
            },
        }
    }
}

/// Archive facet and artwork label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, rename = "documentId", deserialize_with = "lenient_string")]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
}

/// One piece in the archive
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, rename = "documentId", deserialize_with = "lenient_string")]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    /// Kept as text: the backend sends both `2023` and `"2021–2023"`
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub medium: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub image: Option<Media>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default, rename = "createdAt", deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

impl Artwork {
    /// Slug of the attached category, if any.
    pub fn category_slug(&self) -> Option<&str> {
        self.category.as_ref()?.slug.as_deref()
    }
}

/// A show, past or upcoming
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exhibition {
    #[serde(default)]
    pub id: Option<EntityId>,
    #[serde(default, rename = "documentId", deserialize_with = "lenient_string")]
    pub document_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    /// `datePeriod` on the wire. Older content types send `dateText`, which
    /// normalization folds into this field.
    #[serde(default, rename = "datePeriod", deserialize_with = "lenient_string")]
    pub date_period: Option<String>,
    #[serde(default, rename = "openingTime", deserialize_with = "lenient_string")]
    pub opening_time: Option<String>,
    #[serde(default)]
    pub description: Option<Description>,
    #[serde(default)]
    pub poster: Option<Media>,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub gallery: Vec<Media>,
    #[serde(default, rename = "createdAt", deserialize_with = "lenient_string")]
    pub created_at: Option<String>,
}

/// The artist profile (singleton)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutProfile {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub biography: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(default)]
    pub portrait: Option<Media>,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub cv_sections: Vec<CvSection>,
}

/// One CV heading and its entries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvSection {
    #[serde(default, deserialize_with = "lenient_string")]
    pub category_title: Option<String>,
    #[serde(default, deserialize_with = "vec_or_null")]
    pub items: Vec<CvItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detail: Option<String>,
}

/// Strings stay strings, numbers and booleans become text, anything else is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.round() as u64))
            .and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_from_bare_path() {
        let media: Media = serde_json::from_value(json!("/uploads/a.png")).unwrap();
        assert_eq!(media.url.as_deref(), Some("/uploads/a.png"));
        assert!(media.id.is_none());
    }

    #[test]
    fn test_media_from_object() {
        let media: Media = serde_json::from_value(json!({
            "id": 4,
            "url": "/uploads/a.png",
            "alternativeText": "Studio view",
            "width": 1200,
            "height": 800.0
        }))
        .unwrap();
        assert_eq!(media.id, Some(EntityId::Number(4)));
        assert_eq!(media.alternative_text.as_deref(), Some("Studio view"));
        assert_eq!(media.height, Some(800));
    }

    #[test]
    fn test_year_accepts_number_or_text() {
        let a: Artwork = serde_json::from_value(json!({"year": 2023})).unwrap();
        let b: Artwork = serde_json::from_value(json!({"year": "2023"})).unwrap();
        assert_eq!(a.year, b.year);
    }

    #[test]
    fn test_null_gallery_is_empty() {
        let e: Exhibition = serde_json::from_value(json!({"gallery": null})).unwrap();
        assert!(e.gallery.is_empty());
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId::Number(12).to_string(), "12");
        assert_eq!(EntityId::Text("abc".into()).to_string(), "abc");
    }
}
