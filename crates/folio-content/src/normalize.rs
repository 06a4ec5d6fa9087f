//! Raw entity to canonical record

use crate::error::Result;
use crate::model::{AboutProfile, Artwork, Category, Exhibition};
use crate::wire::WireEntity;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Exhibition date field used by older content types
pub const LEGACY_DATE_FIELD: &str = "dateText";

/// A canonical record that can be produced from either wire shape.
pub trait Normalize: DeserializeOwned {
    /// Entity name used in diagnostics
    const KIND: &'static str;

    /// Adjust flattened fields before typed decoding.
    fn reconcile(_fields: &mut Map<String, Value>) {}

    /// Decode from an already classified entity.
    fn from_wire(entity: WireEntity) -> Result<Self> {
        let wrapped = entity.is_wrapped();
        let mut flat = entity.flatten();
        if let Value::Object(fields) = &mut flat {
            Self::reconcile(fields);
        }
        tracing::trace!(kind = Self::KIND, wrapped, "normalizing entity");
        Ok(serde_json::from_value(flat)?)
    }
}

impl Normalize for Artwork {
    const KIND: &'static str = "artwork";
}

impl Normalize for Exhibition {
    const KIND: &'static str = "exhibition";

    /// `datePeriod` wins; `dateText` fills in when it is absent or blank.
    fn reconcile(fields: &mut Map<String, Value>) {
        let legacy = fields.remove(LEGACY_DATE_FIELD);
        let current_blank = match fields.get("datePeriod") {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        };
        if current_blank {
            if let Some(legacy) = legacy.filter(|v| !v.is_null()) {
                fields.insert("datePeriod".to_string(), legacy);
            }
        }
    }
}

impl Normalize for Category {
    const KIND: &'static str = "category";
}

impl Normalize for AboutProfile {
    const KIND: &'static str = "about";
}

/// Normalize one raw entity in either wire shape.
pub fn normalize<T: Normalize>(raw: Value) -> Result<T> {
    T::from_wire(WireEntity::classify(raw)?)
}

pub fn normalize_artwork(raw: Value) -> Result<Artwork> {
    normalize(raw)
}

pub fn normalize_exhibition(raw: Value) -> Result<Exhibition> {
    normalize(raw)
}

pub fn normalize_category(raw: Value) -> Result<Category> {
    normalize(raw)
}

pub fn normalize_about(raw: Value) -> Result<AboutProfile> {
    normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityId, Media};
    use crate::richtext::Description;
    use serde_json::json;

    fn flat_artwork() -> Value {
        json!({
            "id": 12,
            "title": "Ethereal Descent",
            "slug": "ethereal-descent",
            "year": 2023,
            "medium": "Oil on linen",
            "dimensions": "120 x 90 cm",
            "description": "Layered glazes.",
            "image": {"id": 4, "url": "/uploads/descent.jpg"},
            "category": {"id": 2, "name": "Painting", "slug": "painting"}
        })
    }

    fn wrapped_artwork() -> Value {
        json!({
            "id": 12,
            "attributes": {
                "title": "Ethereal Descent",
                "slug": "ethereal-descent",
                "year": 2023,
                "medium": "Oil on linen",
                "dimensions": "120 x 90 cm",
                "description": "Layered glazes.",
                "image": {"data": {"id": 4, "attributes": {"url": "/uploads/descent.jpg"}}},
                "category": {"data": {"id": 2, "attributes": {"name": "Painting", "slug": "painting"}}}
            }
        })
    }

    #[test]
    fn test_artwork_shapes_agree() {
        let a = normalize_artwork(flat_artwork()).unwrap();
        let b = normalize_artwork(wrapped_artwork()).unwrap();
        assert_eq!(a, b);

        assert_eq!(a.id, Some(EntityId::Number(12)));
        assert_eq!(a.year.as_deref(), Some("2023"));
        assert_eq!(a.category_slug(), Some("painting"));
        assert_eq!(a.image.unwrap().url.as_deref(), Some("/uploads/descent.jpg"));
    }

    #[test]
    fn test_exhibition_gallery_shapes_agree() {
        let flat = json!({
            "id": 3,
            "title": "Tides",
            "slug": "tides",
            "location": "Seoul",
            "datePeriod": "March 2024",
            "openingTime": "18:00",
            "poster": {"url": "/uploads/p.jpg"},
            "gallery": [{"url": "/g1.jpg"}, {"url": "/g2.jpg"}, {"url": "/g3.jpg"}]
        });
        let wrapped = json!({
            "id": 3,
            "attributes": {
                "title": "Tides",
                "slug": "tides",
                "location": "Seoul",
                "datePeriod": "March 2024",
                "openingTime": "18:00",
                "poster": {"data": {"attributes": {"url": "/uploads/p.jpg"}}},
                "gallery": {"data": [
                    {"attributes": {"url": "/g1.jpg"}},
                    {"attributes": {"url": "/g2.jpg"}},
                    {"attributes": {"url": "/g3.jpg"}}
                ]}
            }
        });

        let a = normalize_exhibition(flat).unwrap();
        let b = normalize_exhibition(wrapped).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a.gallery,
            vec![
                Media::from_path("/g1.jpg"),
                Media::from_path("/g2.jpg"),
                Media::from_path("/g3.jpg"),
            ]
        );
    }

    #[test]
    fn test_legacy_date_field() {
        let legacy = normalize_exhibition(json!({"dateText": "May – June 2024"})).unwrap();
        assert_eq!(legacy.date_period.as_deref(), Some("May – June 2024"));

        let both = normalize_exhibition(json!({
            "id": 5,
            "attributes": {"datePeriod": "May 2024", "dateText": "Spring 2024"}
        }))
        .unwrap();
        assert_eq!(both.date_period.as_deref(), Some("May 2024"));

        let blank_current = normalize_exhibition(json!({
            "datePeriod": "",
            "dateText": "Spring 2024"
        }))
        .unwrap();
        assert_eq!(blank_current.date_period.as_deref(), Some("Spring 2024"));
    }

    #[test]
    fn test_missing_fields_stay_empty() {
        let artwork = normalize_artwork(json!({"id": 1, "attributes": {"title": "Bare"}})).unwrap();
        assert_eq!(artwork.title.as_deref(), Some("Bare"));
        assert!(artwork.year.is_none());
        assert!(artwork.image.is_none());
        assert!(artwork.category.is_none());
    }

    #[test]
    fn test_null_relations() {
        let artwork = normalize_artwork(json!({
            "id": 1,
            "attributes": {"image": {"data": null}, "category": null}
        }))
        .unwrap();
        assert!(artwork.image.is_none());
        assert!(artwork.category.is_none());
    }

    #[test]
    fn test_about_with_cv() {
        let about = normalize_about(json!({
            "id": 1,
            "attributes": {
                "title": "About",
                "biography": "Born in Busan.",
                "portrait": {"data": {"attributes": {"url": "/uploads/me.jpg"}}},
                "cv_sections": [
                    {"category_title": "Education", "items": [
                        {"year": 2015, "detail": "MFA"},
                        {"year": "2012", "detail": "BFA"}
                    ]},
                    {"category_title": "Awards", "items": null}
                ]
            }
        }))
        .unwrap();

        assert_eq!(about.portrait.unwrap().url.as_deref(), Some("/uploads/me.jpg"));
        assert_eq!(about.cv_sections.len(), 2);
        assert_eq!(about.cv_sections[0].items[0].year.as_deref(), Some("2015"));
        assert!(about.cv_sections[1].items.is_empty());
    }

    #[test]
    fn test_block_description_survives_normalization() {
        let exhibition = normalize_exhibition(json!({
            "attributes": {
                "description": [{"type": "paragraph", "children": [{"text": "Hi"}]}]
            }
        }))
        .unwrap();
        assert!(matches!(exhibition.description, Some(Description::Blocks(_))));
    }

    #[test]
    fn test_rejects_non_object() {
        assert!(normalize_category(json!([1, 2])).is_err());
    }
}
