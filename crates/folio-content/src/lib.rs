//! Folio Content - canonical model for portfolio content
//!
//! The content backend delivers every entity in one of two wire shapes:
//! - **Flat**: fields directly on the entity object
//! - **Wrapped**: fields under `attributes`, relations under `data.attributes`
//!
//! This crate erases that distinction. Raw JSON goes in, canonical records
//! come out, and nothing downstream ever sees an `attributes` key.
//!
//! # Example
//!
//! ```rust,ignore
//! use folio_content::{normalize_artwork, MediaResolver};
//!
//! let artwork = normalize_artwork(raw)?;
//! let media = MediaResolver::new("https://cms.example.com");
//! let src = media.resolve_media(artwork.image.as_ref());
//! ```

// Error types
pub mod error;

// Wire-shape classification and relation unwrapping
pub mod wire;

// Canonical records
pub mod model;

// Raw entity -> canonical record
pub mod normalize;

// Media reference -> absolute URL
pub mod media;

// Structured exhibition descriptions
pub mod richtext;

// Archive category facet
pub mod filter;

pub use error::{ContentError, Result};
pub use filter::{filter_by_category, CategoryFilter};
pub use media::MediaResolver;
pub use model::{AboutProfile, Artwork, Category, CvItem, CvSection, EntityId, Exhibition, Media};
pub use normalize::{
    normalize, normalize_about, normalize_artwork, normalize_category, normalize_exhibition,
    Normalize,
};
pub use richtext::{Block, Description, Rendered, Span};
pub use wire::{flatten_entity, unwrap_relation, WireEntity};
