//! Page view models
//!
//! Canonical records carry only what the backend sent. Views add what the
//! visitor sees: absolute media URLs, links, and placeholder text for
//! anything missing.

use folio_content::{
    AboutProfile, Artwork, Category, CvItem, CvSection, Description, Exhibition, MediaResolver,
    Rendered, Span,
};
use serde::Serialize;

use crate::contact::InquirySubject;
use crate::routes::Route;

pub const UNTITLED: &str = "Untitled";
pub const DEFAULT_YEAR: &str = "2024";
pub const DEFAULT_MEDIUM: &str = "Mixed Media on Canvas";
pub const DEFAULT_DIMENSIONS: &str = "Variable Dimensions";
pub const DEFAULT_ARTWORK_DESCRIPTION: &str = "No description provided for this piece.";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const DEFAULT_ABOUT_TITLE: &str = "About";
pub const DEFAULT_EXHIBITION_DESCRIPTION: &str = "No description provided.";
pub const NO_WORKS_IN_CATEGORY: &str = "No works found in this category.";
pub const NO_EXHIBITIONS: &str = "No exhibitions listed at this time.";

fn or_default(value: Option<&str>, fallback: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

/// Grid tile in the archive and the landing preview
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtworkCard {
    pub title: String,
    pub category: String,
    pub image_url: Option<String>,
    pub href: Option<String>,
}

impl ArtworkCard {
    pub fn build(artwork: &Artwork, media: &MediaResolver) -> Self {
        Self {
            title: or_default(artwork.title.as_deref(), UNTITLED),
            category: or_default(
                artwork.category.as_ref().and_then(|c| c.name.as_deref()),
                UNCATEGORIZED,
            ),
            image_url: media.resolve_media(artwork.image.as_ref()),
            href: artwork
                .slug
                .as_ref()
                .map(|slug| Route::Artwork(slug.clone()).path()),
        }
    }
}

/// Single artwork page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtworkDetail {
    pub title: String,
    pub category: Option<String>,
    pub year: String,
    pub medium: String,
    pub dimensions: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl ArtworkDetail {
    pub fn build(artwork: &Artwork, media: &MediaResolver) -> Self {
        let description = artwork
            .description
            .as_ref()
            .filter(|d| !d.is_blank())
            .map(Description::plain_text);

        Self {
            title: or_default(artwork.title.as_deref(), UNTITLED),
            category: artwork.category.as_ref().and_then(|c| c.name.clone()),
            year: or_default(artwork.year.as_deref(), DEFAULT_YEAR),
            medium: or_default(artwork.medium.as_deref(), DEFAULT_MEDIUM),
            dimensions: or_default(artwork.dimensions.as_deref(), DEFAULT_DIMENSIONS),
            description: description.unwrap_or_else(|| DEFAULT_ARTWORK_DESCRIPTION.to_string()),
            image_url: media.resolve_media(artwork.image.as_ref()),
        }
    }
}

/// Filter button on the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTab {
    pub name: String,
    pub slug: String,
    pub active: bool,
}

impl CategoryTab {
    /// Categories without a slug cannot be filtered on and get no tab.
    pub fn build(category: &Category, active: Option<&str>) -> Option<Self> {
        let slug = category.slug.clone()?;
        Some(Self {
            name: or_default(category.name.as_deref(), &slug),
            active: active == Some(slug.as_str()),
            slug,
        })
    }
}

/// Artwork archive with its category facet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveView {
    /// `None` means "All Works"
    pub active_category: Option<String>,
    pub categories: Vec<CategoryTab>,
    pub artworks: Vec<ArtworkCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

/// Listing row for an exhibition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExhibitionCard {
    pub title: String,
    pub location: Option<String>,
    pub date_period: Option<String>,
    pub opening_time: Option<String>,
    pub poster_url: Option<String>,
    pub href: Option<String>,
}

impl ExhibitionCard {
    pub fn build(exhibition: &Exhibition, media: &MediaResolver) -> Self {
        Self {
            title: or_default(exhibition.title.as_deref(), UNTITLED),
            location: exhibition.location.clone(),
            date_period: exhibition.date_period.clone(),
            opening_time: exhibition.opening_time.clone(),
            poster_url: media.resolve_media(exhibition.poster.as_ref()),
            href: exhibition
                .slug
                .as_ref()
                .map(|slug| Route::Exhibition(slug.clone()).path()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExhibitionsView {
    pub exhibitions: Vec<ExhibitionCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

/// Single exhibition page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExhibitionDetail {
    pub title: String,
    pub location: Option<String>,
    pub date_period: Option<String>,
    pub opening_time: Option<String>,
    pub description: Vec<Rendered>,
    pub description_html: String,
    pub poster_url: Option<String>,
    pub gallery_urls: Vec<String>,
}

impl ExhibitionDetail {
    pub fn build(exhibition: &Exhibition, media: &MediaResolver) -> Self {
        let description = match &exhibition.description {
            Some(d) if !d.is_blank() => d.render(),
            _ => vec![Rendered::Paragraph {
                spans: vec![Span::plain(DEFAULT_EXHIBITION_DESCRIPTION)],
            }],
        };

        Self {
            title: or_default(exhibition.title.as_deref(), UNTITLED),
            location: exhibition.location.clone(),
            date_period: exhibition.date_period.clone(),
            opening_time: exhibition.opening_time.clone(),
            description_html: folio_content::richtext::to_html(&description),
            description,
            poster_url: media.resolve_media(exhibition.poster.as_ref()),
            gallery_urls: media.resolve_all(&exhibition.gallery),
        }
    }
}

/// Landing page: featured exhibition plus the newest works
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingView {
    /// Hidden when missing or when its fetch failed
    pub latest_exhibition: Option<ExhibitionCard>,
    pub preview: Vec<ArtworkCard>,
}

/// Icon family of a CV section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CvKind {
    Education,
    Exhibition,
    Award,
}

impl CvKind {
    pub fn classify(title: &str) -> Self {
        let title = title.to_lowercase();
        if title.contains("education") {
            Self::Education
        } else if title.contains("exhibition") {
            Self::Exhibition
        } else {
            Self::Award
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CvSectionView {
    pub title: String,
    pub kind: CvKind,
    pub items: Vec<CvItem>,
}

impl CvSectionView {
    pub fn build(section: &CvSection) -> Self {
        let title = section.category_title.clone().unwrap_or_default();
        Self {
            kind: CvKind::classify(&title),
            title,
            items: section.items.clone(),
        }
    }
}

/// Biography and CV
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AboutView {
    pub title: String,
    pub biography: Option<String>,
    pub location: Option<String>,
    pub portrait_url: Option<String>,
    pub cv: Vec<CvSectionView>,
}

impl AboutView {
    pub fn build(profile: &AboutProfile, media: &MediaResolver) -> Self {
        Self {
            title: or_default(profile.title.as_deref(), DEFAULT_ABOUT_TITLE),
            biography: profile.biography.clone(),
            location: profile.location.clone(),
            portrait_url: media.resolve_media(profile.portrait.as_ref()),
            cv: profile.cv_sections.iter().map(CvSectionView::build).collect(),
        }
    }
}

/// Contact page: the subject choices offered by the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactView {
    pub subjects: Vec<&'static str>,
}

impl Default for ContactView {
    fn default() -> Self {
        Self {
            subjects: InquirySubject::ALL.iter().map(InquirySubject::label).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_content::Media;

    fn media() -> MediaResolver {
        MediaResolver::new("https://cms.example.com")
    }

    #[test]
    fn test_artwork_detail_fallbacks() {
        let detail = ArtworkDetail::build(&Artwork::default(), &media());
        assert_eq!(detail.title, UNTITLED);
        assert_eq!(detail.year, DEFAULT_YEAR);
        assert_eq!(detail.medium, DEFAULT_MEDIUM);
        assert_eq!(detail.dimensions, DEFAULT_DIMENSIONS);
        assert_eq!(detail.description, DEFAULT_ARTWORK_DESCRIPTION);
        assert!(detail.image_url.is_none());
    }

    #[test]
    fn test_artwork_card_links_and_media() {
        let artwork = Artwork {
            title: Some("Dusk".into()),
            slug: Some("dusk".into()),
            image: Some(Media::from_path("/uploads/dusk.jpg")),
            ..Default::default()
        };
        let card = ArtworkCard::build(&artwork, &media());
        assert_eq!(card.category, UNCATEGORIZED);
        assert_eq!(card.href.as_deref(), Some("/art-archive/dusk"));
        assert_eq!(
            card.image_url.as_deref(),
            Some("https://cms.example.com/uploads/dusk.jpg")
        );
    }

    #[test]
    fn test_exhibition_detail_default_description() {
        let detail = ExhibitionDetail::build(
            &Exhibition {
                description: Some(Description::Text("  ".into())),
                ..Default::default()
            },
            &media(),
        );
        assert_eq!(detail.description_html, "<p>No description provided.</p>");
    }

    #[test]
    fn test_cv_kind() {
        assert_eq!(CvKind::classify("Education"), CvKind::Education);
        assert_eq!(CvKind::classify("Solo Exhibitions"), CvKind::Exhibition);
        assert_eq!(CvKind::classify("Grants & Residencies"), CvKind::Award);
    }

    #[test]
    fn test_category_tab_requires_slug() {
        assert!(CategoryTab::build(&Category::default(), None).is_none());

        let tab = CategoryTab::build(
            &Category {
                name: Some("Painting".into()),
                slug: Some("painting".into()),
                ..Default::default()
            },
            Some("painting"),
        )
        .unwrap();
        assert!(tab.active);
    }
}
