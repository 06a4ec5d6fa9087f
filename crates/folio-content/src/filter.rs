//! Category facet for the artwork archive

use crate::model::Artwork;

/// Which artworks the archive shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Slug(String),
}

impl CategoryFilter {
    /// `None`, `""` and `"all"` mean no filtering.
    pub fn from_param(param: Option<&str>) -> Self {
        match param.map(str::trim) {
            None | Some("") | Some("all") => Self::All,
            Some(slug) => Self::Slug(slug.to_string()),
        }
    }

    pub fn matches(&self, artwork: &Artwork) -> bool {
        match self {
            Self::All => true,
            Self::Slug(slug) => artwork.category_slug() == Some(slug.as_str()),
        }
    }

    pub fn as_slug(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Slug(slug) => Some(slug),
        }
    }
}

/// Artworks matching `filter`, in source order.
pub fn filter_by_category<'a>(
    artworks: &'a [Artwork],
    filter: &CategoryFilter,
) -> Vec<&'a Artwork> {
    artworks.iter().filter(|a| filter.matches(a)).collect()
}
