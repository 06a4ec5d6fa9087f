//! Logical content queries and their REST encoding
//!
//! ```text
//! GET /api/{collection}?populate=*&sort={field}:{asc|desc}&pagination[limit]={n}
//! GET /api/{collection}?populate=*&filters[slug][$eq]={slug}
//! ```

use crate::error::{ClientError, Result};
use reqwest::Url;
use std::fmt;

/// Content collections exposed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Artworks,
    Exhibitions,
    Categories,
    /// The artist profile (single type)
    About,
}

impl Collection {
    /// Logical name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Artworks => "artworks",
            Self::Exhibitions => "exhibitions",
            Self::Categories => "categories",
            Self::About => "about",
        }
    }

    /// Path segment under `/api`
    pub fn api_path(&self) -> &'static str {
        match self {
            Self::About => "about-page",
            other => other.as_str(),
        }
    }

    /// Single types answer with one object instead of a list.
    pub fn is_single(&self) -> bool {
        matches!(self, Self::About)
    }

    pub fn from_api_path(path: &str) -> Option<Self> {
        match path {
            "artworks" => Some(Self::Artworks),
            "exhibitions" => Some(Self::Exhibitions),
            "categories" => Some(Self::Categories),
            "about-page" | "about" => Some(Self::About),
            _ => None,
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Most recently created first
    pub fn newest_first() -> Self {
        Self::desc("createdAt")
    }
}

/// Equality filter on one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

/// Which relations the backend should expand
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Populate {
    #[default]
    None,
    /// `populate=*` (one level)
    All,
    /// `populate[0]=a&populate[1]=b.c` (explicit, may be nested)
    Paths(Vec<String>),
}

/// A read-only query against one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub collection: Collection,
    pub filter: Option<Filter>,
    pub sort: Option<Sort>,
    pub limit: Option<u32>,
    pub populate: Populate,
}

impl ContentQuery {
    pub fn new(collection: Collection) -> Self {
        Self {
            collection,
            filter: None,
            sort: None,
            limit: None,
            populate: Populate::None,
        }
    }

    /// Keep only entities whose `field` equals `value`.
    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter = Some(Filter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Shorthand for `filter_eq("slug", slug)`.
    pub fn slug(self, slug: impl Into<String>) -> Self {
        self.filter_eq("slug", slug)
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn populate(mut self, populate: Populate) -> Self {
        self.populate = populate;
        self
    }

    pub fn populate_all(self) -> Self {
        self.populate(Populate::All)
    }

    /// Query-string pairs, unencoded, in a stable order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        match &self.populate {
            Populate::None => {}
            Populate::All => pairs.push(("populate".to_string(), "*".to_string())),
            Populate::Paths(paths) => {
                for (i, path) in paths.iter().enumerate() {
                    pairs.push((format!("populate[{}]", i), path.clone()));
                }
            }
        }
        if let Some(filter) = &self.filter {
            pairs.push((format!("filters[{}][$eq]", filter.field), filter.value.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push((
                "sort".to_string(),
                format!("{}:{}", sort.field, sort.direction.as_str()),
            ));
        }
        if let Some(limit) = self.limit {
            pairs.push(("pagination[limit]".to_string(), limit.to_string()));
        }

        pairs
    }

    /// Full request URL under `api_root` (e.g. `http://localhost:1337/api`).
    pub fn to_url(&self, api_root: &str) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            api_root.trim_end_matches('/'),
            self.collection.api_path()
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| ClientError::Config(format!("invalid API URL {:?}: {}", raw, e)))?;

        let pairs = self.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_list_query() {
        let url = ContentQuery::new(Collection::Artworks)
            .populate_all()
            .sort(Sort::newest_first())
            .limit(4)
            .to_url("http://localhost:1337/api")
            .unwrap();

        assert_eq!(url.path(), "/api/artworks");
        assert_eq!(
            pairs(&url),
            vec![
                ("populate".to_string(), "*".to_string()),
                ("sort".to_string(), "createdAt:desc".to_string()),
                ("pagination[limit]".to_string(), "4".to_string()),
            ]
        );
    }

    #[test]
    fn test_slug_query() {
        let url = ContentQuery::new(Collection::Exhibitions)
            .slug("tides & shores")
            .populate_all()
            .to_url("http://localhost:1337/api/")
            .unwrap();

        assert_eq!(url.path(), "/api/exhibitions");
        assert!(pairs(&url).contains(&(
            "filters[slug][$eq]".to_string(),
            "tides & shores".to_string()
        )));
    }

    #[test]
    fn test_bare_query_has_no_query_string() {
        let url = ContentQuery::new(Collection::Categories)
            .to_url("https://cms.example.com/api")
            .unwrap();
        assert_eq!(url.as_str(), "https://cms.example.com/api/categories");
    }

    #[test]
    fn test_nested_populate_paths() {
        let query = ContentQuery::new(Collection::About).populate(Populate::Paths(vec![
            "portrait".into(),
            "cv_sections.items".into(),
        ]));
        let url = query.to_url("http://localhost:1337/api").unwrap();

        assert_eq!(url.path(), "/api/about-page");
        assert_eq!(
            query.query_pairs(),
            vec![
                ("populate[0]".to_string(), "portrait".to_string()),
                ("populate[1]".to_string(), "cv_sections.items".to_string()),
            ]
        );
    }

    #[test]
    fn test_collection_paths() {
        assert_eq!(Collection::About.as_str(), "about");
        assert!(Collection::About.is_single());
        assert_eq!(Collection::from_api_path("about-page"), Some(Collection::About));
        assert_eq!(Collection::from_api_path("posts"), None);
    }
}
