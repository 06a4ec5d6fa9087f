//! Content client
//!
//! Translates logical queries into GETs, unwraps the `{ data: ... }`
//! envelope, and hands raw entities to the normalizer. One attempt per call;
//! failures are returned to the caller, which decides what to show.

use folio_content::{
    AboutProfile, Artwork, Category, Exhibition, MediaResolver, Normalize, WireEntity,
};
use serde_json::Value;

use crate::config::ContentConfig;
use crate::error::{ClientError, Result};
use crate::query::{Collection, ContentQuery, Populate, Sort};
use crate::transport::{ContentTransport, HttpTransport};

/// The `data` member of a response, classified by wire shape
#[derive(Debug, Clone, PartialEq)]
pub enum RawPayload {
    One(WireEntity),
    Many(Vec<WireEntity>),
    /// `data: null`
    Empty,
}

impl RawPayload {
    /// Parse a response body.
    pub fn from_body(body: Value) -> Result<Self> {
        let data = match body {
            Value::Object(mut map) => map.remove("data").ok_or_else(|| {
                ClientError::InvalidResponse("response has no `data` member".to_string())
            })?,
            _ => {
                return Err(ClientError::InvalidResponse(
                    "response body is not an object".to_string(),
                ))
            }
        };

        Ok(match data {
            Value::Null => Self::Empty,
            Value::Array(items) => Self::Many(
                items
                    .into_iter()
                    .map(WireEntity::classify)
                    .collect::<folio_content::Result<_>>()?,
            ),
            other => Self::One(WireEntity::classify(other)?),
        })
    }

    /// All entities, in response order.
    pub fn into_many(self) -> Vec<WireEntity> {
        match self {
            Self::One(entity) => vec![entity],
            Self::Many(entities) => entities,
            Self::Empty => Vec::new(),
        }
    }

    /// The first entity, if any.
    pub fn into_first(self) -> Option<WireEntity> {
        self.into_many().into_iter().next()
    }

    pub fn len(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Many(entities) => entities.len(),
            Self::Empty => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Sort and limit for list fetches
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub sort: Option<Sort>,
    pub limit: Option<u32>,
}

impl ListOptions {
    /// Newest first, optionally capped.
    pub fn newest(limit: Option<u32>) -> Self {
        Self {
            sort: Some(Sort::newest_first()),
            limit,
        }
    }

    fn apply(&self, mut query: ContentQuery) -> ContentQuery {
        if let Some(sort) = &self.sort {
            query = query.sort(sort.clone());
        }
        if let Some(limit) = self.limit {
            query = query.limit(limit);
        }
        query
    }
}

/// Read-only client for the content backend
///
/// # Example
///
/// ```rust,ignore
/// use folio_client::{ContentClient, ContentConfig};
///
/// let client = ContentClient::new(ContentConfig::from_env()?)?;
/// let artwork = client.artwork_by_slug("ethereal-descent").await?;
/// ```
pub struct ContentClient<T = HttpTransport> {
    config: ContentConfig,
    media: MediaResolver,
    transport: T,
}

impl ContentClient<HttpTransport> {
    /// Create a client over HTTP.
    pub fn new(config: ContentConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client from the process-wide config.
    pub fn from_global() -> Result<Self> {
        Self::new(ContentConfig::global().clone())
    }
}

impl<T: ContentTransport> ContentClient<T> {
    /// Create a client over any transport.
    pub fn with_transport(config: ContentConfig, transport: T) -> Self {
        Self {
            media: config.media(),
            config,
            transport,
        }
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    /// Media resolver bound to the backend host
    pub fn media(&self) -> &MediaResolver {
        &self.media
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run a query and return the raw payload.
    pub async fn fetch(&self, query: &ContentQuery) -> Result<RawPayload> {
        let url = query.to_url(&self.config.api_root())?;
        tracing::debug!(collection = %query.collection, url = %url, "fetching content");

        let body = self.transport.get_json(&url).await?;
        let payload = RawPayload::from_body(body)?;

        tracing::debug!(collection = %query.collection, count = payload.len(), "content fetched");
        Ok(payload)
    }

    /// Run a query and normalize every entity.
    pub async fn list<N: Normalize>(&self, query: &ContentQuery) -> Result<Vec<N>> {
        self.fetch(query)
            .await?
            .into_many()
            .into_iter()
            .map(|entity| N::from_wire(entity).map_err(ClientError::from))
            .collect()
    }

    /// Run a query and normalize the first entity, if any.
    pub async fn first<N: Normalize>(&self, query: &ContentQuery) -> Result<Option<N>> {
        match self.fetch(query).await?.into_first() {
            Some(entity) => Ok(Some(N::from_wire(entity)?)),
            None => Ok(None),
        }
    }

    /// Artworks with image and category populated.
    pub async fn artworks(&self, options: &ListOptions) -> Result<Vec<Artwork>> {
        let query = options.apply(ContentQuery::new(Collection::Artworks).populate_all());
        self.list(&query).await
    }

    /// One artwork by slug; `None` when no artwork has that slug.
    pub async fn artwork_by_slug(&self, slug: &str) -> Result<Option<Artwork>> {
        let query = ContentQuery::new(Collection::Artworks)
            .slug(slug)
            .populate_all();
        self.first(&query).await
    }

    /// Exhibitions with poster and gallery populated.
    pub async fn exhibitions(&self, options: &ListOptions) -> Result<Vec<Exhibition>> {
        let query = options.apply(ContentQuery::new(Collection::Exhibitions).populate_all());
        self.list(&query).await
    }

    /// One exhibition by slug; `None` when no exhibition has that slug.
    pub async fn exhibition_by_slug(&self, slug: &str) -> Result<Option<Exhibition>> {
        let query = ContentQuery::new(Collection::Exhibitions)
            .slug(slug)
            .populate_all();
        self.first(&query).await
    }

    /// The most recently created exhibition.
    pub async fn latest_exhibition(&self) -> Result<Option<Exhibition>> {
        let query = ListOptions::newest(Some(1))
            .apply(ContentQuery::new(Collection::Exhibitions).populate_all());
        self.first(&query).await
    }

    /// All archive categories.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        self.list(&ContentQuery::new(Collection::Categories)).await
    }

    /// The artist profile with portrait and CV entries populated.
    pub async fn about(&self) -> Result<Option<AboutProfile>> {
        let query = ContentQuery::new(Collection::About).populate(Populate::Paths(vec![
            "portrait".to_string(),
            "cv_sections.items".to_string(),
        ]));
        self.first(&query).await
    }
}
