//! Page loaders
//!
//! Each loader issues the fetches one page needs and folds the outcome into a
//! [`PageState`]. Multi-fetch pages run their fetches concurrently.

use folio_content::{filter_by_category, CategoryFilter};
use serde::Serialize;

use super::state::PageState;
use super::views::{
    AboutView, ArchiveView, ArtworkCard, ArtworkDetail, CategoryTab, ContactView, ExhibitionCard,
    ExhibitionDetail, ExhibitionsView, LandingView, NO_EXHIBITIONS, NO_WORKS_IN_CATEGORY,
};
use crate::client::{ContentClient, ListOptions};
use crate::routes::Route;
use crate::transport::ContentTransport;

/// Artworks shown under the featured exhibition
pub const LANDING_PREVIEW_LIMIT: u32 = 4;

/// Any page the site can show
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Landing(LandingView),
    About(AboutView),
    Contact(ContactView),
    Archive(ArchiveView),
    Artwork(ArtworkDetail),
    Exhibitions(ExhibitionsView),
    Exhibition(ExhibitionDetail),
}

/// Landing page. Either section is hidden when its fetch fails; the page
/// itself never fails.
pub async fn load_landing<T: ContentTransport>(
    client: &ContentClient<T>,
) -> PageState<LandingView> {
    let newest = ListOptions::newest(Some(LANDING_PREVIEW_LIMIT));
    let (latest, preview) = tokio::join!(client.latest_exhibition(), client.artworks(&newest));

    let latest_exhibition = match latest {
        Ok(exhibition) => exhibition.map(|e| ExhibitionCard::build(&e, client.media())),
        Err(e) => {
            tracing::warn!(error = %e, "hiding featured exhibition");
            None
        }
    };
    let preview = match preview {
        Ok(artworks) => artworks
            .iter()
            .map(|a| ArtworkCard::build(a, client.media()))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "hiding artwork preview");
            Vec::new()
        }
    };

    PageState::Ready(LandingView {
        latest_exhibition,
        preview,
    })
}

/// Archive page with its category facet applied.
pub async fn load_archive<T: ContentTransport>(
    client: &ContentClient<T>,
    filter: &CategoryFilter,
) -> PageState<ArchiveView> {
    let all = ListOptions::default();
    let result = tokio::try_join!(client.categories(), client.artworks(&all));

    PageState::from_result(result.map(|(categories, artworks)| {
        let active = filter.as_slug();
        let artworks: Vec<ArtworkCard> = filter_by_category(&artworks, filter)
            .into_iter()
            .map(|a| ArtworkCard::build(a, client.media()))
            .collect();

        ArchiveView {
            active_category: active.map(str::to_string),
            categories: categories
                .iter()
                .filter_map(|c| CategoryTab::build(c, active))
                .collect(),
            empty_message: artworks.is_empty().then_some(NO_WORKS_IN_CATEGORY),
            artworks,
        }
    }))
}

pub async fn load_artwork<T: ContentTransport>(
    client: &ContentClient<T>,
    slug: &str,
) -> PageState<ArtworkDetail> {
    PageState::from_lookup(client.artwork_by_slug(slug).await)
        .map(|artwork| ArtworkDetail::build(&artwork, client.media()))
}

/// Exhibition listing, newest first.
pub async fn load_exhibitions<T: ContentTransport>(
    client: &ContentClient<T>,
) -> PageState<ExhibitionsView> {
    PageState::from_result(client.exhibitions(&ListOptions::newest(None)).await).map(
        |exhibitions| {
            let exhibitions: Vec<ExhibitionCard> = exhibitions
                .iter()
                .map(|e| ExhibitionCard::build(e, client.media()))
                .collect();
            ExhibitionsView {
                empty_message: exhibitions.is_empty().then_some(NO_EXHIBITIONS),
                exhibitions,
            }
        },
    )
}

pub async fn load_exhibition<T: ContentTransport>(
    client: &ContentClient<T>,
    slug: &str,
) -> PageState<ExhibitionDetail> {
    PageState::from_lookup(client.exhibition_by_slug(slug).await)
        .map(|exhibition| ExhibitionDetail::build(&exhibition, client.media()))
}

/// About page. An unpublished profile is `NotFound`.
pub async fn load_about<T: ContentTransport>(client: &ContentClient<T>) -> PageState<AboutView> {
    PageState::from_lookup(client.about().await)
        .map(|profile| AboutView::build(&profile, client.media()))
}

/// Load whatever `route` points at.
pub async fn load_page<T: ContentTransport>(
    client: &ContentClient<T>,
    route: &Route,
) -> PageState<PageView> {
    tracing::debug!(path = %route.path(), "loading page");

    match route {
        Route::Home => load_landing(client).await.map(PageView::Landing),
        Route::About => load_about(client).await.map(PageView::About),
        Route::Contact => PageState::Ready(PageView::Contact(ContactView::default())),
        Route::Archive { category } => {
            let filter = CategoryFilter::from_param(category.as_deref());
            load_archive(client, &filter).await.map(PageView::Archive)
        }
        Route::Artwork(slug) => load_artwork(client, slug).await.map(PageView::Artwork),
        Route::Exhibitions => load_exhibitions(client).await.map(PageView::Exhibitions),
        Route::Exhibition(slug) => load_exhibition(client, slug)
            .await
            .map(PageView::Exhibition),
        Route::NotFound(path) => {
            tracing::debug!(path = %path, "no route");
            PageState::NotFound
        }
    }
}
