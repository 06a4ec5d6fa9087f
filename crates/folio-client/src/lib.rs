//! Folio Client - read-only access to the portfolio content backend
//!
//! Provides:
//! - Query building for the REST content API (`/api/{collection}`)
//! - A transport seam (reqwest in production, canned payloads in tests)
//! - Typed fetches that hand back canonical records from `folio-content`
//! - Page loaders producing view models and a [`PageState`]
//! - Route resolution and contact-form submission
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌──────────────────┐
//! │ Route      │──▶│ page loaders │──▶│ ContentClient     │
//! └────────────┘   └──────┬───────┘   │  ContentQuery     │
//!                         │           │  ContentTransport │
//!                         ▼           └────────┬─────────┘
//!                  views + PageState           ▼
//!                                     folio-content normalize
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use folio_client::{ContentClient, ContentConfig, Route, load_page};
//!
//! let client = ContentClient::new(ContentConfig::from_env()?)?;
//! let state = load_page(&client, &Route::parse("/art-archive/ethereal-descent")).await;
//! ```

pub mod client;
pub mod config;
pub mod contact;
pub mod error;
pub mod pages;
pub mod query;
pub mod routes;
pub mod transport;

pub use client::{ContentClient, ListOptions, RawPayload};
pub use config::{ContactConfig, ContentConfig};
pub use contact::{ContactClient, ContactForm, InquirySubject, SubmissionState, SubmissionTracker};
pub use error::{ClientError, Result};
pub use pages::{load_page, PageSlot, PageState, PageToken, PageView};
pub use query::{Collection, ContentQuery, Populate, Sort, SortDirection};
pub use routes::Route;
pub use transport::{ContentTransport, HttpTransport, MockTransport};

// Re-export the content model
pub use folio_content;
