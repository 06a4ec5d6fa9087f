//! Pages: fetch state, loaders and view models

mod loaders;
mod state;
pub mod views;

pub use loaders::{
    load_about, load_archive, load_artwork, load_exhibition, load_exhibitions, load_landing,
    load_page, PageView, LANDING_PREVIEW_LIMIT,
};
pub use state::{PageSlot, PageState, PageToken};
