//! Listing page scraping.
//!
//! A listing page is a rendered HTML snapshot of the top-movies list. Each
//! list entry is exposed as an [`ItemElement`] and turned into a
//! [`RawMovieRow`] holding the fields exactly as they are displayed. Cleaning
//! into typed values happens in [`crate::dataset`].

mod extract;
mod page;

pub use extract::{extract_row, extract_rows, RawMovieRow};
pub use page::{fetch_html, ListingItem, ListingPage, ScrapeSource};

/// A field looked up inside one listing item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Rating,
    Synopsis,
    VoteCount,
    MetaScore,
    /// The "year / runtime / age restriction" block.
    Metadata,
}

impl Field {
    /// All fields, in lookup order.
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Rating,
        Field::Synopsis,
        Field::VoteCount,
        Field::MetaScore,
        Field::Metadata,
    ];

    /// CSS selector locating this field inside a listing item.
    pub fn selector(self) -> &'static str {
        match self {
            Field::Title => ".ipc-title__text",
            Field::Rating => ".ipc-rating-star--rating",
            Field::Synopsis => ".ipc-html-content-inner-div",
            Field::VoteCount => ".ipc-rating-star--voteCount",
            Field::MetaScore => ".metacritic-score-box",
            Field::Metadata => ".dli-title-metadata",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Rating => "rating",
            Field::Synopsis => "intro",
            Field::VoteCount => "vote_count",
            Field::MetaScore => "meta_score",
            Field::Metadata => "metadata",
        }
    }
}

/// Handle to one item of a rendered listing page.
pub trait ItemElement {
    /// Rendered text of `field`, or `None` when the item has no such element.
    ///
    /// Block children are separated by newlines, the way a browser renders
    /// visible text.
    fn field_text(&self, field: Field) -> Option<String>;
}

/// Selector matching every movie entry on the listing page.
pub const ITEM_SELECTOR: &str = ".ipc-metadata-list-summary-item";
