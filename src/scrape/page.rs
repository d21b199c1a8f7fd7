//! Listing page loading and DOM lookups.

use super::{Field, ItemElement, ITEM_SELECTOR};
use crate::error::{MarqueeError, Result};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

/// Where the rendered listing HTML comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeSource {
    Url(Url),
    File(PathBuf),
}

impl std::str::FromStr for ScrapeSource {
    type Err = MarqueeError;

    fn from_str(s: &str) -> Result<Self> {
        if s.starts_with("http://") || s.starts_with("https://") {
            let url = Url::parse(s)
                .map_err(|e| MarqueeError::InvalidInput(format!("Invalid URL {}: {}", s, e)))?;
            Ok(ScrapeSource::Url(url))
        } else {
            Ok(ScrapeSource::File(crate::config::Settings::expand_path(s)))
        }
    }
}

impl std::fmt::Display for ScrapeSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScrapeSource::Url(url) => write!(f, "{}", url),
            ScrapeSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the listing HTML from a URL or a saved snapshot.
#[instrument(skip(user_agent), fields(source = %source))]
pub async fn fetch_html(source: &ScrapeSource, user_agent: &str, timeout: Duration) -> Result<String> {
    match source {
        ScrapeSource::File(path) => {
            debug!("Reading listing snapshot from {}", path.display());
            tokio::fs::read_to_string(path).await.map_err(|e| {
                MarqueeError::Scrape(format!("Failed to read {}: {}", path.display(), e))
            })
        }
        ScrapeSource::Url(url) => {
            info!("Fetching listing page {}", url);
            let client = reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .build()?;

            let response = client
                .get(url.clone())
                .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(MarqueeError::Scrape(format!("{} returned {}", url, status)));
            }

            Ok(response.text().await?)
        }
    }
}

/// A parsed listing page.
pub struct ListingPage {
    document: Html,
    item_selector: Selector,
    field_selectors: HashMap<Field, Selector>,
}

impl ListingPage {
    /// Parse rendered listing HTML.
    pub fn parse(html: &str) -> Result<Self> {
        let field_selectors = Field::ALL
            .iter()
            .map(|&field| Ok((field, parse_selector(field.selector())?)))
            .collect::<Result<HashMap<_, _>>>()?;

        Ok(Self {
            document: Html::parse_document(html),
            item_selector: parse_selector(ITEM_SELECTOR)?,
            field_selectors,
        })
    }

    /// Every movie entry on the page, in page order.
    pub fn items(&self) -> Vec<ListingItem<'_>> {
        self.document
            .select(&self.item_selector)
            .map(|element| ListingItem {
                element,
                selectors: &self.field_selectors,
            })
            .collect()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| MarqueeError::Scrape(format!("Invalid selector {}: {}", selector, e)))
}

/// One movie entry on a [`ListingPage`].
pub struct ListingItem<'a> {
    element: ElementRef<'a>,
    selectors: &'a HashMap<Field, Selector>,
}

impl ItemElement for ListingItem<'_> {
    fn field_text(&self, field: Field) -> Option<String> {
        let selector = self.selectors.get(&field)?;
        self.element.select(selector).next().map(render_text)
    }
}

/// Render an element's visible text.
///
/// An element holding only child elements renders each child on its own
/// line; anything with direct text collapses to a single line.
fn render_text(element: ElementRef<'_>) -> String {
    let has_own_text = element.children().any(|child| {
        child
            .value()
            .as_text()
            .is_some_and(|text| !text.trim().is_empty())
    });
    let child_elements: Vec<ElementRef<'_>> = element.children().filter_map(ElementRef::wrap).collect();

    if has_own_text || child_elements.is_empty() {
        return element
            .text()
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
    }

    child_elements
        .into_iter()
        .map(render_text)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::extract_rows;

    const LISTING: &str = r#"
        <html><body><ul>
          <li class="ipc-metadata-list-summary-item">
            <h3 class="ipc-title__text">1. The Shawshank Redemption</h3>
            <div class="dli-title-metadata">
              <span class="dli-title-metadata-item">1994</span>
              <span class="dli-title-metadata-item">2h 22m</span>
              <span class="dli-title-metadata-item">R</span>
            </div>
            <span class="ipc-rating-star--rating">9.3</span>
            <span class="ipc-rating-star--voteCount">&nbsp;(<!-- -->3M<!-- -->)</span>
            <span class="metacritic-score-box">82</span>
            <div class="ipc-html-content-inner-div">Two imprisoned men bond over a number of years.</div>
          </li>
          <li class="ipc-metadata-list-summary-item">
            <h3 class="ipc-title__text">2. Inception</h3>
            <div class="dli-title-metadata">
              <span class="dli-title-metadata-item">2010</span>
              <span class="dli-title-metadata-item">2h 28m</span>
              <span class="dli-title-metadata-item">PG-13</span>
            </div>
            <span class="ipc-rating-star--rating">8.8</span>
            <span class="ipc-rating-star--voteCount">(2.5M)</span>
            <div class="ipc-html-content-inner-div">A thief who steals corporate secrets.</div>
          </li>
        </ul></body></html>
    "#;

    #[test]
    fn test_listing_items_are_extracted_in_page_order() {
        let page = ListingPage::parse(LISTING).unwrap();
        let items = page.items();
        assert_eq!(items.len(), 2);

        let rows = extract_rows(&items, || {}).unwrap();
        assert_eq!(rows[0].title, "1. The Shawshank Redemption");
        assert_eq!(rows[0].year, "1994");
        assert_eq!(rows[0].duration, "2h 22m");
        assert_eq!(rows[0].age_restriction, "R");
        assert_eq!(rows[0].vote_count, "(3M)");
        assert_eq!(rows[0].meta_score.as_deref(), Some("82"));

        assert_eq!(rows[1].title, "2. Inception");
        assert!(rows[1].meta_score.is_none());
        assert_eq!(rows[1].intro, "A thief who steals corporate secrets.");
    }

    #[test]
    fn test_page_without_items_yields_nothing() {
        let page = ListingPage::parse("<html><body><p>Nothing here</p></body></html>").unwrap();
        assert!(page.items().is_empty());
    }

    #[test]
    fn test_scrape_source_parsing() {
        let source: ScrapeSource = "https://example.com/top".parse().unwrap();
        assert!(matches!(source, ScrapeSource::Url(_)));

        let source: ScrapeSource = "/tmp/listing.html".parse().unwrap();
        assert_eq!(source, ScrapeSource::File(PathBuf::from("/tmp/listing.html")));
    }

    #[tokio::test]
    async fn test_fetch_html_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listing.html");
        std::fs::write(&path, LISTING).unwrap();

        let html = fetch_html(&ScrapeSource::File(path), "test", Duration::from_secs(5))
            .await
            .unwrap();
        assert!(html.contains("Inception"));
    }
}
