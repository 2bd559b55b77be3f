pub mod attributes;
pub mod country;

use scraper::ElementRef;
use tracing::{debug, warn};

use super::selectors::{self as sel, first, text_of};
use crate::record::{ReviewRecord, NOT_AVAILABLE};

/// Build a record from one `article.list-item` review fragment.
///
/// Every core field falls back to "N/A" on its own; a broken rating table
/// only costs the variable attributes.
pub fn extract_review(fragment: ElementRef) -> ReviewRecord {
    let mut record = ReviewRecord {
        date: date(fragment),
        rating: rating(fragment),
        title: text_or_na(fragment, &sel::TITLE),
        author: text_or_na(fragment, &sel::AUTHOR),
        country: first(fragment, &sel::STATUS)
            .and_then(|status| country::from_status(&text_of(status)))
            .unwrap_or_else(na),
        review: text_or_na(fragment, &sel::BODY),
        attributes: Vec::new(),
    };

    match first(fragment, &sel::RATINGS_TABLE) {
        Some(table) => match attributes::extract(table) {
            Ok(attrs) => {
                for (label, value) in attrs {
                    record.set_attribute(label, value);
                }
            }
            Err(e) => warn!(title = %record.title, "Error parsing review ratings: {}", e),
        },
        None => debug!(title = %record.title, "Review has no ratings table"),
    }

    debug!(
        record = %serde_json::to_string(&record).unwrap_or_default(),
        "Extracted review"
    );
    record
}

fn na() -> String {
    NOT_AVAILABLE.to_string()
}

fn text_or_na(fragment: ElementRef, selector: &scraper::Selector) -> String {
    first(fragment, selector).map(text_of).unwrap_or_else(na)
}

fn date(fragment: ElementRef) -> String {
    first(fragment, &sel::TIME)
        .and_then(|t| t.value().attr("datetime"))
        .map(str::to_string)
        .unwrap_or_else(na)
}

// Overall score renders as a ratingValue span on most reviews and as a bare
// rating-10 block on the rest.
fn rating(fragment: ElementRef) -> String {
    first(fragment, &sel::RATING_VALUE)
        .or_else(|| first(fragment, &sel::RATING_DISPLAY))
        .map(text_of)
        .unwrap_or_else(na)
}

// ── Tests ──
