pub mod extract;
pub mod pagination;
pub mod selectors;

use scraper::Html;

use crate::record::ReviewRecord;

/// Listing page HTML → one record per review fragment, in document order.
pub fn parse_listing(html: &str) -> Vec<ReviewRecord> {
    let doc = Html::parse_document(html);
    doc.select(&selectors::REVIEW)
        .map(extract::extract_review)
        .collect()
}
