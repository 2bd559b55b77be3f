use scraper::Html;

use super::selectors::{text_of, PAGINATION, PAGINATION_ITEM};
use crate::error::PaginationError;

/// Total number of listing pages advertised by a listing page's pagination
/// control: the largest numeric label among its items. Labels such as "»" or
/// "..." are ignored, so the position of the "next" control does not matter.
pub fn page_count(html: &str) -> Result<u32, PaginationError> {
    let doc = Html::parse_document(html);
    let control = doc
        .select(&PAGINATION)
        .next()
        .ok_or(PaginationError::MissingControl)?;

    control
        .select(&PAGINATION_ITEM)
        .filter_map(|li| text_of(li).parse::<u32>().ok())
        .filter(|&n| n > 0)
        .max()
        .ok_or(PaginationError::NoPageNumbers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(items: &[&str]) -> String {
        let lis: String = items
            .iter()
            .map(|i| format!(r#"<li><a href="%">{}</a></li>"#, i))
            .collect();
        format!(
            r#"<html><body><article class="comp comp_reviews-pagination querylist-pagination position-"><ul>{}</ul></article></body></html>"#,
            lis
        )
    }

    #[test]
    fn seven_pages() {
        assert_eq!(page_count(&nav(&["1", "2", "3", "4", "5", "6", "7", ">>"])).unwrap(), 7);
    }

    #[test]
    fn ellipsis_and_next() {
        assert_eq!(page_count(&nav(&["1", "2", "3", "...", "38", ">>"])).unwrap(), 38);
    }

    #[test]
    fn next_control_not_last() {
        assert_eq!(page_count(&nav(&["<<", "4", "5", "12", ">>", "Last"])).unwrap(), 12);
    }

    #[test]
    fn single_page() {
        assert_eq!(page_count(&nav(&["1"])).unwrap(), 1);
    }

    #[test]
    fn missing_control() {
        let html = "<html><body><article class=\"list-item\"></article></body></html>";
        assert!(matches!(page_count(html), Err(PaginationError::MissingControl)));
    }

    #[test]
    fn no_numbers() {
        assert!(matches!(
            page_count(&nav(&[">>"])),
            Err(PaginationError::NoPageNumbers)
        ));
    }

    #[test]
    fn fixture_page() {
        let html = std::fs::read_to_string("tests/fixtures/airline_page_1.html").unwrap();
        assert_eq!(page_count(&html).unwrap(), 7);
    }
}
