use scraper::ElementRef;
use tracing::warn;

use crate::error::AttributeTableError;
use crate::parser::selectors::{text_of, FILLED_STAR, ROW};

/// Text the site renders for a five-star widget: one digit per star span.
const STAR_WIDGET_TEXT: &str = "12345";
pub const MAX_STARS: usize = 5;

/// Read the (label, value) rows of a review's rating table.
///
/// Star widgets are decoded to the number of filled stars. Any row without
/// both a label cell and a value cell fails the whole table.
pub fn extract(table: ElementRef) -> Result<Vec<(String, String)>, AttributeTableError> {
    let mut out = Vec::new();

    for (row, tr) in table.select(&ROW).enumerate() {
        let cells: Vec<ElementRef> = tr.children().filter_map(ElementRef::wrap).collect();
        let [label_cell, value_cell, ..] = cells[..] else {
            return Err(AttributeTableError::MalformedRow {
                row,
                cells: cells.len(),
            });
        };

        let label = text_of(label_cell);
        let raw = text_of(value_cell);
        let value = if raw == STAR_WIDGET_TEXT {
            count_stars(value_cell, &label).to_string()
        } else {
            raw
        };
        out.push((label, value));
    }

    Ok(out)
}

fn count_stars(cell: ElementRef, label: &str) -> usize {
    let filled = cell.select(&FILLED_STAR).count();
    if filled > MAX_STARS {
        warn!(label, filled, "Star widget has more than {} filled stars, clamping", MAX_STARS);
    }
    filled.min(MAX_STARS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::selectors::RATINGS_TABLE;
    use scraper::Html;

    fn stars(filled: usize, total: usize) -> String {
        (1..=total)
            .map(|i| {
                let class = if i <= filled { "star fill" } else { "star" };
                format!(r#"<span class="{}">{}</span>"#, class, i)
            })
            .collect()
    }

    fn table(rows: &str) -> Html {
        Html::parse_document(&format!(
            r#"<html><body><table class="review-ratings">{}</table></body></html>"#,
            rows
        ))
    }

    fn run(doc: &Html) -> Result<Vec<(String, String)>, AttributeTableError> {
        extract(doc.select(&RATINGS_TABLE).next().unwrap())
    }

    #[test]
    fn text_and_star_rows() {
        let doc = table(&format!(
            r#"<tr><td class="review-rating-header">Type Of Traveller</td><td class="review-value">Solo Leisure</td></tr>
               <tr><td class="review-rating-header">Seat Comfort</td><td class="review-rating-stars stars">{}</td></tr>"#,
            stars(3, 5)
        ));
        let attrs = run(&doc).unwrap();
        assert_eq!(
            attrs,
            vec![
                ("Type Of Traveller".to_string(), "Solo Leisure".to_string()),
                ("Seat Comfort".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn zero_filled_stars() {
        let doc = table(&format!(
            "<tr><td>Food &amp; Beverages</td><td>{}</td></tr>",
            stars(0, 5)
        ));
        assert_eq!(run(&doc).unwrap()[0].1, "0");
    }

    #[test]
    fn star_count_is_clamped() {
        // Seven spans with digits 1..7 would not read "12345", so fake the text.
        let spans: String = (0..7).map(|_| r#"<span class="star fill"></span>"#).collect();
        let doc = table(&format!("<tr><td>Wifi</td><td>12345{}</td></tr>", spans));
        assert_eq!(run(&doc).unwrap()[0].1, MAX_STARS.to_string());
    }

    #[test]
    fn digits_other_than_widget_kept_verbatim() {
        let doc = table("<tr><td>Aircraft</td><td> A320 </td></tr><tr><td>Code</td><td>1234</td></tr>");
        let attrs = run(&doc).unwrap();
        assert_eq!(attrs[0].1, "A320");
        assert_eq!(attrs[1].1, "1234");
    }

    #[test]
    fn short_row_is_malformed() {
        let doc = table("<tr><td>Route</td><td>LHR to JFK</td></tr><tr><td>Orphan</td></tr>");
        match run(&doc) {
            Err(AttributeTableError::MalformedRow { row, cells }) => {
                assert_eq!(row, 1);
                assert_eq!(cells, 1);
            }
            other => panic!("expected malformed row, got {:?}", other),
        }
    }

    #[test]
    fn empty_table() {
        let doc = table("");
        assert!(run(&doc).unwrap().is_empty());
    }
}
