use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

fn css(selector: &str) -> Selector {
    Selector::parse(selector).unwrap()
}

// ── Listing page ──
pub static REVIEW: LazyLock<Selector> = LazyLock::new(|| css("article.list-item"));
pub static PAGINATION: LazyLock<Selector> =
    LazyLock::new(|| css("article.comp_reviews-pagination"));
pub static PAGINATION_ITEM: LazyLock<Selector> = LazyLock::new(|| css("li"));

// ── Review fragment ──
pub static TIME: LazyLock<Selector> = LazyLock::new(|| css("time"));
pub static RATING_VALUE: LazyLock<Selector> =
    LazyLock::new(|| css(r#"span[itemprop="ratingValue"]"#));
pub static RATING_DISPLAY: LazyLock<Selector> = LazyLock::new(|| css("div.rating-10"));
pub static TITLE: LazyLock<Selector> = LazyLock::new(|| css("h2.text_header"));
pub static AUTHOR: LazyLock<Selector> = LazyLock::new(|| css(r#"span[itemprop="name"]"#));
pub static STATUS: LazyLock<Selector> = LazyLock::new(|| css("h3.userStatusWrapper"));
pub static BODY: LazyLock<Selector> = LazyLock::new(|| css(r#"div[itemprop="reviewBody"]"#));

// ── Rating table ──
pub static RATINGS_TABLE: LazyLock<Selector> = LazyLock::new(|| css("table.review-ratings"));
pub static ROW: LazyLock<Selector> = LazyLock::new(|| css("tr"));
pub static FILLED_STAR: LazyLock<Selector> = LazyLock::new(|| css("span.star.fill"));

/// Concatenated descendant text, trimmed.
pub fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub fn first<'a>(el: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    el.select(selector).next()
}
