use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};

use crate::category::Category;
use crate::settings::Settings;
use crate::error::{FetchError, PaginationError};
use crate::fetch::Fetch;
use crate::parser::{pagination, parse_listing};
use crate::record::ReviewRecord;
use crate::sink;

/// Everything harvested for one category, in page order.
pub struct CategoryHarvest {
    pub pages: u32,
    pub failed_pages: Vec<u32>,
    pub records: Vec<ReviewRecord>,
}

/// Crawl stats returned after a category is written.
pub struct CrawlSummary {
    pub category: Category,
    pub pages: u32,
    pub failed_pages: usize,
    pub records: usize,
    pub path: PathBuf,
}

impl CrawlSummary {
    pub fn print(&self) {
        println!(
            "{}: {} records from {} pages ({} failed) -> {}",
            self.category,
            self.records,
            self.pages,
            self.failed_pages,
            self.path.display()
        );
    }
}

/// Fetch page 1 and read the total page count from its pagination control.
pub async fn discover_page_count<F: Fetch>(
    fetcher: &F,
    settings: &Settings,
    category: Category,
) -> Result<u32, PaginationError> {
    discover(fetcher, settings, category).await.map(|(pages, _)| pages)
}

/// Page count plus the page-1 HTML it was read from.
async fn discover<F: Fetch>(
    fetcher: &F,
    settings: &Settings,
    category: Category,
) -> Result<(u32, String), PaginationError> {
    let html = fetcher.fetch(&settings.page_url(category, 1)).await?;
    let pages = pagination::page_count(&html)?;
    Ok((pages, html))
}

/// Fetch one listing page and extract every review on it.
pub async fn harvest_page<F: Fetch>(
    fetcher: &F,
    settings: &Settings,
    category: Category,
    page: u32,
) -> Result<Vec<ReviewRecord>, FetchError> {
    let html = fetcher.fetch(&settings.page_url(category, page)).await?;
    Ok(parse_listing(&html))
}

/// Discover the page count, then harvest pages 1..=N.
///
/// Page 1 is parsed from the discovery response. Up to `settings.concurrency`
/// of the remaining pages are in flight at once; results are reassembled in
/// page order. A page that fails to fetch is logged and contributes no
/// records. Only a failed discovery aborts the category.
pub async fn crawl_category<F: Fetch>(
    fetcher: &F,
    settings: &Settings,
    category: Category,
) -> Result<CategoryHarvest, PaginationError> {
    let (pages, first) = discover(fetcher, settings, category).await?;
    info!(%category, pages, "Discovered listing pages");

    let pb = ProgressBar::new(pages as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} pages ({per_sec}, eta {eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut results: Vec<(u32, Result<Vec<ReviewRecord>, FetchError>)> =
        vec![(1, Ok(parse_listing(&first)))];
    pb.inc(1);
    let rest: Vec<_> = stream::iter(2..=pages)
        .map(|page| async move {
            (page, harvest_page(fetcher, settings, category, page).await)
        })
        .buffered(settings.concurrency.max(1))
        .inspect(|_| pb.inc(1))
        .collect()
        .await;
    results.extend(rest);
    pb.finish_and_clear();

    let mut harvest = CategoryHarvest {
        pages,
        failed_pages: Vec::new(),
        records: Vec::new(),
    };
    for (page, result) in results {
        match result {
            Ok(records) => {
                info!(%category, page, reviews = records.len(), "Scraped page {} of {}", page, pages);
                harvest.records.extend(records);
            }
            Err(e) => {
                warn!(%category, page, "Page skipped: {}", e);
                harvest.failed_pages.push(page);
            }
        }
    }

    Ok(harvest)
}

/// Crawl a category and write `<category>_reviews.csv` into the data directory.
pub async fn crawl_to_dataset<F: Fetch>(
    fetcher: &F,
    settings: &Settings,
    category: Category,
) -> Result<CrawlSummary> {
    let harvest = crawl_category(fetcher, settings, category)
        .await
        .with_context(|| format!("Failed to retrieve main page for {}", category))?;

    let path = settings.dataset_path(category);
    sink::write_records(&path, &harvest.records)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(%category, records = harvest.records.len(), path = %path.display(), "Dataset written");

    Ok(CrawlSummary {
        category,
        pages: harvest.pages,
        failed_pages: harvest.failed_pages.len(),
        records: harvest.records.len(),
        path,
    })
}

/// Crawl categories one after another into the data directory, which is
/// created up front so a run with no datasets still leaves it in place.
/// A category that fails is reported and the rest still run. Returns the
/// number of datasets written.
pub async fn crawl_all<F: Fetch>(fetcher: &F, settings: &Settings, categories: &[Category]) -> usize {
    if let Err(e) = fs::create_dir_all(&settings.data_dir) {
        error!(dir = %settings.data_dir.display(), "Failed to create data directory: {}", e);
    }

    let mut written = 0usize;
    for &category in categories {
        match crawl_to_dataset(fetcher, settings, category).await {
            Ok(summary) => {
                summary.print();
                written += 1;
            }
            Err(e) if e.downcast_ref::<PaginationError>().is_some() => {
                warn!(%category, "Skipping category: {:#}", e);
            }
            Err(e) => error!(%category, "{:#}", e),
        }
    }
    written
}

// ── Tests ──
