use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

use crate::category::Category;

const ENV_PREFIX: &str = "REVIEWS";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Runtime settings. Defaults below, overridden by `REVIEWS_*` env vars.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub base_url: String,
    pub airline: String,
    pub page_size: u32,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
    /// Pages fetched in flight per category. 1 keeps the crawl strictly sequential.
    pub concurrency: usize,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("data_dir", "data")?
            .set_default("base_url", "https://www.airlinequality.com")?
            .set_default("airline", "british-airways")?
            .set_default("page_size", 100_i64)?
            .set_default("user_agent", DEFAULT_USER_AGENT)?
            .set_default("timeout_secs", 30_i64)?
            .set_default("max_retries", 3_i64)?
            .set_default("retry_backoff_ms", 2000_i64)?
            .set_default("concurrency", 1_i64)?
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to build settings")?;

        let mut settings: Settings = settings
            .try_deserialize()
            .context("Invalid REVIEWS_* settings")?;
        settings.concurrency = settings.concurrency.max(1);
        Ok(settings)
    }

    /// Listing page URL, newest first, `page_size` reviews per page.
    pub fn page_url(&self, category: Category, page: u32) -> String {
        format!(
            "{}/{}-reviews/{}/page/{}/?sortby=post_date%3ADesc&pagesize={}",
            self.base_url.trim_end_matches('/'),
            category.as_str(),
            self.airline,
            page,
            self.page_size
        )
    }

    pub fn dataset_path(&self, category: Category) -> PathBuf {
        self.data_dir.join(category.dataset_file_name())
    }
}

#[cfg(test)]
impl Settings {
    pub fn for_tests(base_url: &str) -> Self {
        Settings {
            data_dir: PathBuf::from("data"),
            base_url: base_url.to_string(),
            airline: "british-airways".to_string(),
            page_size: 100,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 5,
            max_retries: 0,
            retry_backoff_ms: 0,
            concurrency: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_load_without_env() {
        let s = Settings::load().unwrap();
        assert!(s.concurrency >= 1);
        assert!(s.user_agent.starts_with("Mozilla/5.0"));
    }

    #[test]
    fn page_url_template() {
        let s = Settings::for_tests("https://www.airlinequality.com/");
        assert_eq!(
            s.page_url(Category::Seat, 3),
            "https://www.airlinequality.com/seat-reviews/british-airways/page/3/?sortby=post_date%3ADesc&pagesize=100"
        );
    }

    #[test]
    fn dataset_path_per_category() {
        let s = Settings::for_tests("http://x");
        assert_eq!(
            s.dataset_path(Category::Lounge),
            PathBuf::from("data/lounge_reviews.csv")
        );
    }
}
