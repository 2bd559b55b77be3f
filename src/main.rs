mod category;
mod crawler;
mod error;
mod fetch;
mod parser;
mod pseudonymize;
mod record;
mod settings;
mod sink;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

use category::Category;
use fetch::HttpFetcher;
use settings::Settings;

#[derive(Parser)]
#[command(name = "review_scraper", about = "Airline review scraper and author pseudonymizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every listing page of each category into <category>_reviews.csv
    Scrape {
        /// Categories to scrape (default: all)
        #[arg(short, long, value_enum)]
        category: Vec<Category>,
    },
    /// Replace author names with numeric ids in every *_reviews.csv
    Pseudonymize {
        /// Directory to scan (default: the configured data directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Scrape all categories, then pseudonymize the results
    Run,
    /// Show how many listing pages each category has
    Pages {
        /// Categories to check (default: all)
        #[arg(short, long, value_enum)]
        category: Vec<Category>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;

    let result = match cli.command {
        Commands::Scrape { category } => {
            let fetcher = HttpFetcher::new(&settings)?;
            scrape(&fetcher, &settings, &selected(category)).await;
            Ok(())
        }
        Commands::Pseudonymize { dir } => {
            let dir = dir.unwrap_or_else(|| settings.data_dir.clone());
            pseudonymize::process_directory(&dir).map(|summary| summary.print())
        }
        Commands::Run => {
            let fetcher = HttpFetcher::new(&settings)?;
            scrape(&fetcher, &settings, &Category::ALL).await;
            pseudonymize::process_directory(&settings.data_dir).map(|summary| summary.print())
        }
        Commands::Pages { category } => {
            let fetcher = HttpFetcher::new(&settings)?;
            for category in selected(category) {
                match crawler::discover_page_count(&fetcher, &settings, category).await {
                    Ok(pages) => println!("{:<8} {:>4} pages", category.as_str(), pages),
                    Err(e) => println!("{:<8} unavailable ({})", category.as_str(), e),
                }
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn selected(categories: Vec<Category>) -> Vec<Category> {
    if categories.is_empty() {
        Category::ALL.to_vec()
    } else {
        categories
    }
}

async fn scrape(fetcher: &HttpFetcher, settings: &Settings, categories: &[Category]) {
    let written = crawler::crawl_all(fetcher, settings, categories).await;
    println!("Wrote {} of {} datasets.", written, categories.len());
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
