mod companies;
mod error;
mod fetcher;
mod model;
mod parser;
mod report;
mod scraper;
mod settings;

use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use crate::fetcher::HttpFetcher;
use crate::report::Format;
use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "earnings_scraper",
    about = "Discover earnings calls on company investor-relations pages"
)]
struct Cli {
    /// Only scrape these tickers from the built-in list (default: all)
    #[arg(short, long = "ticker", value_name = "TICKER")]
    tickers: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load()?;
    let fetcher = HttpFetcher::new(&settings).context("Failed to build HTTP client")?;

    let selected = companies::select(&cli.tickers);
    if selected.is_empty() {
        println!("No matching companies. Known tickers: {}", known_tickers());
        return Ok(());
    }

    let report = scraper::scrape_companies(&fetcher, &selected).await;
    let output = report::render(&report, cli.format).context("Failed to render report")?;
    println!("{}", output);

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        tracing::info!("Done in {}", format_duration(elapsed));
    }

    Ok(())
}

fn known_tickers() -> String {
    companies::COMPANIES
        .iter()
        .map(|c| c.ticker)
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
