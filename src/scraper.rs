use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::companies::Company;
use crate::error::ScrapeError;
use crate::fetcher::Fetch;
use crate::model::EarningsCallRecord;
use crate::parser::{self, PageContext};

/// Scrape stats returned after completion.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScrapeStats {
    pub total: usize,
    pub ok: usize,
    pub errors: usize,
    pub records: usize,
}

/// What happened to one company during a run.
#[derive(Debug)]
pub struct CompanyOutcome {
    pub ticker: &'static str,
    pub name: &'static str,
    pub records: usize,
    pub latency_ms: Option<i64>,
    pub error: Option<ScrapeError>,
}

#[derive(Debug)]
pub struct ScrapeReport {
    /// Every record found, grouped by company in input order.
    pub records: Vec<EarningsCallRecord>,
    pub outcomes: Vec<CompanyOutcome>,
    pub stats: ScrapeStats,
}

/// Fetch and extract each company in turn. A failed company is logged and
/// skipped; it never stops the run.
pub async fn scrape_companies<F>(fetcher: &F, companies: &[&'static Company]) -> ScrapeReport
where
    F: Fetch + ?Sized,
{
    scrape_with(fetcher, companies, parser::process_page).await
}

async fn scrape_with<F, E>(
    fetcher: &F,
    companies: &[&'static Company],
    extract: E,
) -> ScrapeReport
where
    F: Fetch + ?Sized,
    E: Fn(&str, &PageContext) -> Vec<EarningsCallRecord>,
{
    let total = companies.len();
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );

    let mut records = Vec::new();
    let mut outcomes = Vec::with_capacity(total);
    let mut stats = ScrapeStats {
        total,
        ..Default::default()
    };

    for company in companies {
        pb.set_message(company.ticker);
        info!("Scraping {} - {}", company.ticker, company.name);

        let outcome = match scrape_one(fetcher, company, &extract).await {
            Ok((found, latency_ms)) => {
                info!(
                    "Found {} earnings calls for {} ({}ms)",
                    found.len(),
                    company.ticker,
                    latency_ms
                );
                stats.ok += 1;
                let count = found.len();
                records.extend(found);
                CompanyOutcome {
                    ticker: company.ticker,
                    name: company.name,
                    records: count,
                    latency_ms: Some(latency_ms),
                    error: None,
                }
            }
            Err(e) => {
                warn!("Skipping {}: {}", company.ticker, e);
                stats.errors += 1;
                CompanyOutcome {
                    ticker: company.ticker,
                    name: company.name,
                    records: 0,
                    latency_ms: None,
                    error: Some(e),
                }
            }
        };
        outcomes.push(outcome);
        pb.inc(1);
    }

    pb.finish_and_clear();
    stats.records = records.len();
    info!(
        "Scraped {} companies ({} ok, {} errors), {} records",
        stats.total, stats.ok, stats.errors, stats.records
    );

    ScrapeReport {
        records,
        outcomes,
        stats,
    }
}

async fn scrape_one<F, E>(
    fetcher: &F,
    company: &Company,
    extract: &E,
) -> Result<(Vec<EarningsCallRecord>, i64), ScrapeError>
where
    F: Fetch + ?Sized,
    E: Fn(&str, &PageContext) -> Vec<EarningsCallRecord>,
{
    let ctx = PageContext::new(company.ticker, company.name, company.ir_url)?;
    let page = fetcher.fetch(company.ir_url).await?;
    debug!("{}: HTTP {} from {}", company.ticker, page.status, page.url);
    let ctx = ctx.rebase(&page.url);
    Ok((extract(&page.body, &ctx), page.latency_ms))
}
