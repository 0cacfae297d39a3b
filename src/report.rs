use std::fmt::Write;

use clap::ValueEnum;

use crate::model::EarningsCallRecord;
use crate::scraper::ScrapeReport;

#[derive(ValueEnum, Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// Aligned table plus a per-company summary.
    #[default]
    Table,
    /// Pretty-printed JSON array of records.
    Json,
}

pub fn render(report: &ScrapeReport, format: Format) -> serde_json::Result<String> {
    match format {
        Format::Table => Ok(format!("{}\n{}", table(&report.records), summary(report))),
        Format::Json => serde_json::to_string_pretty(&report.records),
    }
}

/// Compact, readable table of records.
pub fn table(records: &[EarningsCallRecord]) -> String {
    let mut out = String::new();
    if records.is_empty() {
        out.push_str("No earnings calls found.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:>3} | {:<6} | {:<9} | {:<10} | {:<10} | {:<40} | {}",
        "#", "Ticker", "Quarter", "Date", "Type", "Title", "Link"
    );
    let _ = writeln!(out, "{}", "-".repeat(110));

    for (i, r) in records.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3} | {:<6} | {:<9} | {:<10} | {:<10} | {:<40} | {}",
            i + 1,
            r.ticker,
            r.quarter,
            r.date.as_deref().unwrap_or("-"),
            r.call_type.as_str(),
            truncate(&r.title, 40),
            r.link.as_deref().unwrap_or("-"),
        );
    }
    out
}

/// Totals and per-company counts, in input order.
pub fn summary(report: &ScrapeReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total earnings calls found: {}", report.stats.records);
    let _ = writeln!(
        out,
        "Companies: {} ({} ok, {} skipped)",
        report.stats.total, report.stats.ok, report.stats.errors
    );
    let _ = writeln!(out, "\nBy company:");
    for o in &report.outcomes {
        match &o.error {
            None => {
                let latency = o.latency_ms.map(|ms| format!(" in {}ms", ms)).unwrap_or_default();
                let _ = writeln!(out, "   {} ({}): {} calls{}", o.ticker, o.name, o.records, latency);
            }
            Some(e) => {
                let _ = writeln!(out, "   {} ({}): skipped ({})", o.ticker, o.name, e);
            }
        }
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
