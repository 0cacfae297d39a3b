pub mod links;
pub mod mentions;

use std::collections::HashSet;

use chrono::Utc;

use super::blocks::Block;
use super::patterns;
use super::PageContext;
use crate::model::{CallType, EarningsCallRecord, UNKNOWN_QUARTER};

/// Run the link and text passes over `blocks`, in document order.
pub fn extract_all(blocks: &[Block], ctx: &PageContext) -> Vec<EarningsCallRecord> {
    let mut records = Vec::new();
    let mut seen_links = HashSet::new();
    let mut seen_mentions = HashSet::new();

    for (i, block) in blocks.iter().enumerate() {
        match block {
            Block::Link { text, url } => {
                if let Some(record) = links::extract(text, url, &blocks[i + 1..], ctx) {
                    let fresh = match &record.link {
                        Some(link) => seen_links.insert(link.clone()),
                        None => {
                            seen_mentions.insert((record.quarter.clone(), record.title.clone()))
                        }
                    };
                    if fresh {
                        records.push(record);
                    }
                }
            }
            Block::Heading { text, .. } | Block::Text(text) => {
                if let Some(record) = mentions::extract(text, ctx) {
                    if seen_mentions.insert((record.quarter.clone(), record.title.clone())) {
                        records.push(record);
                    }
                }
            }
            Block::Empty => {}
        }
    }

    records
}

fn build_record(
    ctx: &PageContext,
    title: &str,
    date: Option<String>,
    link: Option<String>,
    call_type: CallType,
) -> EarningsCallRecord {
    let quarter = patterns::find_quarter(title);
    let year = quarter
        .and_then(|q| q.year)
        .or_else(|| patterns::find_year(title))
        .unwrap_or(ctx.fallback_year);
    let quarter = match quarter {
        Some(q) => format!("Q{} {}", q.number, year),
        None => UNKNOWN_QUARTER.to_string(),
    };

    EarningsCallRecord {
        ticker: ctx.ticker.clone(),
        company: ctx.company.clone(),
        quarter,
        year,
        date,
        title: title.to_string(),
        link,
        call_type,
        source_url: ctx.page_url.to_string(),
        discovered_at: Utc::now(),
    }
}

// ── Tests ──
