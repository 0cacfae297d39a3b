pub mod blocks;
pub mod extract;
pub mod patterns;

use chrono::{Datelike, Utc};
use url::Url;

use crate::error::ParseError;
use crate::model::EarningsCallRecord;

/// Who a page belongs to and where it was fetched from.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub ticker: String,
    pub company: String,
    pub page_url: Url,
    /// Year assumed when a mention carries no year of its own.
    pub fallback_year: i32,
}

impl PageContext {
    pub fn new(ticker: &str, company: &str, page_url: &str) -> Result<Self, ParseError> {
        let ticker = ticker.trim();
        if ticker.is_empty() {
            return Err(ParseError::EmptyTicker);
        }
        let page_url = Url::parse(page_url).map_err(|e| ParseError::InvalidUrl {
            url: page_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            ticker: ticker.to_string(),
            company: company.to_string(),
            page_url,
            fallback_year: Utc::now().year(),
        })
    }

    #[cfg(test)]
    pub fn with_fallback_year(mut self, year: i32) -> Self {
        self.fallback_year = year;
        self
    }

    /// Point the context at the URL a page was actually served from, so
    /// relative links resolve after redirects. Unparsable URLs are ignored.
    pub fn rebase(mut self, url: &str) -> Self {
        if let Ok(url) = Url::parse(url) {
            self.page_url = url;
        }
        self
    }
}

/// Two-pass pipeline: content → blocks → earnings call records.
pub fn process_page(content: &str, ctx: &PageContext) -> Vec<EarningsCallRecord> {
    let blocks = blocks::classify(content);
    extract::extract_all(&blocks, ctx)
}
