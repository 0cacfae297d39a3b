use chrono::{DateTime, Utc};
use serde::Serialize;

/// Quarter label used when a link looks like an earnings call but names no quarter.
pub const UNKNOWN_QUARTER: &str = "Unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CallType {
    Webcast,
    Audio,
    Video,
    Transcript,
}

impl CallType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallType::Webcast => "webcast",
            CallType::Audio => "audio",
            CallType::Video => "video",
            CallType::Transcript => "transcript",
        }
    }
}

/// One earnings call mention found on a company page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EarningsCallRecord {
    pub ticker: String,
    pub company: String,
    /// "Q1 2025", or [`UNKNOWN_QUARTER`].
    pub quarter: String,
    pub year: i32,
    /// ISO `YYYY-MM-DD` when a date was recognized.
    pub date: Option<String>,
    pub title: String,
    /// Absolute URL of the linked resource; `None` for plain-text mentions.
    pub link: Option<String>,
    pub call_type: CallType,
    pub source_url: String,
    pub discovered_at: DateTime<Utc>,
}
