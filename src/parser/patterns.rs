use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

use crate::model::CallType;

// "Q1", "Q1FY25", "first quarter"
static QUARTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:q([1-4])(?:fy'?(\d{4}|\d{2}))?|(first|second|third|fourth)[\s-]+quarter)\b").unwrap()
});
// "Q1 2025", "Q4 FY24", "first quarter of fiscal year 2025", "Q2 '24"
static YEAR_AFTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[\s,]*(?:of\s+)?(?:(?:fiscal\s+(?:year\s+)?)?(20\d{2})|(?:fy\s*'?|')(\d{4}|\d{2}))\b").unwrap()
});
// "FY25 Q1", "fiscal 2025 first quarter", "2025 Q3"
static YEAR_BEFORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:\bfy\s*'?(\d{4}|\d{2})|\b(20\d{2}))[\s,:-]*$").unwrap()
});
static FISCAL_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:fy\s*'?|fiscal\s+(?:year\s+)?)(\d{4}|\d{2})\b").unwrap()
});
static ANY_YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(20\d{2})\b").unwrap());

static MONTH_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(20\d{2})\b",
    )
    .unwrap()
});
static ISO_DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(20\d{2})-(\d{1,2})-(\d{1,2})\b").unwrap());
static US_DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})/(20\d{2})\b").unwrap());

/// Phrases that mark a link as an earnings call candidate.
const LINK_KEYWORDS: &[&str] = &[
    "earnings call",
    "quarterly results",
    "q1",
    "q2",
    "q3",
    "q4",
    "conference call",
    "webcast",
    "financial results",
    "investor call",
    "earnings",
    "transcript",
];

/// Phrases that make a text block worth scanning for a quarter.
const EVENT_KEYWORDS: &[&str] = &[
    "earnings call",
    "quarterly results",
    "conference call",
    "webcast",
    "financial results",
    "investor call",
    "earnings",
    "transcript",
];

const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".m4a"];
const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".webm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quarter {
    pub number: u8,
    /// Year written next to the quarter, if any.
    pub year: Option<i32>,
}

pub fn is_link_candidate(text: &str) -> bool {
    contains_any(text, LINK_KEYWORDS)
}

pub fn is_event_text(text: &str) -> bool {
    contains_any(text, EVENT_KEYWORDS)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw))
}

/// First quarter mention in `text`, with the year written beside it.
pub fn find_quarter(text: &str) -> Option<Quarter> {
    let caps = QUARTER_RE.captures(text)?;
    let number = match (caps.get(1), caps.get(3)) {
        (Some(digit), _) => digit.as_str().parse().ok()?,
        (None, Some(word)) => ordinal(word.as_str())?,
        (None, None) => return None,
    };

    let whole = caps.get(0)?;
    let year = caps
        .get(2)
        .and_then(|m| expand_year(m.as_str()))
        .or_else(|| {
            YEAR_AFTER_RE
                .captures(&text[whole.end()..])
                .and_then(|c| year_from(&c))
        })
        .or_else(|| {
            YEAR_BEFORE_RE
                .captures(&text[..whole.start()])
                .and_then(|c| year_from(&c))
        });

    Some(Quarter { number, year })
}

/// Fiscal year anywhere in `text`: an explicit `FY`/`fiscal` year first, then
/// the first four-digit year.
pub fn find_year(text: &str) -> Option<i32> {
    FISCAL_YEAR_RE
        .captures(text)
        .and_then(|c| c.get(1).and_then(|m| expand_year(m.as_str())))
        .or_else(|| {
            ANY_YEAR_RE
                .captures(text)
                .and_then(|c| c[1].parse().ok())
        })
}

/// First recognizable calendar date in `text`, as `YYYY-MM-DD`.
pub fn find_date(text: &str) -> Option<String> {
    let date = MONTH_DATE_RE
        .captures(text)
        .and_then(|c| {
            let month = month_number(&c[1])?;
            ymd(&c[3], month, &c[2])
        })
        .or_else(|| {
            ISO_DATE_RE.captures(text).and_then(|c| {
                let month = c[2].parse().ok()?;
                ymd(&c[1], month, &c[3])
            })
        })
        .or_else(|| {
            US_DATE_RE.captures(text).and_then(|c| {
                let month = c[1].parse().ok()?;
                ymd(&c[3], month, &c[2])
            })
        })?;
    Some(date.format("%Y-%m-%d").to_string())
}

pub fn call_type(href: &str, text: &str) -> CallType {
    let href = href.to_lowercase();
    if AUDIO_EXTENSIONS.iter().any(|ext| href.contains(ext)) {
        CallType::Audio
    } else if VIDEO_EXTENSIONS.iter().any(|ext| href.contains(ext)) {
        CallType::Video
    } else if text.to_lowercase().contains("transcript") {
        CallType::Transcript
    } else {
        CallType::Webcast
    }
}

fn year_from(caps: &Captures) -> Option<i32> {
    caps.iter()
        .skip(1)
        .flatten()
        .find_map(|m| expand_year(m.as_str()))
}

fn expand_year(s: &str) -> Option<i32> {
    let n: i32 = s.parse().ok()?;
    match s.len() {
        2 => Some(2000 + n),
        4 => Some(n),
        _ => None,
    }
}

fn ordinal(word: &str) -> Option<u8> {
    match word.to_lowercase().as_str() {
        "first" => Some(1),
        "second" => Some(2),
        "third" => Some(3),
        "fourth" => Some(4),
        _ => None,
    }
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn ymd(year: &str, month: u32, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day.parse().ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(text: &str) -> Option<(u8, Option<i32>)> {
        find_quarter(text).map(|q| (q.number, q.year))
    }

    #[test]
    fn quarter_with_following_year() {
        assert_eq!(q("Q1 2025 earnings call"), Some((1, Some(2025))));
        assert_eq!(q("Apple q3, 2024 results"), Some((3, Some(2024))));
        assert_eq!(q("Q4 FY24 Conference Call"), Some((4, Some(2024))));
        assert_eq!(q("Q2 '24 webcast"), Some((2, Some(2024))));
        assert_eq!(q("Q2 FY2026 webcast"), Some((2, Some(2026))));
        assert_eq!(q("Q1FY25 earnings call"), Some((1, Some(2025))));
        assert_eq!(q("q3fy2024 transcript"), Some((3, Some(2024))));
    }

    #[test]
    fn quarter_words() {
        assert_eq!(q("Third Quarter 2024 Earnings Call"), Some((3, Some(2024))));
        assert_eq!(q("first quarter of fiscal year 2025"), Some((1, Some(2025))));
        assert_eq!(q("Second-Quarter Results"), Some((2, None)));
    }

    #[test]
    fn quarter_with_leading_year() {
        assert_eq!(q("FY25 Q1 Earnings"), Some((1, Some(2025))));
        assert_eq!(q("Fiscal 2025 fourth quarter call"), Some((4, Some(2025))));
        assert_eq!(q("2023 Q4 Update"), Some((4, Some(2023))));
    }

    #[test]
    fn no_quarter() {
        assert_eq!(q("Annual Report 2024"), None);
        assert_eq!(q("FAQ1 section"), None);
        assert_eq!(q("Q5 2025"), None);
        assert_eq!(q("Q1s and Q2x"), None);
    }

    #[test]
    fn year_fallbacks() {
        assert_eq!(find_year("Earnings webcast, fiscal year 2026 outlook"), Some(2026));
        assert_eq!(find_year("Call held January 30, 2025"), Some(2025));
        assert_eq!(find_year("No year here"), None);
    }

    #[test]
    fn dates_normalize_to_iso() {
        assert_eq!(find_date("January 30, 2025").as_deref(), Some("2025-01-30"));
        assert_eq!(find_date("Oct. 31 2024 at 2:00 PM PT").as_deref(), Some("2024-10-31"));
        assert_eq!(find_date("Sept 3rd, 2025").as_deref(), Some("2025-09-03"));
        assert_eq!(find_date("held on 2025-04-24").as_deref(), Some("2025-04-24"));
        assert_eq!(find_date("07/23/2025 webcast").as_deref(), Some("2025-07-23"));
    }

    #[test]
    fn invalid_dates_are_ignored() {
        assert_eq!(find_date("February 30, 2025"), None);
        assert_eq!(find_date("13/01/2025"), None);
        assert_eq!(find_date("Q1 2025"), None);
    }

    #[test]
    fn keywords() {
        assert!(is_link_candidate("Q3 Update"));
        assert!(is_link_candidate("Listen to the Webcast"));
        assert!(!is_link_candidate("Privacy Policy"));
        assert!(is_event_text("Financial Results for Q1"));
        assert!(!is_event_text("Q1 2025"));
    }

    #[test]
    fn call_types() {
        assert_eq!(call_type("https://cdn.x.com/call.MP3", "Q1 call"), CallType::Audio);
        assert_eq!(call_type("/replay.webm", "Q1 replay"), CallType::Video);
        assert_eq!(call_type("/q1.pdf", "Q1 Earnings Call Transcript"), CallType::Transcript);
        assert_eq!(call_type("/events/q1", "Q1 Earnings Call"), CallType::Webcast);
    }
}
