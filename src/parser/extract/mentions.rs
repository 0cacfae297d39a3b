use super::build_record;
use crate::model::EarningsCallRecord;
use crate::parser::patterns;
use crate::parser::PageContext;

/// A heading or paragraph naming both an earnings event and a quarter.
pub fn extract(text: &str, ctx: &PageContext) -> Option<EarningsCallRecord> {
    if !patterns::is_event_text(text) {
        return None;
    }
    patterns::find_quarter(text)?;

    let date = patterns::find_date(text);
    Some(build_record(ctx, text, date, None, patterns::call_type("", text)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CallType;

    fn ctx() -> PageContext {
        PageContext::new("MSFT", "Microsoft Corporation", "https://www.microsoft.com/en-us/investor/")
            .unwrap()
            .with_fallback_year(2026)
    }

    #[test]
    fn sentence_with_quarter_and_date() {
        let r = extract(
            "Microsoft FY25 Q3 earnings conference call on April 30, 2025",
            &ctx(),
        )
        .unwrap();
        assert_eq!(r.quarter, "Q3 2025");
        assert_eq!(r.date.as_deref(), Some("2025-04-30"));
        assert_eq!(r.link, None);
        assert_eq!(r.call_type, CallType::Webcast);
    }

    #[test]
    fn transcript_mention() {
        let r = extract("Fourth Quarter Earnings Call Transcript", &ctx()).unwrap();
        assert_eq!(r.quarter, "Q4 2026");
        assert_eq!(r.call_type, CallType::Transcript);
    }

    #[test]
    fn quarter_alone_is_not_enough() {
        assert!(extract("Q2 2025 highlights", &ctx()).is_none());
        assert!(extract("Earnings release archive", &ctx()).is_none());
    }
}
