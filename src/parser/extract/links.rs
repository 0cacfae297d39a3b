use url::Url;

use super::build_record;
use crate::model::EarningsCallRecord;
use crate::parser::blocks::Block;
use crate::parser::patterns;
use crate::parser::PageContext;

/// A date in the block after a link only counts when that block is short,
/// like a caption or an event line.
const DATE_LOOKAHEAD_MAX_CHARS: usize = 80;

/// Turn a link into a record when its text looks like an earnings call.
/// `following` is every block after the link, used for the date lookahead.
/// A link whose href does not resolve (script buttons, `#`) still yields a
/// record, without a link.
pub fn extract(
    text: &str,
    href: &str,
    following: &[Block],
    ctx: &PageContext,
) -> Option<EarningsCallRecord> {
    if text.is_empty() || !patterns::is_link_candidate(text) {
        return None;
    }
    let link = resolve(&ctx.page_url, href).map(|url| url.to_string());

    let date = patterns::find_date(text).or_else(|| date_after(following));
    let call_type = patterns::call_type(link.as_deref().unwrap_or(href), text);

    Some(build_record(ctx, text, date, link, call_type))
}

/// Resolve `href` against the page URL. Fragment-only and non-http targets
/// (`mailto:`, `javascript:`) yield `None`.
pub fn resolve(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let url = base.join(href).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn date_after(blocks: &[Block]) -> Option<String> {
    blocks
        .iter()
        .find(|b| !matches!(b, Block::Empty))
        .and_then(|b| match b {
            Block::Text(t) if t.chars().count() <= DATE_LOOKAHEAD_MAX_CHARS => {
                patterns::find_date(t)
            }
            _ => None,
        })
}
