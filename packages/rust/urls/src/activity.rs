//! Post (activity) identifier recovery.

use std::sync::LazyLock;

use regex::Regex;

use warmpath_shared::{ActivityId, CanonicalUrl, Result, SiteConfig, WarmpathError};

use crate::{canonical_from_path, is_same_site, looks_like_url, parse_site_url};

/// `urn:<ns>:activity:<digits>` embedded anywhere in the input.
static URN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)urn:[a-z0-9_]+:activity:(\d+)").expect("valid regex"));

/// `activity:<digits>` or `activity-<digits>` as found in post slugs.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)activity[:\-](\d+)").expect("valid regex"));

/// Last resort for slug-style links: the first run of at least ten digits.
static LONG_DIGITS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{10,}").expect("valid regex"));

/// Recover the activity id from a bare id, a URN, or a same-site post URL.
///
/// Precedence: all-digits, URN, `activity` token, long digit run.
pub fn extract_activity_id(site: &SiteConfig, raw: &str) -> Option<ActivityId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return ActivityId::new(trimmed);
    }

    let haystack = if looks_like_url(site, trimmed) {
        let url = parse_site_url(site, trimmed).filter(|u| is_same_site(site, u))?;
        decode_colons(url.path())
    } else {
        decode_colons(trimmed)
    };

    if let Some(caps) = URN_RE.captures(&haystack) {
        return ActivityId::new(&caps[1]);
    }
    if let Some(caps) = TOKEN_RE.captures(&haystack) {
        return ActivityId::new(&caps[1]);
    }
    LONG_DIGITS_RE
        .find(&haystack)
        .and_then(|m| ActivityId::new(m.as_str()))
}

/// Canonicalize any post identifier to `https://<host>/feed/update/urn:<ns>:activity:<id>/`.
pub fn canonical_post_url(site: &SiteConfig, raw: &str) -> Result<CanonicalUrl> {
    let id = extract_activity_id(site, raw).ok_or_else(|| WarmpathError::ActivityFormat {
        input: raw.trim().to_string(),
    })?;
    let urn = format!("urn:{}:activity:{id}", site.urn_namespace);
    canonical_from_path(site, &["feed", "update", &urn])
}

/// Share links often carry the URN percent-encoded (`urn%3Ali%3Aactivity%3A123`).
fn decode_colons(s: &str) -> String {
    s.replace("%3A", ":").replace("%3a", ":")
}
