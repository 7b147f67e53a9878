//! URL canonicalization and same-site guarding.
//!
//! Every address the rest of warmpath handles, whether typed by a user or scraped
//! from a card, passes through here and comes out in one canonical form:
//!
//! - profile: `https://<host>/in/<vanity>/`
//! - post: `https://<host>/feed/update/urn:<ns>:activity:<digits>/`
//! - company: `https://<host>/company/<slug>/`
//! - generic link: the same URL with query and fragment removed
//!
//! Canonicalizing a canonical URL is a no-op.

mod activity;
mod search;

use tracing::debug;
use url::Url;

use warmpath_shared::{CanonicalUrl, Result, SiteConfig, UrlKind, WarmpathError};

pub use activity::{canonical_post_url, extract_activity_id};
pub use search::{PeopleSearchQuery, people_search_url, with_page};

/// Canonicalize `raw` as the given kind and return the canonical string.
///
/// The generic kind never fails; it yields `""` for unparseable or off-site input.
pub fn canonicalize(site: &SiteConfig, kind: UrlKind, raw: &str) -> Result<String> {
    match kind {
        UrlKind::Profile => canonical_profile_url(site, raw).map(CanonicalUrl::into_string),
        UrlKind::Post => canonical_post_url(site, raw).map(CanonicalUrl::into_string),
        UrlKind::Company => canonical_company_url(site, raw).map(CanonicalUrl::into_string),
        UrlKind::Generic => Ok(canonical_link(site, raw)),
    }
}

// ---------------------------------------------------------------------------
// Profile / company
// ---------------------------------------------------------------------------

/// Canonicalize a vanity name or a same-site `/in/<vanity>` URL.
pub fn canonical_profile_url(site: &SiteConfig, raw: &str) -> Result<CanonicalUrl> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(WarmpathError::EmptyIdentifier {
            kind: UrlKind::Profile,
        });
    }

    let invalid = || WarmpathError::ProfileFormat {
        input: trimmed.to_string(),
    };

    let vanity = if looks_like_url(site, trimmed) {
        let url = parse_site_url(site, trimmed)
            .filter(|u| is_same_site(site, u))
            .ok_or_else(invalid)?;
        segment_after(&url, "in").ok_or_else(invalid)?
    } else {
        bare_identifier(trimmed, "in").ok_or_else(invalid)?
    };

    canonical_from_path(site, &["in", &vanity])
}

/// Canonicalize a company slug or a same-site `/company/<slug>` URL.
pub fn canonical_company_url(site: &SiteConfig, raw: &str) -> Result<CanonicalUrl> {
    let trimmed = raw.trim();
    let invalid = || WarmpathError::CompanyFormat {
        input: trimmed.to_string(),
    };

    let slug = if looks_like_url(site, trimmed) {
        let url = parse_site_url(site, trimmed)
            .filter(|u| is_same_site(site, u))
            .ok_or_else(invalid)?;
        segment_after(&url, "company").ok_or_else(invalid)?
    } else {
        bare_identifier(trimmed, "company").ok_or_else(invalid)?
    };

    canonical_from_path(site, &["company", &slug])
}

// ---------------------------------------------------------------------------
// Generic links
// ---------------------------------------------------------------------------

/// Strip query and fragment from a same-site URL or site-relative path.
///
/// Returns an empty string instead of failing; scraped links go through here.
pub fn canonical_link(site: &SiteConfig, raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let parsed = if trimmed.starts_with('/') && !trimmed.starts_with("//") {
        Url::parse(&site.origin())
            .and_then(|base| base.join(trimmed))
            .ok()
    } else {
        parse_site_url(site, trimmed)
    };

    match parsed {
        Some(mut url) if is_same_site(site, &url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        _ => {
            debug!(link = trimmed, "link is not a same-site URL");
            String::new()
        }
    }
}

/// Lenient profile extraction for scraped hrefs: `None` instead of an error.
pub fn profile_url_from_link(site: &SiteConfig, href: &str) -> Option<CanonicalUrl> {
    let link = canonical_link(site, href);
    if link.is_empty() {
        return None;
    }
    canonical_profile_url(site, &link).ok()
}

// ---------------------------------------------------------------------------
// Same-site guard
// ---------------------------------------------------------------------------

/// Refuse any URL that would take an authenticated session off the site.
///
/// Browser-side navigation must call this before every `goto`.
pub fn assert_same_site(site: &SiteConfig, raw: &str) -> Result<Url> {
    let off_site = || WarmpathError::OffSite {
        url: raw.trim().to_string(),
    };
    let url = Url::parse(raw.trim()).map_err(|_| off_site())?;
    if is_same_site(site, &url) {
        Ok(url)
    } else {
        Err(off_site())
    }
}

pub(crate) fn is_same_site(site: &SiteConfig, url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
        && url.host_str().is_some_and(|h| site.is_same_site_host(h))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Whether `raw` should be read as a URL rather than a bare identifier.
pub(crate) fn looks_like_url(site: &SiteConfig, raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("//") {
        return true;
    }
    let first = raw.split(['/', '?', '#']).next().unwrap_or_default();
    site.is_same_site_host(first)
}

/// Parse absolute, scheme-relative, or scheme-less (`www.site.com/...`) URLs.
pub(crate) fn parse_site_url(site: &SiteConfig, raw: &str) -> Option<Url> {
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Url::parse(raw).ok();
    }
    if raw.starts_with("//") {
        return Url::parse(&format!("https:{raw}")).ok();
    }
    let first = raw.split(['/', '?', '#']).next().unwrap_or_default();
    if site.is_same_site_host(first) {
        return Url::parse(&format!("https://{raw}")).ok();
    }
    None
}

/// The non-empty path segment following `marker`, e.g. `jane` in `/in/jane/details`.
fn segment_after(url: &Url, marker: &str) -> Option<String> {
    let mut segments = url.path_segments()?;
    while let Some(segment) = segments.next() {
        if segment == marker {
            return segments
                .next()
                .filter(|s| !s.is_empty())
                .map(str::to_string);
        }
    }
    None
}

/// A bare identifier with any query/fragment cut and `<prefix>/` removed.
fn bare_identifier(raw: &str, prefix: &str) -> Option<String> {
    let cut = raw.split(['?', '#']).next().unwrap_or_default();
    let trimmed = cut.trim_matches('/');
    let value = trimmed
        .strip_prefix(&format!("{prefix}/"))
        .unwrap_or(trimmed)
        .trim_matches('/');

    if value.is_empty() || value.contains('/') || value.chars().any(char::is_whitespace) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Build `https://<host>/<segments...>/`, percent-encoding as the URL parser would.
pub(crate) fn canonical_from_path(site: &SiteConfig, segments: &[&str]) -> Result<CanonicalUrl> {
    let mut url = Url::parse(&site.origin())
        .map_err(|e| WarmpathError::config(format!("invalid site host {:?}: {e}", site.host)))?;
    url.set_path(&format!("/{}/", segments.join("/")));
    Ok(CanonicalUrl::from_canonical(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteConfig {
        SiteConfig::default()
    }

    #[test]
    fn profile_from_bare_vanity() {
        let url = canonical_profile_url(&site(), "/jane-doe/").unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/in/jane-doe/");

        let url = canonical_profile_url(&site(), "in/jane-doe").unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/in/jane-doe/");
    }

    #[test]
    fn profile_strips_query_and_fragment() {
        let url =
            canonical_profile_url(&site(), "https://www.linkedin.com/in/jane-doe/?trk=x").unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/in/jane-doe/");

        let url = canonical_profile_url(&site(), "linkedin.com/in/jane-doe#about").unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/in/jane-doe/");

        let url = canonical_profile_url(&site(), "jane-doe?trk=people").unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/in/jane-doe/");
    }

    #[test]
    fn profile_from_subdomain_and_deep_path() {
        let url = canonical_profile_url(
            &site(),
            "https://de.linkedin.com/in/jane-doe/details/experience/",
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/in/jane-doe/");
    }

    #[test]
    fn profile_canonicalization_is_idempotent() {
        for vanity in ["jane-doe", "ACoAAB12xyz", "jürgen-müller", "a_b.c"] {
            let once = canonical_profile_url(&site(), vanity).unwrap();
            let twice = canonical_profile_url(&site(), once.as_str()).unwrap();
            assert_eq!(once, twice, "not idempotent for {vanity}");
        }
    }

    #[test]
    fn profile_rejects_blank_input() {
        let err = canonical_profile_url(&site(), "   ").unwrap_err();
        assert!(matches!(
            err,
            WarmpathError::EmptyIdentifier {
                kind: UrlKind::Profile
            }
        ));
    }

    #[test]
    fn profile_rejects_company_url() {
        let err =
            canonical_profile_url(&site(), "https://www.linkedin.com/company/acme/").unwrap_err();
        assert!(matches!(err, WarmpathError::ProfileFormat { .. }));
    }

    #[test]
    fn profile_rejects_off_site_and_nested_bare_values() {
        let err = canonical_profile_url(&site(), "https://evil.example/in/jane-doe/").unwrap_err();
        assert!(matches!(err, WarmpathError::ProfileFormat { .. }));

        let err = canonical_profile_url(&site(), "jane/doe").unwrap_err();
        assert!(matches!(err, WarmpathError::ProfileFormat { .. }));

        let err = canonical_profile_url(&site(), "jane doe").unwrap_err();
        assert!(matches!(err, WarmpathError::ProfileFormat { .. }));
    }

    #[test]
    fn company_forms() {
        let a = canonical_company_url(&site(), "acme").unwrap();
        let b = canonical_company_url(&site(), "https://www.linkedin.com/company/acme/people/?x=1")
            .unwrap();
        let c = canonical_company_url(&site(), "company/acme/").unwrap();
        assert_eq!(a.as_str(), "https://www.linkedin.com/company/acme/");
        assert_eq!(a, b);
        assert_eq!(a, c);

        let err = canonical_company_url(&site(), "https://www.linkedin.com/in/jane/").unwrap_err();
        assert!(matches!(err, WarmpathError::CompanyFormat { .. }));
        let err = canonical_company_url(&site(), "  ").unwrap_err();
        assert!(matches!(err, WarmpathError::CompanyFormat { .. }));
    }

    #[test]
    fn generic_link_strips_and_tolerates_garbage() {
        assert_eq!(
            canonical_link(&site(), "/in/jane-doe?miniProfileUrn=abc#x"),
            "https://www.linkedin.com/in/jane-doe"
        );
        assert_eq!(
            canonical_link(&site(), "https://www.linkedin.com/feed/?trk=nav"),
            "https://www.linkedin.com/feed/"
        );
        assert_eq!(canonical_link(&site(), "not a url at all"), "");
        assert_eq!(canonical_link(&site(), "https://evil.example/in/x"), "");
        assert_eq!(canonical_link(&site(), ""), "");
    }

    #[test]
    fn profile_from_scraped_link() {
        let url = profile_url_from_link(&site(), "/in/jane-doe?miniProfileUrn=urn%3Ali%3Afs").unwrap();
        assert_eq!(url.as_str(), "https://www.linkedin.com/in/jane-doe/");
        assert!(profile_url_from_link(&site(), "/search/results/people/").is_none());
        assert!(profile_url_from_link(&site(), "javascript:void(0)").is_none());
    }

    #[test]
    fn same_site_guard() {
        assert!(assert_same_site(&site(), "https://www.linkedin.com/in/jane/").is_ok());
        assert!(assert_same_site(&site(), "https://linkedin.com/").is_ok());

        for bad in [
            "https://evil.example/",
            "https://linkedin.com.evil.example/",
            "file:///etc/passwd",
            "not a url",
        ] {
            let err = assert_same_site(&site(), bad).unwrap_err();
            assert!(matches!(err, WarmpathError::OffSite { .. }), "accepted {bad}");
        }
    }

    #[test]
    fn canonicalize_dispatches_by_kind() {
        let s = site();
        assert_eq!(
            canonicalize(&s, UrlKind::Profile, "jane-doe").unwrap(),
            "https://www.linkedin.com/in/jane-doe/"
        );
        assert_eq!(
            canonicalize(&s, UrlKind::Post, "123456789").unwrap(),
            "https://www.linkedin.com/feed/update/urn:li:activity:123456789/"
        );
        assert_eq!(canonicalize(&s, UrlKind::Generic, "%%%").unwrap(), "");
    }
}
