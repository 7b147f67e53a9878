//! Core domain types for warmpath entity records and intro paths.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SiteConfig
// ---------------------------------------------------------------------------

/// The professional-network site every canonical URL is anchored to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Apex domain; the host and every subdomain of it count as same-site.
    #[serde(default = "default_apex_domain")]
    pub apex_domain: String,
    /// Host used when building canonical URLs.
    #[serde(default = "default_host")]
    pub host: String,
    /// Namespace segment of activity URNs (`urn:<ns>:activity:<id>`).
    #[serde(default = "default_urn_namespace")]
    pub urn_namespace: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            apex_domain: default_apex_domain(),
            host: default_host(),
            urn_namespace: default_urn_namespace(),
        }
    }
}

fn default_apex_domain() -> String {
    "linkedin.com".into()
}
fn default_host() -> String {
    "www.linkedin.com".into()
}
fn default_urn_namespace() -> String {
    "li".into()
}

impl SiteConfig {
    /// `https://<host>` with no trailing slash.
    pub fn origin(&self) -> String {
        format!("https://{}", self.host)
    }

    /// True when `host` is the apex domain or a subdomain of it.
    pub fn is_same_site_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        let apex = self.apex_domain.to_ascii_lowercase();
        host == apex || host.ends_with(&format!(".{apex}"))
    }
}

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// The four kinds of address the canonicalizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlKind {
    Profile,
    Post,
    Company,
    Generic,
}

impl std::fmt::Display for UrlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Profile => "profile",
            Self::Post => "post",
            Self::Company => "company",
            Self::Generic => "link",
        };
        f.write_str(s)
    }
}

/// A normalized absolute URL with query and fragment removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalUrl(String);

impl CanonicalUrl {
    /// Wrap an already-canonical string. Only the canonicalizer should call this.
    pub fn from_canonical(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CanonicalUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Decimal digits identifying a post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(String);

impl ActivityId {
    /// Returns `None` unless `digits` is a non-empty run of ASCII digits.
    pub fn new(digits: impl Into<String>) -> Option<Self> {
        let digits = digits.into();
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(digits))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ActivityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// ConnectionDegree
// ---------------------------------------------------------------------------

/// Relationship distance between the session owner and another member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionDegree {
    First,
    Second,
    Third,
    #[default]
    Unknown,
}

impl ConnectionDegree {
    /// Map a numeric ordinal (1, 2, 3) to a degree.
    pub fn from_ordinal(n: u8) -> Self {
        match n {
            1 => Self::First,
            2 => Self::Second,
            3 => Self::Third,
            _ => Self::Unknown,
        }
    }

    /// Single-letter code used by the people-search `network` filter.
    pub fn network_code(self) -> Option<&'static str> {
        match self {
            Self::First => Some("F"),
            Self::Second => Some("S"),
            Self::Third => Some("O"),
            Self::Unknown => None,
        }
    }
}

impl std::fmt::Display for ConnectionDegree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd+",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Cards and records
// ---------------------------------------------------------------------------

/// One rendered card as observed in a single collection round.
///
/// No identity guarantee across rounds; identity comes from canonicalizing `link`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCard {
    /// Display text, possibly multi-line and noisy.
    #[serde(default)]
    pub text: String,
    /// The first link found on the card, as rendered (relative or absolute).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl RawCard {
    pub fn new(text: impl Into<String>, link: Option<String>) -> Self {
        Self {
            text: text.into(),
            link,
        }
    }
}

/// Canonical person entity. Identity key is `profile_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    pub name: String,
    pub headline: String,
    pub location: String,
    pub connection_degree: ConnectionDegree,
    pub profile_url: CanonicalUrl,
}

/// The member the caller wants to reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmIntroTargetContext {
    pub profile_url: CanonicalUrl,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub location: String,
}

/// A ranked `[source, via, target]` introduction path with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPath {
    pub score: i32,
    /// One line per scoring term that contributed, in scoring order.
    pub rationale: Vec<String>,
    pub source_profile_url: String,
    pub via: PersonRecord,
    pub target_profile_url: String,
    pub target_name: String,
    pub path: [String; 3],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_person() -> PersonRecord {
        PersonRecord {
            name: "Jane Doe".into(),
            headline: "Partner at Alpha Ventures".into(),
            location: "San Francisco Bay Area".into(),
            connection_degree: ConnectionDegree::First,
            profile_url: CanonicalUrl::from_canonical("https://www.linkedin.com/in/jane-doe/"),
        }
    }

    #[test]
    fn same_site_host_matching() {
        let site = SiteConfig::default();
        assert!(site.is_same_site_host("linkedin.com"));
        assert!(site.is_same_site_host("www.linkedin.com"));
        assert!(site.is_same_site_host("DE.LinkedIn.com"));
        assert!(!site.is_same_site_host("notlinkedin.com"));
        assert!(!site.is_same_site_host("linkedin.com.evil.example"));
    }

    #[test]
    fn person_record_json_shape() {
        let json = serde_json::to_value(sample_person()).expect("serialize");
        assert_eq!(json["connectionDegree"], "first");
        assert_eq!(json["profileUrl"], "https://www.linkedin.com/in/jane-doe/");
        assert!(json.get("profile_url").is_none());
    }

    #[test]
    fn scored_path_json_shape() {
        let via = sample_person();
        let path = ScoredPath {
            score: 70,
            rationale: vec!["1st-degree connection (+30)".into()],
            source_profile_url: "https://www.linkedin.com/in/me/".into(),
            target_profile_url: "https://www.linkedin.com/in/target/".into(),
            target_name: "Target".into(),
            path: [
                "https://www.linkedin.com/in/me/".into(),
                via.profile_url.to_string(),
                "https://www.linkedin.com/in/target/".into(),
            ],
            via,
        };

        let json = serde_json::to_value(&path).expect("serialize");
        assert_eq!(json["sourceProfileUrl"], "https://www.linkedin.com/in/me/");
        assert_eq!(json["targetName"], "Target");
        assert_eq!(json["path"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["via"]["name"], "Jane Doe");
    }

    #[test]
    fn degree_codes_and_ordinals() {
        assert_eq!(ConnectionDegree::from_ordinal(1), ConnectionDegree::First);
        assert_eq!(ConnectionDegree::from_ordinal(3), ConnectionDegree::Third);
        assert_eq!(ConnectionDegree::from_ordinal(7), ConnectionDegree::Unknown);
        assert_eq!(ConnectionDegree::Third.network_code(), Some("O"));
        assert_eq!(ConnectionDegree::Unknown.network_code(), None);
    }

    #[test]
    fn activity_id_rejects_non_digits() {
        assert!(ActivityId::new("7291234567890123456").is_some());
        assert!(ActivityId::new("").is_none());
        assert!(ActivityId::new("12a").is_none());
    }

    #[test]
    fn raw_card_deserializes_without_link() {
        let card: RawCard = serde_json::from_str(r#"{"text":"Jane Doe"}"#).expect("parse");
        assert_eq!(card.text, "Jane Doe");
        assert!(card.link.is_none());
    }
}
