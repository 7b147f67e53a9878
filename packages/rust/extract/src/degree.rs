//! Connection-degree inference.
//!
//! Degree markers show up in several shapes depending on the card template:
//! `Jane Doe 2nd`, `• 3rd+`, `Jane Doe1stFounder at …`, `2nd degree connection`,
//! `second-degree`, `3 degree`. Each shape has its own matcher; they are tried in
//! a fixed order and the first hit wins.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use warmpath_shared::ConnectionDegree;

type Matcher = fn(&str) -> Option<ConnectionDegree>;

/// Matchers in precedence order.
const MATCHERS: &[(&str, Matcher)] = &[
    ("compact-ordinal", compact_ordinal),
    ("ordinal-degree", ordinal_degree_phrase),
    ("digit-degree", digit_degree_phrase),
];

/// Infer the connection degree from raw card text. Never fails.
pub fn infer_degree(raw: &str) -> ConnectionDegree {
    for (name, matcher) in MATCHERS {
        if let Some(degree) = matcher(raw) {
            trace!(matcher = name, %degree, "degree matched");
            return degree;
        }
    }
    ConnectionDegree::Unknown
}

/// `1st`, `2nd`, `3rd`, `3rd+` followed by a word boundary or an uppercase letter.
///
/// The uppercase case covers markers glued to the next text node (`2ndSoftware…`).
/// A preceding digit rules the match out (`21st`).
pub(crate) fn compact_ordinal(raw: &str) -> Option<ConnectionDegree> {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?:^|[^0-9])(1st|2nd|3rd)(?:\+|\b|[A-Z])").expect("valid regex")
    });
    RE.captures(raw).map(|caps| ordinal_to_degree(&caps[1]))
}

/// `2nd degree`, `3rd-degree`, `second degree`.
pub(crate) fn ordinal_degree_phrase(raw: &str) -> Option<ConnectionDegree> {
    static RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)\b(1st|2nd|3rd|first|second|third)\+?[\s-]*degree")
            .expect("valid regex")
    });
    RE.captures(raw).map(|caps| ordinal_to_degree(&caps[1]))
}

/// `2 degree`, `3-degree`.
pub(crate) fn digit_degree_phrase(raw: &str) -> Option<ConnectionDegree> {
    static RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)\b([123])[\s-]*degree").expect("valid regex"));
    RE.captures(raw)
        .and_then(|caps| caps[1].parse::<u8>().ok())
        .map(ConnectionDegree::from_ordinal)
}

fn ordinal_to_degree(ordinal: &str) -> ConnectionDegree {
    match ordinal.to_ascii_lowercase().as_str() {
        "1st" | "first" => ConnectionDegree::First,
        "2nd" | "second" => ConnectionDegree::Second,
        "3rd" | "third" => ConnectionDegree::Third,
        _ => ConnectionDegree::Unknown,
    }
}
