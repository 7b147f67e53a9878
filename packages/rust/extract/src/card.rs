//! Card text parsing: name, headline, and location from a person card.
//!
//! Card text arrives as whatever the renderer produced: one field per line,
//! interleaved with badges, buttons, and "mutual connections" blurbs. The first
//! line is the name; the remaining lines run through a fixed list of filters and
//! the first two survivors become headline and location.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Bullet glyphs used as separators in card templates.
const BULLETS: &[char] = &['•', '·', '∙', '‧', '●', '◦', '▪'];

/// Lines starting with one of these (case-insensitive) are UI chrome.
const NOISE_PREFIXES: &[&str] = &[
    "past:", "current:", "mutual", "shared", "see all", "show all", "view", "message",
    "follow", "connect", "pending",
];

/// Line filters, applied in order; a line is dropped if any returns `true`.
const LINE_FILTERS: &[fn(&str) -> bool] = &[is_bullet_line, is_degree_marker_line, is_ui_noise];

/// Structured fields recovered from one card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardText {
    pub name: String,
    pub headline: String,
    pub location: String,
}

/// Split card text into name, headline, and location. Never fails.
pub fn parse_card_text(raw: &str) -> CardText {
    let lines: Vec<String> = raw
        .split(['\n', '\r'])
        .map(collapse_whitespace)
        .filter(|line| !line.is_empty())
        .collect();

    let Some((first, rest)) = lines.split_first() else {
        return CardText::default();
    };

    let mut candidates = rest
        .iter()
        .filter(|line| !LINE_FILTERS.iter().any(|is_noise| is_noise(line.as_str())));

    CardText {
        name: clean_name(first),
        headline: candidates.next().cloned().unwrap_or_default(),
        location: candidates.next().cloned().unwrap_or_default(),
    }
}

fn collapse_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip a leading bullet and a trailing degree marker from the name line.
fn clean_name(line: &str) -> String {
    static TRAILING_DEGREE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(
            r"(?i)\s*(?:[•·∙‧●◦▪]\s*)?(?:1st|2nd|3rd\+?)(?:\s*degree(?:\s+connection)?)?\s*$",
        )
        .expect("valid regex")
    });

    let without_bullet = line.trim_start_matches(BULLETS).trim();
    TRAILING_DEGREE_RE
        .replace(without_bullet, "")
        .trim()
        .to_string()
}

fn is_bullet_line(line: &str) -> bool {
    line.starts_with(BULLETS)
}

fn is_degree_marker_line(line: &str) -> bool {
    static DEGREE_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?i)^(?:[•·∙‧●◦▪]\s*)?(?:1st|2nd|3rd\+?)(?:\s*degree(?:\s+connection)?)?$")
            .expect("valid regex")
    });
    DEGREE_LINE_RE.is_match(line)
}

fn is_ui_noise(line: &str) -> bool {
    let lower = line.to_lowercase();
    NOISE_PREFIXES.iter().any(|prefix| lower.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_card() {
        let raw = "Jane Doe • 2nd\n\
                   Partner at Alpha Ventures\n\
                   San Francisco Bay Area\n\
                   Message";
        let card = parse_card_text(raw);
        assert_eq!(card.name, "Jane Doe");
        assert_eq!(card.headline, "Partner at Alpha Ventures");
        assert_eq!(card.location, "San Francisco Bay Area");
    }

    #[test]
    fn noise_lines_are_skipped() {
        let raw = "  John   Smith  \n\
                   • 1st\n\
                   View John Smith's profile\n\
                   2nd degree connection\n\
                   Staff Engineer at Acme\n\
                   Current: Staff Engineer at Acme\n\
                   Mutual connections: 12\n\
                   Austin, Texas\n\
                   Connect";
        let card = parse_card_text(raw);
        assert_eq!(card.name, "John Smith");
        assert_eq!(card.headline, "Staff Engineer at Acme");
        assert_eq!(card.location, "Austin, Texas");
    }

    #[test]
    fn name_markers_are_stripped() {
        assert_eq!(parse_card_text("• Jane Doe 3rd+").name, "Jane Doe");
        assert_eq!(parse_card_text("Jane Doe1st").name, "Jane Doe");
        assert_eq!(
            parse_card_text("Jane Doe · 2nd degree connection").name,
            "Jane Doe"
        );
    }

    #[test]
    fn missing_lines_degrade_to_empty() {
        assert_eq!(parse_card_text(""), CardText::default());
        assert_eq!(parse_card_text("\n \r\n\t"), CardText::default());

        let card = parse_card_text("Only A Name");
        assert_eq!(card.name, "Only A Name");
        assert!(card.headline.is_empty());
        assert!(card.location.is_empty());
    }

    #[test]
    fn parsing_is_repeatable() {
        let raw = "Jane Doe\n• 2nd\nDesigner\nAustin, Texas\nFollow";
        assert_eq!(parse_card_text(raw), parse_card_text(raw));
    }

    #[test]
    fn individual_filters() {
        assert!(is_bullet_line("• 500+ connections"));
        assert!(!is_bullet_line("Designer"));
        assert!(is_degree_marker_line("3rd+"));
        assert!(is_degree_marker_line("· 2nd degree connection"));
        assert!(!is_degree_marker_line("2nd shift supervisor"));
        assert!(is_ui_noise("SHOW ALL 5 EXPERIENCES"));
        assert!(is_ui_noise("Pending"));
        assert!(!is_ui_noise("Product Manager"));
    }
}
