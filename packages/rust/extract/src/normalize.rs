//! RawCard → PersonRecord normalization.

use tracing::trace;

use warmpath_shared::{PersonRecord, RawCard, SiteConfig};
use warmpath_urls::profile_url_from_link;

use crate::{infer_degree, parse_card_text};

/// Normalize one card. Returns `None` when the card has no canonical profile link.
///
/// The profile URL is the record's identity, so a card that only carries a name
/// cannot be deduplicated and is dropped. A card with a link but no usable text
/// is kept with empty fields.
pub fn person_from_card(site: &SiteConfig, card: &RawCard) -> Option<PersonRecord> {
    let Some(profile_url) = card
        .link
        .as_deref()
        .and_then(|href| profile_url_from_link(site, href))
    else {
        trace!(text = %card.text, "card has no profile link, dropping");
        return None;
    };

    let text = parse_card_text(&card.text);
    Some(PersonRecord {
        name: text.name,
        headline: text.headline,
        location: text.location,
        connection_degree: infer_degree(&card.text),
        profile_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use warmpath_shared::ConnectionDegree;

    #[test]
    fn full_card() {
        let card = RawCard::new(
            "Jane Doe\n• 1st\nPartner at Alpha Ventures\nSan Francisco Bay Area",
            Some("/in/jane-doe/?miniProfileUrn=x".into()),
        );
        let record = person_from_card(&SiteConfig::default(), &card).unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.headline, "Partner at Alpha Ventures");
        assert_eq!(record.location, "San Francisco Bay Area");
        assert_eq!(record.connection_degree, ConnectionDegree::First);
        assert_eq!(record.profile_url.as_str(), "https://www.linkedin.com/in/jane-doe/");
    }

    #[test]
    fn card_without_link_is_dropped() {
        let card = RawCard::new("Jane Doe\nDesigner", None);
        assert!(person_from_card(&SiteConfig::default(), &card).is_none());

        let card = RawCard::new("Jane Doe", Some("https://evil.example/in/jane".into()));
        assert!(person_from_card(&SiteConfig::default(), &card).is_none());
    }

    #[test]
    fn link_only_card_keeps_empty_fields() {
        let card = RawCard::new("", Some("https://www.linkedin.com/in/ghost".into()));
        let record = person_from_card(&SiteConfig::default(), &card).unwrap();
        assert!(record.name.is_empty());
        assert_eq!(record.connection_degree, ConnectionDegree::Unknown);
    }

    #[test]
    fn record_serializes_in_camel_case() {
        let card = RawCard::new("Jane Doe 2nd", Some("/in/jane-doe".into()));
        let record = person_from_card(&SiteConfig::default(), &card).unwrap();
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["connectionDegree"], "second");
    }
}
