//! Seams between the collector and the browser layer.

use std::future::Future;

use warmpath_extract::person_from_card;
use warmpath_shared::{PersonRecord, RawCard, Result, SiteConfig};

/// Something that yields one batch of raw items per round.
///
/// Implemented by whatever owns the page: a live browser tab, or
/// [`SnapshotSource`](crate::SnapshotSource) replaying saved HTML. Scrolling and
/// pacing between rounds happen inside `next_batch`; the collector never sleeps.
pub trait BatchSource {
    type Item;

    /// Fetch the batch currently observable for `round` (0-based).
    ///
    /// An error is not fatal. The collector logs it and counts the round as empty.
    fn next_batch(&mut self, round: u32) -> impl Future<Output = Result<Vec<Self::Item>>> + Send;

    /// Navigate to results page `page` before a fetch. Only called in
    /// [`Pagination::PageNumbers`](crate::Pagination::PageNumbers) mode.
    fn advance_page(&mut self, page: u32) -> impl Future<Output = Result<()>> + Send {
        let _ = page;
        async { Ok(()) }
    }
}

/// Turns raw items into keyed records.
pub trait Normalize {
    type Raw;
    type Record;

    /// `None` drops the item (it has no identity to deduplicate on).
    fn normalize(&self, raw: &Self::Raw) -> Option<Self::Record>;

    /// Deduplication key. Records with equal keys are the same entity.
    fn key(&self, record: &Self::Record) -> String;
}

/// Normalizes person cards, keyed by canonical profile URL.
#[derive(Debug, Clone, Default)]
pub struct PersonNormalizer {
    pub site: SiteConfig,
}

impl PersonNormalizer {
    pub fn new(site: SiteConfig) -> Self {
        Self { site }
    }
}

impl Normalize for PersonNormalizer {
    type Raw = RawCard;
    type Record = PersonRecord;

    fn normalize(&self, raw: &RawCard) -> Option<PersonRecord> {
        person_from_card(&self.site, raw)
    }

    fn key(&self, record: &PersonRecord) -> String {
        record.profile_url.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_normalizer_keys_by_profile_url() {
        let normalizer = PersonNormalizer::default();
        let a = normalizer
            .normalize(&RawCard::new("Jane Doe", Some("/in/jane-doe?trk=a".into())))
            .unwrap();
        let b = normalizer
            .normalize(&RawCard::new(
                "Jane D.",
                Some("https://linkedin.com/in/jane-doe/#about".into()),
            ))
            .unwrap();
        assert_eq!(normalizer.key(&a), normalizer.key(&b));
        assert_eq!(normalizer.key(&a), "https://www.linkedin.com/in/jane-doe/");
    }

    #[test]
    fn person_normalizer_drops_linkless_cards() {
        let normalizer = PersonNormalizer::default();
        assert!(normalizer.normalize(&RawCard::new("Jane Doe", None)).is_none());
    }
}
