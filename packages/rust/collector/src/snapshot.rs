//! A batch source that replays saved results pages.
//!
//! Round `n` reads snapshot `n` and extracts its cards; rounds past the last
//! snapshot see an empty page. Useful for reproducing a collection offline from
//! HTML captured by the browser layer.

use std::path::PathBuf;

use tracing::debug;

use warmpath_extract::{CardSelectors, cards_from_html};
use warmpath_shared::{RawCard, Result, WarmpathError};

use crate::source::BatchSource;

#[derive(Debug, Clone)]
enum Snapshot {
    File(PathBuf),
    Inline(String),
}

/// Saved pages served one per round.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    snapshots: Vec<Snapshot>,
    selectors: CardSelectors,
}

impl SnapshotSource {
    /// Snapshots read from disk lazily, one file per round.
    pub fn from_files(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            snapshots: paths.into_iter().map(Snapshot::File).collect(),
            selectors: CardSelectors::default(),
        }
    }

    /// Snapshots already in memory.
    pub fn from_html(pages: impl IntoIterator<Item = String>) -> Self {
        Self {
            snapshots: pages.into_iter().map(Snapshot::Inline).collect(),
            selectors: CardSelectors::default(),
        }
    }

    pub fn with_selectors(mut self, selectors: CardSelectors) -> Self {
        self.selectors = selectors;
        self
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl BatchSource for SnapshotSource {
    type Item = RawCard;

    async fn next_batch(&mut self, round: u32) -> Result<Vec<RawCard>> {
        let Some(snapshot) = self.snapshots.get(round as usize) else {
            debug!(round, "no snapshot for round");
            return Ok(Vec::new());
        };

        let html = match snapshot {
            Snapshot::Inline(html) => html.clone(),
            Snapshot::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| WarmpathError::io(path, e))?,
        };

        Ok(cards_from_html(&html, &self.selectors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CollectOptions, Collector, StopReason};
    use crate::source::PersonNormalizer;

    fn page(slugs: &[&str]) -> String {
        let items: String = slugs
            .iter()
            .map(|slug| {
                format!(
                    r#"<li class="reusable-search__result-container">
                         <a href="/in/{slug}/?trk=search">{slug}</a>
                         <span>• 1st</span>
                         <div>Engineer</div>
                       </li>"#
                )
            })
            .collect();
        format!("<html><body><ul>{items}</ul></body></html>")
    }

    #[tokio::test]
    async fn serves_one_snapshot_per_round() {
        let mut source = SnapshotSource::from_html([page(&["a", "b"]), page(&["c"])]);
        assert_eq!(source.next_batch(0).await.unwrap().len(), 2);
        assert_eq!(source.next_batch(1).await.unwrap().len(), 1);
        assert!(source.next_batch(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_is_an_io_error() {
        let mut source =
            SnapshotSource::from_files([PathBuf::from("/nonexistent/warmpath/page-1.html")]);
        let err = source.next_batch(0).await.unwrap_err();
        assert!(matches!(err, WarmpathError::Io { .. }));
    }

    #[tokio::test]
    async fn replay_converges() {
        // The second page repeats a card from the first, as infinite scroll does.
        let mut source = SnapshotSource::from_html([page(&["a", "b"]), page(&["b", "c"])]);
        let collector = Collector::new(PersonNormalizer::default(), CollectOptions::new(10, 25, 3));
        let result = collector.collect(&mut source).await;

        assert_eq!(result.stop, StopReason::Exhausted);
        assert_eq!(result.rounds, 4);
        let urls: Vec<&str> = result.records.iter().map(|r| r.profile_url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "https://www.linkedin.com/in/a/",
                "https://www.linkedin.com/in/b/",
                "https://www.linkedin.com/in/c/",
            ]
        );
        assert!(result.records.iter().all(|r| r.connection_degree
            == warmpath_shared::ConnectionDegree::First));
    }
}
