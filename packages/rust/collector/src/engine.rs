//! The convergent collection loop.
//!
//! Each round: (page mode only) advance to the next page, fetch a batch,
//! normalize it, and merge it into the first-seen-wins dedup set. After every
//! round the stopping rules are checked in priority order:
//!
//! 1. collected `>= limit` → [`StopReason::LimitReached`]
//! 2. `empty_rounds` consecutive rounds with no usable record → [`StopReason::Exhausted`]
//! 3. `stable_rounds` consecutive rounds with no growth → [`StopReason::Stable`]
//! 4. `max_rounds` rounds run → [`StopReason::MaxRounds`]

use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use warmpath_shared::{CallSite, CollectionConfig};

use crate::source::{BatchSource, Normalize};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How the source moves between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// The source scrolls (or re-reads) inside `next_batch`.
    Scroll,
    /// Call `advance_page(first_page + round)` before each fetch.
    PageNumbers { first_page: u32 },
}

/// Bounds for one collection.
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Stop once this many distinct records are held. Output is truncated to it.
    pub limit: usize,
    /// Hard cap on rounds.
    pub max_rounds: u32,
    /// Consecutive rounds without growth before giving up.
    pub stable_rounds: u32,
    /// Consecutive rounds with zero usable records before giving up.
    pub empty_rounds: u32,
    pub pagination: Pagination,
}

impl CollectOptions {
    pub fn new(limit: usize, max_rounds: u32, stable_rounds: u32) -> Self {
        Self {
            limit,
            max_rounds,
            stable_rounds,
            empty_rounds: 2,
            pagination: Pagination::Scroll,
        }
    }

    /// Options for `site` taken from the `[collection]` config section.
    ///
    /// People search is page-number paginated starting at page 1; every other
    /// call site scrolls.
    pub fn for_call_site(config: &CollectionConfig, site: CallSite, limit: usize) -> Self {
        let pagination = match site {
            CallSite::Search => Pagination::PageNumbers { first_page: 1 },
            CallSite::Connections | CallSite::Mutuals | CallSite::Engagement => {
                Pagination::Scroll
            }
        };
        Self {
            limit,
            max_rounds: config.max_rounds,
            stable_rounds: config.stable_rounds(site),
            empty_rounds: config.empty_rounds,
            pagination,
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_empty_rounds(mut self, empty_rounds: u32) -> Self {
        self.empty_rounds = empty_rounds;
        self
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Which stopping rule ended a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    LimitReached,
    Exhausted,
    Stable,
    MaxRounds,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LimitReached => "limit reached",
            Self::Exhausted => "exhausted",
            Self::Stable => "stable",
            Self::MaxRounds => "max rounds",
        };
        f.write_str(s)
    }
}

/// Outcome of one collection.
#[derive(Debug, Clone, Serialize)]
pub struct Collection<R> {
    /// Distinct records in first-seen order, at most `limit` of them.
    pub records: Vec<R>,
    /// Rounds actually run.
    pub rounds: u32,
    pub stop: StopReason,
}

// ---------------------------------------------------------------------------
// Collector
// ---------------------------------------------------------------------------

/// Per-collection dedup state. Never outlives one `collect` call.
struct CollectionState<R> {
    seen: HashSet<String>,
    records: Vec<R>,
    round: u32,
    stable_streak: u32,
    empty_streak: u32,
}

impl<R> CollectionState<R> {
    fn new() -> Self {
        Self {
            seen: HashSet::new(),
            records: Vec::new(),
            round: 0,
            stable_streak: 0,
            empty_streak: 0,
        }
    }
}

/// Runs convergent collections with a fixed normalizer and bounds.
pub struct Collector<N> {
    normalizer: N,
    options: CollectOptions,
}

impl<N: Normalize> Collector<N> {
    pub fn new(normalizer: N, options: CollectOptions) -> Self {
        Self {
            normalizer,
            options,
        }
    }

    pub fn options(&self) -> &CollectOptions {
        &self.options
    }

    /// Pull batches from `source` until a stopping rule fires.
    ///
    /// Never fails: fetch and page errors are logged and count as empty rounds.
    #[instrument(skip_all, fields(
        limit = self.options.limit,
        max_rounds = self.options.max_rounds,
        stable_rounds = self.options.stable_rounds,
    ))]
    pub async fn collect<S>(&self, source: &mut S) -> Collection<N::Record>
    where
        S: BatchSource<Item = N::Raw>,
    {
        let started = Instant::now();
        let opts = &self.options;

        if opts.limit == 0 || opts.max_rounds == 0 {
            let stop = if opts.limit == 0 {
                StopReason::LimitReached
            } else {
                StopReason::MaxRounds
            };
            debug!(%stop, "nothing to collect");
            return Collection {
                records: Vec::new(),
                rounds: 0,
                stop,
            };
        }

        info!("starting collection");

        // A zero threshold would stop after the first round regardless of its outcome.
        let empty_rounds = opts.empty_rounds.max(1);
        let stable_rounds = opts.stable_rounds.max(1);
        let mut state = CollectionState::new();

        let stop = loop {
            let batch = self.fetch_round(source, state.round).await;
            state.round += 1;

            let before = state.records.len();
            let mut usable = 0usize;
            for raw in &batch {
                let Some(record) = self.normalizer.normalize(raw) else {
                    continue;
                };
                usable += 1;
                if state.seen.insert(self.normalizer.key(&record)) {
                    state.records.push(record);
                }
            }
            let added = state.records.len() - before;

            state.empty_streak = if usable == 0 { state.empty_streak + 1 } else { 0 };
            state.stable_streak = if added == 0 { state.stable_streak + 1 } else { 0 };

            debug!(
                round = state.round,
                batch = batch.len(),
                usable,
                added,
                total = state.records.len(),
                empty_streak = state.empty_streak,
                stable_streak = state.stable_streak,
                "round complete"
            );

            if state.records.len() >= opts.limit {
                break StopReason::LimitReached;
            }
            if state.empty_streak >= empty_rounds {
                break StopReason::Exhausted;
            }
            if state.stable_streak >= stable_rounds {
                break StopReason::Stable;
            }
            if state.round >= opts.max_rounds {
                break StopReason::MaxRounds;
            }
        };

        let mut records = state.records;
        records.truncate(opts.limit);

        info!(
            records = records.len(),
            rounds = state.round,
            %stop,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "collection complete"
        );

        Collection {
            records,
            rounds: state.round,
            stop,
        }
    }

    /// One fetch, with every failure folded into an empty batch.
    async fn fetch_round<S>(&self, source: &mut S, round: u32) -> Vec<N::Raw>
    where
        S: BatchSource<Item = N::Raw>,
    {
        if let Pagination::PageNumbers { first_page } = self.options.pagination {
            let page = first_page.saturating_add(round);
            if let Err(e) = source.advance_page(page).await {
                warn!(round, page, error = %e, "page advance failed, treating round as empty");
                return Vec::new();
            }
        }

        match source.next_batch(round).await {
            Ok(batch) => batch,
            Err(e) => {
                warn!(round, error = %e, "batch fetch failed, treating round as empty");
                Vec::new()
            }
        }
    }
}
