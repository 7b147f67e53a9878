//! Convergent collection over a paginated or infinitely scrolling list.
//!
//! The list being read has no reliable "end of results" signal. [`Collector`]
//! keeps pulling batches from a [`BatchSource`] until one of four stopping rules
//! fires: enough records, repeated empty rounds, repeated rounds with no growth,
//! or the hard round cap.

pub mod engine;
pub mod merge;
pub mod snapshot;
pub mod source;

pub use engine::{CollectOptions, Collection, Collector, Pagination, StopReason};
pub use merge::interleave;
pub use snapshot::SnapshotSource;
pub use source::{BatchSource, Normalize, PersonNormalizer};
