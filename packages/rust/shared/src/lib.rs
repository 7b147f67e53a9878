//! Shared types, error model, and configuration for warmpath.
//!
//! This crate is the foundation depended on by all other warmpath crates.
//! It provides:
//! - [`WarmpathError`]: the unified error type
//! - Domain types ([`PersonRecord`], [`RawCard`], [`ScoredPath`], [`SiteConfig`])
//! - Configuration ([`AppConfig`], [`CollectionConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, CallSite, CollectionConfig, DelayRange, StabilityThresholds, config_dir,
    config_file_path, init_config, load_config, load_config_from,
};
pub use error::{Result, WarmpathError};
pub use types::{
    ActivityId, CanonicalUrl, ConnectionDegree, PersonRecord, RawCard, ScoredPath, SiteConfig,
    UrlKind, WarmIntroTargetContext,
};
