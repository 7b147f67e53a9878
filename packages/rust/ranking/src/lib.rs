//! Token similarity and warm-intro path ranking.
//!
//! Both are pure functions over already-canonical records; nothing here does
//! I/O or keeps state between calls.

pub mod intro;
pub mod tokens;

pub use intro::{
    BASE_SCORE, EMPTY_HEADLINE_PENALTY, FIRST_DEGREE_BONUS, HEADLINE_BONUS_CAP,
    HEADLINE_POINTS_PER_TOKEN, LOCATION_BONUS_CAP, LOCATION_POINTS_PER_TOKEN,
    SECOND_DEGREE_BONUS, build_paths,
};
pub use tokens::{shared_token_count, tokenize};
