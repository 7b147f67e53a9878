//! Card text parsing, degree inference, and DOM card extraction.
//!
//! This crate provides:
//! - [`parse_card_text`]: name/headline/location from noisy card text
//! - [`infer_degree`]: connection degree from compact or verbose markers
//! - [`cards_from_html`]: [`RawCard`]s from a saved results-list snapshot
//! - [`person_from_card`]: one `RawCard` to one canonical [`PersonRecord`]
//!
//! Nothing here fails: malformed input degrades to empty fields.
//!
//! [`RawCard`]: warmpath_shared::RawCard
//! [`PersonRecord`]: warmpath_shared::PersonRecord

pub mod card;
pub mod degree;
pub mod dom;
pub mod normalize;

pub use card::{CardText, parse_card_text};
pub use degree::infer_degree;
pub use dom::{CardSelectors, cards_from_html};
pub use normalize::person_from_card;
