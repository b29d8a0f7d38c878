//! Verse source services.
//!
//! The slide engine consumes verses; these modules supply them, either from
//! the ESV API or from deterministic placeholder text.

pub mod esv;
pub mod scripture;

pub use esv::LiveTextSource;
pub use scripture::{check_passage_size, PlaceholderTextSource, VerseSource};
