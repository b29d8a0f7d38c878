//! Scripture verse sources.
//!
//! The slide engine only ever sees a resolved `Vec<Verse>`; which source
//! produced it is decided by the caller before layout starts.

use async_trait::async_trait;

use crate::bible::{ScriptureReference, Verse};
use crate::constants::source;
use crate::error::{Error, Result};

/// Trait for scripture text providers.
///
/// Implementations own their network policy (timeouts, retries); callers
/// receive either the full passage or an error.
#[async_trait]
pub trait VerseSource: Send + Sync {
    /// Look up the verses of `reference`, in ascending verse order.
    async fn fetch(&self, reference: &ScriptureReference) -> Result<Vec<Verse>>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Reject references spanning more verses than any chapter holds.
///
/// Sources call this before fetching so a typo such as `Psalm 119:1-11900`
/// fails fast instead of building an enormous passage.
pub fn check_passage_size(reference: &ScriptureReference) -> Result<()> {
    let count = reference.verse_count();
    if count > source::MAX_PASSAGE_VERSES {
        return Err(Error::scripture(format!(
            "{} spans {count} verses; passages are limited to {}",
            reference.display(),
            source::MAX_PASSAGE_VERSES
        )));
    }
    Ok(())
}

/// Deterministic stand-in text, used when no text provider is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderTextSource;

impl PlaceholderTextSource {
    /// Create a placeholder source.
    pub const fn new() -> Self {
        Self
    }

    /// Placeholder verses for `reference`, one per verse number.
    pub fn verses(reference: &ScriptureReference) -> Result<Vec<Verse>> {
        check_passage_size(reference)?;
        Ok((reference.start_verse..=reference.end_verse)
            .map(|number| {
                Verse::new(
                    number,
                    &format!(
                        "This is placeholder text for {} {}:{number}. The actual scripture text \
                         will appear when an ESV API key is configured.",
                        reference.book, reference.chapter
                    ),
                )
            })
            .collect())
    }
}

#[async_trait]
impl VerseSource for PlaceholderTextSource {
    async fn fetch(&self, reference: &ScriptureReference) -> Result<Vec<Verse>> {
        Self::verses(reference)
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::parse_reference;

    #[tokio::test]
    async fn placeholder_covers_the_range() {
        let reference = parse_reference("Mark 2:3-6").unwrap();
        let verses = PlaceholderTextSource::new().fetch(&reference).await.unwrap();
        let numbers: Vec<u32> = verses.iter().map(|v| v.number).collect();
        assert_eq!(numbers, vec![3, 4, 5, 6]);
        assert!(verses[0].text.contains("Mark 2:3"));
    }

    #[test]
    fn placeholder_is_deterministic() {
        let reference = parse_reference("Ephesians 1:3-6").unwrap();
        assert_eq!(
            PlaceholderTextSource::verses(&reference).unwrap(),
            PlaceholderTextSource::verses(&reference).unwrap()
        );
    }

    #[tokio::test]
    async fn oversized_range_is_rejected_before_allocating() {
        let reference = parse_reference("Psalm 119:1-4294967295").unwrap();
        let result = PlaceholderTextSource::new().fetch(&reference).await;
        match result {
            Err(Error::Scripture { message, .. }) => assert!(message.contains("4294967295 verses")),
            other => panic!("expected Scripture error, got {other:?}"),
        }
    }

    #[test]
    fn longest_chapter_is_allowed() {
        let reference = parse_reference("Psalm 119:1-176").unwrap();
        assert!(check_passage_size(&reference).is_ok());
        assert_eq!(PlaceholderTextSource::verses(&reference).unwrap().len(), 176);

        let too_long = parse_reference("Psalm 119:1-177").unwrap();
        assert!(check_passage_size(&too_long).is_err());
    }
}
