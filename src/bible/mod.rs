//! Scripture reference parsing and verse text handling.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Regex matching `<Book> <chapter>:<verse>` with an optional `-<verse>` end.
#[allow(clippy::expect_used)]
static RE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?)\s+(\d+):(\d+)(?:\s*-\s*(\d+))?$").expect("valid regex: RE_REFERENCE")
});

/// Regex matching `[12] verse text` runs in provider output.
#[allow(clippy::expect_used)]
static RE_BRACKETED_VERSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d+)\]\s*([^\[]*)").expect("valid regex: RE_BRACKETED_VERSE")
});

/// A parsed scripture reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptureReference {
    /// Book name as typed (e.g., "1 Corinthians"); not validated.
    pub book: String,
    /// Chapter number.
    pub chapter: u32,
    /// Starting verse.
    pub start_verse: u32,
    /// Ending verse (same as start for single verse).
    pub end_verse: u32,
    /// The reference as the user typed it, trimmed.
    pub raw: String,
}

impl ScriptureReference {
    /// Number of verses the reference spans.
    ///
    /// A hand-built reference with `end_verse < start_verse` counts as one verse.
    pub const fn verse_count(&self) -> u32 {
        self.end_verse.saturating_sub(self.start_verse).saturating_add(1)
    }

    /// Format as a display string (e.g., "Genesis 1:1-5").
    pub fn display(&self) -> String {
        if self.start_verse == self.end_verse {
            format!("{} {}:{}", self.book, self.chapter, self.start_verse)
        } else {
            format!(
                "{} {}:{}-{}",
                self.book, self.chapter, self.start_verse, self.end_verse
            )
        }
    }

    /// Format for filename (colon → v)
    pub fn file_stem(&self) -> String {
        if self.start_verse == self.end_verse {
            format!("{} {}v{}", self.book, self.chapter, self.start_verse)
        } else {
            format!(
                "{} {}v{}-{}",
                self.book, self.chapter, self.start_verse, self.end_verse
            )
        }
    }
}

/// Parse a scripture reference like "Mark 2:1-12" or "1 Corinthians 13:4".
///
/// The book name is trimmed but not checked against a canon; resolving it is
/// the verse source's job. Anything that does not end in
/// `<chapter>:<verse>[-<verse>]` fails without a partial result.
pub fn parse_reference(raw: &str) -> Result<ScriptureReference> {
    let input = raw.trim();
    let invalid = || Error::InvalidReferenceFormat { input: raw.to_string() };

    let caps = RE_REFERENCE.captures(input).ok_or_else(invalid)?;
    let number = |idx: usize| -> Option<u32> { caps.get(idx)?.as_str().parse().ok() };

    let book = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
    let chapter = number(2).ok_or_else(invalid)?;
    let start_verse = number(3).ok_or_else(invalid)?;
    let end_verse = match caps.get(4) {
        Some(_) => number(4).ok_or_else(invalid)?,
        None => start_verse,
    };

    if book.is_empty() || chapter == 0 || start_verse == 0 || end_verse < start_verse {
        return Err(invalid());
    }

    Ok(ScriptureReference {
        book: book.to_string(),
        chapter,
        start_verse,
        end_verse,
        raw: input.to_string(),
    })
}

/// A single verse with its text.
///
/// The number is at least 1 and the text is never empty. Deserialization and
/// [`Verse::try_new`] enforce this; [`Verse::new`] trusts its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawVerse")]
pub struct Verse {
    /// Verse number.
    pub number: u32,
    /// Verse text, whitespace-normalized.
    pub text: String,
}

impl Verse {
    /// Create a verse, collapsing runs of whitespace in its text.
    ///
    /// For provider or user input use [`Verse::try_new`], which rejects
    /// verse 0 and text that is empty after normalization.
    pub fn new(number: u32, text: &str) -> Self {
        Self {
            number,
            text: normalize_whitespace(text),
        }
    }

    /// Create a verse, failing on number 0 or blank text.
    pub fn try_new(number: u32, text: &str) -> Result<Self> {
        let verse = Self::new(number, text);
        verse.validate()?;
        Ok(verse)
    }

    /// Check the number and non-empty text invariants.
    pub fn validate(&self) -> Result<()> {
        if self.number == 0 {
            return Err(Error::InvalidVerse { number: 0, reason: "verse numbers start at 1" });
        }
        if self.text.is_empty() {
            return Err(Error::InvalidVerse { number: self.number, reason: "verse text is empty" });
        }
        Ok(())
    }

    /// Length of the verse text in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// The verse as it appears on a slide: `"<number> <text>"`.
    pub fn formatted(&self) -> String {
        format!("{} {}", self.number, self.text)
    }
}

/// Split provider text of the form `"[1] text [2] text"` into verses.
///
/// Poetry line breaks and paragraph gaps collapse to single spaces. Verses
/// numbered 0 or whose text is empty after normalization are dropped.
pub fn parse_bracketed_verses(text: &str) -> Vec<Verse> {
    RE_BRACKETED_VERSE
        .captures_iter(text)
        .filter_map(|caps| {
            let number: u32 = caps.get(1)?.as_str().parse().ok()?;
            Verse::try_new(number, caps.get(2)?.as_str()).ok()
        })
        .collect()
}

#[derive(Deserialize)]
struct RawVerse {
    number: u32,
    text: String,
}

impl TryFrom<RawVerse> for Verse {
    type Error = Error;

    fn try_from(raw: RawVerse) -> Result<Self> {
        Self::try_new(raw.number, &raw.text)
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
