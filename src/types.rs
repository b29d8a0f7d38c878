//! Core type definitions for compile-time safety.
//!
//! Slide identifiers, edge-case allowance tags and compliance rule names are
//! closed sets; modelling them as types keeps reports and exports consistent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a slide within one presentation (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(pub u32);

impl SlideId {
    /// Create a new `SlideId`.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the inner value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SlideId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// What a slide shows. Only verse slides are held to the CCC rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideKind {
    /// Sermon title and main reference.
    Title,
    /// Scripture verses.
    #[default]
    Verse,
    /// Closing slide.
    Closing,
}

impl SlideKind {
    /// Returns the name used in exports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Verse => "verse",
            Self::Closing => "closing",
        }
    }
}

impl fmt::Display for SlideKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recorded exception that lets a slide bend one of the CCC rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Allowance {
    /// A long verse standing alone on its slide.
    SingleVerse,
    /// Font shrunk below the house minimum for extremely long content.
    FontBelowMinimum,
    /// Font grown above the house maximum for very short content.
    FontAboveMaximum,
    /// Slide content exceeds the extremely-long threshold.
    ExtremelyLongContent,
}

impl Allowance {
    /// Tag name as it appears in reports.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::SingleVerse => "single_verse",
            Self::FontBelowMinimum => "font_below_minimum",
            Self::FontAboveMaximum => "font_above_maximum",
            Self::ExtremelyLongContent => "extremely_long_content",
        }
    }
}

impl fmt::Display for Allowance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A CCC rule checked by the compliance audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Rule {
    /// Every slide carries at least the minimum number of verses.
    MinimumVersesPerSlide,
    /// Every slide font size lies within the house range.
    FontSizeRange,
    /// No slide of three verses is followed by a lone verse.
    NoThreePlusOneSplits,
    /// No slide after the first holds a single verse.
    OrphanPrevention,
}

impl Rule {
    /// Returns all rules in report order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::MinimumVersesPerSlide,
            Self::FontSizeRange,
            Self::NoThreePlusOneSplits,
            Self::OrphanPrevention,
        ]
    }

    /// Returns the rule name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MinimumVersesPerSlide => "minimumVersesPerSlide",
            Self::FontSizeRange => "fontSizeRange",
            Self::NoThreePlusOneSplits => "noThreePlusOneSplits",
            Self::OrphanPrevention => "orphanPrevention",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
