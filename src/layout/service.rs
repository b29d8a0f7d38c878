//! Whole-service decks: a title slide, one or more passages, a closing slide.
//!
//! Each passage is laid out and audited on its own, so the CCC rules never see
//! the title or closing slide. The deck only concatenates the passage slides
//! and renumbers them.

use serde::{Deserialize, Serialize};

use super::assembler::Slide;
use super::rules::LayoutRules;
use super::{build_presentation, Presentation};
use crate::bible::{ScriptureReference, Verse};
use crate::constants::display;
use crate::error::{Error, Result};
use crate::types::{SlideId, SlideKind};

/// A complete service deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Sermon title, trimmed.
    pub title: String,
    /// Every passage with its own groups, slides and audit. Slide ids in here
    /// are local to the passage.
    pub passages: Vec<Presentation>,
    /// The deck in order: title, each passage, closing. Ids are 1-based and
    /// unique across the deck.
    pub slides: Vec<Slide>,
}

impl Service {
    /// Whether every passage passed its audit.
    pub fn is_compliant(&self) -> bool {
        self.passages.iter().all(|p| p.report.is_compliant)
    }

    /// Mean compliance score of the passages.
    pub fn overall_score(&self) -> f64 {
        if self.passages.is_empty() {
            return 100.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.passages.len() as f64;
        self.passages.iter().map(|p| p.report.overall_score).sum::<f64>() / count
    }

    /// Filename stem for exports, derived from the title.
    pub fn file_stem(&self) -> String {
        title_file_stem(&self.title)
    }
}

/// Lay out a service: the first passage is the main reading and is named on
/// the title slide; the rest follow in the order given.
///
/// Fails with [`Error::EmptyVerseSequence`] when `passages` is empty or any
/// passage has no verses.
pub fn build_service(
    title: &str,
    passages: &[(ScriptureReference, Vec<Verse>)],
    rules: &LayoutRules,
) -> Result<Service> {
    let (main, _) = passages.first().ok_or(Error::EmptyVerseSequence)?;
    let presentations = passages
        .iter()
        .map(|(reference, verses)| build_presentation(reference, verses, rules))
        .collect::<Result<Vec<_>>>()?;

    let title = title.trim();
    let heading = title.to_uppercase();
    let title_content = if heading.is_empty() {
        main.raw.clone()
    } else {
        format!("{heading}\n{}", main.raw)
    };

    let passage_slides: usize = presentations.iter().map(|p| p.slides.len()).sum();
    let mut slides = Vec::with_capacity(passage_slides + 2);
    slides.push(framing_slide(
        SlideKind::Title,
        title_content,
        heading,
        display::TITLE_FONT_SIZE,
    ));
    slides.extend(presentations.iter().flat_map(|p| p.slides.iter().cloned()));
    slides.push(framing_slide(
        SlideKind::Closing,
        display::CLOSING_TEXT.to_string(),
        display::CLOSING_TEXT.to_string(),
        display::CLOSING_FONT_SIZE,
    ));
    for (slide, id) in slides.iter_mut().zip(1..) {
        slide.id = SlideId::new(id);
    }

    let service = Service {
        title: title.to_string(),
        passages: presentations,
        slides,
    };
    tracing::info!(
        "{}: {} slides from {} passage(s), CCC compliance {:.1}%",
        service.title,
        service.slides.len(),
        service.passages.len(),
        service.overall_score()
    );
    Ok(service)
}

const fn framing_slide(kind: SlideKind, content: String, label: String, font_size: u32) -> Slide {
    Slide {
        id: SlideId::new(0),
        kind,
        content,
        label,
        font_size,
        verse_count: 0,
        start_verse: 0,
        end_verse: 0,
    }
}

/// Keep letters, digits and a little punctuation; everything else becomes a
/// space and runs of spaces collapse.
fn title_file_stem(title: &str) -> String {
    let stem = title
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_' | ',' | '(' | ')') {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if stem.is_empty() {
        "Service".to_string()
    } else {
        stem
    }
}
