//! Turns verse groups into numbered slides.

use serde::{Deserialize, Serialize};

use super::chunker::VerseGroup;
use crate::bible::ScriptureReference;
use crate::types::{SlideId, SlideKind};

/// A finished slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// 1-based position within the presentation.
    pub id: SlideId,
    /// Title, verse or closing slide.
    #[serde(default)]
    pub kind: SlideKind,
    /// Verses separated by blank lines.
    pub content: String,
    /// `"<reference> (<index>)"`.
    pub label: String,
    /// Font size in points.
    pub font_size: u32,
    /// Number of verses on the slide.
    pub verse_count: usize,
    /// Number of the first verse.
    pub start_verse: u32,
    /// Number of the last verse.
    pub end_verse: u32,
}

/// Map each group to one slide, preserving order.
pub fn assemble(groups: &[VerseGroup], reference: &ScriptureReference) -> Vec<Slide> {
    groups
        .iter()
        .zip(1..)
        .map(|(group, index)| Slide {
            id: SlideId::new(index),
            kind: SlideKind::Verse,
            content: group.text.clone(),
            label: format!("{} ({index})", reference.raw),
            font_size: group.font_size,
            verse_count: group.verse_count(),
            start_verse: group.start_verse,
            end_verse: group.end_verse,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::bible::{parse_reference, Verse};
    use crate::layout::chunker::SlideChunker;
    use crate::layout::rules::LayoutRules;

    #[test]
    fn slides_mirror_groups_in_order() {
        let reference = parse_reference("Romans 5:1-5").unwrap();
        let verses: Vec<Verse> = (1..=5).map(|n| Verse::new(n, "Therefore we have peace.")).collect();
        let rules = LayoutRules::default();
        let groups = SlideChunker::new(&rules).chunk(&verses).unwrap();

        let slides = assemble(&groups, &reference);

        assert_eq!(slides.len(), groups.len());
        assert_eq!(slides[0].id, SlideId::new(1));
        assert_eq!(slides[0].label, "Romans 5:1-5 (1)");
        assert_eq!(slides[1].label, "Romans 5:1-5 (2)");
        assert_eq!(slides[0].verse_count, 3);
        assert_eq!(slides[1].verse_count, 2);
        assert_eq!((slides[1].start_verse, slides[1].end_verse), (4, 5));
        for (slide, group) in slides.iter().zip(&groups) {
            assert_eq!(slide.content, group.text);
            assert_eq!(slide.font_size, group.font_size);
        }
    }

    #[test]
    fn no_groups_no_slides() {
        let reference = parse_reference("John 3:16").unwrap();
        assert!(assemble(&[], &reference).is_empty());
    }
}
