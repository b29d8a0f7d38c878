//! Greedy verse-to-slide partitioning under the CCC rules.
//!
//! Walks the passage left to right and picks each group size from a fixed
//! table keyed on how many verses remain, so the tail of a passage is never
//! split further than necessary. Emitted groups are never revisited.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::rules::LayoutRules;
use super::sizer::FontSizer;
use crate::bible::Verse;
use crate::error::{Error, Result};
use crate::types::Allowance;

/// A run of consecutive verses destined for one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseGroup {
    /// The verses, in passage order. Never empty.
    pub verses: Vec<Verse>,
    /// Number of the first verse.
    pub start_verse: u32,
    /// Number of the last verse.
    pub end_verse: u32,
    /// `"<number> <text>"` per verse, separated by blank lines.
    pub text: String,
    /// Total characters of the verse texts.
    pub char_count: usize,
    /// Chosen font size in points.
    pub font_size: u32,
    /// Signed delta from the target font size.
    pub font_adjustment: i32,
    /// Estimated rendered lines at `font_size`.
    pub estimated_lines: u32,
    /// Edge-case allowances granted to this group.
    pub edge_case_allowances: BTreeSet<Allowance>,
}

impl VerseGroup {
    /// Number of verses in the group.
    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    /// Whether the group carries `allowance`.
    pub fn has_allowance(&self, allowance: Allowance) -> bool {
        self.edge_case_allowances.contains(&allowance)
    }
}

/// Partitions verses into slide-sized groups.
#[derive(Debug, Clone, Copy)]
pub struct SlideChunker<'a> {
    rules: &'a LayoutRules,
}

impl<'a> SlideChunker<'a> {
    /// Create a chunker for the given rules.
    pub const fn new(rules: &'a LayoutRules) -> Self {
        Self { rules }
    }

    /// Split `verses` into groups, sized and tagged, covering every verse once.
    pub fn chunk(&self, verses: &[Verse]) -> Result<Vec<VerseGroup>> {
        if verses.is_empty() {
            return Err(Error::EmptyVerseSequence);
        }
        verses.iter().try_for_each(Verse::validate)?;

        tracing::debug!("Applying CCC chunking to {} verses", verses.len());

        let sizer = FontSizer::new(self.rules);
        let mut groups = Vec::new();
        let mut pos = 0;

        while pos < verses.len() {
            let rest = &verses[pos..];
            let size = self.correct_three_plus_one(rest, self.initial_size(rest));
            let group = build_group(&rest[..size], self.rules, &sizer);

            tracing::debug!(
                "Group {}: {} verses ({}-{}), {}pt, {} chars",
                groups.len() + 1,
                size,
                group.start_verse,
                group.end_verse,
                group.font_size,
                group.char_count
            );

            groups.push(group);
            pos += size;
        }

        Ok(groups)
    }

    /// Size picked by the greedy table for the verses still to place.
    fn initial_size(&self, rest: &[Verse]) -> usize {
        match rest.len() {
            1 => {
                let verse = &rest[0];
                if verse.char_count() <= self.rules.very_long_verse_threshold {
                    tracing::warn!(
                        "Single short verse {} remaining ({} chars)",
                        verse.number,
                        verse.char_count()
                    );
                }
                1
            }
            2 | 3 => rest.len(),
            4 => {
                if self.fits(&rest[..4]) {
                    4
                } else {
                    tracing::debug!("4 verses exceed {} chars - trying 3", self.rules.max_content_per_slide);
                    3
                }
            }
            5 | 6 => 3,
            7 | 8 => 4,
            _ => {
                if self.fits(&rest[..4]) {
                    4
                } else if self.fits(&rest[..3]) {
                    tracing::debug!("4 verses exceed {} chars - using 3", self.rules.max_content_per_slide);
                    3
                } else {
                    tracing::debug!("3 verses exceed {} chars - using 2", self.rules.max_content_per_slide);
                    2
                }
            }
        }
    }

    /// Never leave a bare verse behind a group of three.
    ///
    /// A long final verse may stand alone; otherwise the group widens to four
    /// when that fits, or shrinks to two so the tail regroups.
    fn correct_three_plus_one(&self, rest: &[Verse], size: usize) -> usize {
        if size != 3 || rest.len() != 4 {
            return size;
        }

        let last = &rest[3];
        if last.char_count() > self.rules.very_long_verse_threshold {
            tracing::debug!(
                "Allowing 3+1 split - last verse is very long ({} chars)",
                last.char_count()
            );
            3
        } else if self.fits(&rest[..4]) {
            tracing::debug!("Taking 4 verses to avoid 3+1 split");
            4
        } else {
            tracing::debug!("Preventing 3+1 split - redistributing as 2+2");
            2
        }
    }

    fn fits(&self, verses: &[Verse]) -> bool {
        content_chars(verses) <= self.rules.max_content_per_slide
    }
}

fn content_chars(verses: &[Verse]) -> usize {
    verses.iter().map(Verse::char_count).sum()
}

fn build_group(verses: &[Verse], rules: &LayoutRules, sizer: &FontSizer<'_>) -> VerseGroup {
    let text = verses
        .iter()
        .map(Verse::formatted)
        .collect::<Vec<_>>()
        .join("\n\n");
    let char_count = content_chars(verses);
    let sizing = sizer.size(&text);

    let mut edge_case_allowances = sizing.allowances;
    if let [only] = verses {
        if only.char_count() > rules.very_long_verse_threshold {
            edge_case_allowances.insert(Allowance::SingleVerse);
        }
    }
    if char_count > rules.extremely_long_verse_threshold {
        edge_case_allowances.insert(Allowance::ExtremelyLongContent);
    }

    VerseGroup {
        verses: verses.to_vec(),
        start_verse: verses.first().map_or(0, |v| v.number),
        end_verse: verses.last().map_or(0, |v| v.number),
        text,
        char_count,
        font_size: sizing.font_size,
        font_adjustment: sizing.font_adjustment,
        estimated_lines: sizing.estimated_lines,
        edge_case_allowances,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn passage(lengths: &[usize]) -> Vec<Verse> {
        lengths
            .iter()
            .zip(1..)
            .map(|(&len, number)| Verse::new(number, &"a".repeat(len)))
            .collect()
    }

    fn uniform(count: usize, len: usize) -> Vec<Verse> {
        passage(&vec![len; count])
    }

    fn sizes(groups: &[VerseGroup]) -> Vec<usize> {
        groups.iter().map(VerseGroup::verse_count).collect()
    }

    fn chunk(verses: &[Verse]) -> Vec<VerseGroup> {
        let rules = LayoutRules::default();
        SlideChunker::new(&rules).chunk(verses).unwrap()
    }

    #[test]
    fn empty_input_is_an_error() {
        let rules = LayoutRules::default();
        let result = SlideChunker::new(&rules).chunk(&[]);
        assert!(matches!(result, Err(Error::EmptyVerseSequence)));
    }

    #[test]
    fn blank_verse_is_rejected() {
        let rules = LayoutRules::default();
        let verses = vec![Verse::new(1, "In the beginning"), Verse::new(2, "   ")];
        let result = SlideChunker::new(&rules).chunk(&verses);
        assert!(matches!(result, Err(Error::InvalidVerse { number: 2, .. })));
    }

    #[test]
    fn greedy_table_for_short_passages() {
        let expected: [(usize, &[usize]); 9] = [
            (1, &[1]),
            (2, &[2]),
            (3, &[3]),
            (4, &[4]),
            (5, &[3, 2]),
            (6, &[3, 3]),
            (7, &[4, 3]),
            (8, &[4, 4]),
            (9, &[4, 3, 2]),
        ];
        for (count, want) in expected {
            assert_eq!(sizes(&chunk(&uniform(count, 80))), want, "{count} verses");
        }
    }

    #[test]
    fn long_passages_prefer_four() {
        assert_eq!(sizes(&chunk(&uniform(12, 80))), vec![4, 4, 4]);
        assert_eq!(sizes(&chunk(&uniform(13, 80))), vec![4, 4, 3, 2]);
    }

    #[test]
    fn heavy_verses_fall_back_to_three_then_two() {
        // 4 x 210 = 840 > 800, 3 x 210 = 630 fits.
        assert_eq!(sizes(&chunk(&uniform(9, 210)))[0], 3);
        // 3 x 300 = 900 > 800.
        assert_eq!(sizes(&chunk(&uniform(9, 300)))[0], 2);
    }

    #[test]
    fn heavy_four_verse_tail_splits_two_two() {
        // 4 x 250 = 1000 > 800 and the last verse is not long enough to stand alone.
        let groups = chunk(&uniform(4, 250));
        assert_eq!(sizes(&groups), vec![2, 2]);
    }

    #[test]
    fn long_final_verse_may_stand_alone_after_three() {
        let groups = chunk(&passage(&[120, 120, 120, 520]));
        assert_eq!(sizes(&groups), vec![3, 1]);
        let tail = &groups[1];
        assert!(tail.has_allowance(Allowance::SingleVerse));
        assert!(tail.has_allowance(Allowance::ExtremelyLongContent));
    }

    #[test]
    fn short_single_verse_passage_is_untagged() {
        let groups = chunk(&passage(&[11]));
        assert_eq!(groups.len(), 1);
        assert!(!groups[0].has_allowance(Allowance::SingleVerse));
    }

    #[test]
    fn long_single_verse_passage_is_tagged() {
        let groups = chunk(&passage(&[320]));
        assert!(groups[0].has_allowance(Allowance::SingleVerse));
        assert!(!groups[0].has_allowance(Allowance::ExtremelyLongContent));
    }

    #[test]
    fn group_text_joins_verses_with_blank_lines() {
        let verses = vec![Verse::new(35, "Jesus wept."), Verse::new(36, "So the Jews said.")];
        let groups = chunk(&verses);
        assert_eq!(groups[0].text, "35 Jesus wept.\n\n36 So the Jews said.");
        assert_eq!(groups[0].start_verse, 35);
        assert_eq!(groups[0].end_verse, 36);
        assert_eq!(groups[0].char_count, 28);
    }
}
