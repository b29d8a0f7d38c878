//! Per-slide font sizing.
//!
//! Starts every slide at the target size and steps it down (or up) by the
//! estimated rendered line count, under a fixed glyph-width model.

use std::collections::BTreeSet;

use super::rules::LayoutRules;
use crate::constants::{display, sizing};
use crate::types::Allowance;

/// Font decision for one verse group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSizing {
    /// Chosen font size in points.
    pub font_size: u32,
    /// Signed delta from the target size.
    pub font_adjustment: i32,
    /// Estimated rendered lines at the chosen size.
    pub estimated_lines: u32,
    /// Size-related allowances (`font_below_minimum` / `font_above_maximum`).
    pub allowances: BTreeSet<Allowance>,
}

/// Computes font sizes under a set of layout rules.
#[derive(Debug, Clone, Copy)]
pub struct FontSizer<'a> {
    rules: &'a LayoutRules,
}

impl<'a> FontSizer<'a> {
    /// Create a sizer for the given rules.
    pub const fn new(rules: &'a LayoutRules) -> Self {
        Self { rules }
    }

    /// Choose a font size for a slide's text.
    pub fn size(&self, text: &str) -> FontSizing {
        let rules = self.rules;
        let target = rules.font_size_target;
        let char_count = text.chars().count();
        let lines = estimate_lines(text, target);

        let mut font_size = if lines > sizing::TOO_MANY_LINES {
            target.saturating_sub(sizing::LARGE_STEP).max(rules.font_size_min)
        } else if lines > sizing::MANY_LINES {
            target.saturating_sub(sizing::SMALL_STEP).max(rules.font_size_min)
        } else if lines < sizing::FEW_LINES && char_count < sizing::SHORT_CONTENT {
            (target + sizing::SMALL_STEP).min(rules.font_size_max)
        } else {
            target
        };

        if char_count > rules.extremely_long_verse_threshold && font_size == rules.font_size_min {
            font_size = font_size
                .saturating_sub(sizing::BELOW_MINIMUM_STEP)
                .max(sizing::ALLOWANCE_FLOOR)
                .min(font_size);
            tracing::debug!("Extremely long content ({char_count} chars) - allowing {font_size}pt");
        }

        if char_count < rules.very_short_verse_threshold && font_size == rules.font_size_max {
            font_size = (font_size + sizing::ABOVE_MAXIMUM_STEP)
                .min(sizing::ALLOWANCE_CEILING)
                .max(font_size);
            tracing::debug!("Very short content ({char_count} chars) - allowing {font_size}pt");
        }

        let mut allowances = BTreeSet::new();
        if font_size < rules.font_size_min {
            allowances.insert(Allowance::FontBelowMinimum);
        }
        if font_size > rules.font_size_max {
            allowances.insert(Allowance::FontAboveMaximum);
        }

        #[allow(clippy::cast_possible_wrap)]
        let font_adjustment = font_size as i32 - target as i32;

        FontSizing {
            font_size,
            font_adjustment,
            estimated_lines: estimate_lines(text, font_size),
            allowances,
        }
    }
}

/// Estimate how many lines `text` wraps to at `font_size`.
///
/// Uses an average glyph width of `0.6 × size` across a 1180-unit text box and
/// wraps whole words of the text's average length. Always at least 1.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn estimate_lines(text: &str, font_size: u32) -> u32 {
    let word_count = text.split_whitespace().count();
    if word_count == 0 || font_size == 0 {
        return 1;
    }

    let words = word_count as f64;
    let avg_char_width = f64::from(font_size) * display::CHAR_WIDTH_FACTOR;
    let chars_per_line = (display::TEXT_BOX_WIDTH / avg_char_width).floor();
    let avg_word_length = text.chars().count() as f64 / words;
    let words_per_line = (chars_per_line / (avg_word_length + 1.0)).floor().max(1.0);

    ((words / words_per_line).ceil() as u32).max(1)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn words(n: usize) -> String {
        vec!["abcde"; n].join(" ")
    }

    #[test]
    fn line_estimate_uses_glyph_model() {
        // 42 chars per line at 46pt, ~6 five-letter words per line.
        assert_eq!(estimate_lines(&words(6), 46), 1);
        assert_eq!(estimate_lines(&words(7), 46), 2);
        assert_eq!(estimate_lines(&words(40), 46), 7);
        assert_eq!(estimate_lines("", 46), 1);
    }

    #[test]
    fn short_content_grows_by_two() {
        let rules = LayoutRules::default();
        let sizing = FontSizer::new(&rules).size("35 Jesus wept.");
        assert_eq!(sizing.font_size, 48);
        assert_eq!(sizing.font_adjustment, 2);
        assert!(sizing.allowances.is_empty());
    }

    #[test]
    fn moderate_content_keeps_target() {
        let rules = LayoutRules::default();
        let sizing = FontSizer::new(&rules).size(&words(30));
        assert_eq!(sizing.font_size, 46);
        assert_eq!(sizing.font_adjustment, 0);
        assert_eq!(sizing.estimated_lines, 5);
    }

    #[test]
    fn many_lines_shrink_by_two() {
        let rules = LayoutRules::default();
        let sizing = FontSizer::new(&rules).size(&words(40));
        assert_eq!(sizing.font_size, 44);
        assert_eq!(sizing.font_adjustment, -2);
        assert_eq!(sizing.estimated_lines, 7);
    }

    #[test]
    fn too_many_lines_shrink_by_four() {
        let rules = LayoutRules::default();
        let sizing = FontSizer::new(&rules).size(&words(60));
        assert_eq!(sizing.font_size, 42);
        assert_eq!(sizing.font_adjustment, -4);
        assert!(sizing.allowances.is_empty());
    }

    #[test]
    fn extremely_long_content_may_drop_below_minimum() {
        let rules = LayoutRules { font_size_target: 43, ..LayoutRules::default() };
        let sizing = FontSizer::new(&rules).size(&words(100));
        assert_eq!(sizing.font_size, 37);
        assert_eq!(sizing.font_adjustment, -6);
        assert_eq!(sizing.estimated_lines, 15);
        assert!(sizing.allowances.contains(&Allowance::FontBelowMinimum));
    }

    #[test]
    fn very_short_content_may_rise_above_maximum() {
        let rules = LayoutRules { font_size_target: 48, ..LayoutRules::default() };
        let sizing = FontSizer::new(&rules).size("35 Jesus wept.");
        assert_eq!(sizing.font_size, 52);
        assert_eq!(sizing.font_adjustment, 4);
        assert!(sizing.allowances.contains(&Allowance::FontAboveMaximum));
    }

    #[test]
    fn default_target_never_reaches_the_ceiling() {
        let rules = LayoutRules::default();
        let sizing = FontSizer::new(&rules).size("1 Amen.");
        assert_eq!(sizing.font_size, 48);
        assert!(rules.font_in_range(sizing.font_size));
    }
}
