//! Overridable CCC layout rules.

use serde::{Deserialize, Serialize};

use crate::constants::rules as defaults;
use crate::error::{Error, Result};

/// Layout constraints consumed by the chunker, sizer and auditor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutRules {
    /// Font size every slide starts from.
    pub font_size_target: u32,
    /// Smallest font size allowed without an allowance.
    pub font_size_min: u32,
    /// Largest font size allowed without an allowance.
    pub font_size_max: u32,
    /// Minimum verses on a slide.
    pub min_verses_per_slide: usize,
    /// Maximum verse characters on a slide.
    pub max_content_per_slide: usize,
    /// A lone verse longer than this earns the `single_verse` allowance.
    pub very_long_verse_threshold: usize,
    /// Content longer than this may go below the minimum font size.
    pub extremely_long_verse_threshold: usize,
    /// Content shorter than this may go above the maximum font size.
    pub very_short_verse_threshold: usize,
}

impl Default for LayoutRules {
    fn default() -> Self {
        Self {
            font_size_target: defaults::FONT_SIZE_TARGET,
            font_size_min: defaults::FONT_SIZE_MIN,
            font_size_max: defaults::FONT_SIZE_MAX,
            min_verses_per_slide: defaults::MIN_VERSES_PER_SLIDE,
            max_content_per_slide: defaults::MAX_CONTENT_PER_SLIDE,
            very_long_verse_threshold: defaults::VERY_LONG_VERSE,
            extremely_long_verse_threshold: defaults::EXTREMELY_LONG_VERSE,
            very_short_verse_threshold: defaults::VERY_SHORT_VERSE,
        }
    }
}

impl LayoutRules {
    /// Reject rule combinations the sizing heuristic cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.font_size_min == 0 {
            return Err(Error::config(
                "fontSizeMin must be positive",
                "Set CCC_FONT_SIZE_MIN to a point size such as 39",
            ));
        }
        if self.font_size_min > self.font_size_max {
            return Err(Error::config(
                format!(
                    "fontSizeMin ({}) is larger than fontSizeMax ({})",
                    self.font_size_min, self.font_size_max
                ),
                "Check CCC_FONT_SIZE_MIN and CCC_FONT_SIZE_MAX",
            ));
        }
        if !(self.font_size_min..=self.font_size_max).contains(&self.font_size_target) {
            return Err(Error::config(
                format!(
                    "fontSizeTarget ({}) lies outside {}..={}",
                    self.font_size_target, self.font_size_min, self.font_size_max
                ),
                "Check CCC_FONT_SIZE_TARGET",
            ));
        }
        if self.min_verses_per_slide == 0 {
            return Err(Error::config(
                "minVersesPerSlide must be at least 1",
                "Check CCC_MIN_VERSES_PER_SLIDE",
            ));
        }
        if self.max_content_per_slide == 0 {
            return Err(Error::config(
                "maxContentPerSlide must be positive",
                "Check CCC_MAX_CONTENT_PER_SLIDE",
            ));
        }
        Ok(())
    }

    /// Whether `size` lies inside the house font range.
    pub const fn font_in_range(&self, size: u32) -> bool {
        size >= self.font_size_min && size <= self.font_size_max
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn defaults_are_house_style() {
        let rules = LayoutRules::default();
        assert_eq!(rules.font_size_target, 46);
        assert_eq!((rules.font_size_min, rules.font_size_max), (39, 49));
        assert_eq!(rules.min_verses_per_slide, 2);
        assert_eq!(rules.max_content_per_slide, 800);
        assert_eq!(rules.very_long_verse_threshold, 300);
        assert_eq!(rules.extremely_long_verse_threshold, 500);
        assert_eq!(rules.very_short_verse_threshold, 30);
        rules.validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let rules: LayoutRules =
            serde_json::from_str(r#"{"fontSizeTarget": 44, "maxContentPerSlide": 600}"#).unwrap();
        assert_eq!(rules.font_size_target, 44);
        assert_eq!(rules.max_content_per_slide, 600);
        assert_eq!(rules.font_size_min, 39);
    }

    #[test]
    fn target_outside_range_is_rejected() {
        let rules = LayoutRules { font_size_target: 60, ..LayoutRules::default() };
        assert!(matches!(rules.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let rules = LayoutRules {
            font_size_min: 50,
            font_size_max: 40,
            ..LayoutRules::default()
        };
        assert!(matches!(rules.validate(), Err(Error::Config { .. })));
    }
}
