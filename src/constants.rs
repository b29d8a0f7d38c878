//! House-style constants.
//!
//! Centralizes the CCC layout defaults and the fixed rendering model used for
//! line estimation.

/// Defaults for the overridable layout rules.
pub mod rules {
    /// Target font size in points.
    pub const FONT_SIZE_TARGET: u32 = 46;

    /// Smallest font size allowed without an allowance.
    pub const FONT_SIZE_MIN: u32 = 39;

    /// Largest font size allowed without an allowance.
    pub const FONT_SIZE_MAX: u32 = 49;

    /// Minimum number of verses on a slide.
    pub const MIN_VERSES_PER_SLIDE: usize = 2;

    /// Maximum verse characters on one slide.
    pub const MAX_CONTENT_PER_SLIDE: usize = 800;

    /// A verse longer than this may stand alone on a slide.
    pub const VERY_LONG_VERSE: usize = 300;

    /// Content longer than this may drop below the minimum font size.
    pub const EXTREMELY_LONG_VERSE: usize = 500;

    /// Content shorter than this may rise above the maximum font size.
    pub const VERY_SHORT_VERSE: usize = 30;
}

/// Font sizing heuristic.
pub mod sizing {
    /// Points removed when a slide estimates more than `MANY_LINES` lines.
    pub const LARGE_STEP: u32 = 4;

    /// Points added or removed for a moderate adjustment.
    pub const SMALL_STEP: u32 = 2;

    /// Above this many estimated lines the large step applies.
    pub const TOO_MANY_LINES: u32 = 8;

    /// Above this many estimated lines the small step applies.
    pub const MANY_LINES: u32 = 6;

    /// Below this many estimated lines a short slide may grow.
    pub const FEW_LINES: u32 = 4;

    /// Short slides must also be under this many characters to grow.
    pub const SHORT_CONTENT: usize = 150;

    /// Lowest size reachable through the extremely-long allowance.
    pub const ALLOWANCE_FLOOR: u32 = 37;

    /// Highest size reachable through the very-short allowance.
    pub const ALLOWANCE_CEILING: u32 = 52;

    /// Points removed by the extremely-long allowance.
    pub const BELOW_MINIMUM_STEP: u32 = 2;

    /// Points added by the very-short allowance.
    pub const ABOVE_MAXIMUM_STEP: u32 = 3;
}

/// Rendering model used for line estimation.
pub mod display {
    /// Usable text box width in design units (1280x720 canvas, 50 unit margins).
    pub const TEXT_BOX_WIDTH: f64 = 1180.0;

    /// Average glyph width as a fraction of the font size.
    pub const CHAR_WIDTH_FACTOR: f64 = 0.6;

    /// Font family used for verse slides.
    pub const VERSE_FONT: &str = "Verdana-Bold";

    /// Title slide font size in points.
    pub const TITLE_FONT_SIZE: u32 = 66;

    /// Closing slide font size in points.
    pub const CLOSING_FONT_SIZE: u32 = 52;

    /// Text of the closing slide.
    pub const CLOSING_TEXT: &str = "THANK YOU FOR JOINING US";
}

/// Verse source constants.
pub mod source {
    /// ESV passage text endpoint.
    pub const ESV_PASSAGE_URL: &str = "https://api.esv.org/v3/passage/text/";

    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Default number of retries for transient failures.
    pub const DEFAULT_MAX_RETRIES: u32 = 2;

    /// Delay added per retry attempt, in milliseconds.
    pub const RETRY_BACKOFF_MS: u64 = 500;

    /// Longest passage a source will fetch (Psalm 119 has 176 verses).
    pub const MAX_PASSAGE_VERSES: u32 = 176;
}
