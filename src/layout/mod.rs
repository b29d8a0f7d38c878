//! Verse-to-slide layout engine.
//!
//! A pure pipeline: verses are chunked into groups, each group is sized,
//! groups become slides, and the slides are audited. Nothing here performs
//! I/O or keeps state between calls.

pub mod assembler;
pub mod chunker;
pub mod compliance;
pub mod rules;
pub mod service;
pub mod sizer;

use serde::{Deserialize, Serialize};

pub use assembler::{assemble, Slide};
pub use chunker::{SlideChunker, VerseGroup};
pub use compliance::{AllowanceRecord, ComplianceAuditor, ComplianceReport};
pub use rules::LayoutRules;
pub use service::{build_service, Service};
pub use sizer::{estimate_lines, FontSizer, FontSizing};

use crate::bible::{ScriptureReference, Verse};
use crate::error::Result;

/// One reference laid out as slides, with its audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// The reference the verses were fetched for.
    pub reference: ScriptureReference,
    /// Verse groups, one per slide.
    pub groups: Vec<VerseGroup>,
    /// Slides in presentation order.
    pub slides: Vec<Slide>,
    /// Compliance audit of `slides`.
    pub report: ComplianceReport,
}

/// Lay out `verses` for `reference` under `rules`.
pub fn build_presentation(
    reference: &ScriptureReference,
    verses: &[Verse],
    rules: &LayoutRules,
) -> Result<Presentation> {
    let groups = SlideChunker::new(rules).chunk(verses)?;
    let slides = assemble(&groups, reference);
    let report = ComplianceAuditor::new(rules).audit(&slides, &groups);

    tracing::info!(
        "{}: {} slides, CCC compliance {:.1}%",
        reference.raw,
        slides.len(),
        report.overall_score
    );

    Ok(Presentation {
        reference: reference.clone(),
        groups,
        slides,
        report,
    })
}
