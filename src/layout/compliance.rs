//! CCC compliance audit of a finished slide sequence.
//!
//! Each rule yields one boolean. Slides bending a rule under a recorded
//! allowance do not count against it; the allowance is listed instead.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::assembler::Slide;
use super::chunker::VerseGroup;
use super::rules::LayoutRules;
use crate::types::{Allowance, Rule, SlideId};

/// Banner opening the recommendations of a fully compliant deck.
pub const COMPLIANT_BANNER: &str = "✅ Presentation fully complies with CCC verse slide building rules!";

/// One allowance granted to one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceRecord {
    /// The slide carrying the allowance.
    pub slide_id: SlideId,
    /// Which allowance.
    pub tag: Allowance,
}

/// Machine-checkable outcome of an audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceReport {
    /// True when every rule holds.
    pub is_compliant: bool,
    /// Outcome per rule.
    pub rules_satisfied: BTreeMap<Rule, bool>,
    /// Allowances in slide order.
    pub edge_case_allowances: Vec<AllowanceRecord>,
    /// Summary banner followed by one line per violated rule.
    pub recommendations: Vec<String>,
    /// Share of rules satisfied, 0 to 100.
    pub overall_score: f64,
    /// Number of slides audited.
    pub total_slides: usize,
    /// Slide count per font size.
    pub font_size_distribution: BTreeMap<u32, usize>,
    /// Number of entries in `edge_case_allowances`.
    pub total_allowances: usize,
}

impl ComplianceReport {
    /// Whether `rule` held.
    pub fn satisfied(&self, rule: Rule) -> bool {
        self.rules_satisfied.get(&rule).copied().unwrap_or(false)
    }
}

/// Audits slides against the CCC rules.
#[derive(Debug, Clone, Copy)]
pub struct ComplianceAuditor<'a> {
    rules: &'a LayoutRules,
}

impl<'a> ComplianceAuditor<'a> {
    /// Create an auditor for the given rules.
    pub const fn new(rules: &'a LayoutRules) -> Self {
        Self { rules }
    }

    /// Inspect `slides` and the `groups` they were built from (paired by position).
    pub fn audit(&self, slides: &[Slide], groups: &[VerseGroup]) -> ComplianceReport {
        let rules = self.rules;
        let no_tags = BTreeSet::new();
        let tags_of = |idx: usize| groups.get(idx).map_or(&no_tags, |g| &g.edge_case_allowances);
        let multi_slide = slides.len() > 1;

        let mut too_few = Vec::new();
        let mut off_range = Vec::new();
        let mut orphans = Vec::new();
        let mut three_plus_one = Vec::new();
        let mut edge_case_allowances = Vec::new();
        let mut font_size_distribution = BTreeMap::new();

        for (idx, slide) in slides.iter().enumerate() {
            let tags = tags_of(idx);
            let single_ok = tags.contains(&Allowance::SingleVerse);

            *font_size_distribution.entry(slide.font_size).or_insert(0) += 1;

            if multi_slide && slide.verse_count < rules.min_verses_per_slide && !single_ok {
                too_few.push(slide.id);
            }

            let below = slide.font_size < rules.font_size_min
                && !tags.contains(&Allowance::FontBelowMinimum);
            let above = slide.font_size > rules.font_size_max
                && !tags.contains(&Allowance::FontAboveMaximum);
            if below || above {
                off_range.push(slide.id);
            }

            if idx > 0 && slide.verse_count == 1 && !single_ok {
                orphans.push(slide.id);
            }

            if idx > 0 && slide.verse_count == 1 && slides[idx - 1].verse_count == 3 && !single_ok {
                three_plus_one.push((slides[idx - 1].id, slide.id));
            }

            edge_case_allowances.extend(tags.iter().map(|&tag| AllowanceRecord {
                slide_id: slide.id,
                tag,
            }));
        }

        let mut violations = Vec::new();
        if !too_few.is_empty() {
            violations.push((
                Rule::MinimumVersesPerSlide,
                format!(
                    "slide(s) {} hold fewer than {} verses",
                    join_ids(&too_few),
                    rules.min_verses_per_slide
                ),
            ));
        }
        if !off_range.is_empty() {
            violations.push((
                Rule::FontSizeRange,
                format!(
                    "slide(s) {} use a font size outside {}-{}pt",
                    join_ids(&off_range),
                    rules.font_size_min,
                    rules.font_size_max
                ),
            ));
        }
        if !three_plus_one.is_empty() {
            let pairs = three_plus_one
                .iter()
                .map(|(a, b)| format!("{a}-{b}"))
                .collect::<Vec<_>>()
                .join(", ");
            violations.push((
                Rule::NoThreePlusOneSplits,
                format!("3+1 split detected at slides {pairs}"),
            ));
        }
        if !orphans.is_empty() {
            violations.push((
                Rule::OrphanPrevention,
                format!("slide(s) {} hold an orphaned single verse", join_ids(&orphans)),
            ));
        }

        let rules_satisfied: BTreeMap<Rule, bool> = Rule::all()
            .iter()
            .map(|&rule| (rule, !violations.iter().any(|(r, _)| *r == rule)))
            .collect();
        let satisfied = rules_satisfied.values().filter(|&&ok| ok).count();
        let is_compliant = satisfied == rules_satisfied.len();

        #[allow(clippy::cast_precision_loss)]
        let overall_score = satisfied as f64 / rules_satisfied.len() as f64 * 100.0;

        let mut recommendations = Vec::with_capacity(violations.len() + 1);
        if is_compliant {
            recommendations.push(COMPLIANT_BANNER.to_string());
        } else {
            recommendations.push(format!("⚠️ Presentation compliance: {overall_score:.1}%"));
        }
        recommendations.extend(violations.into_iter().map(|(rule, detail)| format!("{rule}: {detail}")));

        let total_allowances = edge_case_allowances.len();
        ComplianceReport {
            is_compliant,
            rules_satisfied,
            edge_case_allowances,
            recommendations,
            overall_score,
            total_slides: slides.len(),
            font_size_distribution,
            total_allowances,
        }
    }
}

fn join_ids(ids: &[SlideId]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
