//! Structured presentation export.
//!
//! A JSON document mirroring the slide fields. Each slide carries a stable
//! UUID and its text as base64-encoded RTF, which is how presentation tools
//! store styled slide text.

use serde::Serialize;
use uuid::Uuid;

use super::rtf::{slide_rtf, RtfOptions};
use crate::error::Result;
use crate::layout::Slide;
use crate::types::{SlideId, SlideKind};

/// Identifies the document layout to consumers.
pub const FORMAT_NAME: &str = "ccc-slides";

/// Bumped whenever the document layout changes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProDocument<'a> {
    format: &'static str,
    version: u32,
    reference: &'a str,
    slides: Vec<ProSlide<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProSlide<'a> {
    uuid: String,
    id: SlideId,
    kind: SlideKind,
    label: &'a str,
    content: &'a str,
    font_family: &'static str,
    font_size: u32,
    verse_count: usize,
    start_verse: u32,
    end_verse: u32,
    rtf_data: String,
}

/// Stable UUID for a slide, derived from the reference and slide id.
pub fn slide_uuid(reference: &str, id: SlideId) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_OID, format!("{reference}#{id}").as_bytes())
}

/// Serialize `slides` as a pretty-printed JSON document.
pub fn render(slides: &[Slide], reference: &str) -> Result<Vec<u8>> {
    let font_family = crate::constants::display::VERSE_FONT;
    let document = ProDocument {
        format: FORMAT_NAME,
        version: FORMAT_VERSION,
        reference,
        slides: slides
            .iter()
            .map(|slide| {
                let options = RtfOptions {
                    font_size: slide.font_size,
                    ..RtfOptions::default()
                };
                ProSlide {
                    uuid: slide_uuid(reference, slide.id).to_string(),
                    id: slide.id,
                    kind: slide.kind,
                    label: &slide.label,
                    content: &slide.content,
                    font_family,
                    font_size: slide.font_size,
                    verse_count: slide.verse_count,
                    start_verse: slide.start_verse,
                    end_verse: slide.end_verse,
                    rtf_data: base64::encode(slide_rtf(&slide.content, &options)),
                }
            })
            .collect(),
    };

    Ok(serde_json::to_vec_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use serde_json::Value;

    fn slides() -> Vec<Slide> {
        (1..=2)
            .map(|id| Slide {
                id: SlideId::new(id),
                kind: SlideKind::Verse,
                content: format!("{id} Verse text"),
                label: format!("Romans 8:1-2 ({id})"),
                font_size: 46,
                verse_count: 1,
                start_verse: id,
                end_verse: id,
            })
            .collect()
    }

    #[test]
    fn document_mirrors_slides() {
        let bytes = render(&slides(), "Romans 8:1-2").unwrap();
        let doc: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(doc["format"], FORMAT_NAME);
        assert_eq!(doc["reference"], "Romans 8:1-2");
        assert_eq!(doc["slides"].as_array().unwrap().len(), 2);
        assert_eq!(doc["slides"][1]["label"], "Romans 8:1-2 (2)");
        assert_eq!(doc["slides"][1]["fontSize"], 46);
        assert_eq!(doc["slides"][0]["fontFamily"], "Verdana-Bold");
        assert_eq!(doc["slides"][0]["kind"], "verse");
    }

    #[test]
    fn rtf_payload_round_trips_through_base64() {
        let bytes = render(&slides(), "Romans 8:1-2").unwrap();
        let doc: Value = serde_json::from_slice(&bytes).unwrap();
        let encoded = doc["slides"][0]["rtfData"].as_str().unwrap();
        let rtf = String::from_utf8(base64::decode(encoded).unwrap()).unwrap();
        assert!(rtf.contains(r"\fs92"));
        assert!(rtf.contains("1 Verse text"));
    }

    #[test]
    fn uuids_are_stable_and_distinct() {
        let a = slide_uuid("Romans 8:1-2", SlideId::new(1));
        assert_eq!(a, slide_uuid("Romans 8:1-2", SlideId::new(1)));
        assert_ne!(a, slide_uuid("Romans 8:1-2", SlideId::new(2)));
        assert_ne!(a, slide_uuid("Romans 8:1-3", SlideId::new(1)));
    }

    #[test]
    fn export_is_deterministic() {
        assert_eq!(
            render(&slides(), "Romans 8:1-2").unwrap(),
            render(&slides(), "Romans 8:1-2").unwrap()
        );
    }
}
