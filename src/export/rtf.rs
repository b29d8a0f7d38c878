//! RTF generation for slide exports.
//!
//! Two shapes: a printable document with one page per slide, and the
//! single-slide RTF payload presentation tools store per text element.

use std::fmt::Write;

use crate::constants::display;
use crate::layout::Slide;

/// RTF generation options for a single slide payload
#[derive(Debug, Clone)]
pub struct RtfOptions {
    /// Font name (default: Verdana-Bold)
    pub font_name: String,
    /// Font size in points
    pub font_size: u32,
    /// Text color RGB (default: white)
    pub color: (u8, u8, u8),
}

impl Default for RtfOptions {
    fn default() -> Self {
        Self {
            font_name: display::VERSE_FONT.to_string(),
            font_size: crate::constants::rules::FONT_SIZE_TARGET,
            color: (255, 255, 255), // White
        }
    }
}

/// Escape text for embedding in an RTF body.
///
/// Backslash and braces are escaped, `\n` becomes `\par`, `\r` is dropped,
/// Windows-1252 punctuation uses `\'xx` and anything else non-ASCII uses
/// `\uN?` with signed UTF-16 code units.
pub fn escape_rtf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str(r"\par "),
            '\r' => {}
            '\\' => out.push_str(r"\\"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '\u{2019}' => out.push_str(r"\'92"), // Right single quote
            '\u{2018}' => out.push_str(r"\'91"), // Left single quote
            '\u{201C}' => out.push_str(r"\'93"), // Left double quote
            '\u{201D}' => out.push_str(r"\'94"), // Right double quote
            '\u{2013}' => out.push_str(r"\'96"), // En dash
            '\u{2014}' => out.push_str(r"\'97"), // Em dash
            '\u{2026}' => out.push_str(r"\'85"), // Ellipsis
            _ if c.is_ascii() => out.push(c),
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    #[allow(clippy::cast_possible_wrap)]
                    let signed = *unit as i16;
                    let _ = write!(out, r"\u{signed}?");
                }
            }
        }
    }
    out
}

/// Printable document: reference title, then one page per slide.
pub fn document_rtf(slides: &[Slide], reference: &str) -> String {
    let mut rtf = String::new();
    rtf.push_str(r"{\rtf1\ansi\ansicpg1252\deff0 {\fonttbl {\f0\fswiss Verdana;}}");
    rtf.push('\n');
    let _ = writeln!(rtf, r"\f0\fs24 \qc\b\fs64 {}\b0\par", escape_rtf(reference));

    for slide in slides {
        let half_points = slide.font_size * 2;
        let _ = writeln!(rtf, r"\page \pard\qc\fs{half_points} {}\par", escape_rtf(&slide.content));
    }

    rtf.push('}');
    rtf
}

/// Single-slide RTF in the styling presentation tools expect.
pub fn slide_rtf(text: &str, options: &RtfOptions) -> String {
    let (r, g, b) = options.color;
    let font_size_halfpoints = options.font_size * 2;
    let font_name = &options.font_name;

    let mut rtf = String::new();
    rtf.push_str(r"{\rtf1\ansi\ansicpg1252\cocoartf2821");
    rtf.push('\n');
    let _ = writeln!(rtf, r"{{\fonttbl\f0\fswiss\fcharset0 {font_name};}}");
    let _ = writeln!(rtf, r"{{\colortbl;\red{r}\green{g}\blue{b};}}");
    rtf.push_str(r"\pard\qc\partightenfactor0");
    rtf.push('\n');
    let _ = write!(rtf, r"\f0\fs{font_size_halfpoints} \cf1 {}", escape_rtf(text));
    rtf.push('}');
    rtf
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::types::{SlideId, SlideKind};

    fn slide(id: u32, content: &str, font_size: u32) -> Slide {
        Slide {
            id: SlideId::new(id),
            kind: SlideKind::Verse,
            content: content.to_string(),
            label: format!("Test 1:1-2 ({id})"),
            font_size,
            verse_count: 2,
            start_verse: 1,
            end_verse: 2,
        }
    }

    #[test]
    fn escapes_control_characters() {
        assert_eq!(escape_rtf(r"a\b{c}"), r"a\\b\{c\}");
        assert_eq!(escape_rtf("one\r\ntwo"), r"one\par two");
    }

    #[test]
    fn escapes_non_ascii() {
        assert_eq!(escape_rtf("\u{201C}hi\u{201D}"), r"\'93hi\'94");
        assert_eq!(escape_rtf("é"), r"\u233?");
        // Outside the BMP: surrogate pair as signed 16-bit values.
        assert_eq!(escape_rtf("😀"), r"\u-10179?\u-8704?");
    }

    #[test]
    fn document_has_page_per_slide_and_doubled_sizes() {
        let slides = [slide(1, "1 First\n\n2 Second", 46), slide(2, "3 {Third}", 44)];
        let rtf = document_rtf(&slides, "Test 1:1-3");
        assert!(rtf.starts_with(r"{\rtf1"));
        assert!(rtf.ends_with('}'));
        assert_eq!(rtf.matches(r"\page").count(), 2);
        assert!(rtf.contains(r"\fs92 1 First\par \par 2 Second\par"));
        assert!(rtf.contains(r"\fs88 3 \{Third\}\par"));
        assert!(rtf.contains(r"\b\fs64 Test 1:1-3\b0"));
    }

    #[test]
    fn slide_payload_uses_options() {
        let rtf = slide_rtf("1 Grace", &RtfOptions { font_size: 42, ..RtfOptions::default() });
        assert!(rtf.contains("Verdana-Bold"));
        assert!(rtf.contains(r"\fs84 \cf1 1 Grace}"));
        assert!(rtf.contains(r"\red255\green255\blue255"));
    }
}
