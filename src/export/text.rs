//! Plain text export.

use std::fmt::Write;

use crate::layout::Slide;

/// Reference header, then each slide under a `--- <label> ---` separator.
pub fn render(slides: &[Slide], reference: &str) -> String {
    let mut txt = String::new();
    let _ = writeln!(txt, "{reference}");
    for slide in slides {
        let _ = writeln!(txt, "--- {} ---", slide.label);
        let _ = writeln!(txt, "{}", slide.content);
        txt.push('\n');
    }
    txt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SlideId, SlideKind};

    #[test]
    fn renders_header_and_slides() {
        let slides = vec![Slide {
            id: SlideId::new(1),
            kind: SlideKind::Verse,
            content: "35 Jesus wept.\n\n36 So the Jews said.".to_string(),
            label: "John 11:35-36 (1)".to_string(),
            font_size: 48,
            verse_count: 2,
            start_verse: 35,
            end_verse: 36,
        }];
        assert_eq!(
            render(&slides, "John 11:35-36"),
            "John 11:35-36\n--- John 11:35-36 (1) ---\n35 Jesus wept.\n\n36 So the Jews said.\n\n"
        );
    }

    #[test]
    fn no_slides_only_header() {
        assert_eq!(render(&[], "John 3:16"), "John 3:16\n");
    }
}
