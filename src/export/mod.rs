//! Export slide sequences to files.
//!
//! Every exporter is a pure function of the slides and the reference string.

pub mod pro;
pub mod rtf;
pub mod text;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::layout::Slide;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Plain text (`txt`).
    Text,
    /// Rich text, one page per slide (`rtf`).
    Rtf,
    /// Structured presentation document (`pro`).
    Pro,
}

impl ExportFormat {
    /// Returns all formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Text, Self::Rtf, Self::Pro]
    }

    /// File extension, also the format key.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Rtf => "rtf",
            Self::Pro => "pro",
        }
    }

    /// MIME type for downloads.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Rtf => "application/rtf",
            Self::Pro => "application/octet-stream",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|format| format.extension() == key)
            .ok_or_else(|| Error::UnsupportedFormat(s.to_string()))
    }
}

/// Render `slides` in `format`.
pub fn export(slides: &[Slide], format: ExportFormat, reference: &str) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Text => Ok(text::render(slides, reference).into_bytes()),
        ExportFormat::Rtf => Ok(rtf::document_rtf(slides, reference).into_bytes()),
        ExportFormat::Pro => pro::render(slides, reference),
    }
}

/// Render `slides` for a format key such as `"rtf"`.
pub fn export_as(slides: &[Slide], format_key: &str, reference: &str) -> Result<Vec<u8>> {
    export(slides, format_key.parse()?, reference)
}

/// Write exported bytes to `<dir>/<stem>.<ext>`, creating `dir`.
///
/// The stem is usually [`ScriptureReference::file_stem`](crate::bible::ScriptureReference::file_stem) or
/// [`Service::file_stem`](crate::layout::Service::file_stem).
pub fn write_export(dir: &Path, stem: &str, format: ExportFormat, bytes: &[u8]) -> Result<PathBuf> {
    fs_err::create_dir_all(dir).map_err(|e| Error::io(e, dir.to_path_buf()))?;
    let path = dir.join(format!("{stem}.{}", format.extension()));
    fs_err::write(&path, bytes).map_err(|e| Error::io(e, path.clone()))?;
    tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(path)
}
