//! Upload intake: turn a selected or dropped file into a tile descriptor.
//!
//! The canvas only ever sees finished descriptors. Decoding may be slow
//! (the browser reads files asynchronously), so the intake is an async
//! trait; its failures are returned to the caller instead of being logged
//! and dropped.

#[cfg(test)]
#[path = "intake_test.rs"]
mod intake_test;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::consts::MAX_UPLOAD_BYTES;
use crate::doc::TileDescriptor;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("no file was selected")]
    EmptySelection,
    #[error("file {name} is empty")]
    EmptyFile { name: String },
    #[error("file is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
    #[error("{mime} is not an image type")]
    NotAnImage { mime: String },
    #[error("file {name} does not contain a recognised image format")]
    Undecodable { name: String },
}

/// A file handed over by a file input or a drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    /// Declared media type, e.g. `image/png`.
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Converts user-selected files into tile descriptors.
#[allow(async_fn_in_trait)]
pub trait UploadIntake {
    /// Decode the first selected file.
    ///
    /// # Errors
    ///
    /// Returns an `IntakeError` when nothing was selected or the file cannot
    /// be turned into a displayable image.
    async fn decode(&self, files: Vec<SelectedFile>) -> Result<TileDescriptor, IntakeError>;
}

/// Intake that inlines the image as a base64 `data:` URL.
#[derive(Debug, Clone, Copy)]
pub struct DataUrlIntake {
    max_bytes: usize,
}

impl Default for DataUrlIntake {
    fn default() -> Self {
        Self { max_bytes: MAX_UPLOAD_BYTES }
    }
}

impl DataUrlIntake {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the size limit.
    #[must_use]
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    fn decode_one(&self, file: &SelectedFile) -> Result<TileDescriptor, IntakeError> {
        if file.bytes.is_empty() {
            return Err(IntakeError::EmptyFile { name: file.name.clone() });
        }
        if file.bytes.len() > self.max_bytes {
            return Err(IntakeError::TooLarge { size: file.bytes.len(), limit: self.max_bytes });
        }
        if !file.mime.starts_with("image/") {
            return Err(IntakeError::NotAnImage { mime: file.mime.clone() });
        }
        let Some(mime) = sniff_image_type(&file.bytes) else {
            return Err(IntakeError::Undecodable { name: file.name.clone() });
        };

        let caption = default_caption(&file.name);
        Ok(TileDescriptor {
            image_ref: format!("data:{mime};base64,{}", STANDARD.encode(&file.bytes)),
            alt_text: caption.clone(),
            caption,
        })
    }
}

impl UploadIntake for DataUrlIntake {
    async fn decode(&self, files: Vec<SelectedFile>) -> Result<TileDescriptor, IntakeError> {
        let Some(file) = files.first() else {
            tracing::warn!("upload rejected: empty selection");
            return Err(IntakeError::EmptySelection);
        };
        self.decode_one(file).inspect_err(|e| {
            tracing::warn!(file = %file.name, error = %e, "upload rejected");
        })
    }
}

/// File name without its final extension; the whole name if that leaves nothing.
#[must_use]
pub fn default_caption(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_owned(),
        _ => file_name.to_owned(),
    }
}

/// Identify an image by its leading bytes.
///
/// Raster formats are matched by magic number. AVIF and HEIC share the ISO
/// media `ftyp` box and are told apart by its major brand. SVG is text, so
/// it is recognised by an `<svg` root near the start of the document.
#[must_use]
pub fn sniff_image_type(bytes: &[u8]) -> Option<&'static str> {
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];
    const ICO: &[u8] = &[0, 0, 1, 0];

    if bytes.starts_with(PNG) {
        Some("image/png")
    } else if bytes.starts_with(JPEG) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else if bytes.starts_with(b"BM") && bytes.len() >= 14 {
        Some("image/bmp")
    } else if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
        Some("image/tiff")
    } else if bytes.starts_with(ICO) {
        Some("image/x-icon")
    } else if let Some(brand) = iso_media_brand(bytes) {
        match brand {
            b"avif" | b"avis" => Some("image/avif"),
            b"heic" | b"heix" | b"mif1" => Some("image/heic"),
            _ => None,
        }
    } else if looks_like_svg(bytes) {
        Some("image/svg+xml")
    } else {
        None
    }
}

fn iso_media_brand(bytes: &[u8]) -> Option<&[u8]> {
    (bytes.len() >= 12 && &bytes[4..8] == b"ftyp").then(|| &bytes[8..12])
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    let text = String::from_utf8_lossy(head);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    (text.starts_with("<svg") || text.starts_with("<?xml") || text.starts_with("<!DOCTYPE svg"))
        && text.contains("<svg")
}
