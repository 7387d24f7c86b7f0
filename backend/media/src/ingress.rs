//! Decode-and-reencode of uploaded image bytes.

use std::io::Cursor;

use bytes::Bytes;
use image::ImageFormat;
use thiserror::Error;
use tracing::debug;

use crate::sniff::{is_image, sniff_mime};

/// MIME type of every payload forwarded to the inference gateway.
pub const CANONICAL_MIME: &str = "image/png";

#[derive(Debug, Error)]
pub enum IngressError {
    #[error("unsupported upload type: {0}")]
    UnsupportedType(&'static str),

    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("could not re-encode image: {0}")]
    Encode(image::ImageError),
}

/// Decode an uploaded payload and re-encode it as canonical PNG.
///
/// Corrupted or non-image payloads fail here, before anything is sent to
/// the inference gateway.
pub fn reencode_to_png(data: &[u8]) -> Result<Bytes, IngressError> {
    let mime = sniff_mime(data);
    if !is_image(mime) {
        return Err(IngressError::UnsupportedType(mime));
    }

    let decoded = image::load_from_memory(data)?;
    debug!(
        width = decoded.width(),
        height = decoded.height(),
        source_mime = mime,
        "re-encoding upload to PNG"
    );

    let mut out = Vec::new();
    decoded
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(IngressError::Encode)?;
    Ok(Bytes::from(out))
}
