//! MIME type detection for uploaded payloads.
//!
//! Uploads carry no trustworthy extension, so detection works on magic
//! bytes rather than filenames.

/// Detect the MIME type of a payload from its leading bytes.
pub fn sniff_mime(data: &[u8]) -> &'static str {
    match data {
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'B', b'M', ..] => "image/bmp",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "image/webp",
        [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// Whether a MIME type is for an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_png() {
        let data = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(sniff_mime(&data), "image/png");
    }

    #[test]
    fn detects_jpeg() {
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]), "image/jpeg");
    }

    #[test]
    fn unknown_bytes_fallback() {
        assert_eq!(sniff_mime(b"hello world"), "application/octet-stream");
        assert!(!is_image(sniff_mime(b"hello world")));
    }

    #[test]
    fn empty_payload_is_not_an_image() {
        assert_eq!(sniff_mime(&[]), "application/octet-stream");
    }
}
