use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Inline `bytes` as a `data:` URL with the given media type.
pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Media type without parameters: `image/png; charset=binary` becomes `image/png`.
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

pub fn is_image_mime(mime: &str) -> bool {
    mime.starts_with("image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_png_header() {
        let url = encode("image/png", &[0x89, b'P', b'N', b'G']);
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn empty_payload_still_has_prefix() {
        assert_eq!(encode("image/gif", &[]), "data:image/gif;base64,");
    }

    #[test]
    fn essence_drops_parameters() {
        assert_eq!(mime_essence("image/png; charset=binary"), "image/png");
        assert_eq!(mime_essence(" Image/JPEG ;q=1"), "image/jpeg");
        assert_eq!(mime_essence("image/gif"), "image/gif");
        assert_eq!(mime_essence(""), "");
    }

    #[test]
    fn image_mime_detection() {
        assert!(is_image_mime("image/png"));
        assert!(is_image_mime("image/svg+xml"));
        assert!(!is_image_mime("application/pdf"));
        assert!(!is_image_mime("text/plain"));
        assert!(!is_image_mime(""));
        assert!(!is_image_mime("images/png"));
    }
}
