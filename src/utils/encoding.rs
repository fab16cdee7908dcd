//! Base64 data URIs and the truncated upload preview.
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Number of base64 characters kept in an upload preview.
pub const PREVIEW_CHARS: usize = 100;

/// Content type to advertise for an image, falling back to JPEG when the
/// client sent nothing useful.
pub fn image_mime(content_type: Option<&str>) -> String {
    match content_type.map(str::trim) {
        Some(ct) if ct.starts_with("image/") => ct.to_string(),
        _ => DEFAULT_IMAGE_MIME.to_string(),
    }
}

pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// `data:<mime>;base64,<first PREVIEW_CHARS chars>...`
pub fn preview(mime: &str, bytes: &[u8]) -> String {
    let encoded = STANDARD.encode(bytes);
    // base64 output is ASCII, so byte slicing is char-safe.
    let head = &encoded[..encoded.len().min(PREVIEW_CHARS)];
    format!("data:{};base64,{}...", mime, head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_falls_back_to_jpeg() {
        assert_eq!(image_mime(None), "image/jpeg");
        assert_eq!(image_mime(Some("application/octet-stream")), "image/jpeg");
        assert_eq!(image_mime(Some("image/png")), "image/png");
    }

    #[test]
    fn data_uri_wraps_the_full_encoding() {
        assert_eq!(data_uri("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn preview_keeps_only_the_prefix() {
        let bytes = vec![0u8; 300];
        let p = preview("image/jpeg", &bytes);
        let body = p
            .strip_prefix("data:image/jpeg;base64,")
            .and_then(|s| s.strip_suffix("..."))
            .unwrap();
        assert_eq!(body.len(), PREVIEW_CHARS);
    }

    #[test]
    fn short_input_preview_is_the_whole_encoding() {
        assert_eq!(preview("image/jpeg", b"0123456789"), "data:image/jpeg;base64,MDEyMzQ1Njc4OQ==...");
    }
}
