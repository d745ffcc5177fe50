use crate::domain::DomainError;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_TEXT: &str = "text/plain";

/// Extracts plain UTF-8 text from an uploaded file body. Content-type
/// parameters (`; charset=...`) are ignored when matching.
pub fn extract_text(bytes: &[u8], content_type: &str) -> Result<String, DomainError> {
    let mime = content_type.split(';').next().unwrap_or("").trim();

    match mime {
        MIME_PDF => pdf_extract::extract_text_from_mem(bytes)
            .map(|text| text.trim().to_string())
            .map_err(|e| DomainError::external(format!("PDF extraction failed: {e}"))),
        MIME_TEXT => String::from_utf8(bytes.to_vec())
            .map_err(|e| DomainError::validation(format!("file is not valid UTF-8: {e}"))),
        other => Err(DomainError::validation(format!(
            "unsupported content type: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passthrough() {
        let text = extract_text("hello world".as_bytes(), "text/plain").unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_content_type_parameters_ignored() {
        let text = extract_text("héllo".as_bytes(), "text/plain; charset=utf-8").unwrap();
        assert_eq!(text, "héllo");
    }

    #[test]
    fn test_unsupported_type_rejected() {
        let err = extract_text(b"...", "image/png").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = extract_text(&[0xff, 0xfe, 0x00], "text/plain").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
