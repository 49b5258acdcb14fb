use bytes::Bytes;

pub const MIME_TEXT_PLAIN: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";

/// The MIME type an upload claims to be, reduced to what extraction cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    PlainText,
    Pdf,
    Other(String),
}

impl DeclaredType {
    /// Parses a `Content-Type` value on its essence: parameters dropped,
    /// case folded.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            MIME_TEXT_PLAIN => DeclaredType::PlainText,
            MIME_PDF => DeclaredType::Pdf,
            _ => DeclaredType::Other(essence),
        }
    }

    /// Resolves the type of a multipart part. Browsers send
    /// `application/octet-stream` (or nothing) when they don't know the type;
    /// in that case the filename extension decides.
    pub fn from_part(content_type: Option<&str>, filename: &str) -> Self {
        match content_type.map(str::trim).filter(|ct| !ct.is_empty()) {
            Some(ct) if !ct.eq_ignore_ascii_case("application/octet-stream") => Self::from_mime(ct),
            _ => Self::from_extension(filename)
                .unwrap_or_else(|| DeclaredType::Other("application/octet-stream".to_string())),
        }
    }

    fn from_extension(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(DeclaredType::PlainText),
            "pdf" => Some(DeclaredType::Pdf),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &str {
        match self {
            DeclaredType::PlainText => MIME_TEXT_PLAIN,
            DeclaredType::Pdf => MIME_PDF,
            DeclaredType::Other(mime) => mime,
        }
    }
}

/// One uploaded résumé. Lives for a single request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub declared: DeclaredType,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, declared: DeclaredType, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            declared,
            bytes: bytes.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_parameters_and_case_are_ignored() {
        assert_eq!(
            DeclaredType::from_mime("Text/Plain; charset=utf-8"),
            DeclaredType::PlainText
        );
        assert_eq!(DeclaredType::from_mime("application/pdf"), DeclaredType::Pdf);
        assert_eq!(
            DeclaredType::from_mime("application/json"),
            DeclaredType::Other("application/json".to_string())
        );
    }

    #[test]
    fn test_declared_type_wins_over_extension() {
        assert_eq!(
            DeclaredType::from_part(Some("application/json"), "resume.pdf"),
            DeclaredType::Other("application/json".to_string())
        );
    }

    #[test]
    fn test_extension_used_when_type_is_generic_or_missing() {
        assert_eq!(
            DeclaredType::from_part(Some("application/octet-stream"), "cv.PDF"),
            DeclaredType::Pdf
        );
        assert_eq!(DeclaredType::from_part(None, "cv.txt"), DeclaredType::PlainText);
        assert_eq!(DeclaredType::from_part(Some(""), "cv.txt"), DeclaredType::PlainText);
        assert_eq!(
            DeclaredType::from_part(None, "cv.docx"),
            DeclaredType::Other("application/octet-stream".to_string())
        );
        assert_eq!(
            DeclaredType::from_part(None, "noextension"),
            DeclaredType::Other("application/octet-stream".to_string())
        );
    }

    #[test]
    fn test_as_mime_round_trips_known_types() {
        assert_eq!(DeclaredType::PlainText.as_mime(), "text/plain");
        assert_eq!(DeclaredType::Pdf.as_mime(), "application/pdf");
    }
}
