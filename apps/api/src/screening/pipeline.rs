//! One upload, start to finish: extract → clean → vectorize → predict → label.
//!
//! Linear, no retries. Any failure ends the run and is handed back to the
//! caller to show to the user.

use thiserror::Error;
use tracing::{debug, warn};

use crate::classifier::ModelContext;
use crate::models::prediction::Prediction;
use crate::models::upload::UploadedFile;
use crate::screening::categories::label_for;
use crate::screening::clean::clean;
use crate::screening::extract::{extract, ExtractionError};

/// Where a run is. `Failed` can follow any stage before `Predicted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FileReceived,
    TextExtracted,
    TextCleaned,
    Vectorized,
    Predicted,
    Failed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScreeningError {
    #[error("Unsupported file format. Please upload a .txt or .pdf file.")]
    UnsupportedFormat(String),

    #[error("Error extracting text from PDF: {0}")]
    Extraction(String),

    #[error("No readable text found in the file. Please check your document.")]
    EmptyText,
}

impl From<ExtractionError> for ScreeningError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat(mime) => ScreeningError::UnsupportedFormat(mime),
            ExtractionError::Pdf(msg) => ScreeningError::Extraction(msg),
        }
    }
}

pub fn screen(models: &ModelContext, upload: &UploadedFile) -> Result<Prediction, ScreeningError> {
    let mime = upload.declared.as_mime();
    debug!(stage = ?Stage::FileReceived, bytes = upload.bytes.len(), mime);

    let raw = extract(&upload.bytes, &upload.declared).map_err(|e| fail(e.into(), mime))?;
    if raw.trim().is_empty() {
        return Err(fail(ScreeningError::EmptyText, mime));
    }
    debug!(stage = ?Stage::TextExtracted, chars = raw.chars().count());

    let cleaned = clean(&raw);
    debug!(stage = ?Stage::TextCleaned, chars = cleaned.len());

    let vector = models.vectorize(&cleaned);
    debug!(stage = ?Stage::Vectorized, nnz = vector.nnz(), dimension = vector.dimension());

    let category_id = models.predict(&vector);
    let prediction = Prediction {
        category_id,
        category: label_for(category_id),
    };
    debug!(stage = ?Stage::Predicted, category_id, category = prediction.category);

    Ok(prediction)
}

fn fail(err: ScreeningError, mime: &str) -> ScreeningError {
    warn!(stage = ?Stage::Failed, mime, error = %err, "Screening abandoned");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::test_doubles::{KeywordVectorizer, StrongestFeatureClassifier};
    use crate::models::upload::DeclaredType;
    use crate::screening::extract::build_test_pdf;

    fn models() -> ModelContext {
        ModelContext::new(
            Box::new(KeywordVectorizer(vec!["python", "java", "pandas", "mystery"])),
            Box::new(StrongestFeatureClassifier {
                ids: vec![20, 15, 6, 99],
                fallback: 0,
            }),
        )
        .unwrap()
    }

    fn text_upload(body: &[u8]) -> UploadedFile {
        UploadedFile::new("resume.txt", DeclaredType::PlainText, body.to_vec())
    }

    #[test]
    fn test_plain_text_is_classified() {
        let p = screen(&models(), &text_upload(b"Senior Java engineer. Java, Spring, Python.")).unwrap();
        assert_eq!(p.category_id, 15);
        assert_eq!(p.category, "Java Developer");
        assert_eq!(p.message(), "Predicted Job Category: Java Developer");
    }

    #[test]
    fn test_cleaning_runs_before_vectorizing() {
        // "pandas," only matches the keyword once punctuation is stripped.
        let p = screen(&models(), &text_upload(b"numpy, pandas, pandas!")).unwrap();
        assert_eq!(p.category, "Data Science");
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let ctx = models();
        let upload = text_upload(b"python pandas python java");
        let first = screen(&ctx, &upload).unwrap();
        for _ in 0..10 {
            assert_eq!(screen(&ctx, &upload).unwrap(), first);
        }
    }

    #[test]
    fn test_unmapped_id_is_labelled_unknown() {
        let p = screen(&models(), &text_upload(b"mystery mystery")).unwrap();
        assert_eq!(p.category_id, 99);
        assert_eq!(p.category, "Unknown");
    }

    #[test]
    fn test_empty_text_is_rejected() {
        assert_eq!(
            screen(&models(), &text_upload(b"")).unwrap_err(),
            ScreeningError::EmptyText
        );
        assert_eq!(
            screen(&models(), &text_upload(b" \n\t ")).unwrap_err(),
            ScreeningError::EmptyText
        );
    }

    #[test]
    fn test_unsupported_type_is_rejected() {
        let upload = UploadedFile::new(
            "resume.json",
            DeclaredType::Other("application/json".to_string()),
            b"{\"skills\": [\"python\"]}".to_vec(),
        );
        let err = screen(&models(), &upload).unwrap_err();
        assert_eq!(
            err,
            ScreeningError::UnsupportedFormat("application/json".to_string())
        );
        assert_eq!(
            err.to_string(),
            "Unsupported file format. Please upload a .txt or .pdf file."
        );
    }

    #[test]
    fn test_broken_pdf_surfaces_extraction_error() {
        let upload = UploadedFile::new("resume.pdf", DeclaredType::Pdf, b"%PDF-1.4 nonsense".to_vec());
        let err = screen(&models(), &upload).unwrap_err();
        assert!(matches!(err, ScreeningError::Extraction(_)));
        assert!(err.to_string().starts_with("Error extracting text from PDF:"));
    }

    #[test]
    fn test_pdf_is_classified() {
        let upload = UploadedFile::new("resume.pdf", DeclaredType::Pdf, build_test_pdf(&["Python"]));
        let p = screen(&models(), &upload).unwrap();
        assert_eq!(p.category, "Python Developer");
    }
}
