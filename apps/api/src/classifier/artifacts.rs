//! Startup loading of the two model artifacts.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use super::error::ModelError;
use super::linear::ClassifierArtifact;
use super::tfidf::{TfidfArtifact, TfidfVectorizer};
use super::{DimensionMismatch, ModelContext};

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Model files not found! Make sure `{classifier}` and `{vectorizer}` exist. Missing: {}", display_paths(.missing))]
    Missing {
        vectorizer: PathBuf,
        classifier: PathBuf,
        missing: Vec<PathBuf>,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ModelError,
    },

    #[error(transparent)]
    Dimension(#[from] DimensionMismatch),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Loads vectorizer and classifier, failing before either is parsed if any
/// file is absent.
pub fn load_models(vectorizer_path: &Path, classifier_path: &Path) -> Result<ModelContext, ArtifactError> {
    let missing: Vec<PathBuf> = [classifier_path, vectorizer_path]
        .into_iter()
        .filter(|p| !p.is_file())
        .map(Path::to_path_buf)
        .collect();
    if !missing.is_empty() {
        return Err(ArtifactError::Missing {
            vectorizer: vectorizer_path.to_path_buf(),
            classifier: classifier_path.to_path_buf(),
            missing,
        });
    }

    let tfidf: TfidfArtifact = read_json(vectorizer_path)?;
    let vectorizer = TfidfVectorizer::from_artifact(tfidf).map_err(|source| ArtifactError::Invalid {
        path: vectorizer_path.to_path_buf(),
        source,
    })?;

    let clf: ClassifierArtifact = read_json(classifier_path)?;
    let classifier = clf.into_classifier().map_err(|source| ArtifactError::Invalid {
        path: classifier_path.to_path_buf(),
        source,
    })?;

    let context = ModelContext::new(Box::new(vectorizer), classifier)?;
    info!(
        vectorizer = %vectorizer_path.display(),
        classifier = %classifier_path.display(),
        dimension = context.dimension(),
        "Model artifacts loaded"
    );
    Ok(context)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = std::fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DEMO_TFIDF: &str = include_str!("../../artifacts/tfidf.json");
    const DEMO_CLF: &str = include_str!("../../artifacts/clf.json");

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_missing_both_files_lists_both() {
        let dir = TempDir::new().unwrap();
        let err = load_models(&dir.path().join("tfidf.json"), &dir.path().join("clf.json")).unwrap_err();
        match &err {
            ArtifactError::Missing { missing, .. } => assert_eq!(missing.len(), 2),
            other => panic!("expected Missing, got {other:?}"),
        }
        assert!(err.to_string().starts_with("Model files not found!"));
    }

    #[test]
    fn test_missing_one_file_fails_before_parsing() {
        let dir = TempDir::new().unwrap();
        // Garbage vectorizer: would be a Parse error if it were read first.
        let tfidf = write(&dir, "tfidf.json", "not json");
        let err = load_models(&tfidf, &dir.path().join("clf.json")).unwrap_err();
        match err {
            ArtifactError::Missing { missing, .. } => {
                assert_eq!(missing, vec![dir.path().join("clf.json")])
            }
            other => panic!("expected Missing, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let tfidf = write(&dir, "tfidf.json", "{");
        let clf = write(&dir, "clf.json", DEMO_CLF);
        assert!(matches!(
            load_models(&tfidf, &clf),
            Err(ArtifactError::Parse { .. })
        ));
    }

    #[test]
    fn test_invalid_shape_is_reported() {
        let dir = TempDir::new().unwrap();
        let tfidf = write(&dir, "tfidf.json", DEMO_TFIDF);
        let clf = write(
            &dir,
            "clf.json",
            r#"{"kind": "linear", "classes": [0, 1], "coef": [[1.0]], "intercept": [0.0, 1.0]}"#,
        );
        assert!(matches!(
            load_models(&tfidf, &clf),
            Err(ArtifactError::Invalid {
                source: ModelError::InterceptLength { len: 2, rows: 1 },
                ..
            })
        ));
    }

    #[test]
    fn test_dimension_mismatch_is_fatal() {
        let dir = TempDir::new().unwrap();
        let tfidf = write(&dir, "tfidf.json", DEMO_TFIDF);
        let clf = write(
            &dir,
            "clf.json",
            r#"{"kind": "linear", "classes": [0, 1], "coef": [[1.0, 2.0]], "intercept": [0.0]}"#,
        );
        assert!(matches!(
            load_models(&tfidf, &clf),
            Err(ArtifactError::Dimension(_))
        ));
    }

    #[test]
    fn test_demo_artifacts_load_and_predict() {
        let dir = TempDir::new().unwrap();
        let tfidf = write(&dir, "tfidf.json", DEMO_TFIDF);
        let clf = write(&dir, "clf.json", DEMO_CLF);
        let ctx = load_models(&tfidf, &clf).unwrap();
        assert_eq!(ctx.dimension(), 25);

        let v = ctx.vectorize("experienced python developer django flask python");
        assert_eq!(ctx.predict(&v), 20);

        let v = ctx.vectorize("machine learning with pandas and numpy");
        assert_eq!(ctx.predict(&v), 6);
    }
}
