use thiserror::Error;

/// Reasons a deserialized model artifact is rejected.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("idf vector is empty")]
    EmptyIdf,

    #[error("vocabulary term '{term}' has index {index} outside dimension {dimension}")]
    VocabularyIndex {
        term: String,
        index: usize,
        dimension: usize,
    },

    #[error("invalid ngram_range ({min}, {max})")]
    NgramRange { min: usize, max: usize },

    #[error("token_pattern does not compile: {0}")]
    TokenPattern(#[from] regex::Error),

    #[error("need at least 2 classes, got {0}")]
    TooFewClasses(usize),

    #[error("coef has {rows} rows for {classes} classes")]
    CoefRows { rows: usize, classes: usize },

    #[error("intercept has {len} entries for {rows} coef rows")]
    InterceptLength { len: usize, rows: usize },

    #[error("coef rows must be non-empty and equally long")]
    RaggedCoef,

    #[error("dimension must be positive")]
    ZeroDimension,

    #[error("{samples} samples but {labels} labels")]
    SampleLabelMismatch { samples: usize, labels: usize },

    #[error("n_neighbors {k} must be between 1 and the sample count {samples}")]
    NeighborCount { k: usize, samples: usize },

    #[error("sample feature index {index} outside dimension {dimension}")]
    SampleIndex { index: usize, dimension: usize },
}
