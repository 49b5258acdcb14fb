//! Inference-only model layer.
//!
//! A fitted vectorizer turns cleaned résumé text into a sparse feature vector;
//! a fitted classifier turns that vector into a category id. Both are loaded
//! once at startup (see [`artifacts`]) and bundled into an immutable
//! [`ModelContext`] that request handlers borrow.
//!
//! The two traits are the seam for test doubles: the pipeline only ever sees
//! `dyn Vectorizer` / `dyn Classifier`.

pub mod artifacts;
pub mod error;
pub mod linear;
pub mod tfidf;

use thiserror::Error;

/// A fixed-dimension sparse vector. Entries are `(feature index, value)`
/// pairs sorted by index with no duplicates and no explicit zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Builds a vector from arbitrary pairs: sorts, sums duplicates, drops
    /// zeros. Indices at or past `dimension` are discarded.
    pub fn from_pairs(dimension: usize, pairs: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut raw: Vec<(usize, f64)> = pairs.into_iter().filter(|(i, _)| *i < dimension).collect();
        raw.sort_by_key(|(i, _)| *i);

        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(raw.len());
        for (index, value) in raw {
            match entries.last_mut() {
                Some((last, acc)) if *last == index => *acc += value,
                _ => entries.push((index, value)),
            }
        }
        entries.retain(|(_, v)| *v != 0.0);

        Self { dimension, entries }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Dot product against a dense row. Missing row positions count as zero.
    pub fn dot_dense(&self, row: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(i, v)| row.get(*i).copied().unwrap_or(0.0) * v)
            .sum()
    }

    /// Squared Euclidean distance to another sparse vector (merge walk).
    pub fn squared_distance(&self, other: &FeatureVector) -> f64 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut total = 0.0;

        while i < a.len() && j < b.len() {
            let (ia, va) = a[i];
            let (ib, vb) = b[j];
            if ia == ib {
                total += (va - vb).powi(2);
                i += 1;
                j += 1;
            } else if ia < ib {
                total += va * va;
                i += 1;
            } else {
                total += vb * vb;
                j += 1;
            }
        }
        total += a[i..].iter().map(|(_, v)| v * v).sum::<f64>();
        total += b[j..].iter().map(|(_, v)| v * v).sum::<f64>();
        total
    }
}

/// Maps cleaned text to a feature vector of constant dimension.
pub trait Vectorizer: Send + Sync {
    fn dimension(&self) -> usize;
    fn transform(&self, text: &str) -> FeatureVector;
}

/// Maps a feature vector to a category id.
pub trait Classifier: Send + Sync {
    fn dimension(&self) -> usize;
    fn predict(&self, vector: &FeatureVector) -> i64;
}

#[derive(Debug, Error)]
#[error("Vectorizer produces {vectorizer} features but classifier expects {classifier}")]
pub struct DimensionMismatch {
    pub vectorizer: usize,
    pub classifier: usize,
}

/// The loaded model pair. Built once, never mutated, shared behind an `Arc`.
pub struct ModelContext {
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn Classifier>,
}

impl ModelContext {
    pub fn new(
        vectorizer: Box<dyn Vectorizer>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self, DimensionMismatch> {
        if vectorizer.dimension() != classifier.dimension() {
            return Err(DimensionMismatch {
                vectorizer: vectorizer.dimension(),
                classifier: classifier.dimension(),
            });
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    pub fn dimension(&self) -> usize {
        self.vectorizer.dimension()
    }

    pub fn vectorize(&self, cleaned: &str) -> FeatureVector {
        self.vectorizer.transform(cleaned)
    }

    pub fn predict(&self, vector: &FeatureVector) -> i64 {
        self.classifier.predict(vector)
    }
}

impl std::fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelContext")
            .field("dimension", &self.dimension())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_doubles {
    use super::*;

    /// Counts occurrences of each fixed keyword; feature `i` is keyword `i`.
    pub struct KeywordVectorizer(pub Vec<&'static str>);

    impl Vectorizer for KeywordVectorizer {
        fn dimension(&self) -> usize {
            self.0.len()
        }

        fn transform(&self, text: &str) -> FeatureVector {
            let lower = text.to_lowercase();
            FeatureVector::from_pairs(
                self.0.len(),
                lower.split_whitespace().filter_map(|token| {
                    self.0.iter().position(|k| *k == token).map(|i| (i, 1.0))
                }),
            )
        }
    }

    /// Predicts the id attached to the strongest feature, or `fallback`.
    pub struct StrongestFeatureClassifier {
        pub ids: Vec<i64>,
        pub fallback: i64,
    }

    impl Classifier for StrongestFeatureClassifier {
        fn dimension(&self) -> usize {
            self.ids.len()
        }

        fn predict(&self, vector: &FeatureVector) -> i64 {
            vector
                .entries()
                .iter()
                .fold(None::<(usize, f64)>, |best, &(i, v)| match best {
                    Some((_, bv)) if bv >= v => best,
                    _ => Some((i, v)),
                })
                .map(|(i, _)| self.ids[i])
                .unwrap_or(self.fallback)
        }
    }
}
