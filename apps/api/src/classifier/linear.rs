//! Fitted classifiers: one-vs-rest linear models and k-nearest-neighbours.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::ModelError;
use super::{Classifier, FeatureVector};

/// On-disk shape of the classifier artifact, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    Linear {
        classes: Vec<i64>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
    },
    NearestNeighbors {
        n_neighbors: usize,
        dimension: usize,
        samples: Vec<Vec<(usize, f64)>>,
        labels: Vec<i64>,
    },
}

impl ClassifierArtifact {
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>, ModelError> {
        match self {
            ClassifierArtifact::Linear {
                classes,
                coef,
                intercept,
            } => Ok(Box::new(LinearClassifier::new(classes, coef, intercept)?)),
            ClassifierArtifact::NearestNeighbors {
                n_neighbors,
                dimension,
                samples,
                labels,
            } => Ok(Box::new(NearestNeighbors::new(
                n_neighbors,
                dimension,
                samples,
                labels,
            )?)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Linear
// ────────────────────────────────────────────────────────────────────────────

/// Scores every class as `coef[c] · x + intercept[c]` and returns the best.
/// A two-class model may carry a single row; positive means `classes[1]`.
#[derive(Debug)]
pub struct LinearClassifier {
    classes: Vec<i64>,
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
    dimension: usize,
}

impl LinearClassifier {
    pub fn new(classes: Vec<i64>, coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self, ModelError> {
        if classes.len() < 2 {
            return Err(ModelError::TooFewClasses(classes.len()));
        }
        let binary = classes.len() == 2 && coef.len() == 1;
        if !binary && coef.len() != classes.len() {
            return Err(ModelError::CoefRows {
                rows: coef.len(),
                classes: classes.len(),
            });
        }
        if intercept.len() != coef.len() {
            return Err(ModelError::InterceptLength {
                len: intercept.len(),
                rows: coef.len(),
            });
        }
        let dimension = coef[0].len();
        if dimension == 0 || coef.iter().any(|row| row.len() != dimension) {
            return Err(ModelError::RaggedCoef);
        }

        Ok(Self {
            classes,
            coef,
            intercept,
            dimension,
        })
    }

    fn decision(&self, vector: &FeatureVector) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| vector.dot_dense(row) + b)
            .collect()
    }
}

impl Classifier for LinearClassifier {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn predict(&self, vector: &FeatureVector) -> i64 {
        let scores = self.decision(vector);
        if scores.len() == 1 {
            return if scores[0] > 0.0 {
                self.classes[1]
            } else {
                self.classes[0]
            };
        }

        // First index wins ties.
        let mut best = 0;
        for (i, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = i;
            }
        }
        self.classes[best]
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Nearest neighbours
// ────────────────────────────────────────────────────────────────────────────

/// Brute-force k-NN over stored training vectors with Euclidean distance.
#[derive(Debug)]
pub struct NearestNeighbors {
    k: usize,
    dimension: usize,
    samples: Vec<FeatureVector>,
    labels: Vec<i64>,
}

impl NearestNeighbors {
    pub fn new(
        k: usize,
        dimension: usize,
        samples: Vec<Vec<(usize, f64)>>,
        labels: Vec<i64>,
    ) -> Result<Self, ModelError> {
        if dimension == 0 {
            return Err(ModelError::ZeroDimension);
        }
        if samples.len() != labels.len() {
            return Err(ModelError::SampleLabelMismatch {
                samples: samples.len(),
                labels: labels.len(),
            });
        }
        if k == 0 || k > samples.len() {
            return Err(ModelError::NeighborCount {
                k,
                samples: samples.len(),
            });
        }
        if let Some(bad) = samples
            .iter()
            .flatten()
            .find(|(index, _)| *index >= dimension)
        {
            return Err(ModelError::SampleIndex {
                index: bad.0,
                dimension,
            });
        }

        Ok(Self {
            k,
            dimension,
            samples: samples
                .into_iter()
                .map(|pairs| FeatureVector::from_pairs(dimension, pairs))
                .collect(),
            labels,
        })
    }
}

impl Classifier for NearestNeighbors {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn predict(&self, vector: &FeatureVector) -> i64 {
        let mut ranked: Vec<(f64, usize)> = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, sample)| (sample.squared_distance(vector), i))
            .collect();
        // Stable: equal distances keep sample order.
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut votes: BTreeMap<i64, usize> = BTreeMap::new();
        for (_, i) in ranked.iter().take(self.k) {
            *votes.entry(self.labels[*i]).or_insert(0) += 1;
        }

        // BTreeMap iterates labels ascending, so the smallest label wins ties.
        let mut winner = (self.labels[ranked[0].1], 0);
        for (label, count) in votes {
            if count > winner.1 {
                winner = (label, count);
            }
        }
        winner.0
    }
}
