//! Fitted TF-IDF transformer (inference mode only).

use std::collections::{BTreeMap, HashMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::ModelError;
use super::{FeatureVector, Vectorizer};

pub const DEFAULT_TOKEN_PATTERN: &str = r"\b\w\w+\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
    None,
}

/// On-disk shape of the vectorizer artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfArtifact {
    pub vocabulary: HashMap<String, usize>,
    pub idf: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Norm,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Norm {
    Norm::L2
}

#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    lowercase: bool,
    token_re: Regex,
    ngram_range: (usize, usize),
    stop_words: HashSet<String>,
    sublinear_tf: bool,
    norm: Norm,
}

impl TfidfVectorizer {
    /// Validates a deserialized artifact and compiles its tokenizer.
    pub fn from_artifact(artifact: TfidfArtifact) -> Result<Self, ModelError> {
        if artifact.idf.is_empty() {
            return Err(ModelError::EmptyIdf);
        }
        let dimension = artifact.idf.len();
        if let Some((term, index)) = artifact.vocabulary.iter().find(|(_, i)| **i >= dimension) {
            return Err(ModelError::VocabularyIndex {
                term: term.clone(),
                index: *index,
                dimension,
            });
        }
        let (min, max) = artifact.ngram_range;
        if min == 0 || min > max {
            return Err(ModelError::NgramRange { min, max });
        }
        let token_re = Regex::new(&artifact.token_pattern)?;

        Ok(Self {
            vocabulary: artifact.vocabulary,
            idf: artifact.idf,
            lowercase: artifact.lowercase,
            token_re,
            ngram_range: artifact.ngram_range,
            stop_words: artifact.stop_words.into_iter().collect(),
            sublinear_tf: artifact.sublinear_tf,
            norm: artifact.norm,
        })
    }

    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.token_re
            .find_iter(text)
            .map(|m| m.as_str())
            .filter(|t| !self.stop_words.contains(*t))
            .collect()
    }

    /// Counts keyed by feature index. Ordered so the norm is summed in the
    /// same order on every call.
    fn term_counts(&self, tokens: &[&str]) -> BTreeMap<usize, f64> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        let (min_n, max_n) = self.ngram_range;

        for n in min_n..=max_n.min(tokens.len()) {
            for window in tokens.windows(n) {
                let gram = window.join(" ");
                if let Some(&index) = self.vocabulary.get(&gram) {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }
        counts
    }
}

impl Vectorizer for TfidfVectorizer {
    fn dimension(&self) -> usize {
        self.idf.len()
    }

    fn transform(&self, text: &str) -> FeatureVector {
        let lowered;
        let text = if self.lowercase {
            lowered = text.to_lowercase();
            lowered.as_str()
        } else {
            text
        };

        let tokens = self.tokenize(text);
        let weighted: Vec<(usize, f64)> = self
            .term_counts(&tokens)
            .into_iter()
            .map(|(index, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (index, tf * self.idf[index])
            })
            .collect();

        let scale = match self.norm {
            Norm::L2 => weighted.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Norm::L1 => weighted.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            Norm::None => 1.0,
        };
        let scale = if scale > 0.0 { scale } else { 1.0 };

        FeatureVector::from_pairs(
            self.dimension(),
            weighted.into_iter().map(|(i, v)| (i, v / scale)),
        )
    }
}
