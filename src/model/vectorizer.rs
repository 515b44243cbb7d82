//! Text Vectorizer Module
//!
//! Evaluates a fitted bag-of-n-grams vectorizer (raw counts or TF-IDF) over
//! cleaned review text. Fitting happens offline; this module only reads the
//! fitted vocabulary and IDF weights.

use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::error::{Result, SentimentError};

/// Maximal runs of letters, numbers and underscores.
/// Runs shorter than two characters are dropped in `analyze`.
const TOKEN_PATTERN: &str = r"[\p{L}\p{N}_]+";

fn token_regex() -> &'static Regex {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();
    TOKEN_RE.get_or_init(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"))
}

/// Sparse feature vector with entries sorted by column index
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SparseVector {
    /// Dimension of the dense equivalent
    pub n_features: usize,
    /// Non-zero `(column, value)` pairs in ascending column order
    pub entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Create an all-zero vector of the given dimension
    pub fn zeros(n_features: usize) -> Self {
        Self {
            n_features,
            entries: Vec::new(),
        }
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product with a dense weight row
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(idx, value)| value * dense.get(idx).copied().unwrap_or(0.0))
            .sum()
    }

    /// Expand into a dense vector
    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.n_features];
        for &(idx, value) in &self.entries {
            dense[idx] = value;
        }
        dense
    }
}

/// Row normalization applied after weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    #[default]
    L2,
    None,
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_true() -> bool {
    true
}

/// Fitted text vectorizer artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextVectorizer {
    /// Term (or space-joined n-gram) to column index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per column; `None` keeps raw term counts
    #[serde(default)]
    pub idf: Option<Vec<f64>>,

    /// Inclusive `(min_n, max_n)` word n-gram range
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Replace term frequency `tf` with `1 + ln(tf)`
    #[serde(default)]
    pub sublinear_tf: bool,

    #[serde(default)]
    pub norm: Norm,

    /// Lowercase input before tokenizing
    #[serde(default = "default_true")]
    pub lowercase: bool,
}

impl TextVectorizer {
    /// Build a vectorizer from an ordered vocabulary with unit IDF weights
    pub fn from_terms<S: AsRef<str>>(terms: &[S]) -> Self {
        let vocabulary = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.as_ref().to_string(), idx))
            .collect();

        Self {
            vocabulary,
            idf: None,
            ngram_range: default_ngram_range(),
            sublinear_tf: false,
            norm: Norm::L2,
            lowercase: true,
        }
    }

    /// Attach IDF weights
    pub fn with_idf(mut self, idf: Vec<f64>) -> Self {
        self.idf = Some(idf);
        self
    }

    /// Configure the n-gram range
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    /// Configure row normalization
    pub fn with_norm(mut self, norm: Norm) -> Self {
        self.norm = norm;
        self
    }

    /// Configure sublinear term frequency scaling
    pub fn with_sublinear_tf(mut self, sublinear_tf: bool) -> Self {
        self.sublinear_tf = sublinear_tf;
        self
    }

    /// Parse a vectorizer from its JSON representation and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let vectorizer: Self = serde_json::from_str(json)?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Number of output columns
    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Whether IDF reweighting is applied
    pub fn uses_idf(&self) -> bool {
        self.idf.is_some()
    }

    /// Validate the vectorizer
    pub fn validate(&self) -> Result<()> {
        let n = self.n_features();
        if n == 0 {
            return Err(SentimentError::Vectorizer(
                "vocabulary must not be empty".to_string(),
            ));
        }

        let mut seen = vec![false; n];
        for (term, &idx) in &self.vocabulary {
            if idx >= n {
                return Err(SentimentError::Vectorizer(format!(
                    "term '{}' maps to column {} outside 0..{}",
                    term, idx, n
                )));
            }
            if seen[idx] {
                return Err(SentimentError::Vectorizer(format!(
                    "column {} is assigned to more than one term",
                    idx
                )));
            }
            seen[idx] = true;
        }

        if let Some(idf) = &self.idf {
            if idf.len() != n {
                return Err(SentimentError::Vectorizer(format!(
                    "idf has {} weights but vocabulary has {} terms",
                    idf.len(),
                    n
                )));
            }
            if idf.iter().any(|w| !w.is_finite()) {
                return Err(SentimentError::Vectorizer(
                    "idf weights must be finite".to_string(),
                ));
            }
        }

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SentimentError::Vectorizer(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }

        Ok(())
    }

    /// Split text into word n-grams in document order
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = token_regex()
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| token.chars().nth(1).is_some())
            .collect();
        let (min_n, max_n) = self.ngram_range;

        let mut grams = Vec::new();
        for n in min_n..=max_n {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                grams.push(window.join(" "));
            }
        }
        grams
    }

    /// Transform text into a weighted, normalized feature vector
    ///
    /// Out-of-vocabulary n-grams are ignored, so text with no known terms
    /// yields an empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for gram in self.analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&gram) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.sublinear_tf { 1.0 + tf.ln() } else { tf };
                let weight = match &self.idf {
                    Some(idf) => tf * idf[idx],
                    None => tf,
                };
                (idx, weight)
            })
            .collect();

        let norm = match self.norm {
            Norm::L1 => entries.iter().map(|(_, v)| v.abs()).sum::<f64>(),
            Norm::L2 => entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt(),
            Norm::None => 1.0,
        };
        if norm > 0.0 && norm != 1.0 {
            for (_, value) in entries.iter_mut() {
                *value /= norm;
            }
        }

        SparseVector {
            n_features: self.n_features(),
            entries,
        }
    }
}
