//! Classifier Module
//!
//! Fitted linear sentiment classifiers evaluated over sparse feature vectors.
//! Two artifact kinds are supported: binary logistic regression and
//! multinomial naive Bayes.

use serde::{Deserialize, Serialize};

use super::vectorizer::SparseVector;
use crate::utils::error::{Result, SentimentError};

/// Common interface over fitted classifiers
pub trait Classifier: Send + Sync {
    /// Short identifier of the model family
    fn kind(&self) -> &'static str;

    /// Number of input features expected
    fn n_features(&self) -> usize;

    /// Class labels in probability column order
    fn classes(&self) -> &[i64];

    /// Per-class probabilities, aligned with `classes()`
    fn predict_proba(&self, x: &SparseVector) -> Result<Vec<f64>>;

    /// Predicted class label
    fn predict(&self, x: &SparseVector) -> Result<i64>;
}

fn check_dimensions(expected: usize, x: &SparseVector) -> Result<()> {
    if x.n_features != expected {
        return Err(SentimentError::Model(format!(
            "feature vector has {} columns, model expects {}",
            x.n_features, expected
        )));
    }
    Ok(())
}

fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// Binary logistic regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// One weight per feature
    pub coef: Vec<f64>,
    pub intercept: f64,
    /// `[negative_label, positive_label]`
    pub classes: Vec<i64>,
}

impl LogisticRegression {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            coef,
            intercept,
            classes: vec![0, 1],
        }
    }

    /// Signed distance to the separating hyperplane
    pub fn decision_function(&self, x: &SparseVector) -> Result<f64> {
        check_dimensions(self.coef.len(), x)?;
        Ok(x.dot(&self.coef) + self.intercept)
    }

    pub fn validate(&self) -> Result<()> {
        if self.classes.len() != 2 {
            return Err(SentimentError::Model(format!(
                "logistic regression expects 2 classes, got {}",
                self.classes.len()
            )));
        }
        if self.coef.is_empty() {
            return Err(SentimentError::Model("coef must not be empty".to_string()));
        }
        if !self.intercept.is_finite() || self.coef.iter().any(|w| !w.is_finite()) {
            return Err(SentimentError::Model(
                "coefficients must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl Classifier for LogisticRegression {
    fn kind(&self) -> &'static str {
        "logistic_regression"
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_proba(&self, x: &SparseVector) -> Result<Vec<f64>> {
        let p = sigmoid(self.decision_function(x)?);
        Ok(vec![1.0 - p, p])
    }

    fn predict(&self, x: &SparseVector) -> Result<i64> {
        let positive = self.decision_function(x)? > 0.0;
        Ok(self.classes[usize::from(positive)])
    }
}

/// Multinomial naive Bayes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    /// Log prior per class
    pub class_log_prior: Vec<f64>,
    /// Log probability of each feature given each class, `[class][feature]`
    pub feature_log_prob: Vec<Vec<f64>>,
    pub classes: Vec<i64>,
}

impl MultinomialNb {
    /// Joint log likelihood per class
    pub fn joint_log_likelihood(&self, x: &SparseVector) -> Result<Vec<f64>> {
        check_dimensions(self.n_features(), x)?;
        Ok(self
            .feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(row, prior)| x.dot(row) + prior)
            .collect())
    }

    pub fn validate(&self) -> Result<()> {
        if self.classes.len() != 2 {
            return Err(SentimentError::Model(format!(
                "naive Bayes expects 2 classes, got {}",
                self.classes.len()
            )));
        }
        if self.class_log_prior.len() != self.classes.len()
            || self.feature_log_prob.len() != self.classes.len()
        {
            return Err(SentimentError::Model(
                "class_log_prior and feature_log_prob must have one row per class".to_string(),
            ));
        }
        let n = self.n_features();
        if n == 0 || self.feature_log_prob.iter().any(|row| row.len() != n) {
            return Err(SentimentError::Model(
                "feature_log_prob rows must be non-empty and equally sized".to_string(),
            ));
        }
        let all_finite = self
            .class_log_prior
            .iter()
            .chain(self.feature_log_prob.iter().flatten())
            .all(|w| w.is_finite());
        if !all_finite {
            return Err(SentimentError::Model(
                "log probabilities must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

impl Classifier for MultinomialNb {
    fn kind(&self) -> &'static str {
        "multinomial_nb"
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob.first().map_or(0, Vec::len)
    }

    fn classes(&self) -> &[i64] {
        &self.classes
    }

    fn predict_proba(&self, x: &SparseVector) -> Result<Vec<f64>> {
        let jll = self.joint_log_likelihood(x)?;
        let max = jll.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = jll.iter().map(|v| (v - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        Ok(exp.into_iter().map(|v| v / total).collect())
    }

    fn predict(&self, x: &SparseVector) -> Result<i64> {
        let jll = self.joint_log_likelihood(x)?;
        // First maximum wins on ties
        let best = jll
            .iter()
            .enumerate()
            .fold(0, |best, (idx, v)| if *v > jll[best] { idx } else { best });
        Ok(self.classes[best])
    }
}

/// Classifier artifact as stored on disk, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SentimentModel {
    LogisticRegression(LogisticRegression),
    MultinomialNb(MultinomialNb),
}

impl SentimentModel {
    /// Parse a classifier from its JSON representation and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            SentimentModel::LogisticRegression(m) => m.validate(),
            SentimentModel::MultinomialNb(m) => m.validate(),
        }
    }

    fn inner(&self) -> &dyn Classifier {
        match self {
            SentimentModel::LogisticRegression(m) => m,
            SentimentModel::MultinomialNb(m) => m,
        }
    }
}

impl Classifier for SentimentModel {
    fn kind(&self) -> &'static str {
        self.inner().kind()
    }

    fn n_features(&self) -> usize {
        self.inner().n_features()
    }

    fn classes(&self) -> &[i64] {
        self.inner().classes()
    }

    fn predict_proba(&self, x: &SparseVector) -> Result<Vec<f64>> {
        self.inner().predict_proba(x)
    }

    fn predict(&self, x: &SparseVector) -> Result<i64> {
        self.inner().predict(x)
    }
}
