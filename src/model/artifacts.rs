//! Artifact loading
//!
//! Reads the classifier and vectorizer JSON artifacts from disk and checks
//! that they fit together. Any failure here is fatal for the caller.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::info;

use super::classifier::{Classifier, SentimentModel};
use super::vectorizer::TextVectorizer;
use crate::utils::error::{Result, SentimentError};

/// Default location of the classifier artifact
pub const DEFAULT_MODEL_PATH: &str = "models/sentiment_model.json";

/// Default location of the vectorizer artifact
pub const DEFAULT_VECTORIZER_PATH: &str = "models/tfidf_vectorizer.json";

/// Read and deserialize a JSON artifact
fn read_json_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(SentimentError::PathNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| SentimentError::Artifact(path.to_path_buf(), e.to_string()))
}

/// Load and validate a vectorizer artifact
pub fn load_vectorizer(path: &Path) -> Result<TextVectorizer> {
    let vectorizer: TextVectorizer = read_json_artifact(path)?;
    vectorizer
        .validate()
        .map_err(|e| SentimentError::Artifact(path.to_path_buf(), e.to_string()))?;
    Ok(vectorizer)
}

/// Load and validate a classifier artifact
pub fn load_model(path: &Path) -> Result<SentimentModel> {
    let model: SentimentModel = read_json_artifact(path)?;
    model
        .validate()
        .map_err(|e| SentimentError::Artifact(path.to_path_buf(), e.to_string()))?;
    Ok(model)
}

/// Both fitted artifacts, loaded once and shared read-only afterwards
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub model: SentimentModel,
    pub vectorizer: TextVectorizer,
    pub model_path: Option<PathBuf>,
    pub vectorizer_path: Option<PathBuf>,
}

impl ModelArtifacts {
    /// Pair in-memory artifacts, checking that their dimensions agree
    pub fn new(model: SentimentModel, vectorizer: TextVectorizer) -> Result<Self> {
        model.validate()?;
        vectorizer.validate()?;

        if model.n_features() != vectorizer.n_features() {
            return Err(SentimentError::Model(format!(
                "classifier expects {} features but vectorizer produces {}",
                model.n_features(),
                vectorizer.n_features()
            )));
        }

        Ok(Self {
            model,
            vectorizer,
            model_path: None,
            vectorizer_path: None,
        })
    }

    /// Load both artifacts from disk
    pub fn load(model_path: &Path, vectorizer_path: &Path) -> Result<Self> {
        let model = load_model(model_path)?;
        let vectorizer = load_vectorizer(vectorizer_path)?;

        let mut artifacts = Self::new(model, vectorizer)?;
        artifacts.model_path = Some(model_path.to_path_buf());
        artifacts.vectorizer_path = Some(vectorizer_path.to_path_buf());

        info!(
            "Loaded {} classifier ({} features) from {:?}",
            artifacts.model.kind(),
            artifacts.model.n_features(),
            model_path
        );
        info!(
            "Loaded vectorizer (idf: {}, ngram_range: {:?}) from {:?}",
            artifacts.vectorizer.uses_idf(),
            artifacts.vectorizer.ngram_range,
            vectorizer_path
        );

        Ok(artifacts)
    }

    /// One-line summary for logs and the CLI
    pub fn summary(&self) -> String {
        format!(
            "{} over {} features (idf: {}, ngram_range: {:?}, norm: {:?})",
            self.model.kind(),
            self.model.n_features(),
            self.vectorizer.uses_idf(),
            self.vectorizer.ngram_range,
            self.vectorizer.norm
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::classifier::LogisticRegression;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_from_disk() {
        let dir = TempDir::new().unwrap();
        let model = write(
            &dir,
            "model.json",
            r#"{"kind": "logistic_regression", "coef": [1.0, -1.0], "intercept": 0.0, "classes": [0, 1]}"#,
        );
        let vectorizer = write(
            &dir,
            "vectorizer.json",
            r#"{"vocabulary": {"good": 0, "bad": 1}, "idf": [1.2, 1.5]}"#,
        );

        let artifacts = ModelArtifacts::load(&model, &vectorizer).unwrap();
        assert_eq!(artifacts.model.n_features(), 2);
        assert_eq!(artifacts.model_path.as_deref(), Some(model.as_path()));
        assert!(artifacts.summary().starts_with("logistic_regression over 2 features"));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_model(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SentimentError::PathNotFound(_)));
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "vectorizer.json", "{not json");
        let err = load_vectorizer(&path).unwrap_err();
        assert!(matches!(err, SentimentError::Artifact(_, _)));
    }

    #[test]
    fn test_invalid_artifact_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "vectorizer.json", r#"{"vocabulary": {}}"#);
        let err = load_vectorizer(&path).unwrap_err();
        assert!(format!("{}", err).contains("vectorizer.json"));
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let model = SentimentModel::LogisticRegression(LogisticRegression::new(vec![1.0; 3], 0.0));
        let vectorizer = TextVectorizer::from_terms(&["good", "bad"]);
        assert!(ModelArtifacts::new(model, vectorizer).is_err());
    }
}
