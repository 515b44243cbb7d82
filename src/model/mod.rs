//! Model artifacts
//!
//! - `vectorizer`: fitted text to sparse feature vector transform
//! - `classifier`: fitted linear classifiers behind the `Classifier` trait
//! - `artifacts`: loading and pairing both from disk

pub mod artifacts;
pub mod classifier;
pub mod vectorizer;

pub use artifacts::{ModelArtifacts, DEFAULT_MODEL_PATH, DEFAULT_VECTORIZER_PATH};
pub use classifier::{Classifier, LogisticRegression, MultinomialNb, SentimentModel};
pub use vectorizer::{Norm, SparseVector, TextVectorizer};
