//! PixGuard Classifiers
//!
//! Multi-label toxicity classification for comment text.
//!
//! The model artifact is a tf-idf vectorizer plus one binary logistic
//! regression per label, exported from the training pipeline as JSON and
//! deserialized once at startup. Inference is pure CPU work on immutable
//! state and runs in well under a millisecond, so the classifier is shared
//! read-only across request handlers without locking.

pub mod artifact;
pub mod linear;
pub mod service;
pub mod vectorizer;

pub use artifact::CommentModelArtifact;
pub use linear::MultiLabelLogisticRegression;
pub use service::ToxicityClassifier;
pub use vectorizer::TfidfVectorizer;
