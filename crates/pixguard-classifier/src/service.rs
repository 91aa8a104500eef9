//! The toxicity classification service

use ndarray::Array1;
use pixguard_core::{ClassificationResult, Error, LabelSet, Result};
use std::path::Path;
use tracing::info;

use crate::artifact::CommentModelArtifact;
use crate::linear::MultiLabelLogisticRegression;
use crate::vectorizer::TfidfVectorizer;

/// Multi-label toxicity classifier for comment text.
///
/// Constructed exactly once at process startup from a model artifact and the
/// configured label set, then shared read-only across all requests. All
/// fields are immutable after construction, so the type is `Send + Sync`
/// and needs no locking for concurrent inference.
#[derive(Debug)]
pub struct ToxicityClassifier {
    label_set: LabelSet,
    vectorizer: TfidfVectorizer,
    regression: MultiLabelLogisticRegression,
    threshold: f32,
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ToxicityClassifier>();
};

impl ToxicityClassifier {
    /// Load the classifier from a model artifact on disk.
    ///
    /// Fails with a startup-fatal error if the artifact is missing, corrupt,
    /// or produces a different number of outputs than `label_set` has labels.
    /// The label set is configuration and is never inferred from the model.
    pub fn load(path: impl AsRef<Path>, label_set: LabelSet) -> Result<Self> {
        let artifact = CommentModelArtifact::load(&path)?;
        info!(
            model = %path.as_ref().display(),
            labels = artifact.num_labels(),
            features = artifact.num_features(),
            "loaded comment model"
        );
        Self::from_artifact(artifact, label_set)
    }

    /// Build the classifier from an already-deserialized artifact.
    pub fn from_artifact(artifact: CommentModelArtifact, label_set: LabelSet) -> Result<Self> {
        if artifact.num_labels() != label_set.len() {
            return Err(Error::LabelMismatch {
                expected: label_set.len(),
                actual: artifact.num_labels(),
            });
        }

        let vectorizer = TfidfVectorizer::new(artifact.vocabulary, artifact.idf)?;
        let regression = MultiLabelLogisticRegression::new(artifact.weights, artifact.intercepts)?;

        Ok(Self {
            label_set,
            vectorizer,
            regression,
            threshold: artifact.threshold,
        })
    }

    /// The configured label set, in canonical order
    pub fn label_set(&self) -> &LabelSet {
        &self.label_set
    }

    /// Classify a piece of comment text.
    ///
    /// Pure function of (loaded model, text): no side effects, identical
    /// input yields an identical result. Empty text is not rejected here;
    /// it featurizes to the zero vector, so every label scores its
    /// intercept-only probability. With the shipped models that is below
    /// threshold, i.e. an all-false result. Input validation (trimming,
    /// rejecting empty comments) belongs to the caller.
    pub fn classify(&self, text: &str) -> Result<ClassificationResult> {
        let features = self.vectorizer.transform(text);
        let probabilities = self.regression.probabilities(&features)?;
        self.to_result(&probabilities)
    }

    fn to_result(&self, probabilities: &Array1<f32>) -> Result<ClassificationResult> {
        // Construction re-checks the output length against the label set, so
        // a drifted model surfaces as LabelMismatch, never a partial result.
        let indicators: Vec<bool> = probabilities.iter().map(|&p| p > self.threshold).collect();
        ClassificationResult::from_indicators(&self.label_set, &indicators)
    }
}
