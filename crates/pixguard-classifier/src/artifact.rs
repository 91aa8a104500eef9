//! Deserialization and structural validation of the trained comment model

use pixguard_core::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

fn default_threshold() -> f32 {
    0.5
}

/// Serialized comment model: a tf-idf vectorizer plus one binary logistic
/// regression per label, exported from the training pipeline as JSON.
///
/// The artifact is immutable once loaded. Structural invariants are checked
/// at load time so a corrupt export fails the process at startup instead of
/// surfacing mid-request.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentModelArtifact {
    /// Token to feature-column mapping
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per feature column
    pub idf: Vec<f32>,

    /// Regression coefficients, one row per label, one column per feature
    pub weights: Vec<Vec<f32>>,

    /// Regression intercept per label
    pub intercepts: Vec<f32>,

    /// Probability cutoff for a label to count as triggered
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

impl CommentModelArtifact {
    /// Load and validate an artifact from a JSON file.
    ///
    /// Any failure here is a startup/configuration error: a missing or
    /// unreadable file, malformed JSON, or a structurally inconsistent
    /// export.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            Error::artifact(format!("cannot open model file {:?}: {}", path, e))
        })?;
        let artifact: Self = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            Error::artifact(format!("cannot deserialize model file {:?}: {}", path, e))
        })?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Number of labels this model produces, one output per weights row
    pub fn num_labels(&self) -> usize {
        self.weights.len()
    }

    /// Number of tf-idf feature columns
    pub fn num_features(&self) -> usize {
        self.vocabulary.len()
    }

    fn validate(&self) -> Result<()> {
        let num_features = self.vocabulary.len();

        if num_features == 0 {
            return Err(Error::artifact("vocabulary is empty"));
        }
        if self.idf.len() != num_features {
            return Err(Error::artifact(format!(
                "idf has {} entries but vocabulary has {} tokens",
                self.idf.len(),
                num_features
            )));
        }
        for index in self.vocabulary.values() {
            if *index >= num_features {
                return Err(Error::artifact(format!(
                    "vocabulary index {} out of range for {} features",
                    index, num_features
                )));
            }
        }
        if self.weights.is_empty() {
            return Err(Error::artifact("model has no weight rows"));
        }
        for (row, weights) in self.weights.iter().enumerate() {
            if weights.len() != num_features {
                return Err(Error::artifact(format!(
                    "weights row {} has {} columns, expected {}",
                    row,
                    weights.len(),
                    num_features
                )));
            }
        }
        if self.intercepts.len() != self.weights.len() {
            return Err(Error::artifact(format!(
                "{} intercepts for {} weight rows",
                self.intercepts.len(),
                self.weights.len()
            )));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::artifact(format!(
                "threshold {} outside [0, 1]",
                self.threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_artifact(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_artifact() {
        let file = write_artifact(
            r#"{
                "vocabulary": {"idiot": 0, "hate": 1},
                "idf": [1.0, 1.2],
                "weights": [[3.0, 2.0], [0.5, 0.0]],
                "intercepts": [-1.0, -2.0]
            }"#,
        );

        let artifact = CommentModelArtifact::load(file.path()).unwrap();
        assert_eq!(artifact.num_labels(), 2);
        assert_eq!(artifact.num_features(), 2);
        assert_eq!(artifact.threshold, 0.5);
    }

    #[test]
    fn test_missing_file_is_artifact_error() {
        let err = CommentModelArtifact::load("/nonexistent/comment-model.json").unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }

    #[test]
    fn test_malformed_json_is_artifact_error() {
        let file = write_artifact("{ not json");
        let err = CommentModelArtifact::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Artifact(_)));
    }

    #[test]
    fn test_ragged_weights_rejected() {
        let file = write_artifact(
            r#"{
                "vocabulary": {"idiot": 0, "hate": 1},
                "idf": [1.0, 1.0],
                "weights": [[3.0, 2.0], [0.5]],
                "intercepts": [-1.0, -2.0]
            }"#,
        );
        assert!(CommentModelArtifact::load(file.path()).is_err());
    }

    #[test]
    fn test_intercept_count_must_match_weight_rows() {
        let file = write_artifact(
            r#"{
                "vocabulary": {"idiot": 0},
                "idf": [1.0],
                "weights": [[3.0], [0.5]],
                "intercepts": [-1.0]
            }"#,
        );
        assert!(CommentModelArtifact::load(file.path()).is_err());
    }

    #[test]
    fn test_vocabulary_index_out_of_range_rejected() {
        let file = write_artifact(
            r#"{
                "vocabulary": {"idiot": 5},
                "idf": [1.0],
                "weights": [[3.0]],
                "intercepts": [-1.0]
            }"#,
        );
        assert!(CommentModelArtifact::load(file.path()).is_err());
    }
}
