//! Tf-idf featurization of comment text

use ndarray::Array1;
use pixguard_core::{Error, Result};
use regex::Regex;
use std::collections::HashMap;

/// Word tokens of two or more characters, matching the vectorizer the model
/// was trained with. Single-character tokens carry no signal and are dropped.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Maps raw text onto the model's tf-idf feature space.
///
/// Vocabulary and idf weights come from the artifact and are immutable;
/// `transform` allocates a fresh feature vector per call.
#[derive(Debug)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Array1<f32>,
    token_pattern: Regex,
}

impl TfidfVectorizer {
    /// Build a vectorizer from the artifact's vocabulary and idf diagonal.
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f32>) -> Result<Self> {
        if idf.len() != vocabulary.len() {
            return Err(Error::artifact(format!(
                "idf has {} entries but vocabulary has {} tokens",
                idf.len(),
                vocabulary.len()
            )));
        }
        for (token, &index) in &vocabulary {
            if index >= vocabulary.len() {
                return Err(Error::artifact(format!(
                    "vocabulary index {} for token {:?} out of range for {} features",
                    index,
                    token,
                    vocabulary.len()
                )));
            }
        }
        let token_pattern = Regex::new(TOKEN_PATTERN)
            .map_err(|e| Error::artifact(format!("invalid token pattern: {}", e)))?;
        Ok(Self {
            vocabulary,
            idf: Array1::from(idf),
            token_pattern,
        })
    }

    /// Number of feature columns
    pub fn num_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Transform text into an l2-normalized tf-idf feature vector.
    ///
    /// Out-of-vocabulary tokens are ignored. Text with no known tokens
    /// (including the empty string) maps to the zero vector, which keeps the
    /// downstream prediction deterministic.
    pub fn transform(&self, text: &str) -> Array1<f32> {
        let mut features = Array1::<f32>::zeros(self.vocabulary.len());
        let lowered = text.to_lowercase();

        for token in self.token_pattern.find_iter(&lowered) {
            if let Some(&index) = self.vocabulary.get(token.as_str()) {
                features[index] += 1.0;
            }
        }

        features *= &self.idf;

        let norm = features.dot(&features).sqrt();
        if norm > 0.0 {
            features /= norm;
        }
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> TfidfVectorizer {
        let vocabulary = HashMap::from([
            ("idiot".to_string(), 0),
            ("hate".to_string(), 1),
            ("nice".to_string(), 2),
        ]);
        TfidfVectorizer::new(vocabulary, vec![1.0, 1.0, 1.0]).unwrap()
    }

    #[test]
    fn test_known_token_sets_its_column() {
        let features = vectorizer().transform("you are an idiot");
        assert_eq!(features[0], 1.0);
        assert_eq!(features[1], 0.0);
        assert_eq!(features[2], 0.0);
    }

    #[test]
    fn test_tokenization_is_case_insensitive() {
        let features = vectorizer().transform("IDIOT");
        assert_eq!(features[0], 1.0);
    }

    #[test]
    fn test_unknown_tokens_yield_zero_vector() {
        let features = vectorizer().transform("have a wonderful day");
        assert!(features.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_empty_text_yields_zero_vector() {
        let features = vectorizer().transform("");
        assert!(features.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_multiple_hits_are_l2_normalized() {
        let features = vectorizer().transform("idiot, I hate this");
        let norm = features.dot(&features).sqrt();
        assert!((norm - 1.0).abs() < 1e-6);
        assert!((features[0] - features[1]).abs() < 1e-6);
    }

    #[test]
    fn test_idf_length_mismatch_rejected() {
        let vocabulary = HashMap::from([("idiot".to_string(), 0)]);
        assert!(TfidfVectorizer::new(vocabulary, vec![1.0, 2.0]).is_err());
    }

    #[test]
    fn test_out_of_range_vocabulary_index_rejected() {
        let vocabulary = HashMap::from([("idiot".to_string(), 5)]);
        assert!(TfidfVectorizer::new(vocabulary, vec![1.0]).is_err());
    }
}
