//! Core types for PixGuard
//!
//! The label set is configuration, not something inferred from a model at
//! runtime. Classification results are fixed-shape records validated against
//! the label set when they are built, so a length mismatch surfaces as a
//! constructible-time error instead of a silently truncated response.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};

/// Ordered, fixed sequence of label names whose positions correspond 1:1 to
/// the classifier's output vector positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Create a label set from ordered label names.
    ///
    /// Rejects empty sets and duplicate names; both would desynchronize the
    /// positional mapping onto model outputs.
    pub fn new(labels: Vec<String>) -> Result<Self> {
        if labels.is_empty() {
            return Err(Error::config("label set must not be empty"));
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(Error::config(format!("duplicate label: {}", label)));
            }
        }
        Ok(Self { labels })
    }

    /// The canonical label set the comment model was trained with.
    pub fn comment_defaults() -> Self {
        Self {
            labels: vec![
                "toxic".to_string(),
                "obscene".to_string(),
                "insult".to_string(),
            ],
        }
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label names in canonical order
    pub fn names(&self) -> &[String] {
        &self.labels
    }

    /// Iterate over label names in canonical order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

/// A single (label, triggered) pair inside a classification result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelIndicator {
    /// Label name, taken from the label set
    pub label: String,

    /// Whether the classifier flagged this label (truthy model output)
    pub triggered: bool,
}

/// Multi-label toxicity judgment for a single piece of text.
///
/// Holds exactly one indicator per label in the label set, in canonical
/// order. Created fresh per request and never shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    indicators: Vec<LabelIndicator>,
}

impl ClassificationResult {
    /// Build a result by zipping the label set with per-label indicators.
    ///
    /// A length mismatch means the model and the configured label set have
    /// drifted apart; that is reported as the distinct
    /// [`Error::LabelMismatch`] variant rather than truncated or padded.
    pub fn from_indicators(label_set: &LabelSet, indicators: &[bool]) -> Result<Self> {
        if indicators.len() != label_set.len() {
            return Err(Error::LabelMismatch {
                expected: label_set.len(),
                actual: indicators.len(),
            });
        }
        Ok(Self {
            indicators: label_set
                .iter()
                .zip(indicators)
                .map(|(label, &triggered)| LabelIndicator {
                    label: label.to_string(),
                    triggered,
                })
                .collect(),
        })
    }

    /// All indicators in canonical label order
    pub fn indicators(&self) -> &[LabelIndicator] {
        &self.indicators
    }

    /// Labels whose indicator is true, in canonical label order
    pub fn triggered_labels(&self) -> Vec<&str> {
        self.indicators
            .iter()
            .filter(|i| i.triggered)
            .map(|i| i.label.as_str())
            .collect()
    }

    /// Whether any label was triggered
    pub fn is_flagged(&self) -> bool {
        self.indicators.iter().any(|i| i.triggered)
    }
}

/// Serializes as a `{label: 0|1}` map with keys in canonical label order,
/// matching the wire shape of the `scores` response field.
impl Serialize for ClassificationResult {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.indicators.len()))?;
        for indicator in &self.indicators {
            map.serialize_entry(&indicator.label, &u8::from(indicator.triggered))?;
        }
        map.end()
    }
}
