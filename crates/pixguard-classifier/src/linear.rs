//! Multi-label logistic regression over tf-idf features

use ndarray::{Array1, Array2};
use pixguard_core::{Error, Result};

/// One independent binary logistic regression per label (one-vs-rest).
///
/// Unlike a softmax classifier the per-label probabilities do not sum to
/// one; each label is scored on its own.
#[derive(Debug)]
pub struct MultiLabelLogisticRegression {
    /// matrix with shape (l, f): one row per label, one column per feature
    weights: Array2<f32>,

    /// intercept per label, shape (l,)
    intercept: Array1<f32>,
}

impl MultiLabelLogisticRegression {
    /// Build the regression from per-label weight rows and intercepts.
    pub fn new(weights: Vec<Vec<f32>>, intercepts: Vec<f32>) -> Result<Self> {
        let num_labels = weights.len();
        if num_labels == 0 {
            return Err(Error::artifact("model has no weight rows"));
        }
        let num_features = weights[0].len();
        if weights.iter().any(|row| row.len() != num_features) {
            return Err(Error::artifact("weight rows have inconsistent widths"));
        }
        if intercepts.len() != num_labels {
            return Err(Error::artifact(format!(
                "{} intercepts for {} weight rows",
                intercepts.len(),
                num_labels
            )));
        }

        let flat: Vec<f32> = weights.into_iter().flatten().collect();
        let weights = Array2::from_shape_vec((num_labels, num_features), flat)
            .map_err(|e| Error::artifact(format!("cannot shape weight matrix: {}", e)))?;

        Ok(Self {
            weights,
            intercept: Array1::from(intercepts),
        })
    }

    /// Number of labels this regression scores
    pub fn num_labels(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of feature columns expected by `probabilities`
    pub fn num_features(&self) -> usize {
        self.weights.ncols()
    }

    /// Per-label probabilities for one feature vector, shape (l,).
    pub fn probabilities(&self, features: &Array1<f32>) -> Result<Array1<f32>> {
        if features.len() != self.num_features() {
            return Err(Error::inference(format!(
                "feature vector has {} entries, model expects {}",
                features.len(),
                self.num_features()
            )));
        }
        let mut scores = self.weights.dot(features) + &self.intercept;
        scores.mapv_inplace(sigmoid);
        Ok(scores)
    }
}

fn sigmoid(x: f32) -> f32 {
    1. / (1. + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn regression() -> MultiLabelLogisticRegression {
        MultiLabelLogisticRegression::new(
            vec![vec![4.0, 0.0], vec![0.0, 4.0], vec![2.0, 2.0]],
            vec![-2.0, -2.0, -2.0],
        )
        .unwrap()
    }

    #[test]
    fn test_probabilities_per_label() {
        let probs = regression().probabilities(&array![1.0, 0.0]).unwrap();

        assert_eq!(probs.len(), 3);
        assert!((probs[0] - sigmoid(2.0)).abs() < 1e-6);
        assert!((probs[1] - sigmoid(-2.0)).abs() < 1e-6);
        assert!((probs[2] - sigmoid(0.0)).abs() < 1e-6);
    }

    #[test]
    fn test_zero_features_score_the_intercept() {
        let probs = regression().probabilities(&array![0.0, 0.0]).unwrap();
        for p in probs.iter() {
            assert!((p - sigmoid(-2.0)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_feature_width_mismatch_rejected() {
        assert!(regression().probabilities(&array![1.0]).is_err());
    }

    #[test]
    fn test_ragged_weight_rows_rejected() {
        let result = MultiLabelLogisticRegression::new(
            vec![vec![1.0, 2.0], vec![1.0]],
            vec![0.0, 0.0],
        );
        assert!(result.is_err());
    }
}
