//! Pairwise similarity metrics
//!
//! Computes every sub-metric of the ideal-profile comparison for one
//! candidate/reference pair. Standardization is joint: both vectors are
//! stacked as a two-row matrix and each compound column is z-scored across
//! the pair, which isolates chemotype shape from absolute intensity.

use crate::config::BlendWeights;
use chemomatch_core::stats::{
    cosine_similarity, euclidean_similarity, norm, pearson, standardize_columns, std_dev,
};
use serde::Serialize;

/// Standard deviation below which a profile counts as flat
const FLAT_STD: f64 = 1e-12;

/// Sub-metric scores for one comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubMetrics {
    /// Cosine of the standardized vectors; `None` when a standardized row is all zeros
    pub z_scored_cosine: Option<f64>,
    pub raw_cosine: f64,
    pub z_scored_euclidean: f64,
    pub raw_euclidean: f64,
    /// Pearson on standardized vectors, negative values clamped to 0
    pub z_scored_correlation: f64,
    /// Pearson on raw vectors, negative values clamped to 0
    pub raw_correlation: f64,
    /// Weighted blend of the z-scored metrics and raw cosine
    pub combined: f64,
    /// Whether the overall score fell back to raw cosine
    pub used_fallback: bool,
}

impl SubMetrics {
    /// Compute all sub-metrics. `used_fallback` is left `false`; the engine decides it.
    ///
    /// # Panics
    /// Panics if the vectors have different lengths.
    pub fn compute(candidate: &[f64], reference: &[f64], weights: &BlendWeights) -> Self {
        let scaled = standardize_columns(&[candidate, reference]);
        let (candidate_z, reference_z) = (&scaled[0], &scaled[1]);

        let z_scored_cosine = if norm(candidate_z) > 0.0 && norm(reference_z) > 0.0 {
            Some(cosine_similarity(candidate_z, reference_z))
        } else {
            None
        };
        let raw_cosine = cosine_similarity(candidate, reference);

        let z_scored_euclidean = euclidean_similarity(candidate_z, reference_z);
        let raw_euclidean = euclidean_similarity(candidate, reference);

        // correlation is undefined when either raw profile is flat
        let (z_scored_correlation, raw_correlation) =
            if candidate.len() > 1 && std_dev(candidate) > FLAT_STD && std_dev(reference) > FLAT_STD {
                (
                    pearson(candidate_z, reference_z).max(0.0),
                    pearson(candidate, reference).max(0.0),
                )
            } else {
                (0.0, 0.0)
            };

        let combined = weights.z_cosine * z_scored_cosine.unwrap_or(0.0)
            + weights.z_euclidean * z_scored_euclidean
            + weights.z_correlation * z_scored_correlation
            + weights.raw_cosine * raw_cosine;

        Self {
            z_scored_cosine,
            raw_cosine,
            z_scored_euclidean,
            raw_euclidean,
            z_scored_correlation,
            raw_correlation,
            combined,
            used_fallback: false,
        }
    }

    /// Named scores, for display
    pub fn named(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("z_scored_cosine_similarity", self.z_scored_cosine.unwrap_or(0.0)),
            ("original_cosine_similarity", self.raw_cosine),
            ("z_scored_euclidean_similarity", self.z_scored_euclidean),
            ("original_euclidean_similarity", self.raw_euclidean),
            ("z_scored_correlation_similarity", self.z_scored_correlation),
            ("original_correlation_similarity", self.raw_correlation),
            ("combined_similarity", self.combined),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let v = [0.2, 0.01, 0.5, 0.3, 0.001];
        let m = SubMetrics::compute(&v, &v, &BlendWeights::default());

        assert!((m.raw_cosine - 1.0).abs() < 1e-12);
        assert_eq!(m.z_scored_cosine, None);
        assert_eq!(m.z_scored_euclidean, 1.0);
        assert_eq!(m.raw_euclidean, 1.0);
        assert!((m.raw_correlation - 1.0).abs() < 1e-12);
        // standardized rows are all zeros
        assert_eq!(m.z_scored_correlation, 0.0);
        assert!((m.combined - (0.2 + 0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_two_row_standardization_is_anti_aligned() {
        let candidate = [0.2, 0.05, 0.6, 0.1];
        let reference = [0.3, 0.05, 0.4, 0.1];
        let m = SubMetrics::compute(&candidate, &reference, &BlendWeights::default());

        // each varying column becomes +1/-1 with opposite signs
        assert!((m.z_scored_cosine.unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(m.z_scored_correlation, 0.0);
        assert!(m.raw_cosine > 0.9);
    }

    #[test]
    fn test_negative_raw_correlation_clamped() {
        let candidate = [0.9, 0.5, 0.1];
        let reference = [0.1, 0.5, 0.9];
        let m = SubMetrics::compute(&candidate, &reference, &BlendWeights::default());
        assert_eq!(m.raw_correlation, 0.0);
        assert!(m.combined.is_finite());
    }

    #[test]
    fn test_flat_reference_has_zero_correlation() {
        let candidate = [0.9, 0.5, 0.1];
        let reference = [0.2, 0.2, 0.2];
        let m = SubMetrics::compute(&candidate, &reference, &BlendWeights::default());
        assert_eq!(m.raw_correlation, 0.0);
        assert_eq!(m.z_scored_correlation, 0.0);
        assert!(!m.raw_cosine.is_nan());
    }

    #[test]
    fn test_named_has_every_metric() {
        let v = [0.1, 0.2];
        let m = SubMetrics::compute(&v, &v, &BlendWeights::default());
        let named = m.named();
        assert_eq!(named.len(), 7);
        assert_eq!(named[1].0, "original_cosine_similarity");
    }
}
