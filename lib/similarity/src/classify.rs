//! Match rating buckets
//!
//! Maps a similarity score to one of seven ordered labels. Thresholds are
//! half-open with the lower bound inclusive. Any real input is accepted:
//! negative scores, scores above 1 and NaN all land in a bucket.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Rating bucket, ordered from worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchRating {
    #[serde(rename = "Very Different")]
    VeryDifferent,
    #[serde(rename = "Poor Match")]
    Poor,
    #[serde(rename = "Moderate Match")]
    Moderate,
    #[serde(rename = "Good Match")]
    Good,
    #[serde(rename = "Very Good Match")]
    VeryGood,
    #[serde(rename = "Excellent Match")]
    Excellent,
    #[serde(rename = "Perfect Match")]
    Perfect,
}

/// Lower bounds, best bucket first
const THRESHOLDS: [(f64, MatchRating); 6] = [
    (0.9, MatchRating::Perfect),
    (0.8, MatchRating::Excellent),
    (0.7, MatchRating::VeryGood),
    (0.6, MatchRating::Good),
    (0.5, MatchRating::Moderate),
    (0.3, MatchRating::Poor),
];

impl MatchRating {
    pub fn label(self) -> &'static str {
        match self {
            MatchRating::Perfect => "Perfect Match",
            MatchRating::Excellent => "Excellent Match",
            MatchRating::VeryGood => "Very Good Match",
            MatchRating::Good => "Good Match",
            MatchRating::Moderate => "Moderate Match",
            MatchRating::Poor => "Poor Match",
            MatchRating::VeryDifferent => "Very Different",
        }
    }

    /// Inclusive lower bound of this bucket (`None` for the catch-all bucket)
    pub fn lower_bound(self) -> Option<f64> {
        THRESHOLDS
            .iter()
            .find(|(_, rating)| *rating == self)
            .map(|(bound, _)| *bound)
    }
}

impl fmt::Display for MatchRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a similarity score
pub fn classify(score: f64) -> MatchRating {
    THRESHOLDS
        .iter()
        .find(|(bound, _)| score >= *bound)
        .map(|(_, rating)| *rating)
        .unwrap_or(MatchRating::VeryDifferent)
}
