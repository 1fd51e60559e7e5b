//! Similarity engine
//!
//! Scores a candidate chemotype against either one ideal profile or a small
//! ranked set of favorite cultivars. Every call is pure: the engine only
//! holds its immutable configuration and can be shared across threads.

use crate::classify::{classify, MatchRating};
use crate::config::{BlendWeights, ConfigError, EngineConfig};
use crate::explain::{compound_differences, CompoundDiff};
use crate::metrics::SubMetrics;
use chemomatch_core::stats::{cosine_similarity, standardize_columns};
use chemomatch_core::{ChemotypeVector, Error, Result};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::cmp::Reverse;
use tracing::debug;

/// Comparison mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareMode {
    /// Blended metrics against a single aggregate profile
    Ideal,
    /// Raw cosine against each ranked favorite, averaged
    RankedIndividual,
    /// Cosine after standardizing candidate and favorites jointly, averaged
    RankedZScored,
}

/// A named, normalized reference chemotype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub name: String,
    pub vector: ChemotypeVector,
}

impl Reference {
    pub fn new(name: impl Into<String>, vector: ChemotypeVector) -> Self {
        Self {
            name: name.into(),
            vector,
        }
    }
}

/// Similarity against one ranked favorite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndividualScore {
    pub name: String,
    pub similarity: f64,
    pub similarity_percentage: f64,
    /// 1-based position of the favorite in the caller's ranking
    pub rank: usize,
}

/// Outcome of one comparison
#[derive(Debug, Clone, Serialize)]
pub struct SimilarityResult {
    /// Mode actually used (ranked z-scored degrades to individual with < 2 references)
    pub mode: CompareMode,
    pub overall_similarity: f64,
    pub similarity_percentage: f64,
    pub rating: MatchRating,
    /// Ideal mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<SubMetrics>,
    /// Ranked modes only, best first
    #[serde(skip_serializing_if = "SmallVec::is_empty")]
    pub individual: SmallVec<[IndividualScore; 3]>,
    pub references_used: usize,
    /// Against the ideal, or against the top-ranked favorite
    pub differences: Vec<CompoundDiff>,
}

impl SimilarityResult {
    fn new(mode: CompareMode, overall: f64, references_used: usize, differences: Vec<CompoundDiff>) -> Self {
        Self {
            mode,
            overall_similarity: overall,
            similarity_percentage: overall * 100.0,
            rating: classify(overall),
            breakdown: None,
            individual: SmallVec::new(),
            references_used,
            differences,
        }
    }

    /// Named sub-metric scores; per-reference scores for the ranked modes
    pub fn sub_scores(&self) -> Vec<(String, f64)> {
        match &self.breakdown {
            Some(metrics) => metrics
                .named()
                .into_iter()
                .map(|(name, score)| (name.to_string(), score))
                .collect(),
            None => self
                .individual
                .iter()
                .map(|s| (s.name.clone(), s.similarity))
                .collect(),
        }
    }
}

/// One scored catalogue candidate
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    pub name: String,
    pub overall_similarity: f64,
    pub rating: MatchRating,
    pub differences: Vec<CompoundDiff>,
}

/// Stateless chemotype comparison engine
#[derive(Debug, Clone, Default)]
pub struct SimilarityEngine {
    config: EngineConfig,
}

impl SimilarityEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a new engine with different blend weights.
    /// The weights are validated and re-normalized to sum to 1.0.
    pub fn with_weights(&self, mut weights: BlendWeights) -> std::result::Result<Self, ConfigError> {
        weights.validate_and_normalize()?;
        let mut config = self.config.clone();
        config.weights = weights;
        Ok(Self::new(config))
    }

    /// Dispatch on `mode`. Ideal mode takes exactly one reference.
    pub fn compare(
        &self,
        candidate: &ChemotypeVector,
        references: &[Reference],
        mode: CompareMode,
    ) -> Result<SimilarityResult> {
        match mode {
            CompareMode::Ideal => match references {
                [ideal] => Ok(self.compare_ideal(candidate, &ideal.vector)),
                [] => Err(Error::NoReferences),
                _ => Err(Error::ReferenceCount {
                    expected: 1,
                    actual: references.len(),
                }),
            },
            CompareMode::RankedIndividual => self.compare_ranked(candidate, references, false),
            CompareMode::RankedZScored => self.compare_ranked(candidate, references, true),
        }
    }

    /// Compare against an aggregate ideal profile with the blended metrics.
    ///
    /// The blend is bypassed in favour of raw cosine when the standardized
    /// cosine is negative or undefined (and the fallback is enabled).
    pub fn compare_ideal(&self, candidate: &ChemotypeVector, ideal: &ChemotypeVector) -> SimilarityResult {
        let mut metrics = SubMetrics::compute(candidate.as_slice(), ideal.as_slice(), &self.config.weights);

        let degenerate = metrics.z_scored_cosine.map_or(true, |z| z < 0.0);
        metrics.used_fallback = self.config.fallback_on_negative_z_cosine && degenerate;

        let overall = if metrics.used_fallback {
            debug!(
                z_scored_cosine = ?metrics.z_scored_cosine,
                raw_cosine = metrics.raw_cosine,
                "standardized cosine unusable, falling back to raw cosine"
            );
            metrics.raw_cosine
        } else {
            metrics.combined
        };

        let mut result = SimilarityResult::new(
            CompareMode::Ideal,
            overall,
            1,
            compound_differences(candidate, ideal),
        );
        result.breakdown = Some(metrics);
        result
    }

    /// Compare against up to `max_references` ranked favorites.
    ///
    /// Only the first `max_references` entries are used. The z-scored variant
    /// needs at least two favorites and otherwise degrades to individual cosine.
    pub fn compare_ranked(
        &self,
        candidate: &ChemotypeVector,
        references: &[Reference],
        zscored: bool,
    ) -> Result<SimilarityResult> {
        if references.is_empty() {
            return Err(Error::NoReferences);
        }
        let used = &references[..references.len().min(self.config.max_references.max(1))];

        let (mode, similarities): (CompareMode, Vec<f64>) = if zscored && used.len() >= 2 {
            let mut rows: Vec<&[f64]> = Vec::with_capacity(used.len() + 1);
            rows.push(candidate.as_slice());
            rows.extend(used.iter().map(|r| r.vector.as_slice()));

            let scaled = standardize_columns(&rows);
            let sims: Vec<f64> = scaled[1..]
                .iter()
                .map(|row| cosine_similarity(&scaled[0], row))
                .collect();
            (CompareMode::RankedZScored, sims)
        } else {
            if zscored {
                debug!(references = used.len(), "z-scored ranking needs two favorites, using individual cosine");
            }
            let sims: Vec<f64> = used
                .iter()
                .map(|r| cosine_similarity(candidate.as_slice(), r.vector.as_slice()))
                .collect();
            (CompareMode::RankedIndividual, sims)
        };

        let mut individual: SmallVec<[IndividualScore; 3]> = used
            .iter()
            .zip(similarities)
            .enumerate()
            .map(|(i, (reference, similarity))| IndividualScore {
                name: reference.name.clone(),
                similarity,
                similarity_percentage: similarity * 100.0,
                rank: i + 1,
            })
            .collect();
        individual.sort_by_key(|s| Reverse(OrderedFloat(s.similarity)));

        let overall = individual.iter().map(|s| s.similarity).sum::<f64>() / individual.len() as f64;

        let mut result = SimilarityResult::new(
            mode,
            overall,
            used.len(),
            compound_differences(candidate, &used[0].vector),
        );
        result.individual = individual;
        Ok(result)
    }

    /// Score many candidates against one ideal in parallel.
    ///
    /// Results are sorted by overall similarity descending; equal scores keep
    /// input order. `limit` truncates after sorting.
    pub fn rank_candidates(
        &self,
        ideal: &ChemotypeVector,
        candidates: &[Reference],
        limit: Option<usize>,
    ) -> Vec<RankedCandidate> {
        let mut ranked: Vec<RankedCandidate> = candidates
            .par_iter()
            .map(|candidate| {
                let result = self.compare_ideal(&candidate.vector, ideal);
                RankedCandidate {
                    name: candidate.name.clone(),
                    overall_similarity: result.overall_similarity,
                    rating: result.rating,
                    differences: result.differences,
                }
            })
            .collect();

        ranked.sort_by_key(|r| Reverse(OrderedFloat(r.overall_similarity)));
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        ranked
    }
}
