//! Explainability for chemotype comparisons
//!
//! The per-compound difference table is the user-facing "why" behind a
//! score. It is always produced in a deterministic order: descending absolute
//! difference, ties in canonical compound order.

use crate::engine::RankedCandidate;
use chemomatch_core::{ChemotypeVector, Compound, Family};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;

/// Candidate vs reference for a single compound
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CompoundDiff {
    pub compound: Compound,
    pub family: Family,
    pub candidate_value: f64,
    pub reference_value: f64,
    /// `candidate - reference`
    pub difference: f64,
    /// `difference / reference * 100`, or 0.0 when the reference is not positive
    pub percentage_diff: f64,
}

impl CompoundDiff {
    pub fn new(compound: Compound, candidate_value: f64, reference_value: f64) -> Self {
        let difference = candidate_value - reference_value;
        let percentage_diff = if reference_value > 0.0 {
            difference / reference_value * 100.0
        } else {
            0.0
        };

        Self {
            compound,
            family: compound.family(),
            candidate_value,
            reference_value,
            difference,
            percentage_diff,
        }
    }
}

/// Per-compound differences for every canonical compound, largest gap first
pub fn compound_differences(
    candidate: &ChemotypeVector,
    reference: &ChemotypeVector,
) -> Vec<CompoundDiff> {
    let mut diffs: Vec<CompoundDiff> = Compound::ALL
        .iter()
        .map(|&c| CompoundDiff::new(c, candidate.get(c), reference.get(c)))
        .collect();

    // stable sort: equal gaps keep canonical order
    diffs.sort_by_key(|d| Reverse(OrderedFloat(d.difference.abs())));
    diffs
}

/// Summary statistics for a batch ranking
#[derive(Debug, Clone, Serialize)]
pub struct RankingStats {
    /// Number of candidates considered
    pub candidates_count: usize,
    /// Number of results returned
    pub results_count: usize,
    pub avg_score: f64,
    pub best_score: f64,
    /// Compound with the largest gap between the best result and the ideal
    pub widest_gap: Option<Compound>,
}

impl RankingStats {
    /// Compute stats from ranked results (assumed sorted best first)
    pub fn compute(results: &[RankedCandidate], candidates_count: usize) -> Self {
        let Some(best) = results.first() else {
            return Self {
                candidates_count,
                results_count: 0,
                avg_score: 0.0,
                best_score: 0.0,
                widest_gap: None,
            };
        };

        let avg_score =
            results.iter().map(|r| r.overall_similarity).sum::<f64>() / results.len() as f64;

        Self {
            candidates_count,
            results_count: results.len(),
            avg_score,
            best_score: best.overall_similarity,
            widest_gap: best.differences.first().map(|d| d.compound),
        }
    }
}
