//! # Chemomatch Similarity
//!
//! Chemotype comparison on top of the canonical vectors of `chemomatch-core`.
//!
//! ## Features
//!
//! - **Aggregation**: collapse liked cultivars into one ideal profile (per-compound max)
//! - **Blended Similarity**: z-scored and raw cosine, euclidean and correlation metrics
//! - **Ranked Favorites**: compare against up to three individually kept references
//! - **Explainability**: per-compound difference table and match rating
//! - **Annotation**: descriptive metadata for the strongest terpenes
//!
//! ## Example
//!
//! ```rust
//! use chemomatch_core::{normalize_record, ChemotypeRecord};
//! use chemomatch_similarity::{aggregate, MatchRating, SimilarityEngine};
//!
//! let liked = vec![
//!     ChemotypeRecord::new("a")
//!         .with_cannabinoid("thc", 0.22)
//!         .with_terpene("myrcene", 0.85),
//!     ChemotypeRecord::new("b")
//!         .with_cannabinoid("thc", 0.18)
//!         .with_terpene("limonene", 0.45),
//! ];
//! let ideal = aggregate(&liked).unwrap();
//!
//! let candidate = normalize_record(&liked[0]);
//! let engine = SimilarityEngine::default();
//! let result = engine.compare_ideal(&candidate, &ideal.vector());
//! assert!(result.rating >= MatchRating::VeryDifferent);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Records   │────>│  Aggregate  │────>│   Engine    │
//! │ (favorites) │     │   (ideal)   │     │  (compare)  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                            │                   │
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │  Annotate   │     │  Classify   │
//!                     │ (terpenes)  │     │  Explain    │
//!                     └─────────────┘     └─────────────┘
//! ```

pub mod aggregate;
pub mod annotate;
pub mod classify;
pub mod config;
pub mod engine;
pub mod explain;
pub mod metrics;

// Re-export main types for convenience
pub use aggregate::{aggregate, AggregateProfile, DominantCompound, RankedTerm};
pub use annotate::{annotate, terpene_info, AnnotatedCompound, TerpeneInfo};
pub use classify::{classify, MatchRating};
pub use config::{BlendWeights, ConfigError, EngineConfig};
pub use engine::{
    CompareMode, IndividualScore, RankedCandidate, Reference, SimilarityEngine, SimilarityResult,
};
pub use explain::{compound_differences, CompoundDiff, RankingStats};
pub use metrics::SubMetrics;
