//! # chemomatch
//!
//! Chemotype similarity for cannabis cultivars.
//!
//! chemomatch normalizes sparse terpene and cannabinoid measurements onto a
//! fixed compound schema, pools a user's liked cultivars into an ideal
//! profile, and scores candidates against it with a blend of standardized and
//! raw similarity metrics, explaining every score compound by compound.
//!
//! ## Quick Start
//!
//! ### From the Command Line
//!
//! ```bash
//! chemomatch profile "granddaddy purple" "blue dream"
//! chemomatch compare "gelato" --favorites "og kush" "wedding cake"
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use chemomatch::prelude::*;
//!
//! let catalogue = InMemoryCatalogue::builtin().unwrap();
//! let resolver = Resolver::new(catalogue, FallbackGenerator::with_seed(1));
//!
//! let ctx = RequestContext::new("demo").with_favorites(["og kush", "blueberry"]);
//! let ideal = build_ideal_profile(&ctx, &resolver).unwrap();
//!
//! let candidate = normalize_record(&resolver.resolve("purple punch").unwrap());
//! let result = SimilarityEngine::default().compare_ideal(&candidate, &ideal.vector());
//! println!("{} ({:.1}%)", result.rating, result.similarity_percentage);
//! ```
//!
//! ## Crate Structure
//!
//! - `chemomatch-core` - Compound schema, records, normalization, vector statistics
//! - `chemomatch-similarity` - Aggregation, similarity engine, rating, annotation
//! - `chemomatch-catalogue` - Cultivar catalogue, fallback generator, resolver

pub mod context;

// Re-export core types
pub use chemomatch_core::{
    normalize, normalize_record, ChemotypeRecord, ChemotypeVector, Compound, CompoundMap,
    CultivarKind, Error, Family, NormalizedVector, Result, COMPOUND_COUNT,
};

// Re-export similarity
pub use chemomatch_similarity::{
    aggregate, annotate, classify, AggregateProfile, AnnotatedCompound, BlendWeights,
    CompareMode, CompoundDiff, EngineConfig, MatchRating, RankedCandidate, RankingStats,
    Reference, SimilarityEngine, SimilarityResult,
};

// Re-export catalogue
pub use chemomatch_catalogue::{Catalogue, FallbackGenerator, Generator, InMemoryCatalogue, Resolver};

pub use context::{
    build_ideal_profile, compare_candidate, find_similar, CandidateReport, HandlerError,
    RequestContext, SimilarReport,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        aggregate, annotate, build_ideal_profile, classify, compare_candidate, find_similar,
        normalize, normalize_record, AggregateProfile, Catalogue, ChemotypeRecord,
        ChemotypeVector, CompareMode, Compound, EngineConfig, Error, FallbackGenerator, Family,
        InMemoryCatalogue, MatchRating, Reference, RequestContext, Resolver, Result,
        SimilarityEngine,
    };
}
