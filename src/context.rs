//! Request-scoped handlers
//!
//! Every handler takes the caller's [`RequestContext`] explicitly. Nothing
//! here keeps per-user state between calls.

use chemomatch_catalogue::{Catalogue, Generator, Resolver};
use chemomatch_core::{normalize_record, ChemotypeRecord, Error};
use chemomatch_similarity::{
    aggregate, annotate, AggregateProfile, AnnotatedCompound, CompareMode, RankedCandidate,
    RankingStats, Reference, SimilarityEngine, SimilarityResult,
};
use serde::Serialize;
use tracing::debug;

/// Who is asking, and which cultivars they like
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: String,
    /// Liked cultivars, pooled into the ideal profile
    pub favorites: Vec<String>,
    /// Favorites kept individually, best first
    pub ranked_favorites: Vec<String>,
}

impl RequestContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Default::default()
        }
    }

    pub fn with_favorites<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.favorites = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ranked_favorites<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ranked_favorites = names.into_iter().map(Into::into).collect();
        self
    }
}

/// Handler failures, with empty-favorites cases already made user-facing
#[derive(thiserror::Error, Debug)]
pub enum HandlerError {
    #[error("Add at least {required} favorite cultivar(s) first")]
    NotEnoughFavorites { required: usize },

    #[error(transparent)]
    Core(#[from] Error),
}

pub type HandlerResult<T> = std::result::Result<T, HandlerError>;

/// A candidate scored against the user's favorites
#[derive(Debug, Clone, Serialize)]
pub struct CandidateReport {
    pub user_id: String,
    pub candidate: String,
    #[serde(flatten)]
    pub result: SimilarityResult,
    pub candidate_terpenes: Vec<AnnotatedCompound>,
}

/// Catalogue cultivars closest to the user's ideal profile
#[derive(Debug, Clone, Serialize)]
pub struct SimilarReport {
    pub user_id: String,
    pub results: Vec<RankedCandidate>,
    pub stats: RankingStats,
}

/// Aggregate the context's favorites into an ideal profile
pub fn build_ideal_profile<C, G>(
    ctx: &RequestContext,
    resolver: &Resolver<C, G>,
) -> HandlerResult<AggregateProfile>
where
    C: Catalogue,
    G: Generator,
{
    if ctx.favorites.is_empty() {
        return Err(HandlerError::NotEnoughFavorites { required: 1 });
    }
    let records = resolver.resolve_all(&ctx.favorites)?;
    debug!(user = %ctx.user_id, favorites = records.len(), "Building ideal profile");
    aggregate(&records).map_err(translate_empty)
}

/// Score a candidate cultivar for the context's user.
///
/// `Ideal` compares against the aggregate of `favorites`; the ranked modes
/// compare against `ranked_favorites` in order.
pub fn compare_candidate<C, G>(
    ctx: &RequestContext,
    resolver: &Resolver<C, G>,
    engine: &SimilarityEngine,
    candidate: &str,
    mode: CompareMode,
) -> HandlerResult<CandidateReport>
where
    C: Catalogue,
    G: Generator,
{
    let record = resolver.resolve(candidate)?;
    let vector = normalize_record(&record);

    let result = match mode {
        CompareMode::Ideal => {
            let ideal = build_ideal_profile(ctx, resolver)?;
            engine.compare_ideal(&vector, &ideal.vector())
        }
        CompareMode::RankedIndividual | CompareMode::RankedZScored => {
            if ctx.ranked_favorites.is_empty() {
                return Err(HandlerError::NotEnoughFavorites { required: 1 });
            }
            let references: Vec<Reference> = resolver
                .resolve_all(&ctx.ranked_favorites)?
                .iter()
                .map(to_reference)
                .collect();
            engine.compare(&vector, &references, mode)?
        }
    };

    Ok(CandidateReport {
        user_id: ctx.user_id.clone(),
        candidate: record.name.clone(),
        result,
        candidate_terpenes: annotate(record.terpenes.iter().map(|(id, v)| (id.as_str(), *v))),
    })
}

/// Rank catalogue cultivars (excluding the favorites) against the ideal profile
pub fn find_similar<C, G>(
    ctx: &RequestContext,
    resolver: &Resolver<C, G>,
    engine: &SimilarityEngine,
    limit: Option<usize>,
) -> HandlerResult<SimilarReport>
where
    C: Catalogue,
    G: Generator,
{
    let ideal = build_ideal_profile(ctx, resolver)?;

    let candidates: Vec<Reference> = resolver
        .catalogue()
        .records()
        .iter()
        .filter(|r| {
            !ctx.favorites
                .iter()
                .any(|f| f.trim().eq_ignore_ascii_case(r.name.trim()))
        })
        .map(to_reference)
        .collect();

    let results = engine.rank_candidates(&ideal.vector(), &candidates, limit);
    let stats = RankingStats::compute(&results, candidates.len());

    Ok(SimilarReport {
        user_id: ctx.user_id.clone(),
        results,
        stats,
    })
}

fn to_reference(record: &ChemotypeRecord) -> Reference {
    Reference::new(record.name.clone(), normalize_record(record))
}

fn translate_empty(error: Error) -> HandlerError {
    match error {
        Error::EmptyInput(_) => HandlerError::NotEnoughFavorites { required: 1 },
        other => HandlerError::Core(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemomatch_catalogue::{FallbackGenerator, InMemoryCatalogue};
    use chemomatch_core::Compound;
    use chemomatch_similarity::MatchRating;

    fn resolver() -> Resolver<InMemoryCatalogue, FallbackGenerator> {
        Resolver::new(InMemoryCatalogue::builtin().unwrap(), FallbackGenerator::with_seed(11))
    }

    #[test]
    fn test_ideal_profile_from_context() {
        let ctx = RequestContext::new("u1").with_favorites(["granddaddy purple", "sour diesel"]);
        let profile = build_ideal_profile(&ctx, &resolver()).unwrap();

        assert_eq!(profile.cultivar_count, 2);
        assert_eq!(profile.value(Compound::Myrcene), 0.85);
        assert_eq!(profile.value(Compound::Limonene), 0.80);
    }

    #[test]
    fn test_empty_favorites_is_user_facing_error() {
        let ctx = RequestContext::new("u2");
        let err = build_ideal_profile(&ctx, &resolver()).unwrap_err();
        assert!(matches!(err, HandlerError::NotEnoughFavorites { required: 1 }));
        assert!(err.to_string().contains("favorite"));
    }

    #[test]
    fn test_compare_favorite_against_itself() {
        let ctx = RequestContext::new("u3").with_favorites(["og kush"]);
        let report = compare_candidate(
            &ctx,
            &resolver(),
            &SimilarityEngine::default(),
            "OG Kush",
            CompareMode::Ideal,
        )
        .unwrap();

        assert_eq!(report.user_id, "u3");
        assert_eq!(report.result.rating, MatchRating::Perfect);
        assert_eq!(report.candidate_terpenes[0].name, "Myrcene");
    }

    #[test]
    fn test_ranked_modes_use_ranked_favorites() {
        let resolver = resolver();
        let engine = SimilarityEngine::default();
        let ctx = RequestContext::new("u4")
            .with_ranked_favorites(["jack herer", "green crack", "blue dream", "gelato"]);

        let report =
            compare_candidate(&ctx, &resolver, &engine, "sour diesel", CompareMode::RankedZScored)
                .unwrap();
        assert_eq!(report.result.mode, CompareMode::RankedZScored);
        assert_eq!(report.result.references_used, 3);

        let no_ranked = RequestContext::new("u5").with_favorites(["gelato"]);
        assert!(matches!(
            compare_candidate(&no_ranked, &resolver, &engine, "gelato", CompareMode::RankedIndividual),
            Err(HandlerError::NotEnoughFavorites { .. })
        ));
    }

    #[test]
    fn test_unknown_candidate_is_generated() {
        let resolver = resolver();
        let ctx = RequestContext::new("u6").with_favorites(["blueberry"]);
        let report = compare_candidate(
            &ctx,
            &resolver,
            &SimilarityEngine::default(),
            "Totally New Cultivar",
            CompareMode::Ideal,
        )
        .unwrap();
        assert_eq!(report.candidate, "Totally New Cultivar");
        assert_eq!(resolver.catalogue().len(), 13);
    }

    #[test]
    fn test_find_similar_excludes_favorites() {
        let ctx = RequestContext::new("u7").with_favorites(["Purple Punch"]);
        let report =
            find_similar(&ctx, &resolver(), &SimilarityEngine::default(), Some(3)).unwrap();

        assert_eq!(report.results.len(), 3);
        assert_eq!(report.stats.candidates_count, 11);
        assert!(report.results.iter().all(|r| r.name != "purple punch"));
        for pair in report.results.windows(2) {
            assert!(pair[0].overall_similarity >= pair[1].overall_similarity);
        }
    }
}
