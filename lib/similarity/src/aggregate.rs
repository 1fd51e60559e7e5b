//! Ideal profile aggregation
//!
//! Collapses a user's liked cultivars into one [`AggregateProfile`]. Each
//! compound takes the maximum normalized value over the set, so a trait that
//! is strong in any single favorite stays strong in the ideal. Descriptive
//! lists are pooled and ranked by frequency with first-seen tie-breaking.
//! Dominant compounds and annotations only cover compounds some favorite
//! actually measured; imputed floors never show up there.

use crate::annotate::{annotate, AnnotatedCompound};
use ahash::AHashMap;
use chemomatch_core::{
    normalize, ChemotypeRecord, ChemotypeVector, Compound, Error, Family, NormalizedVector, Result,
};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;

pub const TOP_EFFECTS: usize = 10;
pub const TOP_MEDICAL_EFFECTS: usize = 8;
pub const TOP_FLAVORS: usize = 6;
pub const TOP_AROMAS: usize = 6;
pub const DOMINANT_TERPENES: usize = 5;
pub const DOMINANT_CANNABINOIDS: usize = 3;

/// A pooled descriptor and how many records mention it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTerm {
    pub term: String,
    pub count: usize,
}

/// A compound and its aggregate value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DominantCompound {
    pub compound: Compound,
    pub value: f64,
}

/// Representative chemotype of a set of cultivars
#[derive(Debug, Clone, Serialize)]
pub struct AggregateProfile {
    pub cultivar_count: usize,
    /// Per-compound maxima, canonical order
    pub cannabinoids: NormalizedVector,
    /// Per-compound maxima, canonical order
    pub terpenes: NormalizedVector,
    pub top_effects: Vec<RankedTerm>,
    pub top_medical_effects: Vec<RankedTerm>,
    pub top_flavors: Vec<RankedTerm>,
    pub top_aromas: Vec<RankedTerm>,
    pub dominant_terpenes: Vec<DominantCompound>,
    pub dominant_cannabinoids: Vec<DominantCompound>,
    /// Canonical terpenes measured above zero by at least one record
    pub terpene_diversity: usize,
    /// Canonical cannabinoids measured above zero by at least one record
    pub cannabinoid_diversity: usize,
    pub terpene_annotations: Vec<AnnotatedCompound>,
}

impl AggregateProfile {
    /// Combined vector for use as the ideal-profile reference
    pub fn vector(&self) -> ChemotypeVector {
        ChemotypeVector::from_parts(&self.cannabinoids, &self.terpenes)
    }

    /// Aggregate value of a compound
    pub fn value(&self, compound: Compound) -> f64 {
        match compound.family() {
            Family::Cannabinoid => self.cannabinoids.as_slice()[compound.family_index()],
            Family::Terpene => self.terpenes.as_slice()[compound.family_index()],
        }
    }
}

/// Aggregate liked cultivars into one profile.
///
/// Fails with [`Error::EmptyInput`] when `records` is empty.
pub fn aggregate(records: &[ChemotypeRecord]) -> Result<AggregateProfile> {
    if records.is_empty() {
        return Err(Error::EmptyInput("cultivar"));
    }

    let cannabinoids = max_vector(records, Family::Cannabinoid);
    let terpenes = max_vector(records, Family::Terpene);
    let measured_cannabinoids = measured_values(records, &cannabinoids);
    let measured_terpenes = measured_values(records, &terpenes);

    let profile = AggregateProfile {
        cultivar_count: records.len(),
        top_effects: top_terms(records.iter().map(|r| &r.effects), TOP_EFFECTS),
        top_medical_effects: top_terms(
            records.iter().map(|r| &r.medical_effects),
            TOP_MEDICAL_EFFECTS,
        ),
        top_flavors: top_terms(records.iter().map(|r| &r.flavors), TOP_FLAVORS),
        top_aromas: top_terms(records.iter().map(|r| &r.aromas), TOP_AROMAS),
        terpene_diversity: measured_terpenes.len(),
        cannabinoid_diversity: measured_cannabinoids.len(),
        terpene_annotations: annotate(measured_terpenes.iter().map(|d| (d.compound.id(), d.value))),
        dominant_terpenes: dominant(measured_terpenes, DOMINANT_TERPENES),
        dominant_cannabinoids: dominant(measured_cannabinoids, DOMINANT_CANNABINOIDS),
        cannabinoids,
        terpenes,
    };

    Ok(profile)
}

fn max_vector(records: &[ChemotypeRecord], family: Family) -> NormalizedVector {
    let mut data = vec![f64::NEG_INFINITY; family.len()];
    for record in records {
        let vector = normalize(record.family_map(family), family);
        for (slot, value) in data.iter_mut().zip(vector.as_slice()) {
            *slot = slot.max(*value);
        }
    }
    NormalizedVector::new(family, data)
}

/// Frequency-ranked terms; ties keep first-seen order
fn top_terms<'a, I>(lists: I, k: usize) -> Vec<RankedTerm>
where
    I: IntoIterator<Item = &'a Vec<String>>,
{
    let mut index: AHashMap<&str, usize> = AHashMap::new();
    let mut terms: Vec<RankedTerm> = Vec::new();

    for term in lists.into_iter().flatten() {
        let term = term.trim();
        if term.is_empty() {
            continue;
        }
        match index.get(term) {
            Some(&i) => terms[i].count += 1,
            None => {
                index.insert(term, terms.len());
                terms.push(RankedTerm {
                    term: term.to_string(),
                    count: 1,
                });
            }
        }
    }

    terms.sort_by_key(|t| Reverse(t.count));
    terms.truncate(k);
    terms
}

/// Aggregate values of the compounds measured above zero by at least one record
fn measured_values(records: &[ChemotypeRecord], vector: &NormalizedVector) -> Vec<DominantCompound> {
    vector
        .iter()
        .filter(|&(c, _)| records.iter().any(|r| r.measured(c).is_some()))
        .map(|(compound, value)| DominantCompound { compound, value })
        .collect()
}

/// Strongest `k` compounds; ties keep canonical order
fn dominant(mut compounds: Vec<DominantCompound>, k: usize) -> Vec<DominantCompound> {
    compounds.sort_by_key(|c| Reverse(OrderedFloat(c.value)));
    compounds.truncate(k);
    compounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemomatch_core::normalize_record;

    fn indica() -> ChemotypeRecord {
        ChemotypeRecord::new("indica")
            .with_cannabinoid("thc", 0.22)
            .with_terpene("myrcene", 0.85)
            .with_terpene("caryophyllene", 0.30)
            .with_effects(["relaxed", "sleepy", "happy"])
            .with_flavors(["grape", "berry"])
    }

    fn hybrid() -> ChemotypeRecord {
        ChemotypeRecord::new("hybrid")
            .with_cannabinoid("thc", 0.18)
            .with_cannabinoid("cbd", 0.02)
            .with_terpene("myrcene", 0.75)
            .with_terpene("limonene", 0.45)
            .with_effects(["happy", "uplifted", "relaxed"])
            .with_flavors(["citrus", "berry"])
    }

    #[test]
    fn test_max_semantics() {
        let profile = aggregate(&[indica(), hybrid()]).unwrap();

        assert_eq!(profile.value(Compound::Myrcene), 0.85);
        assert_eq!(profile.value(Compound::Limonene), 0.45);
        assert_eq!(profile.value(Compound::Thc), 0.22);
        assert_eq!(profile.value(Compound::Cbd), 0.02);
        // unmeasured everywhere stays at the floor
        assert_eq!(
            profile.value(Compound::Eucalyptol),
            Compound::Eucalyptol.imputation_floor()
        );
    }

    #[test]
    fn test_vector_is_elementwise_max() {
        let (a, b) = (indica(), hybrid());
        let profile = aggregate(&[a.clone(), b.clone()]).unwrap();
        let (va, vb) = (normalize_record(&a), normalize_record(&b));
        let ideal = profile.vector();

        for c in Compound::ALL {
            assert_eq!(ideal.get(c), va.get(c).max(vb.get(c)), "{}", c);
        }
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(aggregate(&[]), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_frequency_lists() {
        let profile = aggregate(&[indica(), hybrid()]).unwrap();

        let effects: Vec<(&str, usize)> = profile
            .top_effects
            .iter()
            .map(|t| (t.term.as_str(), t.count))
            .collect();
        assert_eq!(
            effects,
            vec![("relaxed", 2), ("happy", 2), ("sleepy", 1), ("uplifted", 1)]
        );
        assert_eq!(profile.top_flavors[0].term, "berry");
        assert!(profile.top_medical_effects.is_empty());
    }

    #[test]
    fn test_ties_follow_given_order() {
        let a = ChemotypeRecord::new("a").with_aromas(["pine"]);
        let b = ChemotypeRecord::new("b").with_aromas(["skunk"]);

        let forward = aggregate(&[a.clone(), b.clone()]).unwrap();
        let reverse = aggregate(&[b, a]).unwrap();
        assert_eq!(forward.top_aromas[0].term, "pine");
        assert_eq!(reverse.top_aromas[0].term, "skunk");
    }

    #[test]
    fn test_top_k_truncation() {
        let effects: Vec<String> = (0..15).map(|i| format!("effect{}", i)).collect();
        let record = ChemotypeRecord::new("many").with_effects(effects);
        let profile = aggregate(&[record]).unwrap();
        assert_eq!(profile.top_effects.len(), TOP_EFFECTS);
        assert_eq!(profile.top_effects[0].term, "effect0");
    }

    #[test]
    fn test_dominant_and_diversity() {
        let profile = aggregate(&[indica(), hybrid()]).unwrap();

        let terps: Vec<Compound> = profile.dominant_terpenes.iter().map(|d| d.compound).collect();
        assert_eq!(terps, vec![Compound::Myrcene, Compound::Limonene, Compound::Caryophyllene]);

        let cannabinoids: Vec<Compound> =
            profile.dominant_cannabinoids.iter().map(|d| d.compound).collect();
        assert_eq!(cannabinoids, vec![Compound::Thc, Compound::Cbd]);

        assert_eq!(profile.terpene_diversity, 3);
        assert_eq!(profile.cannabinoid_diversity, 2);
    }

    #[test]
    fn test_annotations_attached() {
        let profile = aggregate(&[indica()]).unwrap();
        assert_eq!(profile.terpene_annotations[0].name, "Myrcene");
        assert_eq!(profile.terpene_annotations[1].name, "Caryophyllene");
    }

    #[test]
    fn test_unmeasured_compounds_not_dominant() {
        let record = ChemotypeRecord::new("sparse")
            .with_cannabinoid("thc", 0.2)
            .with_terpene("myrcene", 0.85)
            .with_terpene("caryophyllene", 0.30);
        let profile = aggregate(&[record]).unwrap();

        assert_eq!(profile.terpene_diversity, 2);
        assert_eq!(profile.dominant_terpenes.len(), 2);
        assert_eq!(profile.terpene_annotations.len(), 2);
        assert!(profile.terpene_annotations.iter().all(|a| a.level_percent >= 30.0 - 1e-9));

        assert_eq!(profile.cannabinoid_diversity, 1);
        assert_eq!(
            profile.dominant_cannabinoids,
            vec![DominantCompound { compound: Compound::Thc, value: 0.2 }]
        );
        // the ideal vector still carries the floors
        assert_eq!(profile.value(Compound::Limonene), Compound::Limonene.imputation_floor());
    }

    #[test]
    fn test_nothing_measured_yields_empty_lists() {
        let profile = aggregate(&[ChemotypeRecord::new("blank")]).unwrap();
        assert!(profile.dominant_terpenes.is_empty());
        assert!(profile.dominant_cannabinoids.is_empty());
        assert!(profile.terpene_annotations.is_empty());
        assert_eq!(profile.terpene_diversity, 0);
    }
}
