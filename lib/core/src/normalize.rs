//! Schema normalization
//!
//! Maps sparse measurements onto the fixed canonical schema. Compounds that
//! were not measured get their per-compound imputation floor instead of 0, so
//! two untested cultivars do not collide on identical zero entries under
//! cosine similarity. Keys outside the canonical schema are dropped.

use crate::compound::{Compound, Family};
use crate::record::{ChemotypeRecord, CompoundMap};
use crate::vector::{ChemotypeVector, NormalizedVector};

/// Normalize one family's sparse map. Never fails; an empty map yields all floors.
pub fn normalize(map: &CompoundMap, family: Family) -> NormalizedVector {
    let mut measured: Vec<Option<f64>> = vec![None; family.len()];

    for (id, &value) in map {
        let Some(compound) = Compound::from_id_in(id, family) else {
            continue;
        };
        if value.is_finite() && value > 0.0 {
            let slot = &mut measured[compound.family_index()];
            if slot.is_none() {
                *slot = Some(value);
            }
        }
    }

    let data = family
        .compounds()
        .iter()
        .zip(measured)
        .map(|(compound, value)| value.unwrap_or_else(|| compound.imputation_floor()))
        .collect();

    NormalizedVector::new(family, data)
}

/// Normalize both families of a record into one combined vector
pub fn normalize_record(record: &ChemotypeRecord) -> ChemotypeVector {
    let cannabinoids = normalize(&record.cannabinoids, Family::Cannabinoid);
    let terpenes = normalize(&record.terpenes, Family::Terpene);
    ChemotypeVector::from_parts(&cannabinoids, &terpenes)
}
