//! Record generation for cultivars the catalogue does not know
//!
//! A [`Generator`] is an external collaborator (a model-backed synthesizer in
//! production). [`FallbackGenerator`] produces plausible random profiles and
//! is what the CLI uses when nothing better is configured.

use chemomatch_core::{ChemotypeRecord, Compound, CultivarKind, Error, Family, Result, COMPOUND_COUNT};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

/// Produces a record for an unknown cultivar name
pub trait Generator: Send + Sync {
    fn generate(&self, name: &str) -> Result<ChemotypeRecord>;
}

/// Uniform draw range per canonical compound
const COMPOUND_RANGES: [(Compound, f64, f64); COMPOUND_COUNT] = [
    (Compound::Thc, 0.15, 0.30),
    (Compound::Cbd, 0.005, 0.15),
    (Compound::Cbg, 0.005, 0.02),
    (Compound::Cbn, 0.001, 0.01),
    (Compound::Thcv, 0.0005, 0.005),
    (Compound::Myrcene, 0.1, 0.8),
    (Compound::Limonene, 0.05, 0.6),
    (Compound::Caryophyllene, 0.05, 0.5),
    (Compound::Pinene, 0.05, 0.4),
    (Compound::Linalool, 0.02, 0.3),
    (Compound::Humulene, 0.001, 0.2),
    (Compound::Terpinolene, 0.001, 0.15),
    (Compound::Ocimene, 0.001, 0.1),
    (Compound::Nerolidol, 0.0001, 0.05),
    (Compound::Bisabolol, 0.0001, 0.05),
    (Compound::Eucalyptol, 0.0001, 0.03),
];

const EFFECT_SETS: [[&str; 3]; 5] = [
    ["relaxed", "happy", "uplifted"],
    ["euphoric", "creative", "energetic"],
    ["calm", "sleepy", "pain relief"],
    ["focused", "alert", "uplifted"],
    ["happy", "relaxed", "creative"],
];

const FLAVOR_SETS: [[&str; 3]; 5] = [
    ["sweet", "citrus", "earthy"],
    ["pine", "woody", "spicy"],
    ["fruity", "sweet", "tropical"],
    ["earthy", "herbal", "spicy"],
    ["citrus", "lemon", "sweet"],
];

const KINDS: [CultivarKind; 3] = [CultivarKind::Indica, CultivarKind::Sativa, CultivarKind::Hybrid];

/// Random but realistic profiles; deterministic when seeded
#[derive(Debug)]
pub struct FallbackGenerator {
    rng: Mutex<StdRng>,
}

impl FallbackGenerator {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for FallbackGenerator {
    fn generate(&self, name: &str) -> Result<ChemotypeRecord> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Generator("cannot generate a record without a name".to_string()));
        }

        let mut rng = self.rng.lock();
        let mut record = ChemotypeRecord::new(name);
        for (compound, low, high) in COMPOUND_RANGES {
            let value = rng.random_range(low..high);
            record = match compound.family() {
                Family::Cannabinoid => record.with_cannabinoid(compound.id(), value),
                Family::Terpene => record.with_terpene(compound.id(), value),
            };
        }

        let effects = EFFECT_SETS.choose(&mut *rng).copied().unwrap_or(EFFECT_SETS[0]);
        let flavors = FLAVOR_SETS.choose(&mut *rng).copied().unwrap_or(FLAVOR_SETS[0]);
        let kind = KINDS.choose(&mut *rng).copied().unwrap_or_default();

        let thc = record.cannabinoids[Compound::Thc.id()] * 100.0;
        let cbd = record.cannabinoids[Compound::Cbd.id()] * 100.0;
        record.thc_range = Some(format!("{:.1}-{:.1}%", thc - 2.0, thc + 2.0));
        record.cbd_range = Some(format!("{:.1}-{:.1}%", cbd - 0.5, cbd + 0.5));

        let kind_label = match kind {
            CultivarKind::Indica => "indica",
            CultivarKind::Sativa => "sativa",
            _ => "hybrid",
        };
        record.description = Some(format!(
            "A {} cultivar with {}, {} flavors and {}, {} effects.",
            kind_label, flavors[0], flavors[1], effects[0], effects[1]
        ));

        Ok(record
            .with_effects(effects)
            .with_flavors(flavors)
            .with_kind(kind))
    }
}
