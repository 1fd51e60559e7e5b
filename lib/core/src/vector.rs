use crate::compound::{Compound, Family, COMPOUND_COUNT};
use serde::{Deserialize, Serialize};

/// Fixed-length, canonically ordered values for one compound family
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawNormalizedVector")]
pub struct NormalizedVector {
    family: Family,
    data: Vec<f64>,
}

/// Unchecked wire form; the length is checked on conversion
#[derive(Deserialize)]
struct RawNormalizedVector {
    family: Family,
    data: Vec<f64>,
}

impl TryFrom<RawNormalizedVector> for NormalizedVector {
    type Error = String;

    fn try_from(raw: RawNormalizedVector) -> Result<Self, Self::Error> {
        if raw.data.len() != raw.family.len() {
            return Err(format!(
                "{} vector must have {} entries, got {}",
                raw.family,
                raw.family.len(),
                raw.data.len()
            ));
        }
        Ok(Self {
            family: raw.family,
            data: raw.data,
        })
    }
}

impl NormalizedVector {
    /// Build from values already in canonical family order.
    ///
    /// # Panics
    /// Panics if `data` does not have exactly one entry per canonical compound of `family`.
    #[must_use]
    pub fn new(family: Family, data: Vec<f64>) -> Self {
        assert_eq!(
            data.len(),
            family.len(),
            "{} vector must have {} entries",
            family,
            family.len()
        );
        Self { family, data }
    }

    #[inline]
    #[must_use]
    pub fn family(&self) -> Family {
        self.family
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Value for a compound of this family, `None` for the other family
    #[inline]
    pub fn get(&self, compound: Compound) -> Option<f64> {
        (compound.family() == self.family).then(|| self.data[compound.family_index()])
    }

    /// (compound, value) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Compound, f64)> + '_ {
        self.family
            .compounds()
            .iter()
            .copied()
            .zip(self.data.iter().copied())
    }
}

/// Combined chemotype vector: cannabinoid sub-vector followed by terpene sub-vector
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChemotypeVector {
    data: [f64; COMPOUND_COUNT],
}

impl ChemotypeVector {
    #[inline]
    #[must_use]
    pub fn new(data: [f64; COMPOUND_COUNT]) -> Self {
        Self { data }
    }

    /// Concatenate the two family vectors.
    ///
    /// # Panics
    /// Panics if the arguments are not a cannabinoid and a terpene vector, in that order.
    #[must_use]
    pub fn from_parts(cannabinoids: &NormalizedVector, terpenes: &NormalizedVector) -> Self {
        assert_eq!(cannabinoids.family(), Family::Cannabinoid);
        assert_eq!(terpenes.family(), Family::Terpene);

        let mut data = [0.0; COMPOUND_COUNT];
        data[..Family::Terpene.offset()].copy_from_slice(cannabinoids.as_slice());
        data[Family::Terpene.offset()..].copy_from_slice(terpenes.as_slice());
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        COMPOUND_COUNT
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn get(&self, compound: Compound) -> f64 {
        self.data[compound.index()]
    }

    /// Sub-vector for one family
    #[must_use]
    pub fn family(&self, family: Family) -> NormalizedVector {
        let start = family.offset();
        NormalizedVector::new(family, self.data[start..start + family.len()].to_vec())
    }

    /// (compound, value) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Compound, f64)> + '_ {
        Compound::ALL.iter().copied().zip(self.data.iter().copied())
    }
}
