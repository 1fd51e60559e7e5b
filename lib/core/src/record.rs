//! Chemotype records
//!
//! A [`ChemotypeRecord`] is the sparse, as-measured chemical profile of one
//! cultivar plus the descriptive metadata the aggregator pools. Only measured
//! compounds appear in the maps; normalization fills in the rest.

use crate::{Compound, Error, Family, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse compound id -> concentration (fraction, non-negative)
pub type CompoundMap = BTreeMap<String, f64>;

/// Cultivar type as reported by catalogues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CultivarKind {
    Indica,
    Sativa,
    Hybrid,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Measured chemical profile of one cultivar
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChemotypeRecord {
    /// Cultivar name
    pub name: String,

    #[serde(default)]
    pub cannabinoids: CompoundMap,

    #[serde(default)]
    pub terpenes: CompoundMap,

    #[serde(default)]
    pub effects: Vec<String>,

    #[serde(default)]
    pub medical_effects: Vec<String>,

    #[serde(default)]
    pub flavors: Vec<String>,

    #[serde(default)]
    pub aromas: Vec<String>,

    #[serde(default, rename = "type")]
    pub kind: CultivarKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thc_range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cbd_range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ChemotypeRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_cannabinoid(mut self, id: &str, value: f64) -> Self {
        self.cannabinoids.insert(id.to_string(), value);
        self
    }

    pub fn with_terpene(mut self, id: &str, value: f64) -> Self {
        self.terpenes.insert(id.to_string(), value);
        self
    }

    pub fn with_effects<I, S>(mut self, effects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.effects = effects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_medical_effects<I, S>(mut self, effects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.medical_effects = effects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_flavors<I, S>(mut self, flavors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.flavors = flavors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_aromas<I, S>(mut self, aromas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aromas = aromas.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_kind(mut self, kind: CultivarKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sparse map for one family
    #[inline]
    pub fn family_map(&self, family: Family) -> &CompoundMap {
        match family {
            Family::Cannabinoid => &self.cannabinoids,
            Family::Terpene => &self.terpenes,
        }
    }

    /// Measured value for a canonical compound: the first finite, positive
    /// value under a case-insensitive key match. Agrees with [`crate::normalize`].
    pub fn measured(&self, compound: Compound) -> Option<f64> {
        self.family_map(compound.family())
            .iter()
            .filter(|(id, _)| id.trim().eq_ignore_ascii_case(compound.id()))
            .map(|(_, value)| *value)
            .find(|value| value.is_finite() && *value > 0.0)
    }

    /// Check the record against the canonical schema.
    ///
    /// - every key is a canonical compound id of the matching family
    /// - every value is finite and non-negative
    /// - both families carry at least one measurement
    pub fn validate(&self) -> Result<()> {
        for family in [Family::Cannabinoid, Family::Terpene] {
            let map = self.family_map(family);
            if map.is_empty() {
                return Err(Error::MissingFamily {
                    name: self.name.clone(),
                    family,
                });
            }

            for (id, value) in map {
                if Compound::from_id_in(id, family).is_none() {
                    return Err(Error::UnknownCompound {
                        family,
                        id: id.clone(),
                    });
                }
                if !value.is_finite() || *value < 0.0 {
                    return Err(Error::InvalidConcentration {
                        compound: id.clone(),
                        value: *value,
                    });
                }
            }
        }

        Ok(())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_record() -> ChemotypeRecord {
        ChemotypeRecord::new("Blue Dream")
            .with_cannabinoid("thc", 0.21)
            .with_cannabinoid("cbd", 0.003)
            .with_terpene("myrcene", 0.55)
            .with_terpene("pinene", 0.70)
    }

    #[test]
    fn test_validate_accepts_canonical_record() {
        assert!(valid_record().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_key() {
        let record = valid_record().with_terpene("terpineol", 0.1);
        assert!(matches!(
            record.validate(),
            Err(Error::UnknownCompound { family: Family::Terpene, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_cross_family_key() {
        let record = valid_record().with_terpene("thc", 0.1);
        assert!(matches!(record.validate(), Err(Error::UnknownCompound { .. })));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative = valid_record().with_terpene("linalool", -0.1);
        assert!(matches!(
            negative.validate(),
            Err(Error::InvalidConcentration { .. })
        ));

        let nan = valid_record().with_cannabinoid("cbg", f64::NAN);
        assert!(matches!(nan.validate(), Err(Error::InvalidConcentration { .. })));
    }

    #[test]
    fn test_validate_requires_both_families() {
        let record = ChemotypeRecord::new("Terps Only").with_terpene("myrcene", 0.4);
        assert!(matches!(
            record.validate(),
            Err(Error::MissingFamily { family: Family::Cannabinoid, .. })
        ));
    }

    #[test]
    fn test_measured_ignores_case_and_zero() {
        let record = ChemotypeRecord::new("x")
            .with_terpene("Myrcene", 0.5)
            .with_terpene("limonene", 0.0);
        assert_eq!(record.measured(Compound::Myrcene), Some(0.5));
        assert_eq!(record.measured(Compound::Limonene), None);
        assert_eq!(record.measured(Compound::Pinene), None);
    }

    #[test]
    fn test_measured_matches_normalize() {
        let record = ChemotypeRecord::new("x")
            .with_cannabinoid("THC", 0.0)
            .with_cannabinoid("thc", 0.2)
            .with_terpene("myrcene", f64::INFINITY);
        assert_eq!(record.measured(Compound::Thc), Some(0.2));
        assert_eq!(record.measured(Compound::Myrcene), None);

        let vector = crate::normalize_record(&record);
        assert_eq!(vector.get(Compound::Thc), 0.2);
        assert_eq!(vector.get(Compound::Myrcene), Compound::Myrcene.imputation_floor());
    }

    #[test]
    fn test_json_defaults() {
        let record = ChemotypeRecord::from_json_str(
            r#"{"name": "og kush", "terpenes": {"myrcene": 0.75}, "type": "indica"}"#,
        )
        .unwrap();
        assert_eq!(record.kind, CultivarKind::Indica);
        assert!(record.cannabinoids.is_empty());
        assert!(record.effects.is_empty());

        let odd = ChemotypeRecord::from_json_str(r#"{"name": "x", "type": "ruderalis"}"#).unwrap();
        assert_eq!(odd.kind, CultivarKind::Unknown);
    }
}
