//! Canonical compound schema
//!
//! A single ordered enumeration of every compound the engine operates over.
//! The normalizer, the aggregator and the similarity engine all index vectors
//! through [`Compound::index`], so vector length and order can never drift
//! between components.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of canonical cannabinoids
pub const CANNABINOID_COUNT: usize = 5;

/// Number of canonical terpenes
pub const TERPENE_COUNT: usize = 11;

/// Total number of canonical compounds (length of a combined chemotype vector)
pub const COMPOUND_COUNT: usize = CANNABINOID_COUNT + TERPENE_COUNT;

const _COMPOUND_COUNT_CHECK: () = assert!(COMPOUND_COUNT == 16, "COMPOUND_COUNT must equal 16");

/// Compound family selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Cannabinoid,
    Terpene,
}

impl Family {
    /// Canonical compounds of this family, in canonical order
    #[inline]
    pub fn compounds(self) -> &'static [Compound] {
        match self {
            Family::Cannabinoid => &Compound::CANNABINOIDS,
            Family::Terpene => &Compound::TERPENES,
        }
    }

    /// Number of canonical compounds in this family
    #[inline]
    pub fn len(self) -> usize {
        self.compounds().len()
    }

    /// Offset of this family's sub-vector inside a combined vector
    #[inline]
    pub fn offset(self) -> usize {
        match self {
            Family::Cannabinoid => 0,
            Family::Terpene => CANNABINOID_COUNT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Family::Cannabinoid => "cannabinoid",
            Family::Terpene => "terpene",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A canonical compound.
///
/// Variant order is the canonical order: cannabinoids first, then terpenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Compound {
    Thc,
    Cbd,
    Cbg,
    Cbn,
    Thcv,
    Myrcene,
    Limonene,
    Caryophyllene,
    Pinene,
    Linalool,
    Humulene,
    Terpinolene,
    Ocimene,
    Nerolidol,
    Bisabolol,
    Eucalyptol,
}

impl Compound {
    /// Every canonical compound in canonical order
    pub const ALL: [Compound; COMPOUND_COUNT] = [
        Compound::Thc,
        Compound::Cbd,
        Compound::Cbg,
        Compound::Cbn,
        Compound::Thcv,
        Compound::Myrcene,
        Compound::Limonene,
        Compound::Caryophyllene,
        Compound::Pinene,
        Compound::Linalool,
        Compound::Humulene,
        Compound::Terpinolene,
        Compound::Ocimene,
        Compound::Nerolidol,
        Compound::Bisabolol,
        Compound::Eucalyptol,
    ];

    pub const CANNABINOIDS: [Compound; CANNABINOID_COUNT] = [
        Compound::Thc,
        Compound::Cbd,
        Compound::Cbg,
        Compound::Cbn,
        Compound::Thcv,
    ];

    pub const TERPENES: [Compound; TERPENE_COUNT] = [
        Compound::Myrcene,
        Compound::Limonene,
        Compound::Caryophyllene,
        Compound::Pinene,
        Compound::Linalool,
        Compound::Humulene,
        Compound::Terpinolene,
        Compound::Ocimene,
        Compound::Nerolidol,
        Compound::Bisabolol,
        Compound::Eucalyptol,
    ];

    /// Lowercase identifier used in records and serialized output
    pub fn id(self) -> &'static str {
        match self {
            Compound::Thc => "thc",
            Compound::Cbd => "cbd",
            Compound::Cbg => "cbg",
            Compound::Cbn => "cbn",
            Compound::Thcv => "thcv",
            Compound::Myrcene => "myrcene",
            Compound::Limonene => "limonene",
            Compound::Caryophyllene => "caryophyllene",
            Compound::Pinene => "pinene",
            Compound::Linalool => "linalool",
            Compound::Humulene => "humulene",
            Compound::Terpinolene => "terpinolene",
            Compound::Ocimene => "ocimene",
            Compound::Nerolidol => "nerolidol",
            Compound::Bisabolol => "bisabolol",
            Compound::Eucalyptol => "eucalyptol",
        }
    }

    /// Parse a compound identifier (case-insensitive, surrounding whitespace ignored).
    /// Returns `None` for anything outside the canonical schema.
    pub fn from_id(id: &str) -> Option<Compound> {
        let id = id.trim();
        Compound::ALL
            .iter()
            .copied()
            .find(|c| c.id().eq_ignore_ascii_case(id))
    }

    /// Parse a compound identifier restricted to one family
    pub fn from_id_in(id: &str, family: Family) -> Option<Compound> {
        Compound::from_id(id).filter(|c| c.family() == family)
    }

    #[inline]
    pub fn family(self) -> Family {
        if (self as usize) < CANNABINOID_COUNT {
            Family::Cannabinoid
        } else {
            Family::Terpene
        }
    }

    /// Position in a combined (cannabinoids ++ terpenes) vector
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Position inside this compound's family sub-vector
    #[inline]
    pub fn family_index(self) -> usize {
        self.index() - self.family().offset()
    }

    /// Value substituted when the compound was not measured.
    ///
    /// Major compounds sit at 0.1%, trace compounds between 0.005% and 0.05%.
    /// Every floor is strictly positive and below realistic measured levels.
    pub fn imputation_floor(self) -> f64 {
        match self {
            Compound::Thc | Compound::Cbd => 0.001,
            Compound::Cbg => 0.0005,
            Compound::Cbn => 0.0001,
            Compound::Thcv => 0.00005,
            Compound::Myrcene
            | Compound::Limonene
            | Compound::Caryophyllene
            | Compound::Pinene
            | Compound::Linalool => 0.001,
            Compound::Humulene | Compound::Terpinolene | Compound::Ocimene => 0.0005,
            Compound::Nerolidol | Compound::Bisabolol | Compound::Eucalyptol => 0.0001,
        }
    }
}

impl fmt::Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
