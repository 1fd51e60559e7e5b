//! # chemomatch Core
//!
//! Core types for the chemomatch chemotype similarity engine.
//!
//! - [`Compound`] - the canonical, ordered compound schema
//! - [`ChemotypeRecord`] - sparse measured profile of one cultivar
//! - [`NormalizedVector`] / [`ChemotypeVector`] - fixed-length imputed vectors
//! - [`normalize`] - sparse map to canonical vector
//! - [`stats`] - cosine, euclidean, Pearson and column standardization
//!
//! ## Example
//!
//! ```rust
//! use chemomatch_core::{normalize_record, ChemotypeRecord, Compound};
//!
//! let record = ChemotypeRecord::new("Blue Dream")
//!     .with_cannabinoid("thc", 0.21)
//!     .with_terpene("myrcene", 0.55)
//!     .with_terpene("pinene", 0.70);
//!
//! let vector = normalize_record(&record);
//! assert_eq!(vector.dim(), 16);
//! assert_eq!(vector.get(Compound::Cbd), Compound::Cbd.imputation_floor());
//! ```

pub mod compound;
pub mod error;
pub mod normalize;
pub mod record;
pub mod stats;
pub mod vector;

pub use compound::{Compound, Family, CANNABINOID_COUNT, COMPOUND_COUNT, TERPENE_COUNT};
pub use error::{Error, Result};
pub use normalize::{normalize, normalize_record};
pub use record::{ChemotypeRecord, CompoundMap, CultivarKind};
pub use vector::{ChemotypeVector, NormalizedVector};
