//! # Chemomatch Catalogue
//!
//! Where chemotype records come from: a case-insensitive cultivar catalogue,
//! a generator for names the catalogue lacks, and a resolver that combines
//! the two and validates whatever it did not load itself.

pub mod catalogue;
pub mod generator;
pub mod resolver;

pub use catalogue::{Catalogue, InMemoryCatalogue};
pub use generator::{FallbackGenerator, Generator};
pub use resolver::Resolver;
