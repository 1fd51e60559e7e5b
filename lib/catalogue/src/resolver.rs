use crate::catalogue::Catalogue;
use crate::generator::Generator;
use chemomatch_core::{ChemotypeRecord, Error, Result};
use tracing::{info, warn};

/// Resolves cultivar names to records: catalogue first, then the generator.
///
/// Generated records are validated against the canonical schema and cached in
/// the catalogue so later lookups of the same name are stable.
pub struct Resolver<C, G> {
    catalogue: C,
    generator: Option<G>,
}

impl<C: Catalogue, G: Generator> Resolver<C, G> {
    pub fn new(catalogue: C, generator: G) -> Self {
        Self {
            catalogue,
            generator: Some(generator),
        }
    }

    /// Resolver that only consults the catalogue
    pub fn catalogue_only(catalogue: C) -> Self {
        Self {
            catalogue,
            generator: None,
        }
    }

    pub fn catalogue(&self) -> &C {
        &self.catalogue
    }

    pub fn resolve(&self, name: &str) -> Result<ChemotypeRecord> {
        let miss = match self.catalogue.lookup(name) {
            Ok(record) => return Ok(record),
            Err(e @ Error::CultivarNotFound(_)) => e,
            Err(e) => return Err(e),
        };

        let Some(generator) = &self.generator else {
            return Err(miss);
        };

        let name = name.trim();
        let mut record = generator.generate(name)?;
        // cache under the requested name
        record.name = name.to_string();

        if let Err(e) = record.validate() {
            warn!(cultivar = name, error = %e, "Rejected generated record");
            return Err(Error::InvalidRecord {
                name: name.to_string(),
                source: Box::new(e),
            });
        }

        info!(cultivar = name, "Generated record for unknown cultivar");
        self.catalogue.insert(record.clone())?;
        Ok(record)
    }

    /// Resolve several names, failing on the first error
    pub fn resolve_all<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<ChemotypeRecord>> {
        names.iter().map(|name| self.resolve(name.as_ref())).collect()
    }
}
