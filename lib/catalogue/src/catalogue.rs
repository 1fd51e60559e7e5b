use ahash::AHashMap;
use chemomatch_core::{ChemotypeRecord, Error, Result};
use parking_lot::RwLock;
use std::path::Path;
use tracing::info;

static BUILTIN_CULTIVARS: &str = include_str!("../data/cultivars.json");

/// Source of known chemotype records
pub trait Catalogue: Send + Sync {
    /// Find a record by name (case-insensitive, surrounding whitespace ignored)
    fn lookup(&self, name: &str) -> Result<ChemotypeRecord>;

    /// Add or replace a record, returning the one it replaced
    fn insert(&self, record: ChemotypeRecord) -> Result<Option<ChemotypeRecord>>;

    /// Record names, sorted
    fn names(&self) -> Vec<String>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every record, sorted by name
    fn records(&self) -> Vec<ChemotypeRecord> {
        self.names()
            .iter()
            .filter_map(|name| self.lookup(name).ok())
            .collect()
    }
}

fn catalogue_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Thread-safe in-memory catalogue
#[derive(Debug, Default)]
pub struct InMemoryCatalogue {
    records: RwLock<AHashMap<String, ChemotypeRecord>>,
}

impl InMemoryCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalogue seeded with the bundled well-known cultivars
    pub fn builtin() -> Result<Self> {
        let catalogue = Self::from_json_str(BUILTIN_CULTIVARS)?;
        info!(cultivars = catalogue.len(), "Loaded built-in catalogue");
        Ok(catalogue)
    }

    /// Load from a JSON array of records
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<ChemotypeRecord> = serde_json::from_str(json)?;
        let catalogue = Self::new();
        for record in records {
            catalogue.insert(record)?;
        }
        Ok(catalogue)
    }

    /// Load from a JSON file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let catalogue = Self::from_json_str(&json)?;
        info!(
            path = %path.display(),
            cultivars = catalogue.len(),
            "Loaded catalogue"
        );
        Ok(catalogue)
    }

    /// Write every record as a pretty JSON array
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.records())?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl Catalogue for InMemoryCatalogue {
    fn lookup(&self, name: &str) -> Result<ChemotypeRecord> {
        self.records
            .read()
            .get(&catalogue_key(name))
            .cloned()
            .ok_or_else(|| Error::CultivarNotFound(name.trim().to_string()))
    }

    fn insert(&self, record: ChemotypeRecord) -> Result<Option<ChemotypeRecord>> {
        let key = catalogue_key(&record.name);
        if key.is_empty() {
            return Err(Error::EmptyInput("cultivar name"));
        }
        Ok(self.records.write().insert(key, record))
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .records
            .read()
            .values()
            .map(|r| r.name.clone())
            .collect();
        names.sort();
        names
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}
