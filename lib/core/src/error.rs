use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty input: need at least one {0}")]
    EmptyInput(&'static str),

    #[error("No reference cultivars to compare against")]
    NoReferences,

    #[error("Invalid reference count: expected {expected}, got {actual}")]
    ReferenceCount { expected: usize, actual: usize },

    #[error("Unknown {family} compound: {id}")]
    UnknownCompound { family: crate::Family, id: String },

    #[error("Invalid concentration for {compound}: {value}")]
    InvalidConcentration { compound: String, value: f64 },

    #[error("Record '{name}' has no {family} measurements")]
    MissingFamily { name: String, family: crate::Family },

    #[error("Invalid record '{name}': {source}")]
    InvalidRecord {
        name: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Cultivar not found: {0}")]
    CultivarNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Generator error: {0}")]
    Generator(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
