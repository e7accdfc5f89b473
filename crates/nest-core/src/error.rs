use thiserror::Error;

#[derive(Error, Debug)]
pub enum NestError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Stored or imported data could not be read as a board snapshot.
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NestError {
    pub fn is_parse(&self) -> bool {
        matches!(self, NestError::Parse(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, NestError::Validation(_))
    }
}
