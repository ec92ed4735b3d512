
// Error types shared by the pipeline stages.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Word2VecError {
    /// Mode argument other than "SG" or "CBOW".
    #[error("Unknown mode : {0}")]
    UnknownMode(String),

    /// Partition argument other than "part" or "full".
    #[error("Unknown argument : {0}")]
    UnknownPartition(String),

    /// Hyper-parameter outside its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse json config: {0}")]
    Json(#[from] serde_json::Error),

    /// Nothing left to train on after loading and filtering.
    #[error("empty corpus: {0}")]
    EmptyCorpus(String),

    #[error("token: {0} is not in the vocabulary")]
    WordNotFound(String),

    /// A training example refers to a row that does not exist.
    #[error("index out of bounds: {index} >= {max}")]
    IndexOutOfBounds {
        index: usize,
        max: usize,
    },

    #[error("inconsistent matrix shapes: {0}")]
    Shape(String),
}

pub type Result<T> = std::result::Result<T, Word2VecError>;
