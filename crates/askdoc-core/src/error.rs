use thiserror::Error;

/// Failure taxonomy of the retrieval pipeline. Every variant is terminal
/// for the call that raised it; no partial state survives a failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Document is empty or whitespace-only")]
    EmptyDocument,

    #[error("No indexable terms found in any chunk")]
    EmptyVocabulary,

    #[error("Index has not been fitted yet")]
    IndexNotFitted,

    #[error("No document has been indexed; ingest one first")]
    EngineNotReady,

    #[error("Query is empty or whitespace-only")]
    EmptyQuery,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
