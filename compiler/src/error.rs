use thiserror::Error;
use typed_id_schema::SchemaError;

#[derive(Debug, Error)]
pub enum TypedIdError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Symbol {symbol} cannot contain the type {candidate}: {reason}")]
    MalformedNesting {
        candidate: String,
        symbol:    String,
        reason:    String,
    },

    #[error("An artifact named \"{0}\" was already added")]
    DuplicateArtifact(String),

    #[error("Generation was cancelled")]
    Cancelled,
}
