use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Type graph decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unknown symbol #{0}")]
    UnknownSymbol(usize),

    #[error("Verifier error: {0}")]
    VerifierError(String),
}
