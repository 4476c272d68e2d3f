use thiserror::Error;

#[derive(Error, Debug)]
pub enum MolDbError {
    #[error("Molecular database not found: {0}")]
    DatabaseNotFound(String),

    #[error("Molecular database service request failed: {0}")]
    RequestFailed(String),

    #[error("Unexpected molecular database service response: {0}")]
    InvalidResponse(String),
}
