pub mod consistency;

use thiserror::Error;

use crate::core::client::database::DatabaseError;
use crate::core::client::job::JobFactoryError;
use crate::core::client::mol_db::MolDbError;
use crate::core::client::queue::QueueError;
use crate::core::client::search_index::SearchIndexError;
use crate::core::client::storage::StorageError;
use crate::types::dataset::DatasetStatus;
pub use consistency::ConsistencyError;

/// Result type for orchestrator operations
pub type OrchestratorResult<T> = Result<T, OrchestratorError>;

/// Error types for the orchestrator
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Search index error: {0}")]
    SearchIndexError(#[from] SearchIndexError),

    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Molecular database error: {0}")]
    MolDbError(#[from] MolDbError),

    /// Errors of the job factory are surfaced as they are
    #[error(transparent)]
    JobFactoryError(#[from] JobFactoryError),

    #[error("Dataset does not exist: {id}")]
    DatasetNotFound { id: String },

    #[error("Dataset already exists: {id} - {name}")]
    DatasetAlreadyExists { id: String, name: String },

    /// The dataset has no completed annotation yet, so there is no ion image to align to
    #[error("No annotation images found for dataset {ds_id}")]
    NoAnnotationImages { ds_id: String },

    #[error("Consistency error: {0}")]
    ConsistencyError(#[from] ConsistencyError),

    #[error("Dataset {id:?} is missing required field {field}")]
    InvalidDataset { id: String, field: &'static str },

    #[error("Invalid status transition {from} -> {to} for dataset {id}")]
    InvalidStatusTransition { id: String, from: DatasetStatus, to: DatasetStatus },

    #[error("Invalid transform: {0}")]
    InvalidTransform(String),

    #[error("Invalid zoom: {0}")]
    InvalidZoom(String),

    #[error("Decoy job is not set for molecular database {0}")]
    DecoyJobNotSet(String),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Render pool closed: {0}")]
    RenderPoolError(#[from] tokio::sync::AcquireError),

    #[error("Background task failed: {0}")]
    TaskJoinError(#[from] tokio::task::JoinError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl OrchestratorError {
    /// True for every flavour of "the thing asked for doesn't exist"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            OrchestratorError::DatasetNotFound { .. }
                | OrchestratorError::NoAnnotationImages { .. }
                | OrchestratorError::DatabaseError(DatabaseError::DatasetNotFound(_))
                | OrchestratorError::StorageError(StorageError::ImageNotFound { .. })
                | OrchestratorError::MolDbError(MolDbError::DatabaseNotFound(_))
        )
    }
}
