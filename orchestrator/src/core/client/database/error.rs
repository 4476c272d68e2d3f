use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The dataset row doesn't exist. Kept apart from other failures so cleanup paths can tell
    /// "nothing to delete" from a broken database.
    #[error("Dataset does not exist: {0}")]
    DatasetNotFound(String),

    #[error("Failed to insert {entity}: {message}")]
    InsertFailed { entity: &'static str, message: String },

    #[error("Failed to update {entity}: {message}")]
    UpdateFailed { entity: &'static str, message: String },

    #[error("Failed to delete {entity}: {message}")]
    DeleteFailed { entity: &'static str, message: String },

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Failed to (de)serialize row: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Connection error: {0}")]
    ConnectionError(String),
}
