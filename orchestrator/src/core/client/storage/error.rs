use thiserror::Error;

use crate::types::image::{ImageKind, StorageClass};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Image {id} of kind {kind} not found in {storage}")]
    ImageNotFound { storage: StorageClass, kind: ImageKind, id: String },

    #[error("Image store request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to delete input data {path}: {message}")]
    InputDataDeletionFailed { path: String, message: String },
}
