pub mod error;

use async_trait::async_trait;
use bytes::Bytes;
pub use error::StorageError;

use crate::types::image::{ImageKind, StorageClass};

/// Trait defining the image store operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStoreClient: Send + Sync {
    /// Fetch the encoded image
    async fn get_image_by_id(&self, storage: StorageClass, kind: ImageKind, id: &str) -> Result<Bytes, StorageError>;

    /// Store an encoded image, returns the id assigned by the store
    async fn post_image(&self, storage: StorageClass, kind: ImageKind, data: Bytes) -> Result<String, StorageError>;

    async fn delete_image_by_id(&self, storage: StorageClass, kind: ImageKind, id: &str) -> Result<(), StorageError>;
}

/// Trait defining operations on the raw measurement data uploaded by users
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RawDataClient: Send + Sync {
    /// Remove the dataset input data from the object store
    async fn delete_input_data(&self, ds_id: &str, input_path: &str) -> Result<(), StorageError>;
}
