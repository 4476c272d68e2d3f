pub mod error;

use async_trait::async_trait;
pub use error::JobFactoryError;

use crate::types::dataset::Dataset;

/// Starts the annotation computation of a dataset. The computation itself lives elsewhere.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnotationJobFactory: Send + Sync {
    async fn run(&self, dataset: &Dataset) -> Result<(), JobFactoryError>;
}
