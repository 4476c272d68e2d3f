pub mod error;

use async_trait::async_trait;
pub use error::SearchIndexError;

use crate::types::dataset::IsotopeGenerationConfig;
use crate::types::mol_db::MolDbInfo;

/// Trait defining the search index operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchIndexClient: Send + Sync {
    /// Refresh the dataset document from storage
    async fn sync_dataset(&self, ds_id: &str) -> Result<(), SearchIndexError>;

    /// Remove the dataset document and all its annotation documents
    async fn delete_dataset(&self, ds_id: &str) -> Result<(), SearchIndexError>;

    /// (Re)index the annotations of the dataset found in `mol_db`
    async fn index_dataset(
        &self,
        ds_id: &str,
        mol_db: &MolDbInfo,
        isotope_generation: &IsotopeGenerationConfig,
    ) -> Result<(), SearchIndexError>;
}
