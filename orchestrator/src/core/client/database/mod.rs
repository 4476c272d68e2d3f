pub mod error;

use async_trait::async_trait;
pub use error::DatabaseError;

use crate::types::dataset::Dataset;
use crate::types::image::{IsoImageIds, OpticalImageTile, RawOpticalImage, StorageClass};
use crate::types::mol_db::FinishedJob;
use crate::types::peaks::{PeakRow, TheorPeaksQuery};

/// Trait defining the relational storage operations the engine relies on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// get_dataset - Get a dataset by its id, `None` if it isn't stored
    async fn get_dataset(&self, id: &str) -> Result<Option<Dataset>, DatabaseError>;
    /// insert_dataset - Insert a new dataset row
    async fn insert_dataset(&self, dataset: &Dataset) -> Result<(), DatabaseError>;
    /// update_dataset - Overwrite every column of an existing dataset row
    async fn update_dataset(&self, dataset: &Dataset) -> Result<(), DatabaseError>;
    /// delete_dataset - Delete the dataset row, dependent rows cascade
    async fn delete_dataset(&self, id: &str) -> Result<(), DatabaseError>;

    /// get_finished_jobs - Annotation jobs of the dataset with the molecular database they ran against
    async fn get_finished_jobs(&self, ds_id: &str) -> Result<Vec<FinishedJob>, DatabaseError>;
    /// delete_job - Delete a job together with its annotations
    async fn delete_job(&self, job_id: i64) -> Result<(), DatabaseError>;

    /// get_ion_image_storage_class - Where the isotope images of the dataset are kept.
    /// Fails with `DatasetNotFound` for an unknown dataset.
    async fn get_ion_image_storage_class(&self, ds_id: &str) -> Result<StorageClass, DatabaseError>;
    /// get_iso_image_ids - Isotope image ids of the dataset annotations, one entry per annotation
    async fn get_iso_image_ids(&self, ds_id: &str) -> Result<Vec<IsoImageIds>, DatabaseError>;
    /// get_first_iso_image_id - Any non-null isotope image id among the dataset annotations,
    /// `None` when no annotation has an image
    async fn get_first_iso_image_id(&self, ds_id: &str) -> Result<Option<String>, DatabaseError>;

    /// get_raw_optical_image - The raw optical image and its transform, if one is set
    async fn get_raw_optical_image(&self, ds_id: &str) -> Result<Option<RawOpticalImage>, DatabaseError>;
    /// set_raw_optical_image - Store the raw optical image id and transform of the dataset
    async fn set_raw_optical_image(&self, ds_id: &str, image: &RawOpticalImage) -> Result<(), DatabaseError>;
    /// clear_raw_optical_image - Unset the raw optical image id and transform of the dataset
    async fn clear_raw_optical_image(&self, ds_id: &str) -> Result<(), DatabaseError>;
    /// get_optical_image_ids - Ids of the stored optical image tiles
    async fn get_optical_image_ids(&self, ds_id: &str) -> Result<Vec<String>, DatabaseError>;
    /// delete_optical_images - Delete all optical image tile rows of the dataset
    async fn delete_optical_images(&self, ds_id: &str) -> Result<(), DatabaseError>;
    /// insert_optical_images - Insert optical image tile rows
    async fn insert_optical_images(&self, tiles: Vec<OpticalImageTile>) -> Result<(), DatabaseError>;

    /// count_formulas - Number of formulas stored for a molecular database
    async fn count_formulas(&self, mol_db_id: i64) -> Result<u64, DatabaseError>;
    /// insert_formulas - Store the formulas of a molecular database, ids are assigned by the database
    async fn insert_formulas(&self, mol_db_id: i64, formulas: Vec<String>) -> Result<(), DatabaseError>;
    /// get_formulas - `(formula_id, formula)` pairs of a molecular database
    async fn get_formulas(&self, mol_db_id: i64) -> Result<Vec<(i64, String)>, DatabaseError>;

    /// get_target_peaks - Theoretical peaks of every formula of the database combined with `adducts`
    async fn get_target_peaks(
        &self,
        query: &TheorPeaksQuery,
        adducts: Vec<String>,
    ) -> Result<Vec<PeakRow>, DatabaseError>;
    /// get_decoy_peaks - Theoretical peaks of every formula combined with the decoy adducts
    /// assigned to it by the given job
    async fn get_decoy_peaks(&self, query: &TheorPeaksQuery, job_id: i64) -> Result<Vec<PeakRow>, DatabaseError>;
}
