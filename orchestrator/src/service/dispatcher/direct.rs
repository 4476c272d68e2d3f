use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::core::client::database::DatabaseError;
use crate::core::config::Config;
use crate::error::OrchestratorResult;
use crate::service::dataset::DatasetService;
use crate::service::dispatcher::DatasetManager;
use crate::types::action::{ActionExtras, ActionPriority, DatasetAction, DispatchOutcome};
use crate::types::dataset::{Dataset, DatasetStatus};
use crate::types::image::ImageKind;
use crate::types::params::DeliveryMode;
use crate::types::queue::DatasetStatusMessage;

/// Runs actions in-process. Used by the daemon consuming the action queue.
pub struct DirectDatasetManager {
    config: Arc<Config>,
}

impl DirectDatasetManager {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    async fn delete_iso_images(&self, dataset: &Dataset) -> OrchestratorResult<()> {
        info!(ds_id = %dataset.id, ds_name = %dataset.name, "Deleting isotope images");

        let storage = match self.config.database().get_ion_image_storage_class(&dataset.id).await {
            Ok(storage) => storage,
            Err(DatabaseError::DatasetNotFound(_)) => {
                warn!(ds_id = %dataset.id, "Attempt to delete isotope images of non-existing dataset. Skipping");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        for image_ids in self.config.database().get_iso_image_ids(&dataset.id).await? {
            for image_id in image_ids.iter().flatten() {
                self.config.image_store().delete_image_by_id(storage, ImageKind::IsoImage, image_id).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DatasetManager for DirectDatasetManager {
    /// Start an annotation run, deleting everything stored for the dataset first if asked to
    #[tracing::instrument(skip_all, fields(ds_id = %dataset.id, del_first = extras.del_first), ret, err)]
    async fn add(
        &self,
        dataset: Dataset,
        extras: ActionExtras,
        _priority: ActionPriority,
    ) -> OrchestratorResult<DispatchOutcome> {
        if extras.del_first {
            self.delete(dataset.clone(), ActionExtras::default()).await?;
        }
        DatasetService::save(&dataset, false, self.config.clone()).await?;
        self.config.job_factory().run(&dataset).await?;
        Ok(DispatchOutcome::Executed(DatasetAction::Add))
    }

    /// Reindex all dataset results
    #[tracing::instrument(skip_all, fields(ds_id = %dataset.id), ret, err)]
    async fn update(&self, mut dataset: Dataset, _priority: ActionPriority) -> OrchestratorResult<DispatchOutcome> {
        DatasetService::set_status(&mut dataset, DatasetStatus::Indexing, self.config.clone()).await?;

        self.config.search_index().delete_dataset(&dataset.id).await?;

        let match_version = self.config.dispatch_params().reindex_on_removed_mol_db;
        for job in self.config.database().get_finished_jobs(&dataset.id).await? {
            let mol_db = self.config.mol_db().find_db_by_id(job.mol_db_id).await?;
            if dataset.config.selects(&mol_db, match_version) {
                info!(ds_id = %dataset.id, mol_db = %mol_db, "Indexing annotations");
                self.config
                    .search_index()
                    .index_dataset(&dataset.id, &mol_db, &dataset.config.isotope_generation)
                    .await?;
            } else {
                info!(ds_id = %dataset.id, job_id = job.id, mol_db = %mol_db, "Deleting results of deselected database");
                self.config.database().delete_job(job.id).await?;
            }
        }

        DatasetService::set_status(&mut dataset, DatasetStatus::Finished, self.config.clone()).await?;
        Ok(DispatchOutcome::Executed(DatasetAction::Update))
    }

    /// Delete all dataset related data
    #[tracing::instrument(skip_all, fields(ds_id = %dataset.id, del_raw_data = extras.del_raw_data), ret, err)]
    async fn delete(&self, dataset: Dataset, extras: ActionExtras) -> OrchestratorResult<DispatchOutcome> {
        warn!(ds_id = %dataset.id, "Deleting dataset");
        self.delete_iso_images(&dataset).await?;
        self.config.search_index().delete_dataset(&dataset.id).await?;
        self.config.database().delete_dataset(&dataset.id).await?;

        if extras.del_raw_data {
            warn!(ds_id = %dataset.id, input_path = %dataset.input_path, "Deleting raw data");
            self.config.raw_data().delete_input_data(&dataset.id, &dataset.input_path).await?;
        }

        if self.config.dispatch_params().delivery_mode == DeliveryMode::Queue {
            self.config
                .queue()
                .publish_status(DatasetStatusMessage::new(dataset.id.clone(), DatasetStatus::Deleted))
                .await?;
        }
        Ok(DispatchOutcome::Executed(DatasetAction::Delete))
    }
}
