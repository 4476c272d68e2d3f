use std::sync::Arc;

use tracing::{debug, info};

use crate::core::config::Config;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::types::dataset::{Dataset, DatasetStatus};
use crate::types::params::DeliveryMode;
use crate::types::queue::DatasetStatusMessage;

/// Persistence of dataset records and their status lifecycle
pub struct DatasetService;

impl DatasetService {
    /// Load a stored dataset, failing with `DatasetNotFound` if there is none
    pub async fn load(id: &str, config: Arc<Config>) -> OrchestratorResult<Dataset> {
        config
            .database()
            .get_dataset(id)
            .await?
            .ok_or_else(|| OrchestratorError::DatasetNotFound { id: id.to_string() })
    }

    pub async fn is_stored(id: &str, config: Arc<Config>) -> OrchestratorResult<bool> {
        Ok(config.database().get_dataset(id).await?.is_some())
    }

    /// Insert the dataset if it is new, otherwise overwrite the stored row.
    /// The search index is synced afterwards and the status is published if requested.
    pub async fn save(dataset: &Dataset, publish_status: bool, config: Arc<Config>) -> OrchestratorResult<()> {
        dataset.validate()?;

        if Self::is_stored(&dataset.id, config.clone()).await? {
            config.database().update_dataset(dataset).await?;
        } else {
            config.database().insert_dataset(dataset).await?;
        }
        info!(ds_id = %dataset.id, ds_name = %dataset.name, status = %dataset.status, "Saved dataset");

        config.search_index().sync_dataset(&dataset.id).await?;

        if publish_status {
            config.queue().publish_status(DatasetStatusMessage::new(dataset.id.clone(), dataset.status)).await?;
        }
        Ok(())
    }

    /// Move the dataset to `status` and persist it.
    /// The new status is published when messages are delivered through the queue.
    ///
    /// With strict transitions the stored status is the one checked, the in-memory one only
    /// counts for a dataset that isn't stored yet.
    pub async fn set_status(dataset: &mut Dataset, status: DatasetStatus, config: Arc<Config>) -> OrchestratorResult<()> {
        if config.dispatch_params().strict_status_transitions {
            let current = match config.database().get_dataset(&dataset.id).await? {
                Some(stored) => stored.status,
                None => dataset.status,
            };
            if !current.can_transition_to(status) {
                return Err(OrchestratorError::InvalidStatusTransition { id: dataset.id.clone(), from: current, to: status });
            }
        } else if !dataset.status.can_transition_to(status) {
            debug!(ds_id = %dataset.id, from = %dataset.status, to = %status, "Unexpected status transition");
        }

        dataset.status = status;
        let publish_status = config.dispatch_params().delivery_mode == DeliveryMode::Queue;
        Self::save(dataset, publish_status, config).await
    }
}
