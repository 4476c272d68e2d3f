use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::core::config::Config;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::service::config_diff::{classify, metadata_changed, removed_mol_dbs};
use crate::service::dataset::DatasetService;
use crate::service::dispatcher::{decide_update, DatasetManager, UpdateDecision};
use crate::types::action::{ActionExtras, ActionPriority, DatasetAction, DispatchOutcome};
use crate::types::dataset::{Dataset, DatasetStatus};
use crate::types::params::DeliveryMode;

/// Turns actions into messages for the workers. Used by the API.
pub struct QueuedDatasetManager {
    config: Arc<Config>,
}

impl QueuedDatasetManager {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    async fn post_message(
        &self,
        mut dataset: Dataset,
        action: DatasetAction,
        priority: ActionPriority,
        extras: ActionExtras,
    ) -> OrchestratorResult<DispatchOutcome> {
        DatasetService::set_status(&mut dataset, DatasetStatus::Queued, self.config.clone()).await?;

        if self.config.dispatch_params().delivery_mode == DeliveryMode::Local {
            return Ok(DispatchOutcome::QueuedLocally(action));
        }

        let message = dataset.to_queue_message(action, extras);
        self.config.queue().publish_action(message, priority).await?;
        info!(ds_id = %dataset.id, %action, %priority, "New message posted to the action queue");
        Ok(DispatchOutcome::Enqueued { action, priority })
    }
}

#[async_trait]
impl DatasetManager for QueuedDatasetManager {
    /// Send an add message. Fails if the dataset exists and isn't going to be deleted first.
    #[tracing::instrument(skip_all, fields(ds_id = %dataset.id, del_first = extras.del_first, %priority), ret, err)]
    async fn add(
        &self,
        dataset: Dataset,
        extras: ActionExtras,
        priority: ActionPriority,
    ) -> OrchestratorResult<DispatchOutcome> {
        if !extras.del_first && DatasetService::is_stored(&dataset.id, self.config.clone()).await? {
            return Err(OrchestratorError::DatasetAlreadyExists { id: dataset.id, name: dataset.name });
        }
        let extras = ActionExtras { del_first: extras.del_first, ..ActionExtras::default() };
        self.post_message(dataset, DatasetAction::Add, priority, extras).await
    }

    /// Send an update or add message, or do nothing
    #[tracing::instrument(skip_all, fields(ds_id = %dataset.id, %priority), ret, err)]
    async fn update(&self, dataset: Dataset, priority: ActionPriority) -> OrchestratorResult<DispatchOutcome> {
        let stored = DatasetService::load(&dataset.id, self.config.clone()).await?;
        let diff = classify(&stored.config, &dataset.config);

        let mut reindex_required = metadata_changed(&stored.metadata, &dataset.metadata);
        if self.config.dispatch_params().reindex_on_removed_mol_db {
            let removed = removed_mol_dbs(&stored.config, &dataset.config);
            if !removed.is_empty() {
                info!(ds_id = %dataset.id, removed = ?removed, "Molecular databases removed from the config");
                reindex_required = true;
            }
        }

        match decide_update(diff, reindex_required) {
            UpdateDecision::Add { del_first } => {
                let extras = ActionExtras { del_first, ..ActionExtras::default() };
                self.post_message(dataset, DatasetAction::Add, priority, extras).await
            }
            UpdateDecision::Reindex { priority } => {
                self.post_message(dataset, DatasetAction::Update, priority, ActionExtras::default()).await
            }
            UpdateDecision::Nothing => {
                info!(ds_id = %dataset.id, ds_name = %dataset.name, "Nothing to update");
                Ok(DispatchOutcome::Skipped)
            }
        }
    }

    /// Send a delete message, always at the highest priority
    #[tracing::instrument(skip_all, fields(ds_id = %dataset.id, del_raw_data = extras.del_raw_data), ret, err)]
    async fn delete(&self, dataset: Dataset, extras: ActionExtras) -> OrchestratorResult<DispatchOutcome> {
        let extras = ActionExtras { del_raw_data: extras.del_raw_data, ..ActionExtras::default() };
        self.post_message(dataset, DatasetAction::Delete, ActionPriority::High, extras).await
    }
}
