pub mod direct;
pub mod queued;

use std::sync::Arc;

use async_trait::async_trait;

pub use direct::DirectDatasetManager;
pub use queued::QueuedDatasetManager;

use crate::core::config::Config;
use crate::error::OrchestratorResult;
use crate::service::config_diff::ConfigDiff;
use crate::types::action::{ActionExtras, ActionIntent, ActionPriority, DatasetAction, DispatchOutcome};
use crate::types::dataset::Dataset;
use crate::types::params::DispatchStrategy;

/// What an UPDATE request turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateDecision {
    /// Annotate again, dropping every previous result first when `del_first` is set
    Add { del_first: bool },
    /// Results are still valid, only the index has to be rebuilt
    Reindex { priority: ActionPriority },
    Nothing,
}

/// Decision table shared by both managers.
///
/// `reindex_required` covers changes the classifier doesn't report, e.g. a metadata edit.
pub fn decide_update(diff: ConfigDiff, reindex_required: bool) -> UpdateDecision {
    match diff {
        ConfigDiff::InstrParamsDiff => UpdateDecision::Add { del_first: true },
        ConfigDiff::NewMolDb => UpdateDecision::Add { del_first: false },
        ConfigDiff::Equal if reindex_required => UpdateDecision::Reindex { priority: ActionPriority::High },
        ConfigDiff::Equal => UpdateDecision::Nothing,
    }
}

/// Dataset data management in the engine
#[async_trait]
pub trait DatasetManager: Send + Sync {
    async fn add(
        &self,
        dataset: Dataset,
        extras: ActionExtras,
        priority: ActionPriority,
    ) -> OrchestratorResult<DispatchOutcome>;

    async fn update(&self, dataset: Dataset, priority: ActionPriority) -> OrchestratorResult<DispatchOutcome>;

    async fn delete(&self, dataset: Dataset, extras: ActionExtras) -> OrchestratorResult<DispatchOutcome>;

    async fn process(&self, intent: ActionIntent) -> OrchestratorResult<DispatchOutcome> {
        let ActionIntent { dataset, kind, priority, extras } = intent;
        match kind {
            DatasetAction::Add => self.add(dataset, extras, priority).await,
            DatasetAction::Update => self.update(dataset, priority).await,
            DatasetAction::Delete => self.delete(dataset, extras).await,
        }
    }
}

pub fn build_dataset_manager(strategy: DispatchStrategy, config: Arc<Config>) -> Box<dyn DatasetManager> {
    match strategy {
        DispatchStrategy::Direct => Box::new(DirectDatasetManager::new(config)),
        DispatchStrategy::Queued => Box::new(QueuedDatasetManager::new(config)),
    }
}
