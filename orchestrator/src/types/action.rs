use serde::{Deserialize, Serialize};

use crate::types::dataset::Dataset;

/// Actions the engine can take on a dataset
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum DatasetAction {
    Add,
    Update,
    Delete,
}

/// Priorities of messages sent to the action queue. Higher is served first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, strum_macros::Display)]
pub enum ActionPriority {
    #[default]
    Low = 0,
    Standard = 1,
    High = 2,
}

impl From<ActionPriority> for u8 {
    fn from(priority: ActionPriority) -> Self {
        priority as u8
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Optional flags travelling with an action
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionExtras {
    /// Delete all existing results before adding the dataset again
    #[serde(default, skip_serializing_if = "is_false")]
    pub del_first: bool,
    /// Also remove the raw input data when deleting
    #[serde(default, skip_serializing_if = "is_false")]
    pub del_raw_data: bool,
}

impl ActionExtras {
    pub fn del_first() -> Self {
        Self { del_first: true, ..Self::default() }
    }

    pub fn del_raw_data() -> Self {
        Self { del_raw_data: true, ..Self::default() }
    }
}

/// A request to run `kind` on `dataset`
#[derive(Debug, Clone)]
pub struct ActionIntent {
    pub dataset: Dataset,
    pub kind: DatasetAction,
    pub priority: ActionPriority,
    pub extras: ActionExtras,
}

impl ActionIntent {
    pub fn new(dataset: Dataset, kind: DatasetAction) -> Self {
        Self { dataset, kind, priority: ActionPriority::default(), extras: ActionExtras::default() }
    }

    pub fn with_priority(mut self, priority: ActionPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_extras(mut self, extras: ActionExtras) -> Self {
        self.extras = extras;
        self
    }
}

/// What a dataset manager did with an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The action ran in-process
    Executed(DatasetAction),
    /// A message was published to the action queue
    Enqueued { action: DatasetAction, priority: ActionPriority },
    /// The dataset was marked as queued but local delivery mode published nothing
    QueuedLocally(DatasetAction),
    /// Nothing changed that requires an action
    Skipped,
}
