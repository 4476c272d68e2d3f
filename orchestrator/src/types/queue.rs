use serde::{Deserialize, Serialize};

use crate::types::action::{ActionExtras, DatasetAction};
use crate::types::dataset::DatasetStatus;

/// Message consumed by the workers listening on the action queue
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DatasetActionMessage {
    pub ds_id: String,
    pub ds_name: String,
    pub input_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    pub action: DatasetAction,
    #[serde(flatten)]
    pub extras: ActionExtras,
}

/// Status notification, published fire-and-forget
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DatasetStatusMessage {
    pub ds_id: String,
    pub status: DatasetStatus,
}

impl DatasetStatusMessage {
    pub fn new(ds_id: impl Into<String>, status: DatasetStatus) -> Self {
        Self { ds_id: ds_id.into(), status }
    }
}
