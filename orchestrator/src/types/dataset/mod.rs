pub mod config;
pub mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use config::{Charge, DatasetConfig, IsotopeGenerationConfig, MolDbRef, Polarity};
pub use status::DatasetStatus;

use crate::error::OrchestratorError;
use crate::types::action::{ActionExtras, DatasetAction};
use crate::types::constant::SUBMITTER_EMAIL_PATH;
use crate::types::queue::DatasetActionMessage;

/// Model of a dataset as stored by the engine
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Dataset {
    /// External id, never changes once assigned
    pub id: String,
    pub name: String,
    pub input_path: String,
    pub upload_dt: DateTime<Utc>,
    pub metadata: Value,
    pub config: DatasetConfig,
    #[serde(default)]
    pub status: DatasetStatus,
    pub is_public: bool,
    /// Ids of the molecular databases bound to the dataset
    pub mol_dbs: Vec<String>,
}

impl Dataset {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        input_path: impl Into<String>,
        upload_dt: DateTime<Utc>,
        metadata: Value,
        config: DatasetConfig,
        mol_dbs: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            input_path: input_path.into(),
            upload_dt,
            metadata,
            config,
            status: DatasetStatus::New,
            is_public: true,
            mol_dbs,
        }
    }

    /// Every field except status is required before the dataset can be persisted
    pub fn validate(&self) -> Result<(), OrchestratorError> {
        let missing = if self.id.is_empty() {
            Some("id")
        } else if self.name.is_empty() {
            Some("name")
        } else if self.input_path.is_empty() {
            Some("input_path")
        } else if self.metadata.is_null() {
            Some("metadata")
        } else if self.mol_dbs.is_empty() {
            Some("mol_dbs")
        } else {
            None
        };

        match missing {
            Some(field) => Err(OrchestratorError::InvalidDataset { id: self.id.clone(), field }),
            None => Ok(()),
        }
    }

    /// Lower-cased submitter e-mail from the metadata, if the submitter left one
    pub fn user_email(&self) -> Option<String> {
        SUBMITTER_EMAIL_PATH
            .iter()
            .try_fold(&self.metadata, |node, key| node.get(key))
            .and_then(Value::as_str)
            .filter(|email| !email.is_empty())
            .map(str::to_lowercase)
    }

    pub fn to_queue_message(&self, action: DatasetAction, extras: ActionExtras) -> DatasetActionMessage {
        DatasetActionMessage {
            ds_id: self.id.clone(),
            ds_name: self.name.clone(),
            input_path: self.input_path.clone(),
            user_email: self.user_email(),
            action,
            extras,
        }
    }
}
