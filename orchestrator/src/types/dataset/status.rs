use serde::{Deserialize, Serialize};

/// Stage of the dataset lifecycle
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum DatasetStatus {
    /// The dataset is just saved to the database
    #[default]
    New,
    /// The dataset is queued for processing
    Queued,
    /// The annotation run is in progress
    Started,
    /// The processing or reindexing finished successfully
    Finished,
    /// An error occurred during processing
    Failed,
    /// The records are being updated because of changed metadata
    Indexing,
    /// The dataset has been deleted
    Deleted,
}

impl DatasetStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DatasetStatus::Deleted)
    }

    /// Intended lifecycle of a dataset.
    /// Staying in the same status is always allowed, nothing leaves `Deleted`.
    pub fn can_transition_to(&self, next: DatasetStatus) -> bool {
        use DatasetStatus::*;

        if *self == next {
            return true;
        }
        match self {
            New => matches!(next, Queued | Started | Deleted),
            Queued => matches!(next, Started | Indexing | Failed | Deleted),
            Started => matches!(next, Finished | Failed | Deleted),
            Finished => matches!(next, Queued | Indexing | Deleted),
            Failed => matches!(next, Queued | Deleted),
            Indexing => matches!(next, Finished | Failed | Deleted),
            Deleted => false,
        }
    }
}
