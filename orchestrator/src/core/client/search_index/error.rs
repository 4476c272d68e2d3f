use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchIndexError {
    #[error("Failed to sync dataset {ds_id} to the search index: {message}")]
    SyncFailed { ds_id: String, message: String },

    #[error("Failed to index annotations of dataset {ds_id}: {message}")]
    IndexingFailed { ds_id: String, message: String },

    #[error("Failed to delete dataset {ds_id} from the search index: {message}")]
    DeleteFailed { ds_id: String, message: String },

    #[error("Search index unavailable: {0}")]
    Unavailable(String),
}
