use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobFactoryError {
    #[error("Annotation job for dataset {ds_id} rejected: {reason}")]
    Rejected { ds_id: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
