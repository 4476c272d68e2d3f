use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Failed to publish to {queue}: {message}")]
    PublishFailed { queue: String, message: String },

    #[error("Failed to serialize message: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Queue connection error: {0}")]
    ConnectionError(String),
}
