pub mod error;

use async_trait::async_trait;
pub use error::QueueError;

use crate::types::action::ActionPriority;
use crate::types::queue::{DatasetActionMessage, DatasetStatusMessage};

/// Trait defining the message queue operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Publish an action for the workers. Ordering of messages with the same priority is up to the queue.
    async fn publish_action(&self, message: DatasetActionMessage, priority: ActionPriority) -> Result<(), QueueError>;

    /// Publish a status notification. No delivery guarantee is assumed.
    async fn publish_status(&self, message: DatasetStatusMessage) -> Result<(), QueueError>;
}
