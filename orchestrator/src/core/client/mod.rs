// Client abstractions module - contains all client interface traits

pub mod database;
pub mod job;
pub mod mol_db;
pub mod queue;
pub mod search_index;
pub mod storage;

// Re-export commonly used types
pub use database::DatabaseClient;
pub use job::AnnotationJobFactory;
pub use mol_db::MolDbClient;
pub use queue::QueueClient;
pub use search_index::SearchIndexClient;
pub use storage::{ImageStoreClient, RawDataClient};
