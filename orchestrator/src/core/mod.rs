pub mod client;
pub mod config;

pub use config::{Config, OrchestratorClients};
