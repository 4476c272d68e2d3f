pub mod error;

use async_trait::async_trait;
pub use error::MolDbError;

use crate::types::mol_db::{MolDbInfo, Molecule};

/// Trait defining the read-only lookups against the molecular database service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MolDbClient: Send + Sync {
    async fn find_db_by_id(&self, id: i64) -> Result<MolDbInfo, MolDbError>;

    /// All databases called `name`, restricted to `version` when given
    async fn find_db_by_name_version(&self, name: &str, version: Option<String>) -> Result<Vec<MolDbInfo>, MolDbError>;

    /// Sum formulas of the database
    async fn fetch_db_formulas(&self, db_id: i64) -> Result<Vec<String>, MolDbError>;

    /// Molecules of the database sharing the sum formula
    async fn fetch_molecules(&self, db_id: i64, formula: &str) -> Result<Vec<Molecule>, MolDbError>;
}
