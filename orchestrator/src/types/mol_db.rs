use serde::{Deserialize, Serialize};

/// Molecular database as described by the molecular database service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MolDbInfo {
    pub id: i64,
    pub name: String,
    pub version: String,
}

impl std::fmt::Display for MolDbInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Molecule {
    pub mol_id: String,
    pub mol_name: String,
}

/// How to look a molecular database up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MolDbSelector {
    Id(i64),
    /// `version: None` selects the latest version
    NameVersion { name: String, version: Option<String> },
}

impl std::fmt::Display for MolDbSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MolDbSelector::Id(id) => write!(f, "id={}", id),
            MolDbSelector::NameVersion { name, version: Some(version) } => write!(f, "{} {}", name, version),
            MolDbSelector::NameVersion { name, version: None } => write!(f, "{} (latest)", name),
        }
    }
}

/// Annotation job of a dataset that ran against one molecular database
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinishedJob {
    pub id: i64,
    pub mol_db_id: i64,
}
