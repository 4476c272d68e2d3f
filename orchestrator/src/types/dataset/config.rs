use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::constant::SIGMA_DECIMAL_PLACES;
use crate::types::mol_db::MolDbInfo;

/// A molecular database selected for annotation. `version: None` means the latest one.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct MolDbRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl MolDbRef {
    pub fn new(name: impl Into<String>, version: Option<&str>) -> Self {
        Self { name: name.into(), version: version.map(str::to_string) }
    }

    /// Same name, and same version unless this reference has none
    pub fn matches(&self, mol_db: &MolDbInfo) -> bool {
        self.name == mol_db.name && self.version.as_ref().map_or(true, |version| *version == mol_db.version)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Polarity {
    #[serde(rename = "+")]
    #[strum(serialize = "+")]
    Positive,
    #[serde(rename = "-")]
    #[strum(serialize = "-")]
    Negative,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Charge {
    pub polarity: Polarity,
    pub n_charges: u32,
}

impl Charge {
    /// Charge descriptor used as the theoretical peaks key, e.g. `+1`
    pub fn descriptor(&self) -> String {
        format!("{}{}", self.polarity, self.n_charges)
    }
}

/// Parameters of the theoretical isotope pattern computation
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct IsotopeGenerationConfig {
    pub adducts: Vec<String>,
    pub charge: Charge,
    pub isocalc_sigma: f64,
    pub isocalc_pts_per_mz: u32,
}

impl IsotopeGenerationConfig {
    pub fn rounded_sigma(&self) -> f64 {
        let factor = 10f64.powi(SIGMA_DECIMAL_PLACES);
        (self.isocalc_sigma * factor).round() / factor
    }
}

/// Processing configuration of a dataset.
///
/// Everything except `databases` is an instrument/processing parameter: a change there
/// invalidates all previous results. Unknown keys are kept in `other` so they still take
/// part in comparisons.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    #[serde(default)]
    pub databases: Vec<MolDbRef>,
    pub isotope_generation: IsotopeGenerationConfig,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl DatasetConfig {
    /// Whether `mol_db` is one of the selected databases. Only names are compared
    /// unless `match_version` is set.
    pub fn selects(&self, mol_db: &MolDbInfo, match_version: bool) -> bool {
        self.databases.iter().any(|db| if match_version { db.matches(mol_db) } else { db.name == mol_db.name })
    }
}
