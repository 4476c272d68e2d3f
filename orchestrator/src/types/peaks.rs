use serde::{Deserialize, Serialize};

use crate::types::dataset::IsotopeGenerationConfig;

/// Theoretical centroids of one (formula, adduct) ion
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PeakRow {
    pub formula_id: i64,
    pub adduct: String,
    pub centroid_mzs: Vec<f64>,
    pub centroid_ints: Vec<f64>,
}

/// A single theoretical peak, `peak_index` is its position in the centroid list
#[derive(Debug, Clone, PartialEq)]
pub struct IonPeak {
    pub formula_id: i64,
    pub adduct: String,
    pub peak_index: usize,
    pub mz: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PeakKind {
    Target,
    Decoy,
}

/// Key of the precomputed theoretical peaks
#[derive(Debug, Clone, PartialEq)]
pub struct TheorPeaksQuery {
    pub mol_db_id: i64,
    pub charge: String,
    pub sigma: f64,
    pub pts_per_mz: u32,
}

impl TheorPeaksQuery {
    pub fn new(mol_db_id: i64, isotope_generation: &IsotopeGenerationConfig) -> Self {
        Self {
            mol_db_id,
            charge: isotope_generation.charge.descriptor(),
            sigma: isotope_generation.rounded_sigma(),
            pts_per_mz: isotope_generation.isocalc_pts_per_mz,
        }
    }
}
