use std::collections::HashMap;
use std::sync::OnceLock;

use itertools::Itertools;

use crate::error::ConsistencyError;
use crate::types::peaks::{IonPeak, PeakKind, PeakRow};

/// Target and decoy theoretical peaks of a molecular database, sorted by `(formula_id, adduct)`.
/// Every `(formula_id, adduct)` pair occurs once.
#[derive(Debug)]
pub struct PeakTable {
    rows: Vec<PeakRow>,
    ion_peaks: OnceLock<Vec<IonPeak>>,
    intensities: OnceLock<HashMap<(i64, String), Vec<f64>>>,
}

impl PeakTable {
    pub fn assemble(target: Vec<PeakRow>, decoy: Vec<PeakRow>) -> Result<Self, ConsistencyError> {
        if target.is_empty() {
            return Err(ConsistencyError::NoTheoreticalPeaks { kind: PeakKind::Target });
        }
        if decoy.is_empty() {
            return Err(ConsistencyError::NoTheoreticalPeaks { kind: PeakKind::Decoy });
        }

        let mut rows = target;
        rows.extend(decoy);
        rows.sort_by(|a, b| (a.formula_id, &a.adduct).cmp(&(b.formula_id, &b.adduct)));

        let unique = rows.iter().map(|row| (row.formula_id, row.adduct.as_str())).unique().count();
        if unique != rows.len() {
            return Err(ConsistencyError::DuplicateFormulaAdduct { unique, rows: rows.len() });
        }

        Ok(Self { rows, ion_peaks: OnceLock::new(), intensities: OnceLock::new() })
    }

    pub fn rows(&self) -> &[PeakRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every centroid as its own row, sorted by m/z
    pub fn ion_peaks(&self) -> &[IonPeak] {
        self.ion_peaks.get_or_init(|| {
            let mut peaks: Vec<IonPeak> = self
                .rows
                .iter()
                .flat_map(|row| {
                    row.centroid_mzs.iter().enumerate().map(|(peak_index, &mz)| IonPeak {
                        formula_id: row.formula_id,
                        adduct: row.adduct.clone(),
                        peak_index,
                        mz,
                    })
                })
                .collect();
            peaks.sort_by(|a, b| a.mz.total_cmp(&b.mz));
            peaks
        })
    }

    /// Centroid intensities by `(formula_id, adduct)`
    pub fn intensity_index(&self) -> &HashMap<(i64, String), Vec<f64>> {
        self.intensities.get_or_init(|| {
            self.rows.iter().map(|row| ((row.formula_id, row.adduct.clone()), row.centroid_ints.clone())).collect()
        })
    }

    pub fn ion_keys(&self) -> Vec<(i64, &str)> {
        self.rows.iter().map(|row| (row.formula_id, row.adduct.as_str())).collect()
    }
}
