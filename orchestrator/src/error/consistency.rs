use thiserror::Error;

use crate::types::peaks::PeakKind;

/// Violations of invariants the scoring relies on. Never recovered from inside the engine.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConsistencyError {
    #[error("Not unique formula-adduct combinations {unique} != {rows}")]
    DuplicateFormulaAdduct { unique: usize, rows: usize },

    #[error("No formulas matching the criteria were found in theoretical peaks ({kind})")]
    NoTheoreticalPeaks { kind: PeakKind },
}
