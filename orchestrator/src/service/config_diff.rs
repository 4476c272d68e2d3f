use std::collections::HashSet;

use serde_json::Value;

use crate::types::dataset::{DatasetConfig, MolDbRef};

/// Kind of reprocessing a configuration change requires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigDiff {
    Equal,
    /// Only molecular databases were added
    NewMolDb,
    /// Instrument or processing parameters changed, all results are invalid
    InstrParamsDiff,
}

fn mol_db_set(config: &DatasetConfig) -> HashSet<&MolDbRef> {
    config.databases.iter().collect()
}

/// Classify the change from `old` to `new`.
///
/// Removed databases are not reported, see [`removed_mol_dbs`].
pub fn classify(old: &DatasetConfig, new: &DatasetConfig) -> ConfigDiff {
    if old == new {
        return ConfigDiff::Equal;
    }

    if old.isotope_generation != new.isotope_generation || old.other != new.other {
        return ConfigDiff::InstrParamsDiff;
    }

    let old_dbs = mol_db_set(old);
    if mol_db_set(new).difference(&old_dbs).next().is_some() {
        ConfigDiff::NewMolDb
    } else {
        ConfigDiff::Equal
    }
}

/// Databases selected in `old` that are no longer selected in `new`
pub fn removed_mol_dbs(old: &DatasetConfig, new: &DatasetConfig) -> Vec<MolDbRef> {
    let new_dbs = mol_db_set(new);
    let mut seen = HashSet::new();
    old.databases.iter().filter(|db| !new_dbs.contains(db) && seen.insert(*db)).cloned().collect()
}

pub fn metadata_changed(old: &Value, new: &Value) -> bool {
    old != new
}
