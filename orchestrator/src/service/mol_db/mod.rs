pub mod peaks;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

pub use peaks::PeakTable;

use crate::core::client::mol_db::MolDbError;
use crate::core::config::Config;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::types::dataset::IsotopeGenerationConfig;
use crate::types::mol_db::{MolDbInfo, MolDbSelector, Molecule};
use crate::types::peaks::TheorPeaksQuery;

/// A molecular database to search through.
///
/// Formulas and theoretical peaks are loaded on first use and kept for the lifetime of the value.
pub struct MolecularDb {
    info: MolDbInfo,
    isotope_generation: IsotopeGenerationConfig,
    job_id: Option<i64>,
    config: Arc<Config>,
    formulas: OnceCell<BTreeMap<i64, String>>,
    peak_table: OnceCell<PeakTable>,
}

impl std::fmt::Display for MolecularDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.info)
    }
}

impl MolecularDb {
    /// Look the database up in the molecular database service. A name without a version
    /// resolves to the first database the service lists.
    pub async fn resolve(
        selector: MolDbSelector,
        isotope_generation: IsotopeGenerationConfig,
        config: Arc<Config>,
    ) -> OrchestratorResult<Self> {
        let info = match &selector {
            MolDbSelector::Id(id) => config.mol_db().find_db_by_id(*id).await?,
            MolDbSelector::NameVersion { name, version } => config
                .mol_db()
                .find_db_by_name_version(name, version.clone())
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| MolDbError::DatabaseNotFound(selector.to_string()))?,
        };
        Ok(Self::new(info, isotope_generation, config))
    }

    pub fn new(info: MolDbInfo, isotope_generation: IsotopeGenerationConfig, config: Arc<Config>) -> Self {
        Self {
            info,
            isotope_generation,
            job_id: None,
            config,
            formulas: OnceCell::new(),
            peak_table: OnceCell::new(),
        }
    }

    /// Bind the annotation job whose decoy adducts are used for the decoy peaks
    pub fn with_job_id(mut self, job_id: i64) -> Self {
        if self.job_id != Some(job_id) {
            self.job_id = Some(job_id);
            self.peak_table = OnceCell::new();
        }
        self
    }

    pub fn id(&self) -> i64 {
        self.info.id
    }

    pub fn name(&self) -> &str {
        &self.info.name
    }

    pub fn version(&self) -> &str {
        &self.info.version
    }

    pub fn info(&self) -> &MolDbInfo {
        &self.info
    }

    pub fn job_id(&self) -> Option<i64> {
        self.job_id
    }

    /// `formula_id -> formula`, seeding the formula table from the service if it has none yet
    pub async fn formulas(&self) -> OrchestratorResult<&BTreeMap<i64, String>> {
        self.formulas
            .get_or_try_init(|| async {
                let database = self.config.database();
                if database.count_formulas(self.id()).await? == 0 {
                    let formulas = self.config.mol_db().fetch_db_formulas(self.id()).await?;
                    info!(mol_db = %self, count = formulas.len(), "Seeding formula table");
                    database.insert_formulas(self.id(), formulas).await?;
                }
                let formulas: BTreeMap<i64, String> = database.get_formulas(self.id()).await?.into_iter().collect();
                Ok::<_, OrchestratorError>(formulas)
            })
            .await
    }

    pub async fn molecules(&self, formula: &str) -> OrchestratorResult<Vec<Molecule>> {
        Ok(self.config.mol_db().fetch_molecules(self.id(), formula).await?)
    }

    pub async fn peak_table(&self) -> OrchestratorResult<&PeakTable> {
        self.peak_table
            .get_or_try_init(|| async {
                let job_id = self.job_id.ok_or_else(|| OrchestratorError::DecoyJobNotSet(self.to_string()))?;
                let query = TheorPeaksQuery::new(self.id(), &self.isotope_generation);

                let target = self
                    .config
                    .database()
                    .get_target_peaks(&query, self.isotope_generation.adducts.clone())
                    .await?;
                let decoy = self.config.database().get_decoy_peaks(&query, job_id).await?;
                let table = PeakTable::assemble(target, decoy)?;

                info!(mol_db = %self, rows = table.len(), "Loaded formula, adduct combinations");
                Ok::<_, OrchestratorError>(table)
            })
            .await
    }
}
