use clap::Args;

use crate::types::params::dispatch::DeliveryMode;

/// Parameters controlling how dataset actions are dispatched.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct DispatchCliArgs {
    /// `queue` publishes action messages and status notifications, `local` only updates storage.
    #[arg(env = "ANNOTATION_ORCHESTRATOR_DELIVERY_MODE", long, value_enum, default_value_t = DeliveryMode::Queue)]
    pub delivery_mode: DeliveryMode,

    /// Reject dataset status changes that don't follow the dataset lifecycle.
    #[arg(env = "ANNOTATION_ORCHESTRATOR_STRICT_STATUS_TRANSITIONS", long, default_value_t = false)]
    pub strict_status_transitions: bool,

    /// Reindex a dataset when a molecular database is removed from its config,
    /// so results of the removed database get deleted.
    #[arg(env = "ANNOTATION_ORCHESTRATOR_REINDEX_ON_REMOVED_MOL_DB", long, default_value_t = false)]
    pub reindex_on_removed_mol_db: bool,
}
