use crate::cli::DispatchCliArgs;
use crate::OrchestratorError;

/// Whether deferred work actually leaves the process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum DeliveryMode {
    /// Storage is updated, nothing is published
    Local,
    /// Action messages and status notifications are published
    #[default]
    Queue,
}

/// Which dataset manager serves the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum DispatchStrategy {
    /// Runs actions in-process, used by the daemon consuming the action queue
    Direct,
    /// Turns actions into queue messages, used by the API
    Queued,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchParams {
    pub delivery_mode: DeliveryMode,
    pub strict_status_transitions: bool,
    pub reindex_on_removed_mol_db: bool,
}

impl TryFrom<DispatchCliArgs> for DispatchParams {
    type Error = OrchestratorError;

    fn try_from(args: DispatchCliArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            delivery_mode: args.delivery_mode,
            strict_status_transitions: args.strict_status_transitions,
            reindex_on_removed_mol_db: args.reindex_on_removed_mol_db,
        })
    }
}
