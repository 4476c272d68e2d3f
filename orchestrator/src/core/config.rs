use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::cli::OrchestratorCliArgs;
use crate::core::client::{
    AnnotationJobFactory, DatabaseClient, ImageStoreClient, MolDbClient, QueueClient, RawDataClient,
    SearchIndexClient,
};
use crate::error::OrchestratorResult;
use crate::types::params::{DispatchParams, OpticalImageParams};

/// Collaborators the core talks to
pub struct OrchestratorClients {
    pub database: Arc<dyn DatabaseClient>,
    pub search_index: Arc<dyn SearchIndexClient>,
    pub queue: Arc<dyn QueueClient>,
    pub image_store: Arc<dyn ImageStoreClient>,
    pub raw_data: Arc<dyn RawDataClient>,
    pub mol_db: Arc<dyn MolDbClient>,
    pub job_factory: Arc<dyn AnnotationJobFactory>,
}

/// The app config. It can be accessed from anywhere inside the service
/// by passing it around as an `Arc<Config>`.
pub struct Config {
    dispatch_params: DispatchParams,
    optical_image_params: OpticalImageParams,
    clients: OrchestratorClients,
    /// Bounds the number of optical image tiles resampled concurrently
    render_permits: Arc<Semaphore>,
}

impl Config {
    pub fn new(
        dispatch_params: DispatchParams,
        optical_image_params: OpticalImageParams,
        clients: OrchestratorClients,
    ) -> Self {
        let render_permits = Arc::new(Semaphore::new(optical_image_params.max_concurrent_renders.max(1)));
        Self { dispatch_params, optical_image_params, clients, render_permits }
    }

    /// Validate the command line arguments and build the config around the given clients
    pub fn from_cli_args(args: OrchestratorCliArgs, clients: OrchestratorClients) -> OrchestratorResult<Self> {
        let dispatch_params = DispatchParams::try_from(args.dispatch_args)?;
        let optical_image_params = OpticalImageParams::try_from(args.optical_image_args)?;
        Ok(Self::new(dispatch_params, optical_image_params, clients))
    }

    pub fn dispatch_params(&self) -> &DispatchParams {
        &self.dispatch_params
    }

    pub fn optical_image_params(&self) -> &OpticalImageParams {
        &self.optical_image_params
    }

    pub fn database(&self) -> &Arc<dyn DatabaseClient> {
        &self.clients.database
    }

    pub fn search_index(&self) -> &Arc<dyn SearchIndexClient> {
        &self.clients.search_index
    }

    pub fn queue(&self) -> &Arc<dyn QueueClient> {
        &self.clients.queue
    }

    pub fn image_store(&self) -> &Arc<dyn ImageStoreClient> {
        &self.clients.image_store
    }

    pub fn raw_data(&self) -> &Arc<dyn RawDataClient> {
        &self.clients.raw_data
    }

    pub fn mol_db(&self) -> &Arc<dyn MolDbClient> {
        &self.clients.mol_db
    }

    pub fn job_factory(&self) -> &Arc<dyn AnnotationJobFactory> {
        &self.clients.job_factory
    }

    pub fn render_permits(&self) -> &Arc<Semaphore> {
        &self.render_permits
    }
}
