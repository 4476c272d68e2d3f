use clap::Parser;

pub use dispatch::DispatchCliArgs;
pub use optical_image::OpticalImageCliArgs;

pub mod dispatch;
pub mod optical_image;

/// Arguments of the annotation orchestrator core.
///
/// Binaries embedding the core (API server, daemon) flatten these into their own command line.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "annotation-orchestrator",
    about = "Dataset annotation orchestrator - action dispatch and derived artifact pipelines"
)]
pub struct OrchestratorCliArgs {
    #[command(flatten)]
    pub dispatch_args: DispatchCliArgs,

    #[command(flatten)]
    pub optical_image_args: OpticalImageCliArgs,
}
