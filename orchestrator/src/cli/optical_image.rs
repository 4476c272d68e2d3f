use clap::Args;

use crate::types::constant::{
    DEFAULT_MAX_CONCURRENT_RENDERS, OPTICAL_IMAGE_JPEG_QUALITY, VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};

/// Parameters used to render optical image tiles.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct OpticalImageCliArgs {
    /// Width of the client viewport that zoom level 1 fits into.
    #[arg(env = "ANNOTATION_ORCHESTRATOR_VIEWPORT_WIDTH", long, default_value_t = VIEWPORT_WIDTH)]
    pub viewport_width: f64,

    /// Height of the client viewport that zoom level 1 fits into.
    #[arg(env = "ANNOTATION_ORCHESTRATOR_VIEWPORT_HEIGHT", long, default_value_t = VIEWPORT_HEIGHT)]
    pub viewport_height: f64,

    /// JPEG quality of the rendered tiles.
    #[arg(env = "ANNOTATION_ORCHESTRATOR_JPEG_QUALITY", long, default_value_t = OPTICAL_IMAGE_JPEG_QUALITY)]
    pub jpeg_quality: u8,

    /// Zoom levels rendered when the request doesn't specify any.
    #[arg(env = "ANNOTATION_ORCHESTRATOR_ZOOM_LEVELS", long, value_delimiter = ',', default_value = "1,2,4,8")]
    pub zoom_levels: Vec<f64>,

    /// Maximum number of tiles resampled at the same time.
    #[arg(env = "ANNOTATION_ORCHESTRATOR_MAX_CONCURRENT_RENDERS", long, default_value_t = DEFAULT_MAX_CONCURRENT_RENDERS)]
    pub max_concurrent_renders: usize,
}
