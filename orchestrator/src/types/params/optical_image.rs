use crate::cli::OpticalImageCliArgs;
use crate::types::constant::{
    DEFAULT_MAX_CONCURRENT_RENDERS, DEFAULT_ZOOM_LEVELS, OPTICAL_IMAGE_JPEG_QUALITY, VIEWPORT_HEIGHT, VIEWPORT_WIDTH,
};
use crate::OrchestratorError;

#[derive(Debug, Clone, PartialEq)]
pub struct OpticalImageParams {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub jpeg_quality: u8,
    pub zoom_levels: Vec<f64>,
    pub max_concurrent_renders: usize,
}

impl Default for OpticalImageParams {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            jpeg_quality: OPTICAL_IMAGE_JPEG_QUALITY,
            zoom_levels: DEFAULT_ZOOM_LEVELS.to_vec(),
            max_concurrent_renders: DEFAULT_MAX_CONCURRENT_RENDERS,
        }
    }
}

impl TryFrom<OpticalImageCliArgs> for OpticalImageParams {
    type Error = OrchestratorError;

    fn try_from(args: OpticalImageCliArgs) -> Result<Self, Self::Error> {
        if !(args.viewport_width > 0.0 && args.viewport_height > 0.0) {
            return Err(OrchestratorError::ConfigError(format!(
                "Viewport must be positive, got {}x{}",
                args.viewport_width, args.viewport_height
            )));
        }
        if !(1..=100).contains(&args.jpeg_quality) {
            return Err(OrchestratorError::ConfigError(format!(
                "JPEG quality must be within 1..=100, got {}",
                args.jpeg_quality
            )));
        }
        if args.zoom_levels.is_empty() || args.zoom_levels.iter().any(|zoom| !(zoom.is_finite() && *zoom > 0.0)) {
            return Err(OrchestratorError::ConfigError(format!(
                "Zoom levels must be a non-empty list of positive numbers, got {:?}",
                args.zoom_levels
            )));
        }
        if args.max_concurrent_renders == 0 {
            return Err(OrchestratorError::ConfigError("At least one concurrent render is required".to_string()));
        }

        Ok(Self {
            viewport_width: args.viewport_width,
            viewport_height: args.viewport_height,
            jpeg_quality: args.jpeg_quality,
            zoom_levels: args.zoom_levels,
            max_concurrent_renders: args.max_concurrent_renders,
        })
    }
}
