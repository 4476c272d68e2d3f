/// Logical viewport the web client renders optical images into.
/// Zoom level 1 means "fits this viewport", independent of the dataset resolution.
pub const VIEWPORT_WIDTH: f64 = 1000.0;
pub const VIEWPORT_HEIGHT: f64 = 500.0;

/// Zoom multipliers rendered when the caller doesn't provide any
pub const DEFAULT_ZOOM_LEVELS: [f64; 4] = [1.0, 2.0, 4.0, 8.0];

pub const OPTICAL_IMAGE_JPEG_QUALITY: u8 = 90;

pub const DEFAULT_MAX_CONCURRENT_RENDERS: usize = 4;

/// Theoretical peaks are stored with sigma rounded to this many decimal places
pub const SIGMA_DECIMAL_PLACES: i32 = 6;

/// Location of the submitter e-mail inside the dataset metadata document
pub const SUBMITTER_EMAIL_PATH: [&str; 3] = ["Submitted_By", "Submitter", "Email"];
