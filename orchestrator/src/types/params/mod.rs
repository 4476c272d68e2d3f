pub mod dispatch;
pub mod optical_image;

pub use dispatch::{DeliveryMode, DispatchParams, DispatchStrategy};
pub use optical_image::OpticalImageParams;
