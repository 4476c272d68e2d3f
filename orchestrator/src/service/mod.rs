pub mod config_diff;
pub mod dataset;
pub mod dispatcher;
pub mod mol_db;
pub mod optical_image;

pub use dataset::DatasetService;
pub use dispatcher::{build_dataset_manager, DatasetManager};
pub use mol_db::MolecularDb;
pub use optical_image::OpticalImageService;
