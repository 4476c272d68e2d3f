pub mod action;
pub mod constant;
pub mod dataset;
pub mod image;
pub mod mol_db;
pub mod params;
pub mod peaks;
pub mod queue;
