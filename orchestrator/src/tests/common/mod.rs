use std::io::Cursor;

use bytes::Bytes;
use chrono::{TimeZone, Utc};
use image::{ImageFormat, Rgb, RgbImage};
use rstest::*;
use serde_json::{json, Value};

use crate::types::dataset::{Charge, Dataset, DatasetConfig, IsotopeGenerationConfig, MolDbRef, Polarity};
use crate::types::image::ProjectiveTransform;
use crate::types::mol_db::MolDbInfo;

pub const DS_ID: &str = "2000-01-01_00h00m";
pub const DS_NAME: &str = "brain_section";

#[fixture]
pub fn isotope_generation() -> IsotopeGenerationConfig {
    IsotopeGenerationConfig {
        adducts: vec!["+H".to_string(), "+Na".to_string()],
        charge: Charge { polarity: Polarity::Positive, n_charges: 1 },
        isocalc_sigma: 0.000619,
        isocalc_pts_per_mz: 8250,
    }
}

#[fixture]
pub fn dataset_config(isotope_generation: IsotopeGenerationConfig) -> DatasetConfig {
    DatasetConfig {
        databases: vec![MolDbRef::new("HMDB", Some("2016"))],
        isotope_generation,
        other: serde_json::Map::new(),
    }
}

#[fixture]
pub fn metadata() -> Value {
    json!({
        "Submitted_By": {"Submitter": {"Email": "Jane.Doe@Example.com"}},
        "MS_Analysis": {"Polarity": "Positive"}
    })
}

#[fixture]
pub fn dataset(metadata: Value, dataset_config: DatasetConfig) -> Dataset {
    Dataset::new(
        DS_ID,
        DS_NAME,
        "s3a://datasets/brain_section",
        Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap(),
        metadata,
        dataset_config,
        vec!["HMDB-2016".to_string()],
    )
}

#[fixture]
pub fn hmdb() -> MolDbInfo {
    MolDbInfo { id: 1, name: "HMDB".to_string(), version: "2016".to_string() }
}

pub fn identity_transform() -> ProjectiveTransform {
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
}

/// Encoded PNG of the given size filled with one colour
pub fn png_bytes(width: u32, height: u32) -> Bytes {
    let image = RgbImage::from_pixel(width, height, Rgb([90, 140, 190]));
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).unwrap();
    Bytes::from(buf.into_inner())
}
