use serde::{Deserialize, Serialize};

/// 3x3 projective transform in row-major order
pub type ProjectiveTransform = [[f64; 3]; 3];

/// Ids of the isotope images of one annotation, missing images are `None`
pub type IsoImageIds = Vec<Option<String>>;

/// Backend the image store keeps an image in
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display, strum_macros::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageClass {
    Fs,
    Db,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ImageKind {
    IsoImage,
    OpticalImage,
    RawOpticalImage,
}

/// Optical image as uploaded by the user, together with its registration transform
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RawOpticalImage {
    pub id: String,
    pub transform: ProjectiveTransform,
}

/// One resampled optical image, aligned to the ion image grid
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OpticalImageTile {
    pub id: String,
    pub ds_id: String,
    pub zoom: f64,
}

/// Everything stored for the optical image of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct OpticalImageSet {
    pub raw: RawOpticalImage,
    pub tiles: Vec<OpticalImageTile>,
}

impl OpticalImageSet {
    pub fn tile_for_zoom(&self, zoom: f64) -> Option<&OpticalImageTile> {
        self.tiles.iter().find(|tile| tile.zoom == zoom)
    }
}
