pub mod warp;

use std::sync::Arc;

use bytes::Bytes;
use image::RgbImage;
use tracing::{debug, info};

use crate::core::config::Config;
use crate::error::{OrchestratorError, OrchestratorResult};
use crate::types::dataset::Dataset;
use crate::types::image::{ImageKind, OpticalImageSet, OpticalImageTile, ProjectiveTransform, RawOpticalImage, StorageClass};
use warp::{canvas_size, effective_zoom, encode_jpeg, normalize_transform, validate_zoom, warp_perspective};

/// Registration of user supplied optical images onto the annotation image grid
pub struct OpticalImageService;

impl OpticalImageService {
    /// Generate scaled and transformed versions of the raw optical image, one per zoom level.
    /// `zoom_levels` defaults to the configured levels.
    #[tracing::instrument(skip(dataset, transform, config), fields(ds_id = %dataset.id), err)]
    pub async fn add_optical_image(
        dataset: &Dataset,
        raw_image_id: &str,
        transform: ProjectiveTransform,
        zoom_levels: Option<Vec<f64>>,
        config: Arc<Config>,
    ) -> OrchestratorResult<OpticalImageSet> {
        info!(ds_id = %dataset.id, "Adding optical image");
        let zoom_levels = zoom_levels.unwrap_or_else(|| config.optical_image_params().zoom_levels.clone());
        zoom_levels.iter().try_for_each(|&zoom| validate_zoom(zoom))?;

        let raw = RawOpticalImage { id: raw_image_id.to_string(), transform };
        Self::add_raw_optical_image(dataset, &raw, config.clone()).await?;

        let tiles = Self::add_zoom_optical_images(dataset, &raw, &zoom_levels, config).await?;
        Ok(OpticalImageSet { raw, tiles })
    }

    /// Store the raw image id and transform, removing a previously stored raw image it replaces
    pub async fn add_raw_optical_image(
        dataset: &Dataset,
        raw: &RawOpticalImage,
        config: Arc<Config>,
    ) -> OrchestratorResult<()> {
        if let Some(old) = config.database().get_raw_optical_image(&dataset.id).await? {
            if old.id != raw.id {
                debug!(ds_id = %dataset.id, old_id = %old.id, "Deleting replaced raw optical image");
                config.image_store().delete_image_by_id(StorageClass::Fs, ImageKind::RawOpticalImage, &old.id).await?;
            }
        }
        config.database().set_raw_optical_image(&dataset.id, raw).await?;
        Ok(())
    }

    /// Pixel dimensions of the annotation images, read from one stored isotope image
    pub async fn annotation_image_shape(dataset: &Dataset, config: Arc<Config>) -> OrchestratorResult<(u32, u32)> {
        info!(ds_id = %dataset.id, "Querying annotation image shape");
        let image_id = config
            .database()
            .get_first_iso_image_id(&dataset.id)
            .await?
            .ok_or_else(|| OrchestratorError::NoAnnotationImages { ds_id: dataset.id.clone() })?;

        let storage = config.database().get_ion_image_storage_class(&dataset.id).await?;
        let encoded = config.image_store().get_image_by_id(storage, ImageKind::IsoImage, &image_id).await?;
        let image = image::load_from_memory(&encoded)?;

        let shape = (image.width(), image.height());
        info!(ds_id = %dataset.id, width = shape.0, height = shape.1, "Annotation image shape");
        Ok(shape)
    }

    async fn add_zoom_optical_images(
        dataset: &Dataset,
        raw: &RawOpticalImage,
        zoom_levels: &[f64],
        config: Arc<Config>,
    ) -> OrchestratorResult<Vec<OpticalImageTile>> {
        let dims = Self::annotation_image_shape(dataset, config.clone()).await?;
        let encoded = config.image_store().get_image_by_id(StorageClass::Fs, ImageKind::RawOpticalImage, &raw.id).await?;
        let optical = Arc::new(tokio::task::spawn_blocking(move || decode_rgb(encoded)).await??);

        let params = config.optical_image_params();
        let viewport = (params.viewport_width, params.viewport_height);
        let canvases = zoom_levels
            .iter()
            .map(|&zoom| -> OrchestratorResult<_> {
                let factor = effective_zoom(zoom, dims, viewport);
                let coeffs = normalize_transform(&raw.transform, factor)?;
                let (width, height) = canvas_size(dims, factor)?;
                Ok((zoom, factor, coeffs, width, height))
            })
            .collect::<OrchestratorResult<Vec<_>>>()?;

        let mut renders = Vec::with_capacity(canvases.len());
        for (zoom, factor, coeffs, width, height) in canvases {
            debug!(ds_id = %dataset.id, zoom, factor, width, height, "Rendering optical image tile");

            let permit = config.render_permits().clone().acquire_owned().await?;
            let optical = optical.clone();
            let quality = params.jpeg_quality;
            let render = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                encode_jpeg(&warp_perspective(&optical, &coeffs, width, height), quality)
            });
            renders.push((zoom, render));
        }

        let mut tiles = Vec::with_capacity(renders.len());
        for (zoom, render) in renders {
            let jpeg = render.await??;
            let id = config.image_store().post_image(StorageClass::Fs, ImageKind::OpticalImage, jpeg).await?;
            tiles.push(OpticalImageTile { id, ds_id: dataset.id.clone(), zoom });
        }

        Self::delete_tiles(dataset, config.clone()).await?;
        config.database().insert_optical_images(tiles.clone()).await?;
        info!(ds_id = %dataset.id, tiles = tiles.len(), "Stored optical image tiles");
        Ok(tiles)
    }

    async fn delete_tiles(dataset: &Dataset, config: Arc<Config>) -> OrchestratorResult<()> {
        for id in config.database().get_optical_image_ids(&dataset.id).await? {
            config.image_store().delete_image_by_id(StorageClass::Fs, ImageKind::OpticalImage, &id).await?;
        }
        config.database().delete_optical_images(&dataset.id).await?;
        Ok(())
    }

    /// Delete the raw and zoomed optical images of the dataset. Nothing stored is not an error.
    #[tracing::instrument(skip_all, fields(ds_id = %dataset.id), err)]
    pub async fn del_optical_image(dataset: &Dataset, config: Arc<Config>) -> OrchestratorResult<()> {
        info!(ds_id = %dataset.id, "Deleting optical image");
        if let Some(raw) = config.database().get_raw_optical_image(&dataset.id).await? {
            config.image_store().delete_image_by_id(StorageClass::Fs, ImageKind::RawOpticalImage, &raw.id).await?;
        }
        Self::delete_tiles(dataset, config.clone()).await?;
        config.database().clear_raw_optical_image(&dataset.id).await?;
        Ok(())
    }
}

fn decode_rgb(encoded: Bytes) -> OrchestratorResult<RgbImage> {
    Ok(image::load_from_memory(&encoded)?.to_rgb8())
}
