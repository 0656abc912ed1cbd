pub mod scramble;
pub mod solve;

use std::path::Path;

use image::RgbImage;
use rejig::error::{RejigError, RjResult};
use rejig::raster::Raster;

pub fn load_raster(path: &Path) -> RjResult<Raster> {
    let img = image::open(path)?.to_rgb8();
    Raster::from_rgb(img.width() as usize, img.height() as usize, img.as_raw())
}

pub fn save_raster(raster: &Raster, path: &Path) -> RjResult<()> {
    let img = RgbImage::from_raw(
        raster.width() as u32,
        raster.height() as u32,
        raster.to_rgb_bytes(),
    )
    .ok_or_else(|| RejigError::InvalidImageDimensions("raster buffer size mismatch".into()))?;
    img.save(path)?;
    Ok(())
}
