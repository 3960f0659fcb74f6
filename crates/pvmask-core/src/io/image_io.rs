use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageBuffer, Luma};
use ndarray::Array2;
use tracing::debug;

use crate::error::Result;
use crate::mask::max_label;
use crate::raster::{MultiBandImage, RegionMask};

/// Raw integer values of a single-channel raster. 8- and 16-bit grayscale
/// values are kept verbatim; other colour types (including expanded palette
/// images) go through 8-bit luma.
fn load_raw_u16(path: &Path) -> Result<Array2<u16>> {
    let img = image::open(path)?;
    let (w, h) = img.dimensions();
    let (w, h) = (w as usize, h as usize);

    let data = match img {
        DynamicImage::ImageLuma8(buf) => {
            Array2::from_shape_fn((h, w), |(row, col)| {
                buf.get_pixel(col as u32, row as u32).0[0] as u16
            })
        }
        DynamicImage::ImageLuma16(buf) => {
            Array2::from_shape_fn((h, w), |(row, col)| buf.get_pixel(col as u32, row as u32).0[0])
        }
        other => {
            let gray = other.to_luma8();
            Array2::from_shape_fn((h, w), |(row, col)| {
                u16::from(gray.get_pixel(col as u32, row as u32).0[0])
            })
        }
    };
    Ok(data)
}

/// Load one band and convert quantized values to reflectance.
pub fn load_band(path: &Path, reflectance_scale: f32) -> Result<Array2<f32>> {
    let raw = load_raw_u16(path)?;
    Ok(raw.mapv(|v| v as f32 / reflectance_scale))
}

/// Load single-band rasters, in band order, into a [`MultiBandImage`].
pub fn load_band_stack<P: AsRef<Path>>(paths: &[P], reflectance_scale: f32) -> Result<MultiBandImage> {
    let bands = paths
        .iter()
        .map(|p| load_band(p.as_ref(), reflectance_scale))
        .collect::<Result<Vec<_>>>()?;
    let image = MultiBandImage::from_bands(&bands)?;
    debug!(
        height = image.height(),
        width = image.width(),
        bands = image.band_count(),
        "Loaded band stack"
    );
    Ok(image)
}

/// Load a label mask. Gray values are used as labels.
pub fn load_mask(path: &Path) -> Result<RegionMask> {
    load_raw_u16(path)
}

/// Save a label mask as grayscale, 8-bit when every label fits, otherwise
/// 16-bit. The format follows the file extension.
pub fn save_mask(mask: &RegionMask, path: &Path) -> Result<()> {
    let (h, w) = mask.dim();
    if max_label(mask) <= u8::MAX as u16 {
        let img = ImageBuffer::<Luma<u8>, Vec<u8>>::from_fn(w as u32, h as u32, |x, y| {
            Luma([mask[[y as usize, x as usize]] as u8])
        });
        img.save(path)?;
    } else {
        let img = ImageBuffer::<Luma<u16>, Vec<u16>>::from_fn(w as u32, h as u32, |x, y| {
            Luma([mask[[y as usize, x as usize]]])
        });
        img.save(path)?;
    }
    Ok(())
}
