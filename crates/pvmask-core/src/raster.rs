use ndarray::{Array2, Array3, ArrayView2, Axis};

use crate::error::{ensure_same_shape, PvMaskError, Result};

/// Per-pixel spectral index, shape = (height, width).
/// Single precision: index values only feed a 200-bucket histogram and a
/// threshold comparison, where f32 resolution is far below one bucket width.
pub type IndexMap = Array2<f32>;

/// Label mask, shape = (height, width). 0 is background, any positive value
/// is an instance/class label.
pub type RegionMask = Array2<u16>;

/// A multi-band reflectance image with the band axis last.
/// Reflectance values are expected in [0.0, ~1.0].
#[derive(Clone, Debug)]
pub struct MultiBandImage {
    /// Pixel data, shape = (height, width, bands)
    pub data: Array3<f32>,
}

impl MultiBandImage {
    pub fn new(data: Array3<f32>) -> Self {
        Self { data }
    }

    /// Stack single-band rasters along a trailing band axis.
    ///
    /// All bands must share the spatial shape of the first one.
    pub fn from_bands(bands: &[Array2<f32>]) -> Result<Self> {
        let first = bands.first().ok_or(PvMaskError::EmptyBandStack)?;
        let (h, w) = first.dim();
        for band in &bands[1..] {
            ensure_same_shape("band stack", (h, w), band.dim())?;
        }

        let mut data = Array3::<f32>::zeros((h, w, bands.len()));
        for (b, band) in bands.iter().enumerate() {
            data.index_axis_mut(Axis(2), b).assign(band);
        }
        Ok(Self { data })
    }

    pub fn height(&self) -> usize {
        self.data.shape()[0]
    }

    pub fn width(&self) -> usize {
        self.data.shape()[1]
    }

    pub fn band_count(&self) -> usize {
        self.data.shape()[2]
    }

    /// Spatial shape as `(height, width)`.
    pub fn dim(&self) -> (usize, usize) {
        (self.height(), self.width())
    }

    /// View of a single band. Panics if `index >= band_count()`.
    pub fn band(&self, index: usize) -> ArrayView2<'_, f32> {
        self.data.index_axis(Axis(2), index)
    }
}
