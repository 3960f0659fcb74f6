pub mod consts;
pub mod error;
pub mod fusion;
pub mod io;
pub mod mask;
pub mod raster;
pub mod spectral;
pub mod threshold;

pub use error::{PvMaskError, Result};
pub use fusion::{process_site, reconcile, reconcile_with, FusionConfig, FusionReport};
pub use mask::binarize;
pub use raster::{IndexMap, MultiBandImage, RegionMask};
pub use spectral::compute_index;
pub use threshold::{find_threshold, PeakSelection, ThresholdParams};
