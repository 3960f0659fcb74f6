pub mod image_io;

pub use image_io::{load_band, load_band_stack, load_mask, save_mask};
