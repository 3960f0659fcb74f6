use thiserror::Error;

#[derive(Error, Debug)]
pub enum PvMaskError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Shape mismatch in {context}: expected {expected:?}, got {actual:?}")]
    InputShape {
        context: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Image has {actual} bands, at least {required} are required")]
    BandCount { required: usize, actual: usize },

    #[error("Unknown peak selection mode: {0:?} (expected \"old\" or \"new\")")]
    UnknownSelection(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Empty band stack")]
    EmptyBandStack,
}

pub type Result<T> = std::result::Result<T, PvMaskError>;

/// Fail with [`PvMaskError::InputShape`] unless both shapes are identical.
pub(crate) fn ensure_same_shape(
    context: &'static str,
    expected: (usize, usize),
    actual: (usize, usize),
) -> Result<()> {
    if expected != actual {
        return Err(PvMaskError::InputShape {
            context,
            expected,
            actual,
        });
    }
    Ok(())
}
