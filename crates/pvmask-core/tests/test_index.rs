mod common;

use approx::assert_abs_diff_eq;
use ndarray::{Array2, Array3};

use pvmask_core::consts::NDPI_MIN_BANDS;
use pvmask_core::raster::MultiBandImage;
use pvmask_core::spectral::compute_index;
use pvmask_core::PvMaskError;

use common::{image_with_index, BANDS};

#[test]
fn test_index_inverts_synthetic_image() {
    let index = Array2::from_shape_fn((4, 6), |(r, c)| -0.4 + 0.05 * (r * 6 + c) as f32);
    let image = image_with_index(&index);
    let computed = compute_index(&image).unwrap();

    assert_eq!(computed.dim(), (4, 6));
    for (a, b) in computed.iter().zip(index.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
    }
}

#[test]
fn test_index_uses_max_of_competing_bands() {
    // SWIR = 0.6; only B8 (index 7) is raised, to 0.3.
    let mut data = Array3::<f32>::from_elem((1, 1, BANDS), 0.1);
    data[[0, 0, BANDS - 2]] = 0.6;
    data[[0, 0, 7]] = 0.3;
    let image = MultiBandImage::new(data);
    let ndpi = compute_index(&image).unwrap();
    assert_abs_diff_eq!(ndpi[[0, 0]], 0.5, epsilon = 1e-6);
}

#[test]
fn test_index_trailing_band_competes() {
    let mut data = Array3::<f32>::from_elem((1, 1, BANDS), 0.1);
    data[[0, 0, BANDS - 2]] = 0.4;
    data[[0, 0, BANDS - 1]] = 0.8;
    let image = MultiBandImage::new(data);
    let ndpi = compute_index(&image).unwrap();
    assert_abs_diff_eq!(ndpi[[0, 0]], -1.0, epsilon = 1e-6);
}

#[test]
fn test_index_ignores_unreferenced_bands() {
    // Bands 0, 4, 5, 6, 8, 9, 10 do not take part in the maximum.
    let mut data = Array3::<f32>::from_elem((1, 1, BANDS), 0.2);
    data[[0, 0, BANDS - 2]] = 0.4;
    for b in [0, 4, 5, 6, 8, 9, 10] {
        data[[0, 0, b]] = 0.9;
    }
    let image = MultiBandImage::new(data);
    let ndpi = compute_index(&image).unwrap();
    assert_abs_diff_eq!(ndpi[[0, 0]], 0.5, epsilon = 1e-6);
}

#[test]
fn test_index_zero_swir_stays_finite() {
    let mut data = Array3::<f32>::zeros((1, 1, BANDS));
    data[[0, 0, 1]] = 0.1;
    let image = MultiBandImage::new(data);
    let ndpi = compute_index(&image).unwrap();
    assert!(ndpi[[0, 0]].is_finite());
    assert!(ndpi[[0, 0]] < -1.0);
}

#[test]
fn test_index_all_zero_pixel_is_zero() {
    let image = MultiBandImage::new(Array3::<f32>::zeros((2, 2, BANDS)));
    let ndpi = compute_index(&image).unwrap();
    assert!(ndpi.iter().all(|&v| v == 0.0));
}

#[test]
fn test_index_rejects_too_few_bands() {
    let image = MultiBandImage::new(Array3::<f32>::zeros((2, 2, NDPI_MIN_BANDS - 1)));
    let err = compute_index(&image).unwrap_err();
    match err {
        PvMaskError::BandCount { required, actual } => {
            assert_eq!(required, NDPI_MIN_BANDS);
            assert_eq!(actual, NDPI_MIN_BANDS - 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_index_accepts_minimum_band_count() {
    let image = MultiBandImage::new(Array3::<f32>::from_elem((2, 2, NDPI_MIN_BANDS), 0.3));
    let ndpi = compute_index(&image).unwrap();
    assert_eq!(ndpi.dim(), (2, 2));
}

#[test]
fn test_index_parallel_path_matches_formula() {
    // 256 x 256 reaches the row-parallel threshold.
    let index = Array2::from_shape_fn((256, 256), |(r, c)| ((r * 7 + c * 3) % 160) as f32 / 200.0 - 0.4);
    let image = image_with_index(&index);
    let computed = compute_index(&image).unwrap();
    for (a, b) in computed.iter().zip(index.iter()) {
        assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
    }
}

#[test]
fn test_from_bands_stacks_in_order() {
    let bands: Vec<Array2<f32>> = (0..3).map(|b| Array2::from_elem((2, 3), b as f32)).collect();
    let image = MultiBandImage::from_bands(&bands).unwrap();
    assert_eq!(image.dim(), (2, 3));
    assert_eq!(image.band_count(), 3);
    assert_eq!(image.band(2)[[1, 2]], 2.0);
}

#[test]
fn test_from_bands_rejects_mismatched_shapes() {
    let bands = vec![Array2::<f32>::zeros((2, 3)), Array2::<f32>::zeros((3, 2))];
    assert!(matches!(
        MultiBandImage::from_bands(&bands),
        Err(PvMaskError::InputShape { .. })
    ));
}

#[test]
fn test_from_bands_rejects_empty_stack() {
    assert!(matches!(
        MultiBandImage::from_bands(&[]),
        Err(PvMaskError::EmptyBandStack)
    ));
}
