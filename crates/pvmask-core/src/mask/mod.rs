pub mod algebra;
pub mod binarize;
pub mod cleanup;
pub mod components;

pub use algebra::{difference, intersection, max_label, positive_count, scale_to_label, union};
pub use binarize::{binarize, restrict_to_roi, sample_roi};
pub use cleanup::remove_small_areas;
pub use components::{connected_components_8, ComponentLabels, ComponentStats};
