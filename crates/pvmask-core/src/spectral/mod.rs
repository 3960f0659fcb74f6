pub mod ndpi;

pub use ndpi::{compute_index, NdpiBands};
