pub mod config;
mod reconcile;
mod refine;

pub use config::{CleanupConfig, FusionConfig};
pub use reconcile::{process_site, reconcile, reconcile_with, FusionPath, FusionReport};
pub use refine::{apply_retention_guard, refine_with_mask, GuardDecision, Refinement};
