use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use pvmask_core::consts::DEFAULT_REFLECTANCE_SCALE;
use pvmask_core::fusion::{process_site, FusionConfig};
use pvmask_core::io::{load_band_stack, load_mask, save_mask};
use tracing::info;

use crate::summary::print_fusion_summary;

#[derive(Args)]
pub struct FuseArgs {
    /// Single-band rasters in band order (repeat once per band)
    #[arg(short, long = "band", required = true)]
    pub bands: Vec<PathBuf>,

    /// New PV mask (label image)
    #[arg(long)]
    pub new_mask: PathBuf,

    /// Prior PV mask; a missing file means there is no prior mask
    #[arg(long)]
    pub old_mask: Option<PathBuf>,

    /// Fusion config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fraction of the prior mask a refinement must keep (overrides config)
    #[arg(long)]
    pub ratio: Option<f64>,

    /// Disable the retention guard on the prior mask
    #[arg(long, conflicts_with = "ratio")]
    pub no_guard: bool,

    /// Remove connected regions of at most this many pixels (overrides config)
    #[arg(long)]
    pub max_area: Option<usize>,

    /// Skip small-region cleanup
    #[arg(long, conflicts_with = "max_area")]
    pub no_cleanup: bool,

    /// Divisor converting raw band values to reflectance
    #[arg(long, default_value_t = DEFAULT_REFLECTANCE_SCALE)]
    pub reflectance_scale: f32,

    /// Output mask path
    #[arg(short, long, default_value = "mask.png")]
    pub output: PathBuf,
}

pub fn run(args: &FuseArgs) -> Result<()> {
    let config = build_config(args)?;

    let image = load_band_stack(&args.bands, args.reflectance_scale)
        .context("Failed to load band stack")?;
    info!(
        width = image.width(),
        height = image.height(),
        bands = image.band_count(),
        "Loaded image"
    );

    let new_mask = load_mask(&args.new_mask)
        .with_context(|| format!("Failed to load {}", args.new_mask.display()))?;
    let old_mask = match args.old_mask {
        Some(ref path) if path.exists() => Some(
            load_mask(path).with_context(|| format!("Failed to load {}", path.display()))?,
        ),
        Some(ref path) => {
            info!(path = %path.display(), "Old mask not found, processing new mask only");
            None
        }
        None => None,
    };

    let report = process_site(&image, old_mask.as_ref(), &new_mask, &config)?;
    print_fusion_summary(&report, &config);

    save_mask(&report.final_mask, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Saved to {}", args.output.display());

    Ok(())
}

fn build_config(args: &FuseArgs) -> Result<FusionConfig> {
    let mut config: FusionConfig = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid fusion config")?
    } else {
        FusionConfig::default()
    };

    if args.no_guard {
        config.retention_ratio = None;
    } else if let Some(ratio) = args.ratio {
        config.retention_ratio = Some(ratio);
    }
    if args.no_cleanup {
        config.cleanup.enabled = false;
    } else if let Some(max_area) = args.max_area {
        config.cleanup.enabled = true;
        config.cleanup.max_area = max_area;
    }

    config.validate()?;
    Ok(config)
}
