/// Density-normalized histogram over a fixed `[min, max]` domain.
#[derive(Clone, Debug)]
pub struct Histogram {
    centers: Vec<f64>,
    densities: Vec<f64>,
    bin_width: f64,
}

impl Histogram {
    /// Build a histogram with `bins` equal-width buckets over `range`.
    ///
    /// Values outside the range and non-finite values are ignored. The last
    /// bucket is closed on the right so that `range.1` itself is counted.
    /// Densities integrate to 1 over the domain; if no value falls inside
    /// the range every density is zero.
    pub fn density(sample: &[f32], bins: usize, range: (f64, f64)) -> Self {
        let (lo, hi) = range;
        if bins == 0 {
            return Self {
                centers: Vec::new(),
                densities: Vec::new(),
                bin_width: hi - lo,
            };
        }
        let bin_width = (hi - lo) / bins as f64;
        let mut counts = vec![0u64; bins];
        let mut total = 0u64;

        for &v in sample {
            let v = v as f64;
            if !v.is_finite() || v < lo || v > hi {
                continue;
            }
            let bin = if v == hi {
                bins - 1
            } else {
                (((v - lo) / bin_width) as usize).min(bins - 1)
            };
            counts[bin] += 1;
            total += 1;
        }

        let norm = if total > 0 {
            1.0 / (total as f64 * bin_width)
        } else {
            0.0
        };
        let densities = counts.iter().map(|&c| c as f64 * norm).collect();
        let centers = (0..bins)
            .map(|i| lo + (i as f64 + 0.5) * bin_width)
            .collect();

        Self {
            centers,
            densities,
            bin_width,
        }
    }

    /// Bucket midpoints, ascending.
    pub fn centers(&self) -> &[f64] {
        &self.centers
    }

    pub fn densities(&self) -> &[f64] {
        &self.densities
    }

    pub fn bin_width(&self) -> f64 {
        self.bin_width
    }

    pub fn len(&self) -> usize {
        self.densities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.densities.is_empty()
    }
}
