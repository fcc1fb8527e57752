/// Tunables for the extraction pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Longest side, in pixels, the image is downscaled to before sampling.
    pub max_dimension: u32,
    /// Upper bound used to derive the sampling stride.
    pub max_samples: usize,
    /// Fewer opaque samples than this fails the extraction.
    pub min_samples: usize,
    /// Number of median-cut buckets to produce.
    pub color_count: usize,
    /// Fewer dominant colors than this fails the extraction.
    pub min_dominant_colors: usize,
    /// Pixels with alpha below this (0-255) are skipped.
    pub alpha_threshold: u8,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_dimension: 200,
            max_samples: 10_000,
            min_samples: 100,
            color_count: 16,
            min_dominant_colors: 8,
            alpha_threshold: 128,
        }
    }
}

impl ExtractorConfig {
    /// Tag for the fields that change a successful extraction's palette, or
    /// `None` while they all hold their defaults.
    ///
    /// `min_samples` and `min_dominant_colors` only decide whether an
    /// extraction fails, and failures are never cached.
    pub fn output_tag(&self) -> Option<String> {
        let fields = |c: &Self| (c.max_dimension, c.max_samples, c.color_count, c.alpha_threshold);
        if fields(self) == fields(&Self::default()) {
            return None;
        }
        Some(format!(
            "d{}-s{}-k{}-a{}",
            self.max_dimension, self.max_samples, self.color_count, self.alpha_threshold
        ))
    }
}
