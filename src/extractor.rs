use std::path::{Path, PathBuf};

use crate::cache::{CacheKey, ExtractionCache};
use crate::config::ExtractorConfig;
use crate::error::ExtractError;
use crate::pipeline::assign::{Mode, Strategy};
use crate::pipeline::contrast::normalize_brightness;
use crate::pipeline::extract::load_and_sample;
use crate::pipeline::quantize::{quantize, DominantColor};
use crate::theme::AnsiPalette;

/// Runs the extraction pipeline, optionally behind a palette cache.
///
/// Cheap to clone; clones share the cache store.
#[derive(Debug, Clone)]
pub struct Extractor {
    config: ExtractorConfig,
    cache: Option<ExtractionCache>,
}

impl Extractor {
    pub fn new(config: ExtractorConfig, cache: ExtractionCache) -> Self {
        Self {
            config,
            cache: Some(cache),
        }
    }

    pub fn without_cache(config: ExtractorConfig) -> Self {
        Self {
            config,
            cache: None,
        }
    }

    /// Extract a normalized 16-slot palette from the image at `path`.
    pub fn extract(
        &self,
        path: &Path,
        prefer_light: bool,
        mode: Mode,
    ) -> Result<AnsiPalette, ExtractError> {
        let Some(cache) = &self.cache else {
            return self.run_pipeline(path, prefer_light, mode);
        };

        let key = CacheKey::for_config(
            path,
            modified_secs(path)?,
            prefer_light,
            mode,
            &self.config,
        );
        if let Some(palette) = cache.get(&key) {
            return Ok(palette);
        }

        let palette = self.run_pipeline(path, prefer_light, mode)?;
        cache.put(&key, &palette);
        Ok(palette)
    }

    /// [`Extractor::extract`] as 16 uppercase `#RRGGBB` strings.
    pub fn extract_hex(
        &self,
        path: &Path,
        prefer_light: bool,
        mode: Mode,
    ) -> Result<[String; 16], ExtractError> {
        Ok(self.extract(path, prefer_light, mode)?.to_hex_strings())
    }

    /// Run [`Extractor::extract`] on tokio's blocking pool.
    ///
    /// Dropping the future does not stop the extraction; it runs to completion
    /// and the result is discarded.
    pub async fn extract_async(
        &self,
        path: PathBuf,
        prefer_light: bool,
        mode: Mode,
    ) -> Result<AnsiPalette, ExtractError> {
        let extractor = self.clone();
        let handle =
            tokio::task::spawn_blocking(move || extractor.extract(&path, prefer_light, mode));
        match handle.await {
            Ok(result) => result,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }

    /// Drop every cached palette.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    fn run_pipeline(
        &self,
        path: &Path,
        prefer_light: bool,
        mode: Mode,
    ) -> Result<AnsiPalette, ExtractError> {
        let samples = load_and_sample(path, &self.config)?;
        let colors = quantize(&samples, self.config.color_count, self.config.min_samples)?;
        self.palette_from_colors(&colors, prefer_light, mode)
    }

    /// The pipeline after quantization: strategy selection, generation and
    /// brightness normalization.
    pub fn palette_from_colors(
        &self,
        colors: &[DominantColor],
        prefer_light: bool,
        mode: Mode,
    ) -> Result<AnsiPalette, ExtractError> {
        if colors.len() < self.config.min_dominant_colors {
            return Err(ExtractError::InsufficientColorData {
                found: colors.len(),
                required: self.config.min_dominant_colors,
                unit: "dominant colors",
            });
        }

        let strategy = Strategy::for_mode(mode, colors);
        tracing::debug!(
            ?strategy,
            %mode,
            prefer_light,
            colors = colors.len(),
            "generating palette"
        );
        let palette = strategy.generate(colors, prefer_light);
        Ok(normalize_brightness(&palette))
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::without_cache(ExtractorConfig::default())
    }
}

/// Modification time of `path` in whole seconds since the epoch.
fn modified_secs(path: &Path) -> Result<i64, ExtractError> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ExtractError::image_load(path, "file not found")
        } else {
            ExtractError::image_load(path, format!("cannot read file metadata ({e})"))
        }
    })?;
    let modified = metadata
        .modified()
        .map_err(|e| ExtractError::image_load(path, format!("no modification time ({e})")))?;
    Ok(chrono::DateTime::<chrono::Utc>::from(modified).timestamp())
}
