use std::path::Path;

use image::imageops::FilterType;
use image::RgbaImage;

use crate::color::Color;
use crate::config::ExtractorConfig;
use crate::error::ExtractError;

/// Load an image, downscale it so its longest side fits within
/// `config.max_dimension` (preserving aspect ratio), and sample its pixels.
pub fn load_and_sample(path: &Path, config: &ExtractorConfig) -> Result<Vec<Color>, ExtractError> {
    let img = image::open(path).map_err(|err| {
        if !path.exists() {
            ExtractError::image_load(path, "file not found")
        } else {
            ExtractError::image_load(
                path,
                format!(
                    "unsupported or corrupt image ({err}). Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF"
                ),
            )
        }
    })?;

    let max_dim = config.max_dimension;
    let img = if img.width() > max_dim || img.height() > max_dim {
        img.resize(max_dim, max_dim, FilterType::Lanczos3)
    } else {
        img
    };

    let samples = sample_pixels(&img.to_rgba8(), config);
    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        samples = samples.len(),
        "sampled image pixels"
    );
    Ok(samples)
}

/// Walk the pixel grid at a fixed stride in both axes, keeping one RGB triple
/// per visited pixel whose alpha reaches `config.alpha_threshold`.
///
/// The stride is `max(1, total_pixels / max_samples)`.
pub fn sample_pixels(img: &RgbaImage, config: &ExtractorConfig) -> Vec<Color> {
    let (width, height) = img.dimensions();
    let total = width as usize * height as usize;
    let stride = (total / config.max_samples.max(1)).max(1);

    let mut samples = Vec::with_capacity(total / stride);
    for y in (0..height).step_by(stride) {
        for x in (0..width).step_by(stride) {
            let p = img.get_pixel(x, y);
            if p[3] < config.alpha_threshold {
                continue;
            }
            samples.push(Color::new(p[0], p[1], p[2]));
        }
    }
    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(dir: &tempfile::TempDir, name: &str) -> PathBuf {
        dir.path().join(name)
    }

    fn create_test_image_solid(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
        let img = image::RgbImage::from_fn(width, height, |_, _| image::Rgb(rgb));
        img.save(path).unwrap();
    }

    // --- load_and_sample tests ---

    #[test]
    fn load_4x4_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(&dir, "4x4.png");
        create_test_image_solid(&path, 4, 4, [128, 128, 128]);

        let samples = load_and_sample(&path, &ExtractorConfig::default()).unwrap();
        assert_eq!(samples.len(), 16);
        assert!(samples.iter().all(|c| *c == Color::new(128, 128, 128)));
    }

    #[test]
    fn load_large_image_resizes_and_strides() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(&dir, "512x512.png");
        create_test_image_solid(&path, 512, 512, [128, 128, 128]);

        // 200x200 after resize = 40000 pixels, stride 4 in both axes.
        let samples = load_and_sample(&path, &ExtractorConfig::default()).unwrap();
        assert_eq!(samples.len(), 50 * 50);
    }

    #[test]
    fn load_nonsquare_preserves_aspect_ratio() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(&dir, "512x256.png");
        create_test_image_solid(&path, 512, 256, [128, 128, 128]);

        // 200x100 after resize = 20000 pixels, stride 2.
        let samples = load_and_sample(&path, &ExtractorConfig::default()).unwrap();
        assert_eq!(samples.len(), 100 * 50);
    }

    #[test]
    fn load_file_not_found() {
        let result = load_and_sample(
            Path::new("/nonexistent/image.png"),
            &ExtractorConfig::default(),
        );
        let err = result.unwrap_err();
        assert!(matches!(err, ExtractError::ImageLoad { .. }));
        assert!(
            err.to_string().contains("file not found"),
            "expected file-not-found error, got: {err}"
        );
    }

    #[test]
    fn load_unsupported_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(&dir, "not_an_image.txt");
        std::fs::write(&path, "this is not an image").unwrap();

        let err = load_and_sample(&path, &ExtractorConfig::default()).unwrap_err();
        assert!(
            err.to_string().contains("unsupported"),
            "expected unsupported format error, got: {err}"
        );
    }

    // --- sample_pixels tests ---

    #[test]
    fn transparent_pixels_are_skipped() {
        let img = RgbaImage::from_fn(10, 10, |x, _| {
            if x < 5 {
                image::Rgba([255, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 255, 40])
            }
        });
        let samples = sample_pixels(&img, &ExtractorConfig::default());
        assert_eq!(samples.len(), 50);
        assert!(samples.iter().all(|c| *c == Color::new(255, 0, 0)));
    }

    #[test]
    fn half_transparent_pixels_are_kept() {
        let img = RgbaImage::from_fn(4, 4, |_, _| image::Rgba([10, 20, 30, 128]));
        let samples = sample_pixels(&img, &ExtractorConfig::default());
        assert_eq!(samples.len(), 16);
    }

    #[test]
    fn stride_bounds_sample_count() {
        let config = ExtractorConfig {
            max_samples: 100,
            ..ExtractorConfig::default()
        };
        let img = RgbaImage::from_fn(40, 40, |_, _| image::Rgba([1, 2, 3, 255]));
        // 1600 / 100 = stride 16 -> rows/cols 0, 16, 32.
        let samples = sample_pixels(&img, &config);
        assert_eq!(samples.len(), 9);
    }
}
