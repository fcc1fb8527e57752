use std::collections::HashSet;

use crate::color::Color;
use crate::error::ExtractError;

/// A quantized color with the number of samples it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DominantColor {
    pub color: Color,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn of(self, c: &Color) -> u8 {
        match self {
            Channel::Red => c.r,
            Channel::Green => c.g,
            Channel::Blue => c.b,
        }
    }
}

/// Per-channel `(min, max)` of a bucket's members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Ranges {
    r: (u8, u8),
    g: (u8, u8),
    b: (u8, u8),
}

impl Ranges {
    fn of(colors: &[Color]) -> Self {
        let mut ranges = Ranges {
            r: (u8::MAX, u8::MIN),
            g: (u8::MAX, u8::MIN),
            b: (u8::MAX, u8::MIN),
        };
        for c in colors {
            ranges.r = (ranges.r.0.min(c.r), ranges.r.1.max(c.r));
            ranges.g = (ranges.g.0.min(c.g), ranges.g.1.max(c.g));
            ranges.b = (ranges.b.0.min(c.b), ranges.b.1.max(c.b));
        }
        ranges
    }

    fn span(range: (u8, u8)) -> u64 {
        range.1.saturating_sub(range.0) as u64
    }

    fn longest(&self) -> Channel {
        let (r, g, b) = (Self::span(self.r), Self::span(self.g), Self::span(self.b));
        if r >= g && r >= b {
            Channel::Red
        } else if g >= b {
            Channel::Green
        } else {
            Channel::Blue
        }
    }
}

/// A set of samples plus the cached channel ranges used to pick its split axis.
#[derive(Debug, Clone)]
struct ColorBucket {
    colors: Vec<Color>,
    ranges: Ranges,
}

impl ColorBucket {
    fn new(colors: Vec<Color>) -> Self {
        let ranges = Ranges::of(&colors);
        Self { colors, ranges }
    }

    fn len(&self) -> usize {
        self.colors.len()
    }

    /// Split priority: product of (range + 1) per channel, times population.
    /// The `+ 1` keeps buckets that are flat on one channel comparable.
    fn volume(&self) -> u64 {
        let r = Ranges::span(self.ranges.r) + 1;
        let g = Ranges::span(self.ranges.g) + 1;
        let b = Ranges::span(self.ranges.b) + 1;
        r * g * b * self.len() as u64
    }

    /// Sort on the longest-range channel and cut at the median index.
    fn split(mut self) -> (ColorBucket, ColorBucket) {
        let channel = self.ranges.longest();
        self.colors.sort_unstable_by_key(|c| channel.of(c));
        let upper = self.colors.split_off(self.colors.len() / 2);
        (ColorBucket::new(self.colors), ColorBucket::new(upper))
    }

    /// Integer-rounded channel-wise mean of the members.
    fn average(&self) -> Color {
        let n = self.len() as u64;
        if n == 0 {
            return Color::new(0, 0, 0);
        }
        let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
        for c in &self.colors {
            r += c.r as u64;
            g += c.g as u64;
            b += c.b as u64;
        }
        let mean = |sum: u64| ((sum + n / 2) / n) as u8;
        Color::new(mean(r), mean(g), mean(b))
    }
}

/// Median-cut quantization of `samples` into at most `max_colors` dominant
/// colors, sorted by descending population.
///
/// Fails with [`ExtractError::InsufficientColorData`] when fewer than
/// `min_samples` samples are supplied.
pub fn quantize(
    samples: &[Color],
    max_colors: usize,
    min_samples: usize,
) -> Result<Vec<DominantColor>, ExtractError> {
    if max_colors == 0 {
        return Err(ExtractError::Quantization(
            "at least one color must be requested".to_string(),
        ));
    }
    if samples.len() < min_samples {
        return Err(ExtractError::InsufficientColorData {
            found: samples.len(),
            required: min_samples,
            unit: "pixel samples",
        });
    }

    let mut colors = if samples.len() <= max_colors {
        let mut seen = HashSet::new();
        samples
            .iter()
            .filter(|c| seen.insert(**c))
            .map(|&color| DominantColor { color, count: 1 })
            .collect()
    } else {
        median_cut(samples.to_vec(), max_colors)
            .iter()
            .map(|bucket| DominantColor {
                color: bucket.average(),
                count: bucket.len(),
            })
            .collect::<Vec<_>>()
    };

    if colors.is_empty() {
        return Err(ExtractError::Quantization(
            "median cut produced no colors".to_string(),
        ));
    }

    // Stable sort keeps split order among equal populations.
    colors.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(colors)
}

fn median_cut(samples: Vec<Color>, max_colors: usize) -> Vec<ColorBucket> {
    let mut buckets = vec![ColorBucket::new(samples)];

    while buckets.len() < max_colors {
        let candidate = buckets
            .iter()
            .enumerate()
            .filter(|(_, b)| b.len() > 1)
            .max_by_key(|(_, b)| b.volume())
            .map(|(i, _)| i);

        let Some(index) = candidate else {
            break;
        };

        let (lower, upper) = buckets.swap_remove(index).split();
        buckets.push(lower);
        buckets.push(upper);
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repeat(color: Color, n: usize) -> Vec<Color> {
        vec![color; n]
    }

    #[test]
    fn never_returns_more_than_requested() {
        let samples: Vec<Color> = (0..2000u32)
            .map(|i| Color::new((i % 256) as u8, ((i * 7) % 256) as u8, ((i * 13) % 256) as u8))
            .collect();
        for n in [1, 4, 8, 16, 32] {
            let colors = quantize(&samples, n, 100).unwrap();
            assert!(colors.len() <= n, "asked for {n}, got {}", colors.len());
        }
    }

    #[test]
    fn zero_colors_requested_is_an_error() {
        let samples = repeat(Color::new(10, 20, 30), 200);
        let err = quantize(&samples, 0, 100).unwrap_err();
        assert!(matches!(err, ExtractError::Quantization(_)), "got: {err}");
    }

    #[test]
    fn average_is_true_channel_mean() {
        let bucket = ColorBucket::new(vec![
            Color::new(10, 20, 30),
            Color::new(20, 40, 60),
            Color::new(30, 60, 91),
        ]);
        // Blue mean is 60.33 and rounds down.
        assert_eq!(bucket.average(), Color::new(20, 40, 60));

        let bucket = ColorBucket::new(vec![Color::new(0, 0, 0), Color::new(1, 3, 255)]);
        // 0.5 rounds up, 1.5 rounds up, 127.5 rounds up.
        assert_eq!(bucket.average(), Color::new(1, 2, 128));
    }

    #[test]
    fn two_clusters_are_separated() {
        let red = Color::new(200, 30, 30);
        let blue = Color::new(30, 30, 200);
        let mut samples = repeat(red, 200);
        samples.extend(repeat(blue, 200));

        let colors = quantize(&samples, 2, 100).unwrap();
        assert_eq!(colors.len(), 2);
        assert!(colors.iter().any(|c| c.color == red && c.count == 200));
        assert!(colors.iter().any(|c| c.color == blue && c.count == 200));
    }

    #[test]
    fn cluster_means_match_members() {
        let mut samples = Vec::new();
        for i in 0..100u8 {
            samples.push(Color::new(200 + i % 10, 20, 20));
            samples.push(Color::new(20, 20, 200 + i % 10));
        }
        let colors = quantize(&samples, 2, 100).unwrap();
        let total: usize = colors.iter().map(|c| c.count).sum();
        assert_eq!(total, samples.len());
        for dc in &colors {
            let reddish = dc.color.r > dc.color.b;
            let expected = if reddish {
                Color::new(205, 20, 20)
            } else {
                Color::new(20, 20, 205)
            };
            // 200..=209 averages to 204.5.
            assert_eq!(dc.color, expected, "bucket mean should be exact");
        }
    }

    #[test]
    fn results_sorted_by_count_descending() {
        let mut samples = repeat(Color::new(250, 0, 0), 600);
        samples.extend(repeat(Color::new(0, 250, 0), 300));
        samples.extend(repeat(Color::new(0, 0, 250), 100));

        let colors = quantize(&samples, 8, 100).unwrap();
        for window in colors.windows(2) {
            assert!(
                window[0].count >= window[1].count,
                "colors not sorted by count: {} < {}",
                window[0].count,
                window[1].count
            );
        }
    }

    #[test]
    fn uniform_samples_still_split_to_requested_count() {
        let red = Color::new(200, 30, 30);
        let colors = quantize(&repeat(red, 1000), 16, 100).unwrap();
        assert_eq!(colors.len(), 16);
        assert!(colors.iter().all(|c| c.color == red));
        assert_eq!(colors.iter().map(|c| c.count).sum::<usize>(), 1000);
    }

    #[test]
    fn small_sample_sets_are_deduplicated() {
        let samples = vec![
            Color::new(1, 1, 1),
            Color::new(2, 2, 2),
            Color::new(1, 1, 1),
            Color::new(3, 3, 3),
        ];
        let colors = quantize(&samples, 16, 1).unwrap();
        assert_eq!(colors.len(), 3);
        assert!(colors.iter().all(|c| c.count == 1));
    }

    #[test]
    fn too_few_samples_is_insufficient() {
        let err = quantize(&repeat(Color::new(9, 9, 9), 99), 16, 100).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::InsufficientColorData {
                found: 99,
                required: 100,
                ..
            }
        ));
    }

    #[test]
    fn empty_input_is_quantization_error() {
        let err = quantize(&[], 16, 0).unwrap_err();
        assert!(matches!(err, ExtractError::Quantization(_)));
    }

    #[test]
    fn split_uses_longest_channel() {
        let bucket = ColorBucket::new(vec![
            Color::new(10, 0, 100),
            Color::new(12, 250, 100),
            Color::new(11, 5, 101),
            Color::new(13, 240, 99),
        ]);
        assert_eq!(bucket.ranges.longest(), Channel::Green);
        let (lower, upper) = bucket.split();
        assert!(lower.colors.iter().all(|c| c.g < 10));
        assert!(upper.colors.iter().all(|c| c.g > 200));
    }
}
