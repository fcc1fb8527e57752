use crate::pipeline::quantize::DominantColor;

/// Saturation (percent) below which a color counts as grayscale.
pub const GRAYSCALE_SATURATION: f32 = 15.0;
/// Fraction of grayscale colors above which the image is monochrome.
pub const MONOCHROME_FRACTION: f32 = 0.7;

const HUE_BINS: usize = 12;
const DIVERSITY_SAMPLE: usize = 16;
const MIN_OCCUPIED_BINS: usize = 3;
const MIN_CHROMATIC_COLORS: usize = 3;

/// Outcome of the image heuristics, used to pick a strategy for the
/// default mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub monochrome: bool,
    pub low_diversity: bool,
}

pub fn classify(colors: &[DominantColor]) -> Classification {
    Classification {
        monochrome: is_monochrome(colors),
        low_diversity: is_low_diversity(colors),
    }
}

/// True when more than [`MONOCHROME_FRACTION`] of the colors are below the
/// grayscale saturation threshold.
pub fn is_monochrome(colors: &[DominantColor]) -> bool {
    if colors.is_empty() {
        return false;
    }
    let gray = colors
        .iter()
        .filter(|dc| dc.color.saturation() < GRAYSCALE_SATURATION)
        .count();
    gray as f32 / colors.len() as f32 > MONOCHROME_FRACTION
}

/// True when the chromatic colors among the first 16 occupy fewer than three
/// 30° hue bins. Needs at least three chromatic colors to decide.
pub fn is_low_diversity(colors: &[DominantColor]) -> bool {
    let mut occupied = [false; HUE_BINS];
    let mut chromatic = 0;

    for dc in colors.iter().take(DIVERSITY_SAMPLE) {
        let hsl = dc.color.to_hsl();
        if hsl.s < GRAYSCALE_SATURATION {
            continue;
        }
        chromatic += 1;
        let bin = ((hsl.h / (360.0 / HUE_BINS as f32)) as usize).min(HUE_BINS - 1);
        occupied[bin] = true;
    }

    let bins = occupied.iter().filter(|&&o| o).count();
    chromatic >= MIN_CHROMATIC_COLORS && bins < MIN_OCCUPIED_BINS
}
