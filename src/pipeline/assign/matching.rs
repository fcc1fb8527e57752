use crate::color::{hue_distance, Color, HslColor};
use crate::pipeline::quantize::DominantColor;

use super::MIN_CHROMATIC_SATURATION;

/// Target hues for slots 1-6: red, green, yellow, blue, magenta, cyan.
pub const TARGET_HUES: [f32; 6] = [0.0, 120.0, 60.0, 240.0, 300.0, 180.0];

const HUE_WEIGHT: f32 = 3.0;
const LOW_SATURATION_PENALTY: f32 = 50.0;
const EXTREME_LIGHTNESS_PENALTY: f32 = 10.0;
const TOO_DARK: f32 = 20.0;
const TOO_BRIGHT: f32 = 85.0;

/// Lower is a better fit of `candidate` for the `target` hue.
fn score(candidate: &HslColor, target: f32) -> f32 {
    let mut score = HUE_WEIGHT * hue_distance(candidate.h, target);
    if candidate.s < MIN_CHROMATIC_SATURATION {
        score += LOW_SATURATION_PENALTY;
    }
    score += (100.0 - candidate.s) / 2.0;
    if candidate.l < TOO_DARK || candidate.l > TOO_BRIGHT {
        score += EXTREME_LIGHTNESS_PENALTY;
    }
    score
}

/// Assign one dominant color to each target hue, in target order.
///
/// Each candidate is used at most once. If candidates run out, the slot is
/// synthesized at the target hue with mid saturation and lightness.
pub fn match_hues(colors: &[DominantColor], targets: &[f32; 6]) -> [Color; 6] {
    let candidates: Vec<HslColor> = colors.iter().map(|dc| dc.color.to_hsl()).collect();
    let mut used = vec![false; candidates.len()];
    let mut matched = [Color::new(0, 0, 0); 6];

    for (slot, &target) in matched.iter_mut().zip(targets) {
        let best = candidates
            .iter()
            .enumerate()
            .filter(|(i, _)| !used[*i])
            .map(|(i, c)| (i, score(c, target)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i);

        *slot = match best {
            Some(i) => {
                used[i] = true;
                colors[i].color
            }
            None => HslColor::new(target, 50.0, 50.0).to_color(),
        };
    }

    matched
}
