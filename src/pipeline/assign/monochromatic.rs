use crate::color::{hue_distance, Color, HslColor};
use crate::pipeline::quantize::DominantColor;
use crate::theme::AnsiPalette;

use super::{assemble, base_pair, most_saturated, TARGET_HUES};

/// (saturation, lightness) for the non-home slots, red through cyan.
const SHADES: [(f32, f32); 6] = [
    (75.0, 45.0),
    (55.0, 55.0),
    (65.0, 62.0),
    (45.0, 38.0),
    (35.0, 68.0),
    (60.0, 50.0),
];
const HOME_MIN_SATURATION: f32 = 30.0;
const HOME_LIGHTNESS: (f32, f32) = (35.0, 70.0);

/// One hue, many shades: the most saturated color keeps the ANSI slot whose
/// hue it is closest to, and the other five slots are shades of that hue.
pub fn generate(colors: &[DominantColor], prefer_light: bool) -> AnsiPalette {
    let (bg, fg) = base_pair(colors, prefer_light);
    let base = most_saturated(colors);
    let home = home_slot(base.h);

    let mut chromatic = [Color::new(0, 0, 0); 6];
    for (i, slot) in chromatic.iter_mut().enumerate() {
        *slot = if i == home {
            HslColor::new(
                base.h,
                base.s.max(HOME_MIN_SATURATION),
                base.l.clamp(HOME_LIGHTNESS.0, HOME_LIGHTNESS.1),
            )
        } else {
            let (s, l) = SHADES[i];
            HslColor::new(base.h, s, l)
        }
        .to_color();
    }

    assemble(bg, chromatic, fg)
}

/// Index into slots 1-6 whose target hue is nearest `hue`.
fn home_slot(hue: f32) -> usize {
    TARGET_HUES
        .iter()
        .enumerate()
        .min_by(|a, b| hue_distance(hue, *a.1).total_cmp(&hue_distance(hue, *b.1)))
        .map_or(0, |(i, _)| i)
}
