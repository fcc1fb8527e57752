use crate::color::{Color, HslColor};
use crate::pipeline::quantize::DominantColor;
use crate::theme::AnsiPalette;

use super::{assemble, base_pair, most_saturated};

const HUE_OFFSETS: [f32; 6] = [-30.0, -20.0, -10.0, 10.0, 20.0, 30.0];
/// (saturation, lightness) per slot.
const STAGGER: [(f32, f32); 6] = [
    (55.0, 48.0),
    (62.0, 54.0),
    (70.0, 60.0),
    (70.0, 52.0),
    (62.0, 46.0),
    (55.0, 56.0),
];

/// Neighbouring hues around the most saturated color instead of the full
/// ANSI spectrum.
pub fn generate(colors: &[DominantColor], prefer_light: bool) -> AnsiPalette {
    let (bg, fg) = base_pair(colors, prefer_light);
    let base = most_saturated(colors);

    let mut chromatic = [Color::new(0, 0, 0); 6];
    for (i, slot) in chromatic.iter_mut().enumerate() {
        let (s, l) = STAGGER[i];
        *slot = HslColor::new(base.h + HUE_OFFSETS[i], s, l).to_color();
    }

    assemble(bg, chromatic, fg)
}
