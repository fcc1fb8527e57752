use crate::color::{Color, HslColor};
use crate::pipeline::quantize::DominantColor;
use crate::theme::AnsiPalette;

use super::{assemble, base_pair};

const MONO_SATURATION: f32 = 5.0;
/// Slot 1-6 lightness against a dark background.
const DARK_RAMP: [f32; 6] = [52.0, 60.0, 68.0, 56.0, 64.0, 72.0];
/// Slot 1-6 lightness against a light background.
const LIGHT_RAMP: [f32; 6] = [28.0, 36.0, 44.0, 32.0, 40.0, 48.0];

/// Grayscale ramp tinted with the background hue.
pub fn generate(colors: &[DominantColor], prefer_light: bool) -> AnsiPalette {
    let (bg, fg) = base_pair(colors, prefer_light);
    let bg = bg.to_hsl();
    let hue = bg.h;
    let tint = |l: f32| HslColor::new(hue, MONO_SATURATION, l).to_color();

    let ramp = if prefer_light { LIGHT_RAMP } else { DARK_RAMP };
    let mut chromatic = [Color::new(0, 0, 0); 6];
    for (slot, l) in chromatic.iter_mut().zip(ramp) {
        *slot = tint(l);
    }

    assemble(tint(bg.l), chromatic, tint(fg.lightness()))
}
