use crate::color::{Color, HslColor};
use crate::pipeline::quantize::DominantColor;
use crate::theme::AnsiPalette;

use super::{assemble, base_pair, TARGET_HUES};

/// Saturation shared by every chromatic slot.
const SUBTLE_SATURATION: f32 = 28.0;
const BASE_LIGHTNESS: f32 = 50.0;
/// Per-slot lightness offsets, red through cyan.
const LIGHTNESS_SPREAD: [f32; 6] = [-4.0, 4.0, 12.0, -12.0, 0.0, 8.0];

/// For images whose hues cluster in a few bins. Every chromatic slot gets the
/// same low saturation at its target hue so no single slot stands out.
pub fn generate(colors: &[DominantColor], prefer_light: bool) -> AnsiPalette {
    let (bg, fg) = base_pair(colors, prefer_light);

    let mut chromatic = [Color::new(0, 0, 0); 6];
    for (i, slot) in chromatic.iter_mut().enumerate() {
        *slot = HslColor::new(
            TARGET_HUES[i],
            SUBTLE_SATURATION,
            BASE_LIGHTNESS + LIGHTNESS_SPREAD[i],
        )
        .to_color();
    }

    assemble(bg, chromatic, fg)
}
