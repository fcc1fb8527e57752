use crate::color::{Color, HslColor};
use crate::pipeline::quantize::DominantColor;
use crate::theme::AnsiPalette;

use super::{assemble, match_hues, TARGET_HUES};

const DARK_BACKGROUND: Color = Color::new(0x12, 0x12, 0x12);
const DARK_FOREGROUND: Color = Color::new(0xEC, 0xEF, 0xF1);
const LIGHT_BACKGROUND: Color = Color::new(0xFA, 0xFA, 0xFA);
const LIGHT_FOREGROUND: Color = Color::new(0x21, 0x21, 0x21);

const MIN_SATURATION: f32 = 35.0;
const DARK_LIGHTNESS: (f32, f32) = (45.0, 65.0);
const LIGHT_LIGHTNESS: (f32, f32) = (35.0, 55.0);

/// Fixed neutral background and foreground with image-matched accents held to
/// a narrow saturation and lightness band.
pub fn generate(colors: &[DominantColor], prefer_light: bool) -> AnsiPalette {
    let (bg, fg, (lo, hi)) = if prefer_light {
        (LIGHT_BACKGROUND, LIGHT_FOREGROUND, LIGHT_LIGHTNESS)
    } else {
        (DARK_BACKGROUND, DARK_FOREGROUND, DARK_LIGHTNESS)
    };

    let chromatic = match_hues(colors, &TARGET_HUES).map(|c| {
        let hsl = c.to_hsl();
        HslColor::new(hsl.h, hsl.s.max(MIN_SATURATION), hsl.l.clamp(lo, hi)).to_color()
    });

    assemble(bg, chromatic, fg)
}
