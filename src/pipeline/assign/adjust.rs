//! Tone strategies: pastel, colorful, muted and bright palettes.
//!
//! These are transforms of the chromatic strategy's output, not independent
//! derivations, so their hues are exactly the ones chromatic matching chose.

use crate::color::{Color, HslColor};
use crate::pipeline::quantize::DominantColor;
use crate::theme::{AnsiPalette, BACKGROUND, BRIGHT_BLACK, CHROMATIC_SLOTS, FOREGROUND};

use super::chromatic;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Pastel,
    Colorful,
    Muted,
    Bright,
}

/// How one slot's saturation and lightness are remapped.
///
/// Saturation is scaled then clamped. Lightness is shifted then clamped; for
/// the base colors the shift points away from the background, so a positive
/// shift means "more contrast" in either theme.
#[derive(Debug, Clone, Copy)]
struct Rule {
    saturation_scale: f32,
    saturation: (f32, f32),
    lightness_shift: f32,
    lightness: (f32, f32),
}

impl Rule {
    fn scale(saturation_scale: f32) -> Self {
        Self {
            saturation_scale,
            saturation: (0.0, 100.0),
            lightness_shift: 0.0,
            lightness: (0.0, 100.0),
        }
    }

    fn shift(mut self, lightness_shift: f32) -> Self {
        self.lightness_shift = lightness_shift;
        self
    }

    fn apply(self, color: Color, direction: f32) -> Color {
        let hsl = color.to_hsl();
        let s = (hsl.s * self.saturation_scale).clamp(self.saturation.0, self.saturation.1);
        let l = (hsl.l + self.lightness_shift * direction).clamp(self.lightness.0, self.lightness.1);
        HslColor::new(hsl.h, s, l).to_color()
    }
}

struct ToneRules {
    background: Rule,
    foreground: Rule,
    gray: Rule,
    chromatic: Rule,
}

impl Tone {
    fn rules(self) -> ToneRules {
        match self {
            Tone::Pastel => ToneRules {
                background: Rule::scale(0.5),
                foreground: Rule::scale(0.5),
                gray: Rule::scale(0.5),
                chromatic: Rule {
                    saturation_scale: 0.6,
                    saturation: (25.0, 55.0),
                    lightness_shift: 15.0,
                    lightness: (70.0, 85.0),
                },
            },
            Tone::Colorful => ToneRules {
                background: Rule {
                    saturation: (0.0, 40.0),
                    ..Rule::scale(1.2)
                },
                foreground: Rule::scale(1.0),
                gray: Rule::scale(1.0),
                chromatic: Rule {
                    saturation_scale: 1.4,
                    saturation: (65.0, 100.0),
                    lightness_shift: 0.0,
                    lightness: (45.0, 65.0),
                },
            },
            Tone::Muted => ToneRules {
                background: Rule::scale(0.5),
                foreground: Rule::scale(0.5),
                gray: Rule::scale(0.3),
                chromatic: Rule {
                    saturation_scale: 0.5,
                    saturation: (10.0, 35.0),
                    lightness_shift: 0.0,
                    lightness: (40.0, 60.0),
                },
            },
            Tone::Bright => ToneRules {
                background: Rule::scale(1.0),
                foreground: Rule::scale(1.0).shift(5.0),
                gray: Rule::scale(1.0).shift(10.0),
                chromatic: Rule {
                    saturation_scale: 1.1,
                    saturation: (50.0, 100.0),
                    lightness_shift: 12.0,
                    lightness: (55.0, 80.0),
                },
            },
        }
    }

    /// Remap an existing palette: base slots first, then re-derive the bright
    /// half, then apply the gray rule to slot 8.
    fn apply(self, mut palette: AnsiPalette, prefer_light: bool) -> AnsiPalette {
        let rules = self.rules();
        let away = if prefer_light { -1.0 } else { 1.0 };

        palette.slots[BACKGROUND] = rules.background.apply(palette.slots[BACKGROUND], away);
        palette.slots[FOREGROUND] = rules.foreground.apply(palette.slots[FOREGROUND], away);
        for slot in CHROMATIC_SLOTS {
            palette.slots[slot] = rules.chromatic.apply(palette.slots[slot], 1.0);
        }
        palette.derive_all_bright();
        palette.slots[BRIGHT_BLACK] = rules.gray.apply(palette.slots[BRIGHT_BLACK], away);
        palette
    }
}

pub fn generate(tone: Tone, colors: &[DominantColor], prefer_light: bool) -> AnsiPalette {
    tone.apply(chromatic::generate(colors, prefer_light), prefer_light)
}
