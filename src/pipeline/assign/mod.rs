//! Palette generation strategies.
//!
//! Every strategy maps the dominant colors of an image onto the 16 ANSI
//! slots. Background and foreground come from the lightness extremes, the
//! chromatic slots 1-6 from nearest-hue matching, and the bright half is
//! derived from the base half.

mod adjust;
mod analogous;
mod chromatic;
mod matching;
mod material;
mod monochromatic;
mod monochrome;
mod subtle;

use std::str::FromStr;

use crate::color::{Color, HslColor};
use crate::error::ExtractError;
use crate::pipeline::detect::{self, Classification};
use crate::pipeline::quantize::DominantColor;
use crate::theme::{AnsiPalette, FOREGROUND};

pub use adjust::Tone;
pub use matching::{match_hues, TARGET_HUES};

/// Saturation (percent) below which a candidate is penalized as a chromatic slot.
pub const MIN_CHROMATIC_SATURATION: f32 = 15.0;

const DARK_BG_MAX_LIGHTNESS: f32 = 15.0;
const DARK_FG_MIN_LIGHTNESS: f32 = 85.0;
const LIGHT_BG_MIN_LIGHTNESS: f32 = 92.0;
const LIGHT_FG_MAX_LIGHTNESS: f32 = 18.0;
const BG_MAX_SATURATION: f32 = 30.0;
const FG_MAX_SATURATION: f32 = 20.0;

/// Palette mode requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Mode {
    #[default]
    Default,
    Monochromatic,
    Analogous,
    Pastel,
    Material,
    Colorful,
    Muted,
    Bright,
}

impl Mode {
    pub const ALL: [Mode; 8] = [
        Mode::Default,
        Mode::Monochromatic,
        Mode::Analogous,
        Mode::Pastel,
        Mode::Material,
        Mode::Colorful,
        Mode::Muted,
        Mode::Bright,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Default => "default",
            Mode::Monochromatic => "monochromatic",
            Mode::Analogous => "analogous",
            Mode::Pastel => "pastel",
            Mode::Material => "material",
            Mode::Colorful => "colorful",
            Mode::Muted => "muted",
            Mode::Bright => "bright",
        }
    }
}

impl FromStr for Mode {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == wanted)
            .ok_or_else(|| ExtractError::UnknownMode(s.to_string()))
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The concrete generator used to build a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Chromatic,
    SubtleBalanced,
    Monochrome,
    Monochromatic,
    Pastel,
    Colorful,
    Muted,
    Bright,
    Material,
    Analogous,
}

impl Strategy {
    /// Resolve a mode to its strategy. Only [`Mode::Default`] consults the
    /// image heuristics.
    pub fn for_mode(mode: Mode, colors: &[DominantColor]) -> Strategy {
        match mode {
            Mode::Default => Strategy::from_classification(detect::classify(colors)),
            Mode::Monochromatic => Strategy::Monochromatic,
            Mode::Analogous => Strategy::Analogous,
            Mode::Pastel => Strategy::Pastel,
            Mode::Material => Strategy::Material,
            Mode::Colorful => Strategy::Colorful,
            Mode::Muted => Strategy::Muted,
            Mode::Bright => Strategy::Bright,
        }
    }

    pub fn from_classification(classification: Classification) -> Strategy {
        if classification.monochrome {
            Strategy::Monochrome
        } else if classification.low_diversity {
            Strategy::SubtleBalanced
        } else {
            Strategy::Chromatic
        }
    }

    pub fn generate(self, colors: &[DominantColor], prefer_light: bool) -> AnsiPalette {
        match self {
            Strategy::Chromatic => chromatic::generate(colors, prefer_light),
            Strategy::SubtleBalanced => subtle::generate(colors, prefer_light),
            Strategy::Monochrome => monochrome::generate(colors, prefer_light),
            Strategy::Monochromatic => monochromatic::generate(colors, prefer_light),
            Strategy::Pastel => adjust::generate(Tone::Pastel, colors, prefer_light),
            Strategy::Colorful => adjust::generate(Tone::Colorful, colors, prefer_light),
            Strategy::Muted => adjust::generate(Tone::Muted, colors, prefer_light),
            Strategy::Bright => adjust::generate(Tone::Bright, colors, prefer_light),
            Strategy::Material => material::generate(colors, prefer_light),
            Strategy::Analogous => analogous::generate(colors, prefer_light),
        }
    }
}

/// Pick background and foreground from the lightness extremes.
///
/// Dark mode puts the darkest color at slot 0 and the lightest at slot 7,
/// light mode the reverse. Both are pushed past fixed lightness bounds so the
/// pair always reads in the requested direction, and desaturated so they
/// tint rather than dominate.
pub(crate) fn base_pair(colors: &[DominantColor], prefer_light: bool) -> (Color, Color) {
    let by_lightness = |a: &&DominantColor, b: &&DominantColor| {
        a.color.lightness().total_cmp(&b.color.lightness())
    };
    let darkest = colors
        .iter()
        .min_by(by_lightness)
        .map_or(HslColor::new(0.0, 0.0, 0.0), |dc| dc.color.to_hsl());
    let lightest = colors
        .iter()
        .max_by(by_lightness)
        .map_or(HslColor::new(0.0, 0.0, 100.0), |dc| dc.color.to_hsl());

    if prefer_light {
        let bg = HslColor::new(
            lightest.h,
            lightest.s.min(BG_MAX_SATURATION),
            lightest.l.max(LIGHT_BG_MIN_LIGHTNESS),
        );
        let fg = HslColor::new(
            darkest.h,
            darkest.s.min(FG_MAX_SATURATION),
            darkest.l.min(LIGHT_FG_MAX_LIGHTNESS),
        );
        (bg.to_color(), fg.to_color())
    } else {
        let bg = HslColor::new(
            darkest.h,
            darkest.s.min(BG_MAX_SATURATION),
            darkest.l.min(DARK_BG_MAX_LIGHTNESS),
        );
        let fg = HslColor::new(
            lightest.h,
            lightest.s.min(FG_MAX_SATURATION),
            lightest.l.max(DARK_FG_MIN_LIGHTNESS),
        );
        (bg.to_color(), fg.to_color())
    }
}

/// Assemble a palette from its base half and derive slots 8-15.
pub(crate) fn assemble(bg: Color, chromatic: [Color; 6], fg: Color) -> AnsiPalette {
    let mut slots = [bg; 16];
    slots[1..=6].copy_from_slice(&chromatic);
    slots[FOREGROUND] = fg;
    let mut palette = AnsiPalette::new(slots);
    palette.derive_all_bright();
    palette
}

/// The saturated color the single-hue strategies build from: the most
/// saturated dominant color that is neither near-black nor near-white,
/// falling back to the most saturated overall.
pub(crate) fn most_saturated(colors: &[DominantColor]) -> HslColor {
    let by_saturation = |a: &HslColor, b: &HslColor| a.s.total_cmp(&b.s);
    let hsl: Vec<HslColor> = colors.iter().map(|dc| dc.color.to_hsl()).collect();
    hsl.iter()
        .copied()
        .filter(|c| (15.0..=85.0).contains(&c.l))
        .max_by(by_saturation)
        .or_else(|| hsl.iter().copied().max_by(by_saturation))
        .unwrap_or(HslColor::new(0.0, 0.0, 50.0))
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn mode_parses_every_name() {
        for mode in Mode::ALL {
            assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!(" Pastel ".parse::<Mode>().unwrap(), Mode::Pastel);
    }

    #[test]
    fn mode_rejects_typos() {
        let err = "pastell".parse::<Mode>().unwrap_err();
        assert!(matches!(err, ExtractError::UnknownMode(ref m) if m == "pastell"));
    }

    #[test]
    fn explicit_modes_skip_classification() {
        let gray: Vec<_> = (0..10).map(|i| dc(0.0, 0.0, i as f32 * 10.0, 10)).collect();
        assert_eq!(Strategy::for_mode(Mode::Pastel, &gray), Strategy::Pastel);
        assert_eq!(Strategy::for_mode(Mode::Default, &gray), Strategy::Monochrome);
    }

    #[test]
    fn classification_picks_strategy() {
        let pick = |monochrome, low_diversity| {
            Strategy::from_classification(Classification {
                monochrome,
                low_diversity,
            })
        };
        assert_eq!(pick(true, true), Strategy::Monochrome);
        assert_eq!(pick(false, true), Strategy::SubtleBalanced);
        assert_eq!(pick(false, false), Strategy::Chromatic);
    }

    #[test]
    fn diverse_image_uses_chromatic() {
        assert_eq!(Strategy::for_mode(Mode::Default, &rainbow()), Strategy::Chromatic);
    }

    #[test]
    fn base_pair_orders_lightness_by_mode() {
        let colors = rainbow();
        let (bg, fg) = base_pair(&colors, false);
        assert!(bg.lightness() < fg.lightness());
        let (bg, fg) = base_pair(&colors, true);
        assert!(bg.lightness() > fg.lightness());
    }

    #[test]
    fn base_pair_separates_identical_colors() {
        let colors = vec![dc(0.0, 74.0, 45.0, 100); 8];
        let (bg, fg) = base_pair(&colors, false);
        assert!(bg.lightness() <= DARK_BG_MAX_LIGHTNESS + 1.0);
        assert!(fg.lightness() >= DARK_FG_MIN_LIGHTNESS - 1.0);
    }

    #[test]
    fn every_strategy_fills_all_slots_in_both_modes() {
        let colors = rainbow();
        let strategies = [
            Strategy::Chromatic,
            Strategy::SubtleBalanced,
            Strategy::Monochrome,
            Strategy::Monochromatic,
            Strategy::Pastel,
            Strategy::Colorful,
            Strategy::Muted,
            Strategy::Bright,
            Strategy::Material,
            Strategy::Analogous,
        ];
        for strategy in strategies {
            for prefer_light in [false, true] {
                let palette = strategy.generate(&colors, prefer_light);
                let (bg, fg) = (palette.background().lightness(), palette.foreground().lightness());
                if prefer_light {
                    assert!(bg >= fg, "{strategy:?} light: bg {bg} < fg {fg}");
                } else {
                    assert!(bg <= fg, "{strategy:?} dark: bg {bg} > fg {fg}");
                }
                assert_eq!(palette.to_hex_strings().len(), 16);
            }
        }
    }

    #[test]
    fn most_saturated_skips_extremes() {
        let colors = vec![
            dc(10.0, 100.0, 97.0, 10),
            dc(200.0, 60.0, 50.0, 10),
            dc(90.0, 20.0, 40.0, 10),
        ];
        let base = most_saturated(&colors);
        assert!((base.h - 200.0).abs() < 2.0, "got hue {}", base.h);
    }
}
