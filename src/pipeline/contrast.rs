//! Brightness normalization between the background and the other slots.
//!
//! Only lightness changes; slot 0 and every hue are left alone.

use crate::theme::{AnsiPalette, BACKGROUND, BRIGHT_OFFSET, CHROMATIC_SLOTS, FOREGROUND};

/// Backgrounds darker than this get a lightness floor on slots 1-7.
pub const VERY_DARK_BACKGROUND: f32 = 20.0;
/// Backgrounds lighter than this get a lightness ceiling on slots 1-7.
pub const VERY_LIGHT_BACKGROUND: f32 = 80.0;

const LIGHTNESS_FLOOR: f32 = 55.0;
const LIGHTNESS_CEILING: f32 = 45.0;
const ABSOLUTE_MINIMUM: f32 = 25.0;
const SLOT_STAGGER: f32 = 3.0;
const OUTLIER_THRESHOLD: f32 = 25.0;
const OUTLIER_PULL: f32 = 10.0;
const BRIGHT_THEME_MEAN: f32 = 50.0;
const MAX_OUTLIER_PASSES: usize = 32;

/// Background classes the normalizer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    VeryDark,
    VeryLight,
    Normal,
}

impl Backdrop {
    pub fn of(palette: &AnsiPalette) -> Self {
        let l = palette.slots[BACKGROUND].lightness();
        if l < VERY_DARK_BACKGROUND {
            Backdrop::VeryDark
        } else if l > VERY_LIGHT_BACKGROUND {
            Backdrop::VeryLight
        } else {
            Backdrop::Normal
        }
    }
}

/// Correct slot lightness so text stays readable against the background.
/// Applying it twice gives the same palette as applying it once.
pub fn normalize_brightness(palette: &AnsiPalette) -> AnsiPalette {
    let mut palette = *palette;
    match Backdrop::of(&palette) {
        Backdrop::VeryDark => raise_to_floor(&mut palette),
        Backdrop::VeryLight => lower_to_ceiling(&mut palette),
        Backdrop::Normal => {
            // Each pull moves the mean too; repeat until nothing moves so the
            // result is a fixed point.
            for _ in 0..MAX_OUTLIER_PASSES {
                if !pull_outliers(&mut palette) {
                    break;
                }
            }
        }
    }
    palette
}

/// Slots 1-7, the ones the normalizer may touch.
fn corrected_slots() -> impl Iterator<Item = usize> {
    CHROMATIC_SLOTS.chain(std::iter::once(FOREGROUND))
}

fn set_lightness(palette: &mut AnsiPalette, slot: usize, lightness: f32) {
    palette.slots[slot] = palette.slots[slot].with_lightness(lightness);
    if CHROMATIC_SLOTS.contains(&slot) {
        palette.slots[slot + BRIGHT_OFFSET] = palette.slots[slot].bright_variant();
    }
}

fn raise_to_floor(palette: &mut AnsiPalette) {
    for slot in corrected_slots() {
        if palette.slots[slot].lightness() < LIGHTNESS_FLOOR {
            set_lightness(palette, slot, LIGHTNESS_FLOOR + slot as f32 * SLOT_STAGGER);
        }
    }
}

fn lower_to_ceiling(palette: &mut AnsiPalette) {
    for slot in corrected_slots() {
        if palette.slots[slot].lightness() > LIGHTNESS_CEILING {
            let target = (LIGHTNESS_CEILING - slot as f32 * SLOT_STAGGER).max(ABSOLUTE_MINIMUM);
            set_lightness(palette, slot, target);
        }
    }
}

/// One outlier pass. Returns whether any slot changed.
fn pull_outliers(palette: &mut AnsiPalette) -> bool {
    let lightness: Vec<(usize, f32)> = corrected_slots()
        .map(|slot| (slot, palette.slots[slot].lightness()))
        .collect();
    let mean = lightness.iter().map(|(_, l)| l).sum::<f32>() / lightness.len() as f32;
    let bright_theme = mean > BRIGHT_THEME_MEAN;

    let mut changed = false;
    for (slot, l) in lightness {
        let target = if bright_theme && l < mean - OUTLIER_THRESHOLD {
            l + OUTLIER_PULL
        } else if !bright_theme && l > mean + OUTLIER_THRESHOLD {
            l - OUTLIER_PULL
        } else {
            continue;
        };
        let before = palette.slots[slot];
        set_lightness(palette, slot, target);
        changed |= palette.slots[slot] != before;
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{hue_distance, Color, HslColor};

    fn palette_with(bg_lightness: f32, lightness: [f32; 7]) -> AnsiPalette {
        let mut slots = [Color::new(0, 0, 0); 16];
        slots[BACKGROUND] = HslColor::new(220.0, 20.0, bg_lightness).to_color();
        for (i, l) in lightness.iter().enumerate() {
            slots[i + 1] = HslColor::new(i as f32 * 50.0, 60.0, *l).to_color();
        }
        let mut palette = AnsiPalette::new(slots);
        palette.derive_all_bright();
        palette
    }

    #[test]
    fn backdrop_classification() {
        assert_eq!(Backdrop::of(&palette_with(10.0, [50.0; 7])), Backdrop::VeryDark);
        assert_eq!(Backdrop::of(&palette_with(90.0, [50.0; 7])), Backdrop::VeryLight);
        assert_eq!(Backdrop::of(&palette_with(50.0, [50.0; 7])), Backdrop::Normal);
    }

    #[test]
    fn dark_background_raises_dim_slots() {
        let palette = palette_with(8.0, [30.0, 70.0, 40.0, 20.0, 60.0, 50.0, 90.0]);
        let fixed = normalize_brightness(&palette);
        for slot in 1..=7 {
            assert!(
                fixed.slots[slot].lightness() >= LIGHTNESS_FLOOR - 0.5,
                "slot {slot} lightness {} below floor",
                fixed.slots[slot].lightness()
            );
        }
        // Staggered: slot 1 -> 58, slot 4 -> 67.
        assert!((fixed.slots[1].lightness() - 58.0).abs() < 1.0);
        assert!((fixed.slots[4].lightness() - 67.0).abs() < 1.0);
        // Already-bright slots are untouched.
        assert_eq!(fixed.slots[2], palette.slots[2]);
        // Bright derivatives follow their corrected base.
        assert_eq!(fixed.slots[9], fixed.slots[1].bright_variant());
    }

    #[test]
    fn light_background_lowers_bright_slots() {
        let palette = palette_with(95.0, [60.0, 30.0, 80.0, 40.0, 70.0, 50.0, 20.0]);
        let fixed = normalize_brightness(&palette);
        for slot in 1..=7 {
            assert!(
                fixed.slots[slot].lightness() <= LIGHTNESS_CEILING + 0.5,
                "slot {slot} lightness {} above ceiling",
                fixed.slots[slot].lightness()
            );
        }
        assert!((fixed.slots[1].lightness() - 42.0).abs() < 1.0);
        assert!((fixed.slots[6].lightness() - 27.0).abs() < 1.0);
        assert_eq!(fixed.slots[2], palette.slots[2]);
    }

    #[test]
    fn ceiling_never_goes_below_absolute_minimum() {
        let palette = palette_with(95.0, [60.0; 7]);
        let fixed = normalize_brightness(&palette);
        assert!((fixed.slots[7].lightness() - ABSOLUTE_MINIMUM).abs() < 1.0);
    }

    #[test]
    fn normal_background_pulls_outliers_toward_mean() {
        // Dark theme (mean < 50) with one glaring slot.
        let palette = palette_with(40.0, [30.0, 32.0, 34.0, 28.0, 30.0, 90.0, 35.0]);
        let fixed = normalize_brightness(&palette);
        let l = fixed.slots[6].lightness();
        assert!(l < 90.0 - 9.0, "outlier should be pulled down, got {l}");
        assert_eq!(fixed.slots[1], palette.slots[1]);
        assert_eq!(fixed.slots[14], fixed.slots[6].bright_variant());
    }

    #[test]
    fn bright_theme_lifts_dark_outliers() {
        let palette = palette_with(50.0, [70.0, 72.0, 68.0, 15.0, 75.0, 70.0, 80.0]);
        let fixed = normalize_brightness(&palette);
        assert!(fixed.slots[4].lightness() > 15.0 + 9.0);
    }

    #[test]
    fn background_and_hues_are_preserved() {
        let palette = palette_with(8.0, [30.0, 20.0, 40.0, 10.0, 25.0, 35.0, 15.0]);
        let fixed = normalize_brightness(&palette);
        assert_eq!(fixed.background(), palette.background());
        for slot in 1..=6 {
            let (a, b) = (palette.slots[slot].hue(), fixed.slots[slot].hue());
            assert!(hue_distance(a, b) < 3.0, "slot {slot}: hue {a} -> {b}");
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        let cases = [
            palette_with(8.0, [30.0, 70.0, 40.0, 20.0, 60.0, 50.0, 90.0]),
            palette_with(95.0, [60.0, 30.0, 80.0, 40.0, 70.0, 50.0, 20.0]),
            palette_with(40.0, [30.0, 32.0, 34.0, 28.0, 30.0, 90.0, 35.0]),
            palette_with(60.0, [70.0, 72.0, 68.0, 5.0, 75.0, 10.0, 80.0]),
        ];
        for palette in cases {
            let once = normalize_brightness(&palette);
            let twice = normalize_brightness(&once);
            assert_eq!(once, twice);
        }
    }
}
