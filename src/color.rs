use anyhow::{bail, Result};
use palette::{FromColor, Hsl, Srgb};

/// Lightness added when deriving a bright ANSI variant from its base slot.
pub const BRIGHT_LIGHTNESS_BOOST: f32 = 18.0;
/// Saturation multiplier applied when deriving a bright ANSI variant.
pub const BRIGHT_SATURATION_SCALE: f32 = 1.1;

/// Core color type used throughout the pipeline.
/// Wraps sRGB u8 components and provides conversions to HSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue/saturation/lightness on the conventional scales: hue in degrees
/// `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HslColor {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl HslColor {
    /// Build an HSL value, wrapping the hue and clamping saturation/lightness.
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self {
            h: h.rem_euclid(360.0),
            s: s.clamp(0.0, 100.0),
            l: l.clamp(0.0, 100.0),
        }
    }

    pub fn to_color(self) -> Color {
        Color::from_hsl(self)
    }
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            bail!(
                "invalid hex color: expected 6 hex digits, got {}",
                hex.len()
            );
        }
        if !hex.is_ascii() {
            bail!("invalid hex color: non-ASCII characters in '{hex}'");
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self { r, g, b })
    }

    /// Serialize to uppercase hex `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Convert to HSL (degrees / percent).
    pub fn to_hsl(self) -> HslColor {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        let hsl: Hsl = Hsl::from_color(srgb_f32);
        HslColor::new(
            hsl.hue.into_positive_degrees(),
            hsl.saturation * 100.0,
            hsl.lightness * 100.0,
        )
    }

    /// Create from HSL (degrees / percent).
    pub fn from_hsl(hsl: HslColor) -> Self {
        let hsl = HslColor::new(hsl.h, hsl.s, hsl.l);
        let space: Hsl = Hsl::new(hsl.h, hsl.s / 100.0, hsl.l / 100.0);
        let srgb_f32: Srgb<f32> = Srgb::from_color(space);
        Self::from_srgb_f32_clamped(srgb_f32)
    }

    /// Clamp an Srgb<f32> to [0, 1] and convert to Color.
    fn from_srgb_f32_clamped(srgb: Srgb<f32>) -> Self {
        let r = (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b }
    }

    pub fn hue(self) -> f32 {
        self.to_hsl().h
    }

    pub fn saturation(self) -> f32 {
        self.to_hsl().s
    }

    pub fn lightness(self) -> f32 {
        self.to_hsl().l
    }

    /// Replace HSL lightness, keeping hue and saturation.
    pub fn with_lightness(self, lightness: f32) -> Color {
        let hsl = self.to_hsl();
        HslColor::new(hsl.h, hsl.s, lightness).to_color()
    }

    /// The bright ANSI counterpart: same hue, lightness raised by
    /// [`BRIGHT_LIGHTNESS_BOOST`], saturation scaled by
    /// [`BRIGHT_SATURATION_SCALE`], both clamped to 100.
    pub fn bright_variant(self) -> Color {
        let hsl = self.to_hsl();
        HslColor::new(
            hsl.h,
            (hsl.s * BRIGHT_SATURATION_SCALE).min(100.0),
            (hsl.l + BRIGHT_LIGHTNESS_BOOST).min(100.0),
        )
        .to_color()
    }
}

/// Circular distance between two hues in degrees, in `[0, 180]`.
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
