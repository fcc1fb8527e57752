use anyhow::{bail, Result};

use crate::color::Color;

pub const BACKGROUND: usize = 0;
pub const FOREGROUND: usize = 7;
pub const BRIGHT_BLACK: usize = 8;
pub const BRIGHT_WHITE: usize = 15;

/// Offset from a base ANSI slot to its bright counterpart.
pub const BRIGHT_OFFSET: usize = 8;

/// The six chromatic base slots, red through cyan.
pub const CHROMATIC_SLOTS: std::ops::RangeInclusive<usize> = 1..=6;

/// The 16 ANSI palette slots.
///
/// 0 is the background, 7 the foreground, 1-6 red/green/yellow/blue/magenta/cyan;
/// 8-15 are the bright counterparts of 0-7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsiPalette {
    pub slots: [Color; 16],
}

impl AnsiPalette {
    pub fn new(slots: [Color; 16]) -> Self {
        Self { slots }
    }

    pub fn background(&self) -> Color {
        self.slots[BACKGROUND]
    }

    pub fn foreground(&self) -> Color {
        self.slots[FOREGROUND]
    }

    /// Recompute `slot + 8` from `slot`.
    pub fn derive_bright(&mut self, slot: usize) {
        self.slots[slot + BRIGHT_OFFSET] = self.slots[slot].bright_variant();
    }

    /// Recompute every bright slot (8-15) from its base.
    pub fn derive_all_bright(&mut self) {
        for bright in BRIGHT_BLACK..=BRIGHT_WHITE {
            self.derive_bright(bright - BRIGHT_OFFSET);
        }
    }

    /// The palette as 16 uppercase `#RRGGBB` strings.
    pub fn to_hex_strings(&self) -> [String; 16] {
        self.slots.map(Color::to_hex)
    }

    /// Parse exactly 16 hex strings back into a palette.
    pub fn from_hex_strings<S: AsRef<str>>(hex: &[S]) -> Result<Self> {
        if hex.len() != 16 {
            bail!("palette must have 16 entries, got {}", hex.len());
        }
        let mut slots = [Color::new(0, 0, 0); 16];
        for (slot, value) in slots.iter_mut().zip(hex) {
            *slot = Color::from_hex(value.as_ref())?;
        }
        Ok(Self { slots })
    }
}

impl std::fmt::Display for AnsiPalette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for slot in &self.slots {
            writeln!(f, "{slot}")?;
        }
        Ok(())
    }
}
