use crate::pipeline::quantize::DominantColor;
use crate::theme::AnsiPalette;

use super::{assemble, base_pair, match_hues, TARGET_HUES};

/// The default strategy: image colors matched to ANSI hues as-is.
pub fn generate(colors: &[DominantColor], prefer_light: bool) -> AnsiPalette {
    let (bg, fg) = base_pair(colors, prefer_light);
    let chromatic = match_hues(colors, &TARGET_HUES);
    assemble(bg, chromatic, fg)
}
