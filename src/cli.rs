use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::assign::Mode;

/// Extract a 16-color ANSI terminal palette from an image.
#[derive(Parser, Debug)]
#[command(name = "hueprint", version, about)]
pub struct Args {
    /// Path to the input image
    pub image: PathBuf,

    /// Generate a light theme (light background, dark foreground)
    #[arg(short, long)]
    pub light: bool,

    /// Palette generation mode
    #[arg(short, long, value_enum, default_value_t = Mode::Default)]
    pub mode: Mode,

    /// Number of median-cut colors to extract (8-256)
    #[arg(
        short = 'k',
        long = "colors",
        default_value_t = 16,
        value_parser = clap::value_parser!(u16).range(8..=256)
    )]
    pub colors: u16,

    /// Cache directory (defaults to the platform cache directory)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Skip the palette cache entirely
    #[arg(long, conflicts_with = "cache_dir")]
    pub no_cache: bool,

    /// Remove all cached palettes before extracting
    #[arg(long, conflicts_with = "no_cache")]
    pub clear_cache: bool,

    /// Print the palette as a JSON array instead of one color per line
    #[arg(long)]
    pub json: bool,
}
