//! Extract a 16-color ANSI terminal palette from an image.
//!
//! ```no_run
//! use std::path::Path;
//! use hueprint::{DiskCache, ExtractionCache, Extractor, ExtractorConfig, Mode};
//!
//! let cache = ExtractionCache::new(DiskCache::new("/tmp/hueprint"));
//! let extractor = Extractor::new(ExtractorConfig::default(), cache);
//! let palette = extractor.extract(Path::new("wall.png"), false, Mode::Default)?;
//! println!("{palette}");
//! # Ok::<(), hueprint::ExtractError>(())
//! ```

pub mod cache;
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod extractor;
pub mod pipeline;
pub mod theme;

pub use cache::{CacheStore, DiskCache, ExtractionCache, MemoryCache};
pub use color::{Color, HslColor};
pub use config::ExtractorConfig;
pub use error::{CacheError, ExtractError};
pub use extractor::Extractor;
pub use pipeline::assign::{Mode, Strategy};
pub use theme::AnsiPalette;
