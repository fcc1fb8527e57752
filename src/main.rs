use anyhow::{Context, Result};
use clap::Parser;

use hueprint::cache::default_cache_dir;
use hueprint::cli::Args;
use hueprint::{DiskCache, ExtractionCache, Extractor, ExtractorConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hueprint=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let config = ExtractorConfig {
        color_count: usize::from(args.colors),
        ..ExtractorConfig::default()
    };

    let extractor = if args.no_cache {
        Extractor::without_cache(config)
    } else {
        let dir = args
            .cache_dir
            .clone()
            .or_else(default_cache_dir)
            .context("could not determine a cache directory; pass --cache-dir or --no-cache")?;
        let store = DiskCache::new(dir);
        tracing::debug!(dir = %store.dir().display(), "using palette cache");
        Extractor::new(config, ExtractionCache::new(store))
    };

    if args.clear_cache {
        extractor.clear_cache();
        tracing::info!("cleared palette cache");
    }

    let palette = extractor
        .extract(&args.image, args.light, args.mode)
        .with_context(|| format!("failed to extract palette from {}", args.image.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&palette.to_hex_strings())?);
    } else {
        print!("{palette}");
    }

    Ok(())
}
