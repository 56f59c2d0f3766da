use anyhow::Context;
use clap::{Parser, Subcommand};
use wxrss_core::{Config, Extractor, FeedSource, FeedStatus, config::DEFAULT_FEED_URL};

use crate::report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wxrss", version, about = "Weather feed reader")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the weather forecast for a location.
    Show {
        /// Location identifier used in the feed URL, e.g. a GeoNames id.
        location: String,

        /// Read the feed from the on-disk cache instead of fetching.
        #[arg(long)]
        cached: bool,

        /// Do not write a freshly fetched feed back to the cache.
        #[arg(long)]
        no_save: bool,

        /// Print the extracted records as JSON instead of a report.
        #[arg(long)]
        json: bool,
    },

    /// Configure the feed URL template and cache directory.
    Configure,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show {
                location,
                cached,
                no_save,
                json,
            } => show(&location, cached, no_save, json),
            Command::Configure => configure(),
        }
    }
}

fn show(location: &str, cached: bool, no_save: bool, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut source = FeedSource::new();

    if cached {
        let path = config.cache_file(location)?;
        source
            .load_from_cache(&path)
            .with_context(|| format!("Failed to read cached feed: {}", path.display()))?;
    } else {
        let url = config.feed_url_for(location);
        source
            .fetch(&url)
            .with_context(|| format!("Failed to fetch feed from {url}"))?;

        if !no_save {
            let path = config.cache_file(location)?;
            if let Some(content) = source.raw_content() {
                source
                    .save_to_cache(&path, content)
                    .with_context(|| format!("Failed to write cache file: {}", path.display()))?;
            }
        }
    }

    let extractor = Extractor::new();
    let (records, status) = extractor.extract(source.raw_content());
    source.set_status(status);

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", report::render(location, &records, status));
    }

    if status == FeedStatus::ParseError {
        anyhow::bail!("Feed for '{location}' could not be parsed - invalid location?");
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let feed_url = inquire::Text::new("Feed URL template ({location} is the placeholder):")
        .with_default(config.feed_url.as_deref().unwrap_or(DEFAULT_FEED_URL))
        .prompt()?;
    config.feed_url = Some(feed_url);

    let current_cache = config
        .cache_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let cache_dir = inquire::Text::new("Cache directory (empty for the platform default):")
        .with_default(&current_cache)
        .prompt()?;
    config.cache_dir = if cache_dir.trim().is_empty() {
        None
    } else {
        Some(cache_dir.into())
    };

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}
