mod prompt;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{error, info};

use tapedeck_core::{
    load_config_or_default, scrapper_for, validate_config, CrawlContext, InMemoryCatalog, UrlKind,
};

use prompt::{Chain, ChainMessage, StdioPrompter};

/// Download tracks, albums or whole discographies.
///
/// Anything not given as a flag is asked interactively.
#[derive(Parser)]
#[command(name = "tapedeck", version)]
struct Args {
    /// What the URL points at.
    #[arg(long, value_enum)]
    kind: Option<Kind>,

    /// Page to crawl, e.g. https://{band}.bandcamp.com/music
    #[arg(long)]
    url: Option<String>,

    /// Folder the files are saved under.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Configuration file; defaults are used when it does not exist.
    #[arg(long, env = "TAPEDECK_CONFIG", default_value = "config.toml")]
    config: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Kind {
    Track,
    Album,
    Discography,
}

impl From<Kind> for UrlKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Track => UrlKind::Track,
            Kind::Album => UrlKind::Album,
            Kind::Discography => UrlKind::Discography,
        }
    }
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;
    validate_config(&config).context("Configuration validation failed")?;

    let message = ChainMessage {
        kind: args.kind.map(UrlKind::from),
        raw_url: args.url,
        output: args.output,
        ..Default::default()
    };
    let message = Chain::standard(&config.site.domain).run(&mut StdioPrompter, message)?;

    let (Some(kind), Some(url), Some(output)) = (message.kind, message.url, message.output) else {
        return Err(anyhow!("Incomplete answers"));
    };

    std::fs::create_dir_all(&output)
        .with_context(|| format!("Failed to create output folder {:?}", output))?;
    let catalog = Arc::new(
        InMemoryCatalog::generate(&output).context("Failed to generate track catalog")?,
    );

    config.storage.base_folder = output;
    let ctx = CrawlContext::from_config(&config, catalog)
        .context("Failed to create crawl collaborators")?;
    let scrapper =
        scrapper_for(kind, ctx).ok_or_else(|| anyhow!("Cannot download a page of kind {}", kind))?;

    info!(url = %url, kind = %kind, output = ?config.storage.base_folder, "Starting download");
    scrapper.execute(url.url()).await?;
    info!("Download finished");

    Ok(())
}
