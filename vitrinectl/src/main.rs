use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_config::{ConfigLoad, ConfigLoader, ConfigWarnings, GalleryConfig};
use vitrine_core::{
    GalleryLayout, GalleryLoader, GalleryPage, LoadOutcome, PageShell,
    StatusNotice,
};
use vitrine_model::ImageVariant;

#[derive(Parser)]
#[command(name = "vitrinectl", about = "Vitrine gallery tool", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Clone)]
struct ConfigArgs {
    /// TOML file with [imagekit] and [gallery] tables
    #[arg(long)]
    config: Option<PathBuf>,
    /// .env file loaded before reading IMAGEKIT_* / GALLERY_* variables
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[derive(clap::Args, Clone)]
struct AlbumArgs {
    /// Override the gallery folder
    #[arg(long)]
    folder: Option<String>,
    /// Filter by tag (repeatable); replaces configured tags
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate configuration
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Fetch an album and print its images
    List {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        album: AlbumArgs,
        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch an album and print the rendered gallery markup
    Render {
        #[command(flatten)]
        config: ConfigArgs,
        #[command(flatten)]
        album: AlbumArgs,
        #[arg(long, value_enum, default_value = "grid")]
        layout: LayoutArg,
        /// Page heading
        #[arg(long)]
        title: Option<String>,
        /// Write HTML to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    Grid,
    Links,
}

impl From<LayoutArg> for GalleryLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Grid => GalleryLayout::Grid,
            LayoutArg::Links => GalleryLayout::Links,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check { config } => check(&config),
        Command::List {
            config,
            album,
            json,
        } => list(&config, &album, json).await,
        Command::Render {
            config,
            album,
            layout,
            title,
            out,
        } => render(&config, &album, layout.into(), title, out).await,
    }
}

fn load_config(args: &ConfigArgs) -> Result<ConfigLoad> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &args.env_file {
        loader = loader.with_env_file(path);
    }
    loader
        .load()
        .context("failed to load gallery configuration")
}

fn apply_album(config: &mut GalleryConfig, album: &AlbumArgs) {
    if let Some(folder) = &album.folder {
        config.folder = Some(folder.clone());
    }
    if !album.tags.is_empty() {
        config.tags = album.tags.clone();
    }
}

fn print_warnings(warnings: &ConfigWarnings) {
    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => println!("warning: {} ({hint})", warning.message),
            None => println!("warning: {}", warning.message),
        }
    }
}

fn check(args: &ConfigArgs) -> Result<()> {
    let ConfigLoad { config, metadata } = load_config(args)?;

    let warnings = match config.validate() {
        Ok(warnings) => warnings,
        Err(invalid) => bail!("{}", StatusNotice::from(invalid).message()),
    };
    print_warnings(&warnings);

    println!(
        "configuration OK: folder={} tags=[{}] endpoint={}",
        config.folder.as_deref().unwrap_or("-"),
        config.tags.join(","),
        config.endpoint,
    );
    if let Some(source) = metadata.api_key_source {
        println!("api key source: {source:?}");
    }
    Ok(())
}

async fn list(args: &ConfigArgs, album: &AlbumArgs, json: bool) -> Result<()> {
    let ConfigLoad { mut config, .. } = load_config(args)?;
    apply_album(&mut config, album);

    let loader = GalleryLoader::imagekit(config)
        .context("failed to build ImageKit client")?;
    let images = loader.fetch_images().await.context("failed to list album")?;

    if json {
        let body = serde_json::to_string_pretty(&images)
            .context("failed to encode album")?;
        println!("{body}");
    } else {
        let thumbnail = loader.config().transform(ImageVariant::Thumbnail);
        for image in &images {
            println!("{}\t{}", image.name, thumbnail.apply(&image.url));
        }
        info!(count = images.len(), "album listed");
    }
    Ok(())
}

async fn render(
    args: &ConfigArgs,
    album: &AlbumArgs,
    layout: GalleryLayout,
    title: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let ConfigLoad { mut config, .. } = load_config(args)?;
    apply_album(&mut config, album);

    let loader = GalleryLoader::imagekit(config)
        .context("failed to build ImageKit client")?;
    let mut shell = PageShell::new(layout);
    if let Some(title) = title {
        shell = shell.with_title(title);
    }
    let gallery = layout.build(loader.config());
    let mut page = GalleryPage::new(shell.build()).with_gallery(gallery);

    match page.load_gallery(&loader).await {
        LoadOutcome::Rendered { count } => info!(count, "gallery rendered"),
        LoadOutcome::Empty => warn!("album is empty"),
        LoadOutcome::Failed(err) => {
            warn!(error = %err, "album could not be fetched")
        }
        LoadOutcome::Blocked(invalid) => {
            warn!(reason = %invalid, "gallery blocked by configuration")
        }
    }

    let doc = page.document();
    let html = doc.outer_html(doc.body());
    match out {
        Some(path) => std::fs::write(&path, html)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{html}"),
    }
    Ok(())
}
