//! Command-line front end: renders one icon into a folder art `.iconset`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use folder_art::{FolderArtGenerator, FormData, RenderConfig, StorageConfig, Theme, UploadedFile};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "folder-art", version, about)]
struct Cli {
    /// Icon image file (PNG, JPEG, SVG, ...), or a built-in icon name with --builtin.
    icon: String,

    /// Treat ICON as a built-in icon identifier.
    #[arg(long)]
    builtin: bool,

    /// Folder template theme (overrides the config file).
    #[arg(long)]
    theme: Option<Theme>,

    /// JSON render configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base directory for `results/` (default: $FOLDER_ART_BASE_DIR or `.`).
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Asset directory (default: $FOLDER_ART_ASSETS_DIR or `assets`).
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Keep the partial output directory when generation fails.
    #[arg(long)]
    keep_partial: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut storage = StorageConfig::from_env();
    if let Some(dir) = cli.base_dir {
        storage.base_dir = dir;
    }
    if let Some(dir) = cli.assets_dir {
        storage.assets_dir = dir;
    }
    storage.keep_partial |= cli.keep_partial;

    let mut config = match &cli.config {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            RenderConfig::from_json(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => RenderConfig::default(),
    };
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }

    let form = if cli.builtin {
        FormData::new().text(folder_art::FILE_FIELD, cli.icon)
    } else {
        let bytes = tokio::fs::read(&cli.icon)
            .await
            .with_context(|| format!("reading {}", cli.icon))?;
        FormData::new().file(
            folder_art::FILE_FIELD,
            UploadedFile::new(bytes).with_file_name(cli.icon),
        )
    };

    let set = FolderArtGenerator::new(storage)
        .generate(&form, &config)
        .await
        .context("generating folder art")?;

    println!("{}", set.path.display());
    Ok(())
}
