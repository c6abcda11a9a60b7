//! Folder art generation: one request in, one `.iconset` directory out.
//!
//! # Steps
//!
//! 1. **Extract** the `file` field from the form, or fail with [`Error::MissingFile`].
//!    A config that fails [`RenderConfig::validate`] is rejected first.
//! 2. **Decode** the icon. Nothing touches disk before this succeeds.
//! 3. **Allocate** `results/<id>` via [`OutputDir`].
//! 4. **Render** every [`Resolution`] in declaration order, one at a time:
//!    layout, icon, template, composite, write.
//! 5. **Finalize** by renaming to `results/<id>.iconset`.
//!
//! Any failure in steps 3-5 deletes the partial directory (see
//! [`StorageConfig::keep_partial`]) and propagates unchanged.

use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;

use crate::config::RenderConfig;
use crate::draw::{render_composite, render_icon, trim_transparent};
use crate::error::{Error, Result};
use crate::form::{FormData, IconSource};
use crate::geometry::SizePx;
use crate::layout::layout;
use crate::loader::{load_folder_image, load_icon_image};
use crate::resolution::Resolution;
use crate::storage::{AssetStore, OutputDir, SetId, StorageConfig};

/// Name of the form field carrying the icon.
pub const FILE_FIELD: &str = "file";

/// A completed folder art set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSet {
    pub id: SetId,
    /// The `<base_dir>/results/<id>.iconset` directory.
    pub path: PathBuf,
}

impl GeneratedSet {
    /// Path of the file written for `resolution`.
    pub fn file(&self, resolution: Resolution) -> PathBuf {
        self.path.join(resolution.file_name())
    }
}

/// Generates folder art sets against fixed storage locations.
#[derive(Debug, Clone)]
pub struct FolderArtGenerator {
    storage: StorageConfig,
    assets: AssetStore,
}

impl FolderArtGenerator {
    pub fn new(storage: StorageConfig) -> Self {
        let assets = AssetStore::new(&storage.assets_dir);
        Self { storage, assets }
    }

    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Runs the full pipeline for one request.
    pub async fn generate(&self, form: &FormData, config: &RenderConfig) -> Result<GeneratedSet> {
        config.validate()?;

        let source = form
            .get(FILE_FIELD)
            .and_then(IconSource::from_field)
            .ok_or(Error::MissingFile)?;

        let icon = load_icon_image(source, &self.assets).await?;
        let icon = if config.trim { trim_transparent(icon) } else { icon };

        let seed = match source {
            IconSource::BuiltIn(id) => id.as_bytes(),
            IconSource::Upload(file) => file.bytes.as_slice(),
        };
        let dir = OutputDir::create(&self.storage.results_dir(), seed, self.storage.keep_partial)
            .await?;

        tracing::info!(
            id = %dir.id(),
            source = source.display_name(),
            width = icon.width(),
            height = icon.height(),
            theme = %config.theme,
            "generating folder art"
        );

        match self.render_all(&dir, Arc::new(icon), config).await {
            Ok(()) => {
                let id = dir.id().clone();
                let path = dir.finalize().await?;
                tracing::info!(id = %id, path = %path.display(), "folder art complete");
                Ok(GeneratedSet { id, path })
            }
            Err(err) => {
                tracing::warn!(id = %dir.id(), error = %err, "folder art generation failed");
                dir.discard().await;
                Err(err)
            }
        }
    }

    async fn render_all(
        &self,
        dir: &OutputDir,
        icon: Arc<RgbaImage>,
        config: &RenderConfig,
    ) -> Result<()> {
        let config = Arc::new(config.clone());

        for resolution in Resolution::ALL {
            let placement = layout(SizePx::of(&icon), resolution);

            let drawn = {
                let icon = Arc::clone(&icon);
                let config = Arc::clone(&config);
                blocking(move || render_icon(&icon, placement.width, placement.height, &config))
                    .await?
            };

            let folder = load_folder_image(&self.assets, resolution, config.theme).await?;
            let png = blocking(move || render_composite(&folder, &drawn, placement, resolution))
                .await?;

            let path = dir.write(&resolution.file_name(), &png).await?;
            tracing::debug!(
                %resolution,
                x = placement.x,
                y = placement.y,
                width = placement.width,
                height = placement.height,
                bytes = png.len(),
                path = %path.display(),
                "wrote resolution"
            );
        }
        Ok(())
    }
}

/// Runs CPU-bound drawing off the async executor and waits for it.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Render(format!("render task failed: {e}")))?
}

/// Renders one resolution's PNG without touching the filesystem.
///
/// Same icon, template and config always give byte-identical output.
pub fn render_resolution(
    icon: &RgbaImage,
    folder: &RgbaImage,
    resolution: Resolution,
    config: &RenderConfig,
) -> Result<Vec<u8>> {
    let placement = layout(SizePx::of(icon), resolution);
    let drawn = render_icon(icon, placement.width, placement.height, config)?;
    render_composite(folder, &drawn, placement, resolution)
}

/// Generates a folder art set using storage locations from the environment.
///
/// See [`StorageConfig::from_env`].
pub async fn generate_folder_art(form: &FormData, config: &RenderConfig) -> Result<GeneratedSet> {
    FolderArtGenerator::new(StorageConfig::from_env())
        .generate(form, config)
        .await
}
