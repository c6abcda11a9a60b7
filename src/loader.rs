//! Image loading for icons and folder templates.

use image::RgbaImage;

use crate::config::Theme;
use crate::draw::svg;
use crate::error::{Error, Result};
use crate::form::IconSource;
use crate::resolution::Resolution;
use crate::storage::AssetStore;

/// Longer side, in pixels, that SVG icons are rasterized to.
///
/// Matches the largest output canvas so no resolution upsamples a vector icon.
pub const SVG_RASTER_SIZE: u32 = 1024;

/// Loads and decodes an icon from a built-in identifier or an upload.
///
/// Uploads declared as `image/svg+xml` are always rasterized as SVG. Anything
/// else is identified by its bytes.
pub async fn load_icon_image(source: IconSource<'_>, assets: &AssetStore) -> Result<RgbaImage> {
    match source {
        IconSource::BuiltIn(id) => {
            let path = assets.icon_path(id).await?;
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| Error::io(&path, e))?;
            decode_image(id, &bytes)
        }
        IconSource::Upload(file) if file.is_declared_svg() && !file.bytes.is_empty() => {
            svg::rasterize(file.display_name(), &file.bytes, SVG_RASTER_SIZE)
        }
        IconSource::Upload(file) => decode_image(file.display_name(), &file.bytes),
    }
}

/// Loads the folder template for a resolution and theme.
///
/// A missing or unreadable template is an [`Error::Io`].
pub async fn load_folder_image(
    assets: &AssetStore,
    resolution: Resolution,
    theme: Theme,
) -> Result<RgbaImage> {
    let path = assets.folder_path(resolution, theme);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| Error::io(&path, e))?;
    decode_image(&path.display().to_string(), &bytes)
}

/// Decodes raster or SVG bytes into an RGBA bitmap.
pub fn decode_image(name: &str, bytes: &[u8]) -> Result<RgbaImage> {
    if bytes.is_empty() {
        return Err(Error::decode(name, "no data"));
    }
    if svg::looks_like_svg(bytes) {
        return svg::rasterize(name, bytes, SVG_RASTER_SIZE);
    }
    image::load_from_memory(bytes)
        .map(|img| img.to_rgba8())
        .map_err(|e| Error::decode(name, e))
}
