//! Icon and composite rendering.
//!
//! Two stages turn a decoded icon into one output file:
//!
//! 1. [`render_icon`] draws the icon, styled per [`RenderConfig`], onto a
//!    transparent canvas of exactly the laid-out size. The canvas is encoded to
//!    PNG and decoded again, so the next stage consumes a plain bitmap.
//! 2. [`render_composite`] draws the folder template as the full-canvas
//!    background, places the icon on top and encodes the result to PNG.

pub mod composite;
pub mod effects;
pub mod svg;

pub use composite::composite_over;

use std::borrow::Cow;
use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};

use crate::config::RenderConfig;
use crate::error::{Error, Result};
use crate::geometry::{RectPx, SizePx, content_bounds};
use crate::resolution::Resolution;

/// Largest canvas side accepted by the renderers.
pub const MAX_CANVAS_EDGE: u32 = 8192;

fn check_canvas(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_CANVAS_EDGE || height > MAX_CANVAS_EDGE {
        return Err(Error::Render(format!("invalid canvas size {width}x{height}")));
    }
    Ok(())
}

/// Resizes `image` to `width` x `height`, borrowing it when already that size.
fn fit(image: &RgbaImage, width: u32, height: u32) -> Cow<'_, RgbaImage> {
    if image.width() == width && image.height() == height {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(imageops::resize(image, width, height, FilterType::Lanczos3))
    }
}

/// Draws `icon` onto a transparent `width` x `height` canvas and returns the
/// re-decoded result.
///
/// The icon is stretched to the canvas, or to an inset area when a shadow is
/// configured, then tinted, filled and faded per `config`. A config that fails
/// [`RenderConfig::validate`] is rejected before any pixel is drawn.
pub fn render_icon(
    icon: &RgbaImage,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> Result<RgbaImage> {
    check_canvas(width, height)?;
    config.validate()?;
    if SizePx::of(icon).is_empty() {
        return Err(Error::Render("icon has no pixels".into()));
    }

    let canvas_size = SizePx::new(width, height);
    let mut canvas = RgbaImage::new(width, height);

    let shadow = config.active_shadow();
    let inset = shadow.map_or(0, |s| effects::shadow_inset(s, canvas_size));
    let draw_w = width - 2 * inset;
    let draw_h = height - 2 * inset;

    let mut drawn = fit(icon, draw_w, draw_h).into_owned();
    if let Some(degrees) = config.active_tint() {
        effects::rotate_hue(&mut drawn, degrees);
    }
    if let Some(rgb) = config.active_fill() {
        effects::fill_silhouette(&mut drawn, rgb);
    }
    let opacity = config.clamped_opacity();
    if opacity < 1.0 {
        effects::multiply_alpha(&mut drawn, opacity);
    }

    let (x, y) = (inset as i32, inset as i32);
    if let Some(settings) = shadow {
        let layer = effects::drop_shadow(&drawn, canvas_size, x, y, settings);
        composite_over(&mut canvas, &layer, 0, 0);
    }
    composite_over(&mut canvas, &drawn, x, y);

    let png = encode_png(&canvas)?;
    decode_png(&png)
}

/// Composites `icon` onto `folder` at `placement` and encodes the result.
///
/// The canvas is square with the resolution's edge length. A template of a
/// different size is scaled to fill it.
pub fn render_composite(
    folder: &RgbaImage,
    icon: &RgbaImage,
    placement: RectPx,
    resolution: Resolution,
) -> Result<Vec<u8>> {
    let edge = resolution.edge();
    check_canvas(edge, edge)?;
    check_canvas(placement.width, placement.height)?;
    if !placement.fits_within(edge) {
        return Err(Error::Render(format!(
            "placement {placement:?} exceeds {edge}x{edge} canvas"
        )));
    }
    if SizePx::of(folder).is_empty() {
        return Err(Error::Render("folder template has no pixels".into()));
    }

    let mut canvas = RgbaImage::new(edge, edge);
    composite_over(&mut canvas, &fit(folder, edge, edge), 0, 0);

    let icon = fit(icon, placement.width, placement.height);
    composite_over(&mut canvas, &icon, placement.x as i32, placement.y as i32);

    encode_png(&canvas)
}

/// Crops fully transparent margins. A fully transparent image is returned unchanged.
pub fn trim_transparent(image: RgbaImage) -> RgbaImage {
    match content_bounds(&image) {
        Some(bounds) if bounds.size() != SizePx::of(&image) => {
            imageops::crop_imm(&image, bounds.x, bounds.y, bounds.width, bounds.height).to_image()
        }
        _ => image,
    }
}

/// Encodes an image as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, ImageFormat::Png)
        .map_err(|e| Error::Render(format!("PNG encoding failed: {e}")))?;
    Ok(buffer.into_inner())
}

/// Decodes PNG bytes produced by [`encode_png`].
pub fn decode_png(bytes: &[u8]) -> Result<RgbaImage> {
    image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .map(|img| img.to_rgba8())
        .map_err(|e| Error::Render(format!("PNG decoding failed: {e}")))
}
