//! SVG rasterization using resvg/usvg.
//!
//! Built-in icons may ship as SVG, and uploads may be SVG documents. Both are
//! rasterized once at load time so the rest of the pipeline only sees bitmaps.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{Error, Result};

/// Returns true if the bytes look like an SVG document rather than a raster image.
///
/// A UTF-8 byte order mark and leading whitespace are skipped. Documents may
/// open with `<svg`, an XML declaration, a doctype or a comment.
pub fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = head.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(head);
    let start = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(head.len());
    let head = &head[start..];
    head.starts_with(b"<svg")
        || head.starts_with(b"<?xml")
        || head.starts_with(b"<!--")
        || head
            .get(..9)
            .is_some_and(|doctype| doctype.eq_ignore_ascii_case(b"<!doctype"))
}

/// Rasterizes an SVG document so its longer side is `longest_side` pixels.
///
/// Aspect ratio is preserved. Fails with [`Error::Decode`] if the document
/// cannot be parsed.
pub fn rasterize(name: &str, data: &[u8], longest_side: u32) -> Result<RgbaImage> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let opts = Options::default();
    let tree = Tree::from_data(data, &opts).map_err(|e| Error::decode(name, e))?;

    let svg_size = tree.size();
    let scale = longest_side as f32 / svg_size.width().max(svg_size.height());
    let width = ((svg_size.width() * scale).ceil() as u32).max(1);
    let height = ((svg_size.height() * scale).ceil() as u32).max(1);

    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| Error::Render(format!("cannot allocate {width}x{height} pixmap")))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap (premultiplied) to a straight-alpha RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    img
}
