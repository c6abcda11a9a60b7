//! Icon placement on the folder's front face.
//!
//! Layout is a pure function of the icon's natural size and the target
//! [`Resolution`]. The icon is fitted, aspect preserved, into an icon area
//! whose proportions depend on the canvas edge. Small canvases get a larger
//! area so the icon stays legible.

use crate::geometry::{RectPx, SizePx};
use crate::resolution::Resolution;

/// Icon area proportions, as fractions of the canvas edge.
#[derive(Debug, Clone, Copy, PartialEq)]
struct IconArea {
    width: f32,
    height: f32,
    center_y: f32,
}

impl IconArea {
    const REGULAR: Self = Self {
        width: 0.50,
        height: 0.36,
        center_y: 0.58,
    };

    const SMALL: Self = Self {
        width: 0.625,
        height: 0.44,
        center_y: 0.58,
    };

    fn for_resolution(resolution: Resolution) -> Self {
        if resolution.edge() <= 32 {
            Self::SMALL
        } else {
            Self::REGULAR
        }
    }

    /// Maximum icon size in whole pixels, never below 1x1.
    fn max_size(&self, edge: u32) -> (f32, f32) {
        let edge = edge as f32;
        (
            (edge * self.width).floor().max(1.0),
            (edge * self.height).floor().max(1.0),
        )
    }
}

/// Computes the drawn icon size for a resolution.
///
/// Zero natural dimensions are treated as 1 pixel.
pub fn icon_dimensions(natural: SizePx, resolution: Resolution) -> SizePx {
    let (max_w, max_h) = IconArea::for_resolution(resolution).max_size(resolution.edge());
    let w = natural.width.max(1) as f32;
    let h = natural.height.max(1) as f32;

    let scale = (max_w / w).min(max_h / h);
    SizePx::new(
        (w * scale).round().clamp(1.0, max_w) as u32,
        (h * scale).round().clamp(1.0, max_h) as u32,
    )
}

/// Computes the top-left corner for an icon of `size` at a resolution.
pub fn icon_position(size: SizePx, resolution: Resolution) -> (u32, u32) {
    let edge = resolution.edge();
    let area = IconArea::for_resolution(resolution);

    let x = edge.saturating_sub(size.width) / 2;
    let center_y = edge as f32 * area.center_y;
    let y = (center_y - size.height as f32 / 2.0).round().max(0.0) as u32;

    (x, y.min(edge.saturating_sub(size.height)))
}

/// Computes the full placement rectangle for an icon at a resolution.
pub fn layout(natural: SizePx, resolution: Resolution) -> RectPx {
    let size = icon_dimensions(natural, resolution);
    let (x, y) = icon_position(size, resolution);
    RectPx::new(x, y, size.width, size.height)
}
