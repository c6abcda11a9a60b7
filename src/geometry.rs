//! Pixel geometry shared by layout and drawing.

use image::RgbaImage;

/// A rectangle defined in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the canvas
    pub x: u32,
    /// Y offset from the top edge of the canvas
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RectPx {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn size(&self) -> SizePx {
        SizePx::new(self.width, self.height)
    }

    /// Returns true if the rectangle lies entirely inside a square canvas of `edge` pixels.
    pub fn fits_within(&self, edge: u32) -> bool {
        self.right() <= edge && self.bottom() <= edge
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn of(image: &RgbaImage) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Returns true if either side is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Finds the smallest rectangle containing every pixel with non-zero alpha.
///
/// Returns `None` for a fully transparent image.
pub fn content_bounds(image: &RgbaImage) -> Option<RectPx> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    if min_x == u32::MAX {
        return None;
    }

    Some(RectPx::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn rect_px_edges() {
        let rect = RectPx::new(10, 20, 100, 200);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 220);
        assert_eq!(rect.size(), SizePx::new(100, 200));
    }

    #[test]
    fn rect_fits_within_canvas() {
        assert!(RectPx::new(0, 0, 16, 16).fits_within(16));
        assert!(!RectPx::new(1, 0, 16, 16).fits_within(16));
        assert!(!RectPx::new(0, 10, 4, 7).fits_within(16));
    }

    #[test]
    fn size_px_emptiness() {
        assert!(SizePx::new(0, 5).is_empty());
        assert!(SizePx::new(5, 0).is_empty());
        assert!(!SizePx::new(1, 1).is_empty());
    }

    #[test]
    fn content_bounds_of_centered_dot() {
        let mut img = RgbaImage::new(10, 10);
        img.put_pixel(3, 4, Rgba([255, 0, 0, 255]));
        img.put_pixel(6, 5, Rgba([0, 0, 255, 10]));

        assert_eq!(content_bounds(&img), Some(RectPx::new(3, 4, 4, 2)));
    }

    #[test]
    fn content_bounds_of_transparent_image() {
        assert_eq!(content_bounds(&RgbaImage::new(8, 8)), None);
    }
}
