//! Per-pixel style effects applied to the icon before compositing.

use image::{Rgba, RgbaImage, imageops};
use palette::{Hsl, IntoColor, Srgb};

use crate::config::{MAX_SHADOW_BLUR, MAX_SHADOW_OFFSET, ShadowSettings};
use crate::geometry::SizePx;

/// Rotates the hue of every visible pixel by `degrees`.
pub fn rotate_hue(image: &mut RgbaImage, degrees: f32) {
    for pixel in image.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        if a == 0 {
            continue;
        }

        let rgb = Srgb::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
        let mut hsl: Hsl = rgb.into_color();
        hsl.hue += degrees;
        let rotated: Srgb = hsl.into_color();

        pixel.0 = [
            (rotated.red * 255.0).round() as u8,
            (rotated.green * 255.0).round() as u8,
            (rotated.blue * 255.0).round() as u8,
            a,
        ];
    }
}

/// Replaces the color of every visible pixel, keeping its alpha.
pub fn fill_silhouette(image: &mut RgbaImage, (r, g, b): (u8, u8, u8)) {
    for pixel in image.pixels_mut() {
        if pixel[3] != 0 {
            pixel.0 = [r, g, b, pixel[3]];
        }
    }
}

/// Scales every pixel's alpha by `factor` (0.0-1.0).
pub fn multiply_alpha(image: &mut RgbaImage, factor: f32) {
    for pixel in image.pixels_mut() {
        pixel[3] = (pixel[3] as f32 * factor).round() as u8;
    }
}

/// Blur sigma in pixels, capped at [`MAX_SHADOW_BLUR`] of the shorter side.
fn blur_sigma(settings: &ShadowSettings, canvas: SizePx) -> f32 {
    let fraction = if settings.blur.is_finite() {
        settings.blur.clamp(0.0, MAX_SHADOW_BLUR)
    } else {
        0.0
    };
    fraction * canvas.width.min(canvas.height) as f32
}

/// Vertical shadow offset in pixels, capped at [`MAX_SHADOW_OFFSET`] of the height.
fn offset_px(settings: &ShadowSettings, canvas: SizePx) -> i32 {
    let fraction = if settings.offset_y.is_finite() {
        settings.offset_y.clamp(-MAX_SHADOW_OFFSET, MAX_SHADOW_OFFSET)
    } else {
        0.0
    };
    (fraction * canvas.height as f32).round() as i32
}

/// Margin, in pixels, to keep free around the icon so its shadow is not clipped.
///
/// Never leaves less than a 1x1 drawing area.
pub fn shadow_inset(settings: &ShadowSettings, canvas: SizePx) -> u32 {
    let shorter = canvas.width.min(canvas.height);
    let sigma = blur_sigma(settings, canvas);
    let offset = offset_px(settings, canvas).unsigned_abs() as f32;
    let wanted = (sigma * 2.0 + offset).ceil() as u32;
    wanted.min(shorter.saturating_sub(1) / 2)
}

/// Builds a canvas-sized shadow layer for an icon drawn at (`x`, `y`).
///
/// The shadow is the icon's alpha mask in black, shifted down, scaled by the
/// configured opacity, then blurred. Blur and offset are capped at
/// [`MAX_SHADOW_BLUR`] and [`MAX_SHADOW_OFFSET`]; pixels shifted off the canvas
/// are dropped.
pub fn drop_shadow(
    icon: &RgbaImage,
    canvas: SizePx,
    x: i32,
    y: i32,
    settings: &ShadowSettings,
) -> RgbaImage {
    let mut mask = RgbaImage::new(canvas.width, canvas.height);
    let offset = offset_px(settings, canvas);
    let opacity = if settings.opacity.is_finite() {
        settings.opacity.clamp(0.0, 1.0)
    } else {
        0.0
    };

    for (sx, sy, pixel) in icon.enumerate_pixels() {
        let dx = i32::try_from(sx).ok().and_then(|sx| x.checked_add(sx));
        let dy = i32::try_from(sy)
            .ok()
            .and_then(|sy| y.checked_add(sy))
            .and_then(|dy| dy.checked_add(offset));
        let (Some(dx), Some(dy)) = (dx, dy) else {
            continue;
        };
        let (Ok(dx), Ok(dy)) = (u32::try_from(dx), u32::try_from(dy)) else {
            continue;
        };
        if dx >= canvas.width || dy >= canvas.height {
            continue;
        }
        let alpha = (pixel[3] as f32 * opacity).round() as u8;
        mask.put_pixel(dx, dy, Rgba([0, 0, 0, alpha]));
    }

    let sigma = blur_sigma(settings, canvas);
    if sigma > 0.0 {
        imageops::blur(&mask, sigma)
    } else {
        mask
    }
}
