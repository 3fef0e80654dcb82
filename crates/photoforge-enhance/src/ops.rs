//! Pixel-level enhancement operations.
//!
//! Each operation takes an RGBA working buffer and a strength factor with
//! the usual semantics: 1.0 leaves the image unchanged, 0.0 degenerates to
//! the fully adjusted extreme (mean gray, fully smoothed, black, or
//! grayscale), and values above 1.0 amplify the effect. The alpha channel
//! is never touched.

use image::RgbaImage;

/// Rec.601 luma of a pixel's RGB channels.
fn luma(r: u8, g: u8, b: u8) -> f32 {
    0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
}

fn clamp_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Mean luma of the whole image, rounded to the nearest integer level.
fn mean_luma(img: &RgbaImage) -> f32 {
    let count = (img.width() as u64 * img.height() as u64).max(1);
    let sum: f64 = img
        .pixels()
        .map(|p| luma(p.0[0], p.0[1], p.0[2]) as f64)
        .sum();
    ((sum / count as f64) as f32).round()
}

/// Scale pixel spread around the per-image mean luma.
pub(crate) fn adjust_contrast(img: &mut RgbaImage, factor: f32) {
    let mean = mean_luma(img);
    for pixel in img.pixels_mut() {
        for c in 0..3 {
            let v = pixel.0[c] as f32;
            pixel.0[c] = clamp_channel(mean + (v - mean) * factor);
        }
    }
}

/// Blend each pixel against a 3x3 smoothed version of the image.
pub(crate) fn adjust_sharpness(img: &mut RgbaImage, factor: f32) {
    let smooth = smoothed(img);
    let width = img.width();
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        let s = smooth[(y * width + x) as usize];
        for c in 0..3 {
            let v = pixel.0[c] as f32;
            pixel.0[c] = clamp_channel(s[c] + (v - s[c]) * factor);
        }
    }
}

/// Linear pixel-value scaling.
pub(crate) fn adjust_brightness(img: &mut RgbaImage, factor: f32) {
    for pixel in img.pixels_mut() {
        for c in 0..3 {
            pixel.0[c] = clamp_channel(pixel.0[c] as f32 * factor);
        }
    }
}

/// Blend each pixel against its grayscale value.
pub(crate) fn adjust_color(img: &mut RgbaImage, factor: f32) {
    for pixel in img.pixels_mut() {
        let gray = luma(pixel.0[0], pixel.0[1], pixel.0[2]);
        for c in 0..3 {
            let v = pixel.0[c] as f32;
            pixel.0[c] = clamp_channel(gray + (v - gray) * factor);
        }
    }
}

/// 3x3 center-weighted smoothing (center 5, neighbors 1, sum 13), with
/// edge pixels replicated at the borders. Kept in floating point so the
/// sharpness blend does not round twice.
fn smoothed(img: &RgbaImage) -> Vec<[f32; 3]> {
    let (width, height) = img.dimensions();
    let mut out = Vec::with_capacity((width as usize) * (height as usize));
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 3];
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    let nx = (x as i64 + dx).clamp(0, width as i64 - 1) as u32;
                    let ny = (y as i64 + dy).clamp(0, height as i64 - 1) as u32;
                    let weight = if dx == 0 && dy == 0 { 5.0 } else { 1.0 };
                    let p = img.get_pixel(nx, ny);
                    for c in 0..3 {
                        acc[c] += p.0[c] as f32 * weight;
                    }
                }
            }
            out.push([acc[0] / 13.0, acc[1] / 13.0, acc[2] / 13.0]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn uniform(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(rgba))
    }

    fn checkerboard() -> RgbaImage {
        RgbaImage::from_fn(4, 4, |x, y| {
            if (x + y) % 2 == 0 {
                Rgba([100, 100, 100, 255])
            } else {
                Rgba([200, 200, 200, 255])
            }
        })
    }

    #[test]
    fn test_brightness_zero_blacks_rgb() {
        let mut img = uniform(2, 2, [200, 100, 50, 255]);
        adjust_brightness(&mut img, 0.0);
        for pixel in img.pixels() {
            assert_eq!(pixel.0, [0, 0, 0, 255]);
        }
    }

    #[test]
    fn test_brightness_identity() {
        let mut img = checkerboard();
        let before = img.clone();
        adjust_brightness(&mut img, 1.0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_brightness_clamps_at_white() {
        let mut img = uniform(1, 1, [250, 250, 250, 255]);
        adjust_brightness(&mut img, 2.0);
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_contrast_zero_flattens_to_mean() {
        // Half 100-gray, half 200-gray: mean luma is 150.
        let mut img = checkerboard();
        adjust_contrast(&mut img, 0.0);
        for pixel in img.pixels() {
            assert_eq!(pixel.0, [150, 150, 150, 255]);
        }
    }

    #[test]
    fn test_contrast_identity() {
        let mut img = checkerboard();
        let before = img.clone();
        adjust_contrast(&mut img, 1.0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_contrast_increases_spread() {
        let mut img = checkerboard();
        adjust_contrast(&mut img, 1.3);
        // Dark pixels get pushed further below the mean, bright ones above.
        assert_eq!(img.get_pixel(0, 0).0, [85, 85, 85, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [215, 215, 215, 255]);
    }

    #[test]
    fn test_color_zero_grayscale() {
        let mut img = uniform(2, 1, [255, 0, 0, 255]);
        adjust_color(&mut img, 0.0);
        let expected = (0.299f32 * 255.0).round() as u8;
        for pixel in img.pixels() {
            assert_eq!(pixel.0, [expected, expected, expected, 255]);
        }
    }

    #[test]
    fn test_color_identity() {
        let mut img = uniform(2, 2, [10, 200, 30, 255]);
        let before = img.clone();
        adjust_color(&mut img, 1.0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_sharpness_identity() {
        let mut img = checkerboard();
        let before = img.clone();
        adjust_sharpness(&mut img, 1.0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_sharpness_uniform_unchanged() {
        // A flat image has nothing to sharpen at any factor.
        let mut img = uniform(3, 3, [90, 120, 40, 255]);
        let before = img.clone();
        adjust_sharpness(&mut img, 1.5);
        assert_eq!(img, before);

        adjust_sharpness(&mut img, 0.0);
        assert_eq!(img, before);
    }

    #[test]
    fn test_sharpness_single_pixel() {
        let mut img = uniform(1, 1, [7, 8, 9, 255]);
        let before = img.clone();
        adjust_sharpness(&mut img, 1.5);
        assert_eq!(img, before);
    }

    #[test]
    fn test_alpha_preserved() {
        let mut img = uniform(2, 2, [100, 150, 200, 42]);
        adjust_contrast(&mut img, 1.3);
        adjust_sharpness(&mut img, 1.5);
        adjust_brightness(&mut img, 1.1);
        adjust_color(&mut img, 1.2);
        for pixel in img.pixels() {
            assert_eq!(pixel.0[3], 42);
        }
    }
}
