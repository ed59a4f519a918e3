//! Page image normalization for OCR.
//!
//! Grayscale conversion followed by adaptive mean thresholding, which copes
//! with the uneven lighting and shadows typical of photographed bills.

use image::{DynamicImage, GrayImage, Luma};

/// Side length of the local averaging window, in pixels. Must be odd.
const WINDOW_SIZE: u32 = 11;

/// Constant subtracted from the local mean before comparison.
const MEAN_OFFSET: f64 = 2.0;

/// Normalize a raw page image into a binarized grayscale page.
pub fn normalize(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    adaptive_threshold(&gray, WINDOW_SIZE, MEAN_OFFSET)
}

/// Binarize against the local window mean: a pixel survives as white when
/// it exceeds the mean of its neighborhood minus `offset`.
fn adaptive_threshold(gray: &GrayImage, window: u32, offset: f64) -> GrayImage {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return gray.clone();
    }

    let integral = integral_image(gray);
    let radius = i64::from(window / 2);
    let w = width as i64;
    let h = height as i64;

    let mut out = GrayImage::new(width, height);
    for y in 0..h {
        for x in 0..w {
            let x0 = (x - radius).max(0);
            let y0 = (y - radius).max(0);
            let x1 = (x + radius).min(w - 1);
            let y1 = (y + radius).min(h - 1);

            let area = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
            let sum = window_sum(&integral, width as usize, x0, y0, x1, y1) as f64;
            let mean = sum / area;

            let pixel = f64::from(gray.get_pixel(x as u32, y as u32)[0]);
            let value = if pixel > mean - offset { 255 } else { 0 };
            out.put_pixel(x as u32, y as u32, Luma([value]));
        }
    }
    out
}

/// Summed-area table with one extra row/column of zeros, row-major.
fn integral_image(gray: &GrayImage) -> Vec<u64> {
    let (width, height) = gray.dimensions();
    let stride = width as usize + 1;
    let mut integral = vec![0u64; stride * (height as usize + 1)];

    for y in 0..height as usize {
        let mut row_sum = 0u64;
        for x in 0..width as usize {
            row_sum += u64::from(gray.get_pixel(x as u32, y as u32)[0]);
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
        }
    }
    integral
}

fn window_sum(integral: &[u64], width: usize, x0: i64, y0: i64, x1: i64, y1: i64) -> u64 {
    let stride = width + 1;
    let (x0, y0, x1, y1) = (x0 as usize, y0 as usize, x1 as usize + 1, y1 as usize + 1);
    integral[y1 * stride + x1] + integral[y0 * stride + x0]
        - integral[y0 * stride + x1]
        - integral[y1 * stride + x0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_produces_binary_output() {
        let mut img = GrayImage::new(32, 32);
        for y in 0..32 {
            for x in 0..32 {
                let value = if x < 16 { 40 } else { 220 };
                img.put_pixel(x, y, Luma([value]));
            }
        }

        let out = normalize(&DynamicImage::ImageLuma8(img));
        assert!(out.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn test_uniform_region_stays_white() {
        // Inside a flat region the pixel equals the local mean, so it sits
        // above mean - offset and binarizes to white.
        let img = GrayImage::from_pixel(16, 16, Luma([128]));
        let out = normalize(&DynamicImage::ImageLuma8(img));
        assert!(out.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_dark_text_on_light_background_goes_black() {
        let mut img = GrayImage::from_pixel(32, 32, Luma([230]));
        for x in 10..22 {
            img.put_pixel(x, 16, Luma([20]));
        }

        let out = normalize(&DynamicImage::ImageLuma8(img));
        assert_eq!(out.get_pixel(16, 16)[0], 0);
        assert_eq!(out.get_pixel(2, 2)[0], 255);
    }
}
