// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! The energy of a pixel is the magnitude of the luminance gradient
//! at that pixel, as approximated by the pair of 3×3 Sobel kernels.
//! Neighbours that fall outside the image are replaced by the nearest
//! pixel on the border, so a flat image has zero energy everywhere,
//! edges included.

use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, Pixel, Rgb};
use itertools::iproduct;

/// BT.601 luma, `0.299R + 0.587G + 0.114B`, truncated toward zero.
///
/// The weights are exact in thousandths, so the integer form below is
/// the exact truncation of the real-valued sum.
#[inline]
pub fn luminance(p: &Rgb<u8>) -> u8 {
    let [r, g, b] = p.0;
    let sum = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    (sum / 1000) as u8
}

/// Reduce any 8-bit image to a field of luminance samples.
pub fn luma_map<I, P>(image: &I) -> TwoDimensionalMap<u8>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    let (width, height) = image.dimensions();
    TwoDimensionalMap::from_fn(width, height, |x, y| {
        luminance(&image.get_pixel(x, y).to_rgb())
    })
}

// Offsets and weights of the two kernels, as (dx, dy, weight).  The
// centre row of the horizontal kernel and the centre column of the
// vertical kernel are zero and left out.
const HORIZONTAL_KERNEL: [(i64, i64, i32); 6] = [
    (-1, -1, -1),
    (1, -1, 1),
    (-1, 0, -2),
    (1, 0, 2),
    (-1, 1, -1),
    (1, 1, 1),
];

const VERTICAL_KERNEL: [(i64, i64, i32); 6] = [
    (-1, -1, 1),
    (0, -1, 2),
    (1, -1, 1),
    (-1, 1, -1),
    (0, 1, -2),
    (1, 1, -1),
];

/// The horizontal and vertical Sobel responses at `(x, y)`.  The map
/// must not be empty.
pub fn sobel(luma: &TwoDimensionalMap<u8>, x: u32, y: u32) -> (i32, i32) {
    let (x, y) = (i64::from(x), i64::from(y));
    let respond = |kernel: &[(i64, i64, i32)]| -> i32 {
        kernel
            .iter()
            .map(|&(dx, dy, w)| w * i32::from(luma.clamped(x + dx, y + dy)))
            .sum()
    };
    (respond(&HORIZONTAL_KERNEL), respond(&VERTICAL_KERNEL))
}

/// Compute the energy of every cell of a luminance field.
pub fn luma_to_energy(luma: &TwoDimensionalMap<u8>) -> TwoDimensionalMap<f64> {
    let (width, height) = luma.dimensions();
    let mut energy = TwoDimensionalMap::new(width, height);
    for (y, x) in iproduct!(0..height, 0..width) {
        let (gx, gy) = sobel(luma, x, y);
        energy[(x, y)] = f64::from(gx * gx + gy * gy).sqrt();
    }
    energy
}

/// Compute the energy of every pixel in an image.  Pure: the same
/// pixels always give the same map.
pub fn calculate_energy<I, P>(image: &I) -> TwoDimensionalMap<f64>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    luma_to_energy(&luma_map(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, RgbImage};

    #[test]
    fn luminance_truncates() {
        assert_eq!(luminance(&Rgb([255, 0, 0])), 76);
        assert_eq!(luminance(&Rgb([0, 255, 0])), 149);
        assert_eq!(luminance(&Rgb([0, 0, 255])), 29);
        assert_eq!(luminance(&Rgb([10, 10, 10])), 10);
        assert_eq!(luminance(&Rgb([255, 255, 255])), 255);
    }

    #[test]
    fn vertical_edge_is_found() {
        // Three columns of luma 0, 0, 10 on every row.
        let buf: GrayImage =
            ImageBuffer::from_raw(3, 3, vec![0, 0, 10, 0, 0, 10, 0, 0, 10]).unwrap();
        let energy = calculate_energy(&buf);
        for y in 0..3 {
            assert_eq!(energy[(0, y)], 0.0);
            assert_eq!(energy[(1, y)], 40.0);
            assert_eq!(energy[(2, y)], 40.0);
        }
    }

    #[test]
    fn both_gradients_combine() {
        // A single bright pixel in the top left corner of a 2x2 image.
        let buf: GrayImage = ImageBuffer::from_raw(2, 2, vec![4, 0, 0, 0]).unwrap();
        let luma = luma_map(&buf);
        // Clamping folds the corner into three of the kernel taps.
        assert_eq!(sobel(&luma, 1, 1), (-4, 4));
        assert_eq!(sobel(&luma, 0, 0), (-12, 12));
        let energy = luma_to_energy(&luma);
        assert_eq!(energy[(1, 1)], 32f64.sqrt());
    }

    #[test]
    fn flat_images_have_no_energy() {
        let buf = RgbImage::from_pixel(5, 4, Rgb([12, 200, 77]));
        let energy = calculate_energy(&buf);
        assert!(energy.values().all(|&e| e == 0.0));
    }

    #[test]
    fn energy_is_never_negative_and_is_repeatable() {
        let buf: RgbImage = ImageBuffer::from_fn(7, 5, |x, y| {
            Rgb([(x * 37 + y * 11) as u8, (x * y * 13) as u8, (y * 53) as u8])
        });
        let first = calculate_energy(&buf);
        let second = calculate_energy(&buf);
        assert!(first.values().all(|&e| e >= 0.0));
        assert_eq!(first, second);
    }

    #[test]
    fn gray_and_rgb_agree() {
        let gray: GrayImage = ImageBuffer::from_fn(4, 4, |x, y| Luma([(x * 40 + y * 9) as u8]));
        let rgb: RgbImage = ImageBuffer::from_fn(4, 4, |x, y| {
            let v = gray.get_pixel(x, y)[0];
            Rgb([v, v, v])
        });
        assert_eq!(calculate_energy(&gray), calculate_energy(&rgb));
    }
}
