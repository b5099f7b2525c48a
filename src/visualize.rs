// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pictures of the intermediate products: the luminance the energy is
//! computed from, the energy map itself, and seams drawn over it.

use crate::energy::luma_map;
use crate::seamselector::Seam;
use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, GrayImage, ImageBuffer, Luma, Pixel, Rgb, RgbImage};

/// The color seams are drawn in.
pub const SEAM_HIGHLIGHT: Rgb<u8> = Rgb([200, 100, 50]);

/// The luminance of every pixel, as a grayscale image.
pub fn grayscale_image<I, P>(image: &I) -> GrayImage
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    let luma = luma_map(image);
    ImageBuffer::from_fn(luma.width(), luma.height(), |x, y| Luma([luma[(x, y)]]))
}

/// Scale an energy map to 0..=255, the largest energy becoming 255.
/// A map with no energy at all is black.
pub fn energy_to_image(energy: &TwoDimensionalMap<f64>) -> GrayImage {
    let factor = energy.values().cloned().fold(0.0, f64::max);
    ImageBuffer::from_fn(energy.width(), energy.height(), |x, y| {
        if factor == 0.0 {
            return Luma([0]);
        }
        let scaled = (energy[(x, y)] / factor * 255.0).floor();
        Luma([num_traits::cast(scaled).unwrap_or(u8::MAX)])
    })
}

/// Draw seams over a grayscale picture in the highlight color.
pub fn draw_seams(base: &GrayImage, seams: &[Seam]) -> RgbImage {
    let mut out: RgbImage = ImageBuffer::from_fn(base.width(), base.height(), |x, y| {
        base.get_pixel(x, y).to_rgb()
    });
    for seam in seams {
        for (y, &x) in seam.columns.iter().enumerate() {
            if x < out.width() && (y as u32) < out.height() {
                out.put_pixel(x, y as u32, SEAM_HIGHLIGHT);
            }
        }
    }
    out
}
