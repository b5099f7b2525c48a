// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Reading and writing rasters.  The format is chosen by file
//! extension; JPEG is always written at the best quality the encoder
//! offers.

use crate::error::SeamError;
use image::codecs::jpeg::JpegEncoder;
use image::{ImageBuffer, ImageFormat, PixelWithColorType, RgbImage};
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const MAXIMUM_JPEG_QUALITY: u8 = 100;

/// Read any raster the image crate can decode, as 8-bit RGB.
pub fn load_image<Q: AsRef<Path>>(path: Q) -> Result<RgbImage, SeamError> {
    let image = image::open(path.as_ref())?.to_rgb8();
    debug!(
        "loaded {} ({}x{})",
        path.as_ref().display(),
        image.width(),
        image.height()
    );
    Ok(image)
}

/// Write an 8-bit image in the format named by the file extension.
pub fn save_image<P, Q>(image: &ImageBuffer<P, Vec<u8>>, path: Q) -> Result<(), SeamError>
where
    P: PixelWithColorType<Subpixel = u8> + 'static,
    Q: AsRef<Path>,
{
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    if format == ImageFormat::Jpeg {
        let mut writer = BufWriter::new(File::create(path)?);
        JpegEncoder::new_with_quality(&mut writer, MAXIMUM_JPEG_QUALITY).encode(
            image.as_raw(),
            image.width(),
            image.height(),
            P::COLOR_TYPE,
        )?;
        writer.flush()?;
    } else {
        image.save_with_format(path, format)?;
    }
    debug!("wrote {}", path.display());
    Ok(())
}
