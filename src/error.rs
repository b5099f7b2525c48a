// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while carving.

use failure::Fail;

#[derive(Debug, Fail)]
pub enum SeamError {
    /// The requested width must be positive and narrower than the
    /// image.  Seam carving never upscales.
    #[fail(
        display = "target width {} is invalid for an image {} pixels wide; it must be at least 1 and less than the image width",
        target, width
    )]
    InvalidTarget { target: i64, width: u32 },

    /// No starting column produced a path to the bottom row.
    #[fail(display = "no seam can be found in a {}x{} image", width, height)]
    NoSeam { width: u32, height: u32 },

    #[fail(
        display = "a seam of {} columns does not fit a {}x{} image",
        length, width, height
    )]
    SeamMismatch {
        length: usize,
        width: u32,
        height: u32,
    },

    #[fail(display = "image error: {}", _0)]
    Image(#[cause] image::ImageError),

    #[fail(display = "i/o error: {}", _0)]
    Io(#[cause] std::io::Error),
}

impl From<image::ImageError> for SeamError {
    fn from(err: image::ImageError) -> Self {
        SeamError::Image(err)
    }
}

impl From<std::io::Error> for SeamError {
    fn from(err: std::io::Error) -> Self {
        SeamError::Io(err)
    }
}
