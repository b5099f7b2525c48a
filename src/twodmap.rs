// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The addressable two-dimensional field shared by every stage of the
//! carver: luminance samples, energies, seam graph cells and the
//! descent table all live in one of these.

use crate::error::SeamError;
use std::ops::{Index, IndexMut};

/// An addressable two-dimensional field, row-major, addressed by
/// `(x, y)`.  The content type must implement Default and Copy.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    width: u32,
    height: u32,
    data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// Define a new map with every cell set to the default value.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Build a map by calling `f(x, y)` for every cell, row by row.
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        let mut map = TwoDimensionalMap {
            width: 0,
            height: 0,
            data: Vec::with_capacity(width as usize * height as usize),
        };
        map.refill(width, height, f);
        map
    }

    /// Resize the map in place and repopulate it with `f(x, y)`.  The
    /// backing allocation is kept, so a map that only ever shrinks
    /// never allocates again.
    pub fn refill<F>(&mut self, width: u32, height: u32, mut f: F)
    where
        F: FnMut(u32, u32) -> P,
    {
        self.width = width;
        self.height = height;
        self.data.clear();
        for y in 0..height {
            for x in 0..width {
                self.data.push(f(x, y));
            }
        }
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Read a cell with out-of-range coordinates clamped to the nearest
    /// valid row and column (edge replication).  The map must not be
    /// empty.
    pub fn clamped(&self, x: i64, y: i64) -> P {
        let cx = x.max(0).min(i64::from(self.width) - 1) as u32;
        let cy = y.max(0).min(i64::from(self.height) - 1) as u32;
        self[(cx, cy)]
    }

    /// One row of the map as a slice.
    pub fn row(&self, y: u32) -> &[P] {
        let start = self.get_index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Every cell, row by row.
    pub fn values(&self) -> impl Iterator<Item = &P> {
        self.data.iter()
    }

    /// Return a map one column narrower, with the cell at `seam[y]`
    /// dropped from every row `y` and the cells right of it shifted
    /// left.
    pub fn without_seam(&self, seam: &[u32]) -> Result<Self, SeamError> {
        check_seam(seam, self.width, self.height)?;
        let mut data = Vec::with_capacity((self.width as usize - 1) * self.height as usize);
        for (y, &col) in seam.iter().enumerate() {
            let row = self.row(y as u32);
            data.extend_from_slice(&row[..col as usize]);
            data.extend_from_slice(&row[col as usize + 1..]);
        }
        Ok(TwoDimensionalMap {
            width: self.width - 1,
            height: self.height,
            data,
        })
    }
}

/// A seam fits a `width` × `height` field if it names exactly one
/// in-range column for every row.
pub(crate) fn check_seam(seam: &[u32], width: u32, height: u32) -> Result<(), SeamError> {
    if width == 0 || seam.len() != height as usize || seam.iter().any(|&x| x >= width) {
        return Err(SeamError::SeamMismatch {
            length: seam.len(),
            width,
            height,
        });
    }
    Ok(())
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(width: u32, height: u32) -> TwoDimensionalMap<u32> {
        TwoDimensionalMap::from_fn(width, height, |x, y| y * 10 + x)
    }

    #[test]
    fn addressing_is_row_major() {
        let map = counting(4, 3);
        assert_eq!(map[(3, 0)], 3);
        assert_eq!(map[(0, 2)], 20);
        assert_eq!(map.row(1), &[10, 11, 12, 13]);
    }

    #[test]
    fn clamped_reads_replicate_the_edges() {
        let map = counting(3, 3);
        assert_eq!(map.clamped(-1, -1), 0);
        assert_eq!(map.clamped(3, 1), 12);
        assert_eq!(map.clamped(1, 5), 21);
        assert_eq!(map.clamped(-4, 2), 20);
    }

    #[test]
    fn removing_a_seam_shifts_the_right_side_left() {
        let map = counting(4, 3);
        let narrower = map.without_seam(&[0, 2, 3]).unwrap();
        assert_eq!(narrower.dimensions(), (3, 3));
        assert_eq!(narrower.row(0), &[1, 2, 3]);
        assert_eq!(narrower.row(1), &[10, 11, 13]);
        assert_eq!(narrower.row(2), &[20, 21, 22]);
    }

    #[test]
    fn seams_that_do_not_fit_are_rejected() {
        let map = counting(4, 3);
        assert!(map.without_seam(&[0, 1]).is_err());
        assert!(map.without_seam(&[0, 1, 4]).is_err());
    }

    #[test]
    fn refill_reuses_the_map() {
        let mut map = counting(4, 3);
        map.refill(2, 2, |x, y| x + y);
        assert_eq!(map.dimensions(), (2, 2));
        assert_eq!(map.values().cloned().collect::<Vec<_>>(), vec![0, 1, 1, 2]);
    }
}
