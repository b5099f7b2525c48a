// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main loop
//!
//! Removes the cheapest seam from an image, one column at a time,
//! until the image is as narrow as requested.  The seam graph is
//! rebuilt from scratch for every column: energies survive a carve,
//! cumulative costs do not.

use crate::energy::calculate_energy;
use crate::error::SeamError;
use crate::seamgraph::SeamGraph;
use crate::seamselector::{DescentTable, Seam, SeamSelector};
use crate::twodmap::{check_seam, TwoDimensionalMap};
use image::{GenericImageView, ImageBuffer, Pixel};
use log::{debug, info};

/// The two ways of asking for a narrower image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Target {
    /// Carve until the image is this wide.
    Width(u32),
    /// Carve this many columns away.
    Remove(u32),
}

impl Target {
    /// The width to carve down to from an image `width` pixels wide.
    /// Seam carving only shrinks, and never to nothing.
    pub fn resolve(self, width: u32) -> Result<u32, SeamError> {
        let target = match self {
            Target::Width(w) => i64::from(w),
            Target::Remove(n) => i64::from(width) - i64::from(n),
        };
        if target <= 0 || target >= i64::from(width) {
            return Err(SeamError::InvalidTarget { target, width });
        }
        Ok(target as u32)
    }
}

/// What happens to the energy map after a seam is removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EnergyRefresh {
    /// Keep the energies of the surviving pixels, shifted with them.
    Carry,
    /// Compute the energy of the narrower image from its pixels.
    Recompute,
}

impl Default for EnergyRefresh {
    fn default() -> Self {
        EnergyRefresh::Carry
    }
}

// The one tiny inefficiency of the old version was copying the seam
// pixel and then overwriting it.  Here every row is built from the
// two halves around the seam.

/// Return a copy of `image` one column narrower, with the pixel at
/// `seam[y]` removed from every row `y` and everything right of it
/// shifted left.
pub fn remove_vertical_seam<I, P>(image: &I, seam: &[u32]) -> Result<ImageBuffer<P, Vec<u8>>, SeamError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = u8> + 'static,
{
    let (width, height) = image.dimensions();
    check_seam(seam, width, height)?;
    Ok(ImageBuffer::from_fn(width - 1, height, |x, y| {
        let source = if x < seam[y as usize] { x } else { x + 1 };
        image.get_pixel(source, y)
    }))
}

/// Holds the image being carved, its energy map, and the seam graph
/// and descent table storage reused from one column to the next.
pub struct SeamCarver<P>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    image: ImageBuffer<P, Vec<u8>>,
    energy: TwoDimensionalMap<f64>,
    graph: SeamGraph,
    descent: DescentTable,
    refresh: EnergyRefresh,
}

impl<P> SeamCarver<P>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: ImageBuffer<P, Vec<u8>>) -> Self {
        let energy = calculate_energy(&image);
        let graph = SeamGraph::new(&TwoDimensionalMap::new(0, 0));
        SeamCarver {
            image,
            energy,
            graph,
            descent: DescentTable::default(),
            refresh: EnergyRefresh::default(),
        }
    }

    pub fn with_refresh(mut self, refresh: EnergyRefresh) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn image(&self) -> &ImageBuffer<P, Vec<u8>> {
        &self.image
    }

    pub fn energy(&self) -> &TwoDimensionalMap<f64> {
        &self.energy
    }

    pub fn into_image(self) -> ImageBuffer<P, Vec<u8>> {
        self.image
    }

    /// Run the seam graph over the current energy map and return the
    /// cheapest seam.
    pub fn find_seam(&mut self) -> Result<Seam, SeamError> {
        self.graph.rebuild(&self.energy);
        let table = std::mem::take(&mut self.descent);
        let selector = SeamSelector::reusing(&self.graph, table);
        let seam = selector.best();
        self.descent = selector.into_table();
        seam
    }

    /// Remove the cheapest seam, returning it.
    pub fn carve_once(&mut self) -> Result<Seam, SeamError> {
        let seam = self.find_seam()?;
        self.image = remove_vertical_seam(&self.image, &seam.columns)?;
        self.energy = match self.refresh {
            EnergyRefresh::Carry => self.energy.without_seam(&seam.columns)?,
            EnergyRefresh::Recompute => calculate_energy(&self.image),
        };
        Ok(seam)
    }

    /// Carve until the image is `target` pixels wide, calling
    /// `observer` with the step number (from 1), the narrower image and
    /// the removed seam after every column.  The target is checked
    /// before any work is done.
    pub fn carve_with<F>(&mut self, target: Target, mut observer: F) -> Result<(), SeamError>
    where
        F: FnMut(u32, &ImageBuffer<P, Vec<u8>>, &Seam) -> Result<(), SeamError>,
    {
        let (width, height) = self.image.dimensions();
        let newwidth = target.resolve(width)?;
        info!(
            "carving {}x{} down to {}x{}",
            width, height, newwidth, height
        );
        for step in 1..=(width - newwidth) {
            let seam = self.carve_once()?;
            debug!(
                "step {}: removed seam rooted at column {:?}, cost {}; width now {}",
                step,
                seam.root(),
                seam.cost,
                self.image.width()
            );
            observer(step, &self.image, &seam)?;
        }
        Ok(())
    }

    /// Carve until the image is `target` pixels wide.
    pub fn carve(&mut self, target: Target) -> Result<(), SeamError> {
        self.carve_with(target, |_, _, _| Ok(()))
    }
}

/// A convenience wrapper: carve a copy of an image down to a target.
pub fn seamcarve<P>(
    image: &ImageBuffer<P, Vec<u8>>,
    target: Target,
) -> Result<ImageBuffer<P, Vec<u8>>, SeamError>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    target.resolve(image.width())?;
    let mut carver = SeamCarver::new(image.clone());
    carver.carve(target)?;
    Ok(carver.into_image())
}
