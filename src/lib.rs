// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image narrowing by seam carving, with a Sobel
//! energy function.

pub mod codec;
pub mod energy;
pub mod error;
pub mod seamcarver;
pub mod seamgraph;
pub mod seamselector;
pub mod twodmap;
pub mod visualize;

pub use energy::{calculate_energy, luminance};
pub use error::SeamError;
pub use seamcarver::{remove_vertical_seam, seamcarve, EnergyRefresh, SeamCarver, Target};
pub use seamgraph::{EnergyCell, Move, Moves, SeamGraph};
pub use seamselector::{DescentTable, Seam, SeamSelector};
pub use twodmap::TwoDimensionalMap;
