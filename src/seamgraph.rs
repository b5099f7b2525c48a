// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The seam graph
//!
//! A dynamic-programming pass over an energy map.  Every cell learns
//! the cheapest cost of any path from the top row down to it, which
//! cell in the row above that path came through, and which of its own
//! downward moves are optimal for the row below.
//!
//! The pass runs strictly row by row: a row is finished before the
//! row below it is started, so every cell reads only final values and
//! the result does not depend on the order cells within a row are
//! visited.  When two parents tie, the straight-up parent wins, then
//! the up-left one, then the up-right one.  All tied moves are kept in
//! the parents' move sets.

use crate::twodmap::TwoDimensionalMap;

/// One of the three ways a seam can step from a row to the row below.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Move {
    Down,
    DownLeft,
    DownRight,
}

/// Every move, in tie-breaking order.
pub static MOVE_ORDER: [Move; 3] = [Move::Down, Move::DownLeft, Move::DownRight];

// Columns of the row above that feed a cell, relative to the cell, in
// tie-breaking order: straight up, up-left, up-right.
static PARENT_OFFSETS: [i64; 3] = [0, -1, 1];

impl Move {
    /// The horizontal offset of the move.
    pub fn offset(self) -> i64 {
        match self {
            Move::Down => 0,
            Move::DownLeft => -1,
            Move::DownRight => 1,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Move::Down => 0b001,
            Move::DownLeft => 0b010,
            Move::DownRight => 0b100,
        }
    }

    /// The column this move lands on, starting from column `x` of an
    /// image `width` pixels wide, or None if it steps off the image.
    pub fn target(self, x: u32, width: u32) -> Option<u32> {
        let nx = i64::from(x) + self.offset();
        if nx < 0 || nx >= i64::from(width) {
            None
        } else {
            Some(nx as u32)
        }
    }
}

/// A set of moves.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Moves(u8);

impl Moves {
    pub fn insert(&mut self, m: Move) {
        self.0 |= m.bit();
    }

    pub fn contains(self, m: Move) -> bool {
        self.0 & m.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The moves in the set, in tie-breaking order.
    pub fn iter(self) -> impl Iterator<Item = Move> {
        MOVE_ORDER.iter().cloned().filter(move |m| self.contains(*m))
    }
}

/// The per-pixel record of the seam graph.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct EnergyCell {
    /// The pixel's own energy.
    pub energy: f64,
    /// The cheapest cost of reaching this cell from the top row; None
    /// until the pass reaches the cell.
    pub cumulative: Option<f64>,
    /// Downward moves that are optimal for their destination.
    pub moves: Moves,
    /// The column of the best parent in the row above.  Top-row cells
    /// point at themselves.
    pub parent: u32,
}

/// The dynamic-programming structure over an energy map.
#[derive(Debug, Clone)]
pub struct SeamGraph {
    cells: TwoDimensionalMap<EnergyCell>,
}

impl SeamGraph {
    /// Build the graph for an energy map and run the pass.
    pub fn new(energy: &TwoDimensionalMap<f64>) -> Self {
        let mut graph = SeamGraph {
            cells: TwoDimensionalMap::new(0, 0),
        };
        graph.rebuild(energy);
        graph
    }

    /// Throw away all path state and re-run the pass over a new energy
    /// map, reusing the graph's storage.
    pub fn rebuild(&mut self, energy: &TwoDimensionalMap<f64>) {
        let (width, height) = energy.dimensions();
        self.cells.refill(width, height, |x, y| EnergyCell {
            energy: energy[(x, y)],
            ..EnergyCell::default()
        });
        self.accumulate();
    }

    pub fn width(&self) -> u32 {
        self.cells.width()
    }

    pub fn height(&self) -> u32 {
        self.cells.height()
    }

    pub fn cell(&self, x: u32, y: u32) -> &EnergyCell {
        &self.cells[(x, y)]
    }

    // Unset cumulatives only exist before the pass, and the pass never
    // reads a row it has not finished.
    fn cumulative(&self, x: u32, y: u32) -> f64 {
        self.cells[(x, y)].cumulative.unwrap_or(std::f64::INFINITY)
    }

    /// The columns of the row above that can reach column `x`, in
    /// tie-breaking order.
    fn parents(&self, x: u32) -> impl Iterator<Item = u32> {
        let width = i64::from(self.width());
        PARENT_OFFSETS.iter().filter_map(move |&dx| {
            let p = i64::from(x) + dx;
            if p >= 0 && p < width {
                Some(p as u32)
            } else {
                None
            }
        })
    }

    fn cheapest_parent(&self, x: u32, y: u32) -> u32 {
        let mut best = x;
        for p in self.parents(x) {
            if self.cumulative(p, y - 1) < self.cumulative(best, y - 1) {
                best = p;
            }
        }
        best
    }

    fn accumulate(&mut self) {
        let (width, height) = self.cells.dimensions();
        if width == 0 || height == 0 {
            return;
        }

        for x in 0..width {
            let cell = &mut self.cells[(x, 0)];
            cell.cumulative = Some(cell.energy);
            cell.parent = x;
        }

        for y in 1..height {
            for x in 0..width {
                let parent = self.cheapest_parent(x, y);
                let base = self.cumulative(parent, y - 1);
                let cell = &mut self.cells[(x, y)];
                cell.cumulative = Some(cell.energy + base);
                cell.parent = parent;
            }
            self.record_moves(y);
        }
    }

    // Row y is final: mark every parent in row y - 1 that ties for the
    // minimum into each cell of row y.
    fn record_moves(&mut self, y: u32) {
        for x in 0..self.width() {
            let best = self.cumulative(self.cells[(x, y)].parent, y - 1);
            for p in self.parents(x) {
                if self.cumulative(p, y - 1) != best {
                    continue;
                }
                let step = match i64::from(x) - i64::from(p) {
                    -1 => Move::DownLeft,
                    0 => Move::Down,
                    _ => Move::DownRight,
                };
                self.cells[(p, y - 1)].moves.insert(step);
            }
        }
    }
}
