// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seam selection
//!
//! Every column of the top row roots one candidate seam: the cheapest
//! path to the bottom row that follows only optimal moves of the seam
//! graph.  Rather than chase moves recursively from the top, the
//! selector works bottom-up, recording for every cell the cheapest
//! reachable bottom-row total and the column to step to next.  Any
//! root can then be walked top to bottom in a straight loop.

use crate::error::SeamError;
use crate::seamgraph::SeamGraph;
use crate::twodmap::TwoDimensionalMap;

/// A top-to-bottom path, one column per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Seam {
    pub columns: Vec<u32>,
    pub cost: f64,
}

impl Seam {
    /// The column the seam starts from in the top row.
    pub fn root(&self) -> Option<u32> {
        self.columns.first().cloned()
    }

    /// True if no two consecutive rows differ by more than one column.
    pub fn is_contiguous(&self) -> bool {
        self.columns
            .windows(2)
            .all(|w| (i64::from(w[0]) - i64::from(w[1])).abs() <= 1)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// The cheapest bottom-row total reachable from a cell, and the column
// in the row below to go through.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
struct Descent {
    cost: f64,
    next: u32,
}

/// Storage for the selector's per-cell descent records, kept between
/// searches so a carving loop allocates it only once.
#[derive(Debug, Clone)]
pub struct DescentTable(TwoDimensionalMap<Option<Descent>>);

impl Default for DescentTable {
    fn default() -> Self {
        DescentTable(TwoDimensionalMap::new(0, 0))
    }
}

pub struct SeamSelector<'a> {
    graph: &'a SeamGraph,
    descent: TwoDimensionalMap<Option<Descent>>,
}

impl<'a> SeamSelector<'a> {
    pub fn new(graph: &'a SeamGraph) -> Self {
        Self::reusing(graph, DescentTable::default())
    }

    /// Build a selector in storage left over from an earlier one.
    pub fn reusing(graph: &'a SeamGraph, table: DescentTable) -> Self {
        let (width, height) = (graph.width(), graph.height());
        let DescentTable(mut descent) = table;
        descent.refill(width, height, |_, _| None);
        if width > 0 && height > 0 {
            let bottom = height - 1;
            for x in 0..width {
                descent[(x, bottom)] = graph
                    .cell(x, bottom)
                    .cumulative
                    .map(|cost| Descent { cost, next: x });
            }
            for y in (0..bottom).rev() {
                for x in 0..width {
                    let step = graph
                        .cell(x, y)
                        .moves
                        .iter()
                        .filter_map(|m| m.target(x, width))
                        .filter_map(|nx| {
                            descent[(nx, y + 1)].map(|d| Descent {
                                cost: d.cost,
                                next: nx,
                            })
                        })
                        .min_by(|a, b| a.cost.total_cmp(&b.cost));
                    descent[(x, y)] = step;
                }
            }
        }
        SeamSelector { graph, descent }
    }

    /// Give the selector's storage back for the next search.
    pub fn into_table(self) -> DescentTable {
        DescentTable(self.descent)
    }

    /// The cheapest seam that starts at column `root` of the top row,
    /// or None if no path from that column reaches the bottom.
    pub fn seam_from(&self, root: u32) -> Option<Seam> {
        if root >= self.graph.width() || self.graph.height() == 0 {
            return None;
        }
        let cost = self.descent[(root, 0)]?.cost;
        let mut columns = Vec::with_capacity(self.graph.height() as usize);
        let mut x = root;
        for y in 0..self.graph.height() {
            columns.push(x);
            x = self.descent[(x, y)]?.next;
        }
        Some(Seam { columns, cost })
    }

    /// One seam per root that has one, cheapest first.  Equal costs
    /// keep their left-to-right order.
    pub fn candidates(&self) -> Vec<Seam> {
        let mut seams: Vec<Seam> = (0..self.graph.width())
            .filter_map(|x| self.seam_from(x))
            .collect();
        seams.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        seams
    }

    /// The cheapest seam in the graph, the leftmost root winning ties.
    pub fn best(&self) -> Result<Seam, SeamError> {
        (0..self.graph.width())
            .filter_map(|x| self.seam_from(x))
            .min_by(|a, b| a.cost.total_cmp(&b.cost))
            .ok_or(SeamError::NoSeam {
                width: self.graph.width(),
                height: self.graph.height(),
            })
    }
}
