/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Single-source shortest-path solvers.

mod dijkstra;
pub use dijkstra::*;

pub mod delta_stepping;

use crate::graphs::CsrGraph;

/// A single-source shortest-path solver over non-negative arc weights.
pub trait Solver {
    /// A stable human-readable label, used in benchmark output.
    fn name(&self) -> String;

    /// Computes the shortest-path distances from `source`.
    ///
    /// Returns a vector of length `graph.num_nodes()` holding the distance
    /// of every node from `source`: `0` at the source itself and
    /// `f64::INFINITY` for unreachable nodes. Distances are exact up to the
    /// floating-point associativity of path-weight sums.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not a node of `graph`.
    fn compute(&self, graph: &CsrGraph, source: usize) -> Vec<f64>;
}
