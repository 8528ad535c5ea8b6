/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unconditional_recursion)]
#![deny(unreachable_patterns)]

pub mod graphs;
pub mod solvers;
pub mod sync;
pub mod utils;

pub mod prelude {
    pub use crate::graphs::CsrGraph;
    pub use crate::solvers::delta_stepping;
    pub use crate::solvers::{Dijkstra, Solver};
}
