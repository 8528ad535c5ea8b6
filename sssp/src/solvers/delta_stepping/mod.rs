/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Δ-stepping solvers.
//!
//! Δ-stepping partitions tentative distances into buckets of width Δ and
//! settles them in increasing bucket order. Arcs of weight below Δ (*light*)
//! may re-insert nodes into the bucket being drained and are relaxed
//! repeatedly until the bucket is empty; arcs of weight at least Δ (*heavy*)
//! jump ahead by at least one bucket and are relaxed once per bucket drain.
//!
//! Tentative distances increase monotonically with bucket index, and an arc
//! of weight at most `L` advances a distance by fewer than `⌈L/Δ⌉ + 1`
//! buckets, so only a bounded window of buckets can be live at once. Both
//! solvers therefore keep a cyclic array of `⌈L/Δ⌉ +`
//! [`HORIZON_SLACK`] bucket slots, map distances to slots modulo that
//! horizon, and stop after a full horizon of consecutive empty slots.
//!
//! [`Seq`] is the plain sequential rendition of this skeleton; [`Par`] runs
//! it on a fixed pool of workers with barrier-separated phases.

mod seq;
pub use seq::*;

mod par;
pub use par::*;

// Slack slots beyond ⌈L/Δ⌉, avoiding aliasing pressure when a node is
// re-bucketed right at the window boundary. Anything ≥ 2 works.
const HORIZON_SLACK: usize = 5;

/// Number of bucket slots needed so that no two live tentative distances
/// ever map to the same slot.
fn horizon(max_weight: f64, delta: f64) -> usize {
    (max_weight / delta).ceil() as usize + HORIZON_SLACK
}

/// Bucket slot of a finite tentative distance.
#[inline(always)]
fn bucket_index(dist: f64, delta: f64, horizon: usize) -> usize {
    (dist / delta) as usize % horizon
}
