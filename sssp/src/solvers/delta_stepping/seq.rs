/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::graphs::CsrGraph;
use crate::solvers::Solver;
use crate::sync::TOMBSTONE;

/// Sequential Δ-stepping.
///
/// Follows the same skeleton as the parallel solver — cyclic bucket
/// horizon, light/heavy arc split, strictest-request aggregation per target
/// node — but with plain vectors instead of atomics, barriers and workers.
/// It validates the algorithmic core independently of the concurrency
/// substrate, and is the fastest option on graphs too small to amortize a
/// worker pool.
#[derive(Debug, Clone)]
pub struct Seq {
    delta: f64,
}

impl Seq {
    /// Creates a sequential Δ-stepping solver with bucket width `delta`.
    ///
    /// # Panics
    ///
    /// Panics if `delta` is not positive.
    pub fn new(delta: f64) -> Self {
        assert!(delta > 0.0, "delta must be positive");
        Self { delta }
    }
}

impl Solver for Seq {
    fn name(&self) -> String {
        "Delta-stepping (sequential)".into()
    }

    fn compute(&self, graph: &CsrGraph, source: usize) -> Vec<f64> {
        let num_nodes = graph.num_nodes();
        assert!(source < num_nodes, "source {source} out of range");
        let delta = self.delta;

        let mut dist = vec![f64::INFINITY; num_nodes];
        dist[source] = 0.0;

        // Split the adjacency by arc class once up front.
        let mut light = vec![Vec::new(); num_nodes];
        let mut heavy = vec![Vec::new(); num_nodes];
        for node in 0..num_nodes {
            for (succ, weight) in graph.successors(node) {
                if weight < delta {
                    light[node].push((succ, weight));
                } else {
                    heavy[node].push((succ, weight));
                }
            }
        }

        let horizon = super::horizon(graph.max_weight(), delta);
        let mut buckets: Vec<Vec<i64>> = vec![Vec::new(); horizon];
        let mut pos = vec![0_usize; num_nodes];
        buckets[0].push(source as i64);

        // Strictest-request aggregation: best pending distance per node plus
        // the list of nodes with a pending request.
        let mut light_req = vec![f64::INFINITY; num_nodes];
        let mut heavy_req = vec![f64::INFINITY; num_nodes];
        let mut light_queue = Vec::new();
        let mut heavy_queue = Vec::new();

        let mut generation = 0_usize;
        let mut idle_generations = 0_usize;

        while idle_generations < horizon {
            while !buckets[generation].is_empty() {
                idle_generations = 0;
                let frontier = std::mem::take(&mut buckets[generation]);

                // Request generation over the live entries of the snapshot.
                for &entry in &frontier {
                    if entry == TOMBSTONE {
                        continue;
                    }
                    let node = entry as usize;
                    for &(succ, weight) in &light[node] {
                        let next = dist[node] + weight;
                        if next < dist[succ] && next < light_req[succ] {
                            if light_req[succ].is_infinite() {
                                light_queue.push(succ);
                            }
                            light_req[succ] = next;
                        }
                    }
                    for &(succ, weight) in &heavy[node] {
                        let next = dist[node] + weight;
                        if next < dist[succ] && next < heavy_req[succ] {
                            if heavy_req[succ].is_infinite() {
                                heavy_queue.push(succ);
                            }
                            heavy_req[succ] = next;
                        }
                    }
                }

                // Light relaxation.
                for i in 0..light_queue.len() {
                    let node = light_queue[i];
                    let next = std::mem::replace(&mut light_req[node], f64::INFINITY);
                    relax(
                        node, next, generation, delta, horizon, &mut dist, &mut pos, &mut buckets,
                    );
                }
                light_queue.clear();
            }

            // Heavy relaxation, once the bucket has drained to quiescence.
            for i in 0..heavy_queue.len() {
                let node = heavy_queue[i];
                let next = std::mem::replace(&mut heavy_req[node], f64::INFINITY);
                relax(
                    node, next, generation, delta, horizon, &mut dist, &mut pos, &mut buckets,
                );
            }
            heavy_queue.clear();

            generation = (generation + 1) % horizon;
            idle_generations += 1;
        }

        dist
    }
}

#[allow(clippy::too_many_arguments)]
fn relax(
    node: usize,
    next: f64,
    generation: usize,
    delta: f64,
    horizon: usize,
    dist: &mut [f64],
    pos: &mut [usize],
    buckets: &mut [Vec<i64>],
) {
    if next >= dist[node] {
        return;
    }
    let old_bucket = dist[node]
        .is_finite()
        .then(|| super::bucket_index(dist[node], delta, horizon));
    dist[node] = next;
    let new_bucket = super::bucket_index(next, delta, horizon);

    // The entry in the bucket being drained is discarded wholesale with the
    // snapshot, so it needs no tombstone.
    if let Some(old) = old_bucket {
        if old != generation && old != new_bucket {
            buckets[old][pos[node]] = TOMBSTONE;
        }
    }
    if old_bucket == Some(generation) || old_bucket != Some(new_bucket) {
        pos[node] = buckets[new_bucket].len();
        buckets[new_bucket].push(node as i64);
    }
}
