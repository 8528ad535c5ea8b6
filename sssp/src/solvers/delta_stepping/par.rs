/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::thread;

use sync_cell_slice::{SyncCell, SyncSlice};

use crate::graphs::CsrGraph;
use crate::solvers::Solver;
use crate::sync::{Bucket, FixedTaskPool, RequestSlots, TOMBSTONE};

/// Parallel Δ-stepping with prefix-balanced edge partitioning.
///
/// Each inner iteration runs three barrier-separated phases on a fixed pool
/// of workers:
///
/// 1. **Request generation** over a snapshot of the bucket being drained.
///    Bucket workloads are heavy-tailed — a few high-degree nodes can
///    dominate a bucket — so instead of chunking the bucket by node, the
///    workers first compute a parallel prefix sum of the out-degrees and
///    then each walks a contiguous range of *edges* of its own, even to
///    within the degree of one node. Every improving arc posts a request
///    into the light or heavy [`RequestSlots`] depending on its weight.
/// 2. The bucket is cleared, and the **light requests** are relaxed: each
///    requested node is drained from its slot by exactly one worker, which
///    lowers the distance and moves the node between buckets. The iteration
///    repeats while the bucket is non-empty.
/// 3. Once the bucket has drained to quiescence, the accumulated **heavy
///    requests** are relaxed the same way.
///
/// The distance vector is read during request generation without
/// synchronization; a stale read only produces a request that is no better
/// than the one the tighter distance will generate later, and distances
/// only ever decrease, so the CAS-min aggregation keeps the result exact.
/// The barriers between phases establish the visibility of all plain
/// cross-thread writes.
#[derive(Debug, Clone)]
pub struct Par {
    delta: f64,
    num_threads: usize,
}

impl Par {
    /// Creates a parallel Δ-stepping solver with bucket width `delta` and
    /// `num_threads` workers.
    ///
    /// # Panics
    ///
    /// Panics if `delta` is not positive or `num_threads` is zero.
    pub fn new(delta: f64, num_threads: usize) -> Self {
        assert!(delta > 0.0, "delta must be positive");
        assert!(num_threads > 0, "at least one thread is required");
        Self { delta, num_threads }
    }
}

impl Solver for Par {
    fn name(&self) -> String {
        "Delta-stepping (parallel, prefix-balanced)".into()
    }

    fn compute(&self, graph: &CsrGraph, source: usize) -> Vec<f64> {
        let num_nodes = graph.num_nodes();
        assert!(source < num_nodes, "source {source} out of range");
        let delta = self.delta;
        let num_threads = self.num_threads;

        let mut dist = vec![f64::INFINITY; num_nodes];
        dist[source] = 0.0;

        let horizon = super::horizon(graph.max_weight(), delta);
        let buckets: Vec<Bucket> = (0..horizon)
            .map(|_| Bucket::with_capacity(num_nodes))
            .collect();
        let mut pos = vec![0_usize; num_nodes];
        pos[source] = buckets[0].push(source);

        let light = RequestSlots::new(num_nodes);
        let heavy = RequestSlots::new(num_nodes);

        // Scratch for the prefix-balanced partitioner: per-entry running
        // degree sums (worker-local) and one total per worker.
        let mut prefix = vec![0_usize; num_nodes];
        let mut worker_total = vec![0_usize; num_threads];

        {
            let dist_s = dist.as_sync_slice();
            let pos_s = pos.as_sync_slice();
            let prefix_s = prefix.as_sync_slice();
            let totals_s = worker_total.as_sync_slice();
            let buckets = &buckets;
            let light = &light;
            let heavy = &heavy;

            let mut worker_prefix = vec![0_usize; num_threads];
            let pool = FixedTaskPool::new(num_threads);

            thread::scope(|scope| {
                pool.spawn_workers(scope);

                let mut generation = 0_usize;
                let mut idle_generations = 0_usize;

                while idle_generations < horizon {
                    let current = &buckets[generation];

                    while !current.is_empty() {
                        idle_generations = 0;
                        let frontier_len = current.len();
                        let nodes_per_worker = frontier_len.div_ceil(num_threads);

                        // Pass 1: worker-local prefix sums of out-degrees
                        // over the bucket snapshot.
                        for tid in 0..num_threads {
                            let begin = (tid * nodes_per_worker).min(frontier_len);
                            let end = ((tid + 1) * nodes_per_worker).min(frontier_len);
                            pool.submit(tid, move || {
                                let mut running = 0_usize;
                                for i in begin..end {
                                    let entry = current.get(i);
                                    if entry != TOMBSTONE {
                                        running += graph.outdegree(entry as usize);
                                    }
                                    unsafe { prefix_s[i].set(running) };
                                }
                                unsafe { totals_s[tid].set(running) };
                            });
                        }
                        pool.sync();

                        // Inclusive scan of the worker totals; quiescent
                        // after the barrier, so the controller reads alone.
                        let mut running = 0_usize;
                        for tid in 0..num_threads {
                            running += unsafe { totals_s[tid].get() };
                            worker_prefix[tid] = running;
                        }
                        let total_arcs = running;

                        // Pass 2: each worker generates requests for its own
                        // contiguous range of the bucket's arcs.
                        let chunk = total_arcs.div_ceil(num_threads);
                        let mut slice = 0_usize;
                        for tid in 0..num_threads {
                            let start_arc = (tid * chunk).min(total_arcs);
                            let end_arc = ((tid + 1) * chunk).min(total_arcs);
                            while slice < num_threads && start_arc >= worker_prefix[slice] {
                                slice += 1;
                            }
                            let slice_base = slice * nodes_per_worker;
                            let start_in_slice = start_arc
                                - if slice > 0 { worker_prefix[slice - 1] } else { 0 };
                            pool.submit(tid, move || {
                                generate_requests(
                                    graph,
                                    current,
                                    prefix_s,
                                    dist_s,
                                    light,
                                    heavy,
                                    delta,
                                    frontier_len,
                                    slice_base,
                                    (slice_base + nodes_per_worker).min(frontier_len),
                                    start_in_slice,
                                    start_arc,
                                    end_arc,
                                );
                            });
                        }
                        pool.sync();

                        current.clear();

                        // Light relaxation over the requested-node index.
                        let queued = light.queued_len();
                        let chunk = queued.div_ceil(num_threads);
                        for tid in 0..num_threads {
                            let begin = (tid * chunk).min(queued);
                            let end = ((tid + 1) * chunk).min(queued);
                            pool.submit(tid, move || {
                                for i in begin..end {
                                    relax(
                                        light.queued(i),
                                        light,
                                        dist_s,
                                        pos_s,
                                        buckets,
                                        delta,
                                        generation,
                                    );
                                }
                            });
                        }
                        pool.sync();
                        light.reset();
                    }

                    // Heavy relaxation, once per bucket drain.
                    let queued = heavy.queued_len();
                    let chunk = queued.div_ceil(num_threads);
                    for tid in 0..num_threads {
                        let begin = (tid * chunk).min(queued);
                        let end = ((tid + 1) * chunk).min(queued);
                        pool.submit(tid, move || {
                            for i in begin..end {
                                relax(
                                    heavy.queued(i),
                                    heavy,
                                    dist_s,
                                    pos_s,
                                    buckets,
                                    delta,
                                    generation,
                                );
                            }
                        });
                    }
                    pool.sync();
                    heavy.reset();

                    generation = (generation + 1) % horizon;
                    idle_generations += 1;
                }

                pool.stop();
            });
        }

        dist
    }
}

/// Walks the arc range `[start_arc, end_arc)` of the bucket snapshot,
/// posting a request for every improving arc.
///
/// The walk starts at the node located by an upper bound for
/// `start_in_slice` on the worker-local prefix segment
/// `[slice_base, slice_end)`, offset into that node's arcs by whatever part
/// of its degree precedes the range.
#[allow(clippy::too_many_arguments)]
fn generate_requests(
    graph: &CsrGraph,
    bucket: &Bucket,
    prefix: &[SyncCell<usize>],
    dist: &[SyncCell<f64>],
    light: &RequestSlots,
    heavy: &RequestSlots,
    delta: f64,
    frontier_len: usize,
    slice_base: usize,
    slice_end: usize,
    start_in_slice: usize,
    start_arc: usize,
    end_arc: usize,
) {
    if start_arc >= end_arc {
        return;
    }

    let segment = &prefix[slice_base..slice_end];
    let local = segment.partition_point(|cell| unsafe { cell.get() } <= start_in_slice);
    let mut node_idx = slice_base + local;
    let mut arc_offset = start_in_slice
        - if local > 0 {
            unsafe { prefix[node_idx - 1].get() }
        } else {
            0
        };

    let mut current_arc = start_arc;
    while current_arc < end_arc && node_idx < frontier_len {
        let entry = bucket.get(node_idx);
        if entry != TOMBSTONE {
            let node = entry as usize;
            let degree = graph.outdegree(node);
            // A stale read here at worst posts a looser request; see the
            // struct-level discussion.
            let base = unsafe { dist[node].get() };
            for k in arc_offset..degree {
                if current_arc == end_arc {
                    break;
                }
                let (succ, weight) = graph.arc(node, k);
                let next = base + weight;
                if next < unsafe { dist[succ].get() } {
                    if weight < delta {
                        light.offer(succ, next);
                    } else {
                        heavy.offer(succ, next);
                    }
                }
                current_arc += 1;
            }
        }
        node_idx += 1;
        arc_offset = 0;
    }
}

/// Drains the request slot of `node` and, if the pending distance improves
/// on the current one, lowers it and moves the node to its new bucket.
///
/// The exchange makes the draining worker the only writer of
/// `dist[node]` and `pos[node]` in this phase, so the plain writes below
/// are safe. The entry in the bucket being drained needs no tombstone:
/// the whole bucket is cleared at the end of the phase.
fn relax(
    node: usize,
    requests: &RequestSlots,
    dist: &[SyncCell<f64>],
    pos: &[SyncCell<usize>],
    buckets: &[Bucket],
    delta: f64,
    generation: usize,
) {
    let next = requests.drain(node);
    let old_dist = unsafe { dist[node].get() };
    if next >= old_dist {
        return;
    }

    let horizon = buckets.len();
    let old_bucket = old_dist
        .is_finite()
        .then(|| super::bucket_index(old_dist, delta, horizon));
    unsafe { dist[node].set(next) };
    let new_bucket = super::bucket_index(next, delta, horizon);

    if let Some(old) = old_bucket {
        if old != generation && old != new_bucket {
            buckets[old].tombstone(unsafe { pos[node].get() });
        }
    }
    if old_bucket == Some(generation) || old_bucket != Some(new_bucket) {
        unsafe { pos[node].set(buckets[new_bucket].push(node)) };
    }
}
