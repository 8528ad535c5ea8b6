/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::collections::BinaryHeap;

use super::Solver;
use crate::graphs::CsrGraph;

/// Sequential binary-heap Dijkstra.
///
/// The reference implementation: tests and the benchmark drivers validate
/// every other solver against its output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

struct HeapEntry {
    dist: f64,
    node: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.dist.total_cmp(&other.dist).is_eq()
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // Reversed so that the std max-heap pops the smallest distance first.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.dist.total_cmp(&self.dist)
    }
}

impl Solver for Dijkstra {
    fn name(&self) -> String {
        "Dijkstra".into()
    }

    fn compute(&self, graph: &CsrGraph, source: usize) -> Vec<f64> {
        let num_nodes = graph.num_nodes();
        assert!(source < num_nodes, "source {source} out of range");

        let mut dist = vec![f64::INFINITY; num_nodes];
        dist[source] = 0.0;

        let mut heap = BinaryHeap::new();
        heap.push(HeapEntry {
            dist: 0.0,
            node: source,
        });

        while let Some(HeapEntry { dist: d, node }) = heap.pop() {
            if d > dist[node] {
                continue;
            }
            for (succ, weight) in graph.successors(node) {
                let next = d + weight;
                if next < dist[succ] {
                    dist[succ] = next;
                    heap.push(HeapEntry {
                        dist: next,
                        node: succ,
                    });
                }
            }
        }

        dist
    }
}
