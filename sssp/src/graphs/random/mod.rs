/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Seeded random graph generators.
//!
//! All generators draw from a [`SmallRng`] seeded explicitly, so identical
//! parameters always produce identical graphs. Weights are sampled in
//! `[0, 1)` from either a uniform or a truncated power-law distribution.
//!
//! The random generators that cannot guarantee connectivity by construction
//! extract the largest connected component (treating arcs as undirected) and
//! remap its node IDs to a dense `[0, n)` range, so a shortest-path run from
//! any source reaches every node when the graph is generated undirected.

use std::collections::{HashSet, VecDeque};

use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::CsrGraph;

/// Exponent of the power-law weight distribution.
pub const POWER_LAW_EXPONENT: f64 = 1.287;

// Lower support bound for power-law sampling; keeps the inverse CDF finite.
const POWER_LAW_MIN_WEIGHT: f64 = 1e-3;

/// Distribution from which arc weights are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightDistribution {
    /// Uniform on `[0, 1)`.
    Uniform,
    /// Truncated power law on `[1e-3, 1)` with exponent
    /// [`POWER_LAW_EXPONENT`].
    PowerLaw,
}

impl WeightDistribution {
    fn sample(&self, rng: &mut SmallRng) -> f64 {
        match self {
            WeightDistribution::Uniform => rng.random_range(0.0..1.0),
            WeightDistribution::PowerLaw => {
                // Inverse-CDF sampling of a power law truncated to
                // [POWER_LAW_MIN_WEIGHT, 1).
                let exp = 1.0 - POWER_LAW_EXPONENT;
                let lo = POWER_LAW_MIN_WEIGHT.powf(exp);
                let hi = 1.0_f64.powf(exp);
                let u = rng.random::<f64>();
                (lo + u * (hi - lo)).powf(1.0 / exp)
            }
        }
    }
}

/// Generates a random graph with `n` nodes and up to `m` arcs, then extracts
/// the largest connected component.
///
/// Arc endpoints are drawn uniformly; self-loops and duplicate arcs are
/// rejected. When `undirected` is true each sampled arc is added in both
/// directions with the same weight. Generation stops early after `100 * m`
/// rejected attempts, so extremely dense requests degrade gracefully
/// instead of looping forever.
pub fn random_graph(
    n: usize,
    m: usize,
    weights: WeightDistribution,
    undirected: bool,
    seed: u64,
) -> CsrGraph {
    assert!(n > 0, "the graph must have at least one node");
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut arcs = Vec::with_capacity(if undirected { 2 * m } else { m });
    let mut seen = HashSet::with_capacity(m);

    let mut attempts = 0_usize;
    let mut sampled = 0_usize;
    while sampled < m && attempts < m.saturating_mul(100) {
        attempts += 1;
        let src = rng.random_range(0..n);
        let dst = rng.random_range(0..n);
        if src == dst || !seen.insert((src, dst)) {
            continue;
        }
        let weight = weights.sample(&mut rng);
        arcs.push((src, dst, weight));
        sampled += 1;
        if undirected && seen.insert((dst, src)) {
            arcs.push((dst, src, weight));
        }
    }

    largest_connected_component(n, &arcs)
}

/// Generates a complete directed graph on `n` nodes with independent weights
/// in each direction.
pub fn complete_graph(n: usize, weights: WeightDistribution, seed: u64) -> CsrGraph {
    assert!(n > 0, "the graph must have at least one node");
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut arcs = Vec::with_capacity(n * n.saturating_sub(1));
    for src in 0..n {
        for dst in 0..n {
            if src != dst {
                arcs.push((src, dst, weights.sample(&mut rng)));
            }
        }
    }
    CsrGraph::from_arcs(n, &arcs)
}

/// Generates an undirected scale-free graph by preferential attachment:
/// each new node links to roughly `arcs_per_node` existing nodes with
/// probability proportional to their degree. The largest connected component
/// is extracted as a safety net.
pub fn scale_free_graph(
    n: usize,
    arcs_per_node: usize,
    weights: WeightDistribution,
    seed: u64,
) -> CsrGraph {
    assert!(n > 0, "the graph must have at least one node");
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut arcs = Vec::new();
    let mut degrees = vec![0_usize; n];

    // Seed clique so the attachment probabilities are defined.
    let clique = n.min(3);
    for i in 0..clique {
        for j in i + 1..clique {
            let weight = weights.sample(&mut rng);
            arcs.push((i, j, weight));
            arcs.push((j, i, weight));
            degrees[i] += 1;
            degrees[j] += 1;
        }
    }

    for new_node in clique..n {
        let total_degree: usize = degrees[..new_node].iter().sum();

        // One guaranteed link keeps the graph connected.
        let anchor = rng.random_range(0..new_node);
        let weight = weights.sample(&mut rng);
        arcs.push((new_node, anchor, weight));
        arcs.push((anchor, new_node, weight));
        degrees[new_node] += 1;
        degrees[anchor] += 1;
        let mut linked = HashSet::from([anchor]);

        let target_links = arcs_per_node.min(new_node);
        for _ in 0..target_links * 3 {
            if linked.len() >= target_links {
                break;
            }
            for candidate in 0..new_node {
                if linked.len() >= target_links || linked.contains(&candidate) {
                    continue;
                }
                let prob = (degrees[candidate] + 1) as f64 / (total_degree + new_node) as f64;
                if rng.random::<f64>() < prob {
                    let weight = weights.sample(&mut rng);
                    arcs.push((new_node, candidate, weight));
                    arcs.push((candidate, new_node, weight));
                    degrees[new_node] += 1;
                    degrees[candidate] += 1;
                    linked.insert(candidate);
                }
            }
        }
    }

    largest_connected_component(n, &arcs)
}

/// Generates an undirected grid graph with `rows * cols` nodes and random
/// weights on the horizontal and vertical links.
pub fn grid_graph(rows: usize, cols: usize, weights: WeightDistribution, seed: u64) -> CsrGraph {
    assert!(rows > 0 && cols > 0, "the grid must be non-empty");
    let mut rng = SmallRng::seed_from_u64(seed);
    let index = |row: usize, col: usize| row * cols + col;
    let mut arcs = Vec::with_capacity(4 * rows * cols);

    for row in 0..rows {
        for col in 0..cols {
            if col + 1 < cols {
                let weight = weights.sample(&mut rng);
                arcs.push((index(row, col), index(row, col + 1), weight));
                arcs.push((index(row, col + 1), index(row, col), weight));
            }
            if row + 1 < rows {
                let weight = weights.sample(&mut rng);
                arcs.push((index(row, col), index(row + 1, col), weight));
                arcs.push((index(row + 1, col), index(row, col), weight));
            }
        }
    }

    CsrGraph::from_arcs(rows * cols, &arcs)
}

/// Generates a directed path `0 → 1 → … → n - 1` with random weights.
pub fn path_graph(n: usize, weights: WeightDistribution, seed: u64) -> CsrGraph {
    assert!(n > 0, "the graph must have at least one node");
    let mut rng = SmallRng::seed_from_u64(seed);
    let arcs: Vec<_> = (0..n.saturating_sub(1))
        .map(|i| (i, i + 1, weights.sample(&mut rng)))
        .collect();
    CsrGraph::from_arcs(n, &arcs)
}

/// Extracts the largest connected component (arcs taken as undirected) and
/// remaps its node IDs to `[0, size)`.
fn largest_connected_component(n: usize, arcs: &[(usize, usize, f64)]) -> CsrGraph {
    if arcs.is_empty() {
        return CsrGraph::from_arcs(1, &[]);
    }

    let mut adjacency = vec![Vec::new(); n];
    for &(src, dst, _) in arcs {
        adjacency[src].push(dst);
        adjacency[dst].push(src);
    }

    // component[v] = id of the component of v; sizes indexed by id
    let mut component = vec![usize::MAX; n];
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();
    for start in 0..n {
        if component[start] != usize::MAX {
            continue;
        }
        let id = sizes.len();
        let mut size = 0_usize;
        component[start] = id;
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            size += 1;
            for &next in &adjacency[node] {
                if component[next] == usize::MAX {
                    component[next] = id;
                    queue.push_back(next);
                }
            }
        }
        sizes.push(size);
    }

    let largest = sizes
        .iter()
        .enumerate()
        .max_by_key(|&(_, size)| size)
        .map(|(id, _)| id)
        .expect("at least one component exists");

    let mut remap = vec![usize::MAX; n];
    let mut next_id = 0_usize;
    for node in 0..n {
        if component[node] == largest {
            remap[node] = next_id;
            next_id += 1;
        }
    }

    let remapped: Vec<_> = arcs
        .iter()
        .filter(|(src, dst, _)| component[*src] == largest && component[*dst] == largest)
        .map(|&(src, dst, weight)| (remap[src], remap[dst], weight))
        .collect();

    CsrGraph::from_arcs(next_id, &remapped)
}
