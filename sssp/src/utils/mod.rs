/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Utilities: graph text-file I/O and distance-vector comparison.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::graphs::CsrGraph;

/// Tolerance used when comparing distance vectors: path-weight sums are
/// allowed to differ by floating-point associativity up to this epsilon.
pub const DISTANCE_EPSILON: f64 = 1e-9;

/// Parses a graph from a line-oriented text file.
///
/// Each non-empty line holds `src dst weight` separated by ASCII spaces;
/// `src` and `dst` are non-negative integers, remapped to a dense `[0, n)`
/// range in order of first appearance; `weight` is a decimal real.
/// Malformed lines are skipped. With `normalize_weights`, weights are
/// rescaled so the maximum becomes `1`.
pub fn parse_graph(path: impl AsRef<Path>, normalize_weights: bool) -> Result<CsrGraph> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut index = HashMap::new();
    let mut arcs = Vec::new();
    let mut max_weight = 0.0_f64;

    for line in reader.lines() {
        let line = line.with_context(|| format!("cannot read {}", path.display()))?;
        let mut fields = line.split_ascii_whitespace();
        let (Some(src), Some(dst), Some(weight)) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };
        let (Ok(src), Ok(dst), Ok(weight)) = (
            src.parse::<u64>(),
            dst.parse::<u64>(),
            weight.parse::<f64>(),
        ) else {
            continue;
        };
        if !weight.is_finite() || weight < 0.0 {
            continue;
        }

        let next_id = index.len();
        let src = *index.entry(src).or_insert(next_id);
        let next_id = index.len();
        let dst = *index.entry(dst).or_insert(next_id);

        max_weight = max_weight.max(weight);
        arcs.push((src, dst, weight));
    }

    if normalize_weights && max_weight > 0.0 {
        for arc in &mut arcs {
            arc.2 /= max_weight;
        }
    }

    let num_nodes = index.len();
    log::info!(
        "Loaded graph from {}: {} nodes, {} arcs",
        path.display(),
        num_nodes,
        arcs.len()
    );
    Ok(CsrGraph::from_arcs(num_nodes, &arcs))
}

/// Saves a graph in the text format read by [`parse_graph`].
pub fn save_graph(graph: &CsrGraph, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for node in 0..graph.num_nodes() {
        for (succ, weight) in graph.successors(node) {
            writeln!(writer, "{node} {succ} {weight}")?;
        }
    }
    writer.flush()?;

    log::info!(
        "Saved graph to {}: {} nodes, {} arcs",
        path.display(),
        graph.num_nodes(),
        graph.num_arcs()
    );
    Ok(())
}

/// Returns whether two distance vectors are equal up to `epsilon`, with
/// `+∞` comparing equal only to itself.
pub fn distances_equal(lhs: &[f64], rhs: &[f64], epsilon: f64) -> bool {
    lhs.len() == rhs.len()
        && lhs.iter().zip(rhs).all(|(&a, &b)| {
            if a.is_infinite() || b.is_infinite() {
                a == b
            } else {
                (a - b).abs() <= epsilon
            }
        })
}
