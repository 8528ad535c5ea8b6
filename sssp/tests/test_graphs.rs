/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::io::Write;

use anyhow::Result;

use sssp::graphs::random::{self, WeightDistribution};
use sssp::graphs::CsrGraph;
use sssp::solvers::{Dijkstra, Solver};
use sssp::utils::{parse_graph, save_graph};

#[test]
fn test_csr_construction() -> Result<()> {
    let arcs = [
        (0, 1, 0.5),
        (0, 2, 1.5),
        (2, 0, 0.25),
        (0, 0, 3.0),
        (3, 1, 0.125),
    ];
    let graph = CsrGraph::from_arcs(4, &arcs);

    assert_eq!(graph.num_nodes(), 4);
    assert_eq!(graph.num_arcs(), 5);
    assert_eq!(graph.outdegree(0), 3);
    assert_eq!(graph.outdegree(1), 0);
    assert_eq!(graph.outdegree(2), 1);
    assert_eq!(graph.outdegree(3), 1);
    assert_eq!(graph.max_weight(), 3.0);

    // Successors keep their insertion order.
    let succ: Vec<_> = graph.successors(0).collect();
    assert_eq!(succ, vec![(1, 0.5), (2, 1.5), (0, 3.0)]);
    assert_eq!(graph.arc(2, 0), (0, 0.25));
    Ok(())
}

#[test]
fn test_empty_graph() -> Result<()> {
    let graph = CsrGraph::new();
    assert_eq!(graph.num_nodes(), 0);
    assert_eq!(graph.num_arcs(), 0);
    assert_eq!(graph.max_weight(), 0.0);
    Ok(())
}

#[test]
#[should_panic(expected = "out of range")]
fn test_arc_out_of_range_panics() {
    let _ = CsrGraph::from_arcs(2, &[(0, 2, 1.0)]);
}

#[test]
#[should_panic(expected = "non-negative")]
fn test_negative_weight_panics() {
    let _ = CsrGraph::from_arcs(2, &[(0, 1, -1.0)]);
}

#[test]
fn test_random_graph_is_connected() -> Result<()> {
    // The generator extracts the largest connected component, so with
    // undirected arcs every node must be reachable from every source.
    let graph = random::random_graph(500, 1500, WeightDistribution::Uniform, true, 42);
    let distances = Dijkstra.compute(&graph, 0);
    assert!(distances.iter().all(|d| d.is_finite()));
    Ok(())
}

#[test]
fn test_generators_are_deterministic() -> Result<()> {
    let first = random::random_graph(200, 600, WeightDistribution::Uniform, true, 99);
    let second = random::random_graph(200, 600, WeightDistribution::Uniform, true, 99);
    assert_eq!(first.num_nodes(), second.num_nodes());
    assert_eq!(first.num_arcs(), second.num_arcs());
    for node in 0..first.num_nodes() {
        let lhs: Vec<_> = first.successors(node).collect();
        let rhs: Vec<_> = second.successors(node).collect();
        assert_eq!(lhs, rhs);
    }
    Ok(())
}

#[test]
fn test_weight_ranges() -> Result<()> {
    let uniform = random::random_graph(300, 900, WeightDistribution::Uniform, false, 1);
    for node in 0..uniform.num_nodes() {
        for (_, weight) in uniform.successors(node) {
            assert!((0.0..1.0).contains(&weight));
        }
    }

    let power_law = random::random_graph(300, 900, WeightDistribution::PowerLaw, false, 2);
    for node in 0..power_law.num_nodes() {
        for (_, weight) in power_law.successors(node) {
            assert!(weight > 0.0 && weight < 1.0);
        }
    }
    Ok(())
}

#[test]
fn test_grid_and_path_shapes() -> Result<()> {
    let grid = random::grid_graph(5, 7, WeightDistribution::Uniform, 3);
    assert_eq!(grid.num_nodes(), 35);
    // 2 directions * (rows * (cols - 1) + (rows - 1) * cols) links.
    assert_eq!(grid.num_arcs(), 2 * (5 * 6 + 4 * 7));

    let path = random::path_graph(10, WeightDistribution::Uniform, 4);
    assert_eq!(path.num_nodes(), 10);
    assert_eq!(path.num_arcs(), 9);
    assert_eq!(path.outdegree(9), 0);
    Ok(())
}

#[test]
fn test_scale_free_graph_is_connected() -> Result<()> {
    let graph = random::scale_free_graph(400, 4, WeightDistribution::Uniform, 5);
    let distances = Dijkstra.compute(&graph, 0);
    assert!(distances.iter().all(|d| d.is_finite()));
    Ok(())
}

#[test]
fn test_graph_file_round_trip() -> Result<()> {
    let graph = random::random_graph(100, 400, WeightDistribution::Uniform, true, 6);

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("round_trip.txt");
    save_graph(&graph, &path)?;
    let reloaded = parse_graph(&path, false)?;

    assert_eq!(reloaded.num_nodes(), graph.num_nodes());
    assert_eq!(reloaded.num_arcs(), graph.num_arcs());
    // save_graph writes nodes in order, so the insertion-order remap of
    // parse_graph is the identity.
    for node in 0..graph.num_nodes() {
        let original: Vec<_> = graph.successors(node).collect();
        let read_back: Vec<_> = reloaded.successors(node).collect();
        assert_eq!(original.len(), read_back.len());
        for ((s1, w1), (s2, w2)) in original.iter().zip(&read_back) {
            assert_eq!(s1, s2);
            assert!((w1 - w2).abs() < 1e-12);
        }
    }
    Ok(())
}

#[test]
fn test_parse_skips_malformed_lines() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("messy.txt");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "0 1 0.5")?;
    writeln!(file)?;
    writeln!(file, "not a line")?;
    writeln!(file, "1 2")?;
    writeln!(file, "1 2 -3.0")?;
    writeln!(file, "7 9 0.25")?;
    drop(file);

    let graph = parse_graph(&path, false)?;
    // External IDs 0, 1, 7, 9 remapped in order of first appearance.
    assert_eq!(graph.num_nodes(), 4);
    assert_eq!(graph.num_arcs(), 2);
    assert_eq!(graph.arc(0, 0), (1, 0.5));
    assert_eq!(graph.arc(2, 0), (3, 0.25));
    Ok(())
}

#[test]
fn test_parse_normalizes_weights() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("normalize.txt");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "0 1 2.0")?;
    writeln!(file, "1 2 4.0")?;
    drop(file);

    let graph = parse_graph(&path, true)?;
    assert_eq!(graph.arc(0, 0), (1, 0.5));
    assert_eq!(graph.arc(1, 0), (2, 1.0));
    assert_eq!(graph.max_weight(), 1.0);
    Ok(())
}
