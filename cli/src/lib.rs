/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]

use std::time::{Duration, Instant};

use anyhow::Result;

use sssp::graphs::CsrGraph;
use sssp::solvers::delta_stepping::{Par, Seq};
use sssp::solvers::{Dijkstra, Solver};

/// Initializes `env_logger` with an info default, overridable via
/// `RUST_LOG`.
pub fn init_env_logger() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .try_init()?;
    Ok(())
}

/// A solver together with the configuration it was built from.
pub struct SolverConfig {
    pub solver: Box<dyn Solver>,
    pub config_name: String,
    pub delta: f64,
    pub threads: usize,
}

/// The suite validated by the correctness driver: the Dijkstra reference
/// first, then the sequential and parallel Δ-stepping variants at one
/// `(delta, threads)` configuration.
pub fn check_suite(delta: f64, threads: usize) -> Vec<SolverConfig> {
    vec![
        SolverConfig {
            solver: Box::new(Dijkstra),
            config_name: "Dijkstra".into(),
            delta: 0.0,
            threads: 1,
        },
        SolverConfig {
            solver: Box::new(Seq::new(delta)),
            config_name: format!("Sequential_delta={delta}"),
            delta,
            threads: 1,
        },
        SolverConfig {
            solver: Box::new(Par::new(delta, threads)),
            config_name: format!("Parallel_delta={delta}_t={threads}"),
            delta,
            threads,
        },
    ]
}

/// The full benchmark grid: Dijkstra, sequential Δ-stepping per Δ, parallel
/// Δ-stepping per Δ × thread count.
pub fn bench_suite(deltas: &[f64], thread_counts: &[usize]) -> Vec<SolverConfig> {
    let mut configs = vec![SolverConfig {
        solver: Box::new(Dijkstra),
        config_name: "Dijkstra".into(),
        delta: 0.0,
        threads: 1,
    }];
    for &delta in deltas {
        configs.push(SolverConfig {
            solver: Box::new(Seq::new(delta)),
            config_name: format!("Sequential_delta={delta}"),
            delta,
            threads: 1,
        });
    }
    for &delta in deltas {
        for &threads in thread_counts {
            configs.push(SolverConfig {
                solver: Box::new(Par::new(delta, threads)),
                config_name: format!("Parallel_delta={delta}_t={threads}"),
                delta,
                threads,
            });
        }
    }
    configs
}

/// Runs a solver once, returning the distances and the elapsed wall time.
pub fn timed_compute(
    solver: &dyn Solver,
    graph: &CsrGraph,
    source: usize,
) -> (Vec<f64>, Duration) {
    let start = Instant::now();
    let distances = solver.compute(graph, source);
    (distances, start.elapsed())
}
