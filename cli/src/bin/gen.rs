/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dsi_progress_logger::{progress_logger, ProgressLog};

use sssp::graphs::random::{self, WeightDistribution};
use sssp::graphs::CsrGraph;
use sssp::utils::save_graph;
use sssp_cli::init_env_logger;

#[derive(Parser, Debug)]
#[command(name = "sssp-gen")]
/// Generates the benchmark graph corpus as text files.
struct Cli {
    /// Output directory.
    #[arg(long, default_value = "assets/test_cases")]
    dir: PathBuf,
}

fn main() -> Result<()> {
    init_env_logger()?;
    let cli = Cli::parse();

    std::fs::create_dir_all(&cli.dir)
        .with_context(|| format!("cannot create {}", cli.dir.display()))?;

    use WeightDistribution::{PowerLaw, Uniform};
    let corpus: Vec<(&str, Box<dyn Fn() -> CsrGraph>)> = vec![
        (
            "random_sparse",
            Box::new(|| random::random_graph(50_000, 500_000, Uniform, true, 12345)),
        ),
        (
            "random_dense",
            Box::new(|| random::random_graph(5_000, 500_000, Uniform, true, 23456)),
        ),
        (
            "random_power_law",
            Box::new(|| random::random_graph(50_000, 500_000, PowerLaw, true, 34567)),
        ),
        (
            "complete",
            Box::new(|| random::complete_graph(700, Uniform, 45678)),
        ),
        (
            "scale_free",
            Box::new(|| random::scale_free_graph(50_000, 8, Uniform, 56789)),
        ),
        (
            "grid",
            Box::new(|| random::grid_graph(300, 300, Uniform, 67890)),
        ),
        (
            "path",
            Box::new(|| random::path_graph(100_000, Uniform, 78901)),
        ),
    ];

    let mut pl = progress_logger![item_name = "graph"];
    pl.expected_updates(Some(corpus.len()));
    pl.start(format!("Generating {} graphs", corpus.len()));

    for (name, generate) in &corpus {
        let graph = generate();
        let path = cli.dir.join(format!("{name}.txt"));
        log::info!(
            "{name}: {} nodes, {} arcs",
            graph.num_nodes(),
            graph.num_arcs()
        );
        save_graph(&graph, &path)?;
        pl.update();
    }
    pl.done();

    Ok(())
}
