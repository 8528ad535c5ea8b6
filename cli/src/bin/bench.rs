/*
 * SPDX-FileCopyrightText: 2025 The sssp-rs Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dsi_progress_logger::{progress_logger, ProgressLog};

use sssp::graphs::CsrGraph;
use sssp::utils::{distances_equal, parse_graph, DISTANCE_EPSILON};
use sssp_cli::{bench_suite, init_env_logger, timed_compute};

const DEFAULT_TEST_CASES_DIR: &str = "assets/test_cases";
const CSV_PATH: &str = "benchmark_results.csv";

#[derive(Parser, Debug)]
#[command(name = "sssp-bench")]
/// Benchmarks every solver configuration over the given graph files.
///
/// Graphs are text files with one `src dst weight` triple per line. With no
/// files given, `assets/test_cases/*.txt` is scanned in alphabetical order.
/// Results go to the console and to `benchmark_results.csv`.
///
/// Noteworthy environment variables:
///
/// - RUST_LOG: configuration for env_logger
///   <https://docs.rs/env_logger/latest/env_logger/>
struct Cli {
    /// Iterations per (graph, configuration) pair.
    #[arg(long, default_value_t = 5)]
    runs: usize,

    /// Graph files to benchmark.
    files: Vec<PathBuf>,
}

struct Record {
    graph: String,
    algorithm: String,
    configuration: String,
    vertices: usize,
    edges: usize,
    source: usize,
    delta: f64,
    threads: usize,
    min_ms: f64,
    avg_ms: f64,
    max_ms: f64,
    num_runs: usize,
    speedup: f64,
    efficiency: f64,
    correct: bool,
}

fn main() -> Result<()> {
    init_env_logger()?;
    let cli = Cli::parse();

    if cli.runs == 0 {
        bail!("--runs must be positive");
    }

    let files = if cli.files.is_empty() {
        scan_test_cases()?
    } else {
        cli.files
    };
    if files.is_empty() {
        bail!(
            "no graph files found; pass them as arguments, or generate \
             {DEFAULT_TEST_CASES_DIR} with sssp-gen"
        );
    }

    log::info!("Benchmarking {} graph files, {} runs each", files.len(), cli.runs);

    let mut records = Vec::new();
    for file in &files {
        let graph = match parse_graph(file, false) {
            Ok(graph) => graph,
            Err(error) => {
                log::error!("skipping {}: {error:#}", file.display());
                continue;
            }
        };
        if graph.num_nodes() == 0 {
            log::warn!("skipping empty graph {}", file.display());
            continue;
        }
        let name = file
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        benchmark_graph(&graph, &name, cli.runs, &mut records);
    }

    if records.is_empty() {
        bail!("no graph could be benchmarked");
    }

    print_table(&records);
    save_csv(&records, CSV_PATH)?;
    log::info!("Results saved to {CSV_PATH}");

    Ok(())
}

fn scan_test_cases() -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let dir = match std::fs::read_dir(DEFAULT_TEST_CASES_DIR) {
        Ok(dir) => dir,
        Err(_) => return Ok(files),
    };
    for entry in dir {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn benchmark_graph(graph: &CsrGraph, name: &str, runs: usize, records: &mut Vec<Record>) {
    let source = 0;
    let configs = bench_suite(&[0.01, 0.2, 0.6], &[2, 4, 8, 16]);

    let mut pl = progress_logger![item_name = "config"];
    pl.expected_updates(Some(configs.len()));
    pl.start(format!(
        "Benchmarking {name}: {} nodes, {} arcs",
        graph.num_nodes(),
        graph.num_arcs()
    ));

    let mut reference: Option<(Vec<f64>, f64)> = None;
    for config in &configs {
        let mut times_ms = Vec::with_capacity(runs);
        let mut first_distances = None;
        for run in 0..runs {
            let (distances, elapsed) = timed_compute(config.solver.as_ref(), graph, source);
            times_ms.push(elapsed.as_secs_f64() * 1e3);
            if run == 0 {
                first_distances = Some(distances);
            }
        }
        let distances = first_distances.expect("runs is positive");
        let min_ms = times_ms.iter().copied().fold(f64::INFINITY, f64::min);
        let max_ms = times_ms.iter().copied().fold(0.0, f64::max);
        let avg_ms = times_ms.iter().sum::<f64>() / times_ms.len() as f64;

        let (correct, speedup) = if let Some((reference_distances, reference_avg_ms)) = &reference
        {
            (
                distances_equal(reference_distances, &distances, DISTANCE_EPSILON),
                reference_avg_ms / avg_ms,
            )
        } else {
            reference = Some((distances, avg_ms));
            (true, 1.0)
        };

        records.push(Record {
            graph: name.into(),
            algorithm: config.solver.name(),
            configuration: config.config_name.clone(),
            vertices: graph.num_nodes(),
            edges: graph.num_arcs(),
            source,
            delta: config.delta,
            threads: config.threads,
            min_ms,
            avg_ms,
            max_ms,
            num_runs: runs,
            speedup,
            efficiency: speedup / config.threads as f64,
            correct,
        });
        pl.update();
    }
    pl.done();
}

fn print_table(records: &[Record]) {
    println!("{}", "=".repeat(150));
    println!(
        "{:<24} {:<42} {:<30} {:>9} {:>10} {:>7} {:>10} {:>8} {:>6} {:>7}",
        "Graph", "Algorithm", "Configuration", "Vertices", "Edges", "Threads", "Avg(ms)", "Speedup",
        "Eff", "Correct"
    );
    println!("{}", "-".repeat(150));
    let mut current_graph = "";
    for record in records {
        if record.graph != current_graph {
            if !current_graph.is_empty() {
                println!("{}", "-".repeat(150));
            }
            current_graph = &record.graph;
        }
        println!(
            "{:<24} {:<42} {:<30} {:>9} {:>10} {:>7} {:>10.2} {:>7.2}x {:>6.2} {:>7}",
            record.graph,
            record.algorithm,
            record.configuration,
            record.vertices,
            record.edges,
            record.threads,
            record.avg_ms,
            record.speedup,
            record.efficiency,
            if record.correct { "PASS" } else { "FAIL" }
        );
    }
    println!("{}", "=".repeat(150));
}

fn save_csv(records: &[Record], path: &str) -> Result<()> {
    let mut csv = File::create(path).with_context(|| format!("cannot create {path}"))?;
    writeln!(
        csv,
        "Graph,Algorithm,Configuration,Vertices,Edges,Source,Delta,Threads,\
         Min_Time_ms,Avg_Time_ms,Max_Time_ms,Num_Runs,Speedup,Efficiency,Correct"
    )?;
    for record in records {
        writeln!(
            csv,
            "{},{},{},{},{},{},{},{},{:.3},{:.3},{:.3},{},{:.3},{:.3},{}",
            record.graph,
            record.algorithm,
            record.configuration,
            record.vertices,
            record.edges,
            record.source,
            record.delta,
            record.threads,
            record.min_ms,
            record.avg_ms,
            record.max_ms,
            record.num_runs,
            record.speedup,
            record.efficiency,
            if record.correct { "PASS" } else { "FAIL" }
        )?;
    }
    Ok(())
}
