//! `flowbench` binary: run augmenting-path strategies on a DIMACS instance
//!
//! # Usage
//!
//! ```bash
//! flowbench graph.max
//! flowbench graph.max --strategy fattest --arity 4
//! flowbench graph.max 4 --strategy fattest
//! flowbench graph.max --strategy all --verify --stats
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

mod report;

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, info};

use flowbench_core::io::dimacs;
use flowbench_core::{verify_flow, MaxFlowEngine, SolverConfig, StrategyKind};

use crate::report::{write_comparison, write_result, write_summary, RunReport};

/// Which strategies to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    One(StrategyKind),
    All,
}

fn parse_selection(value: &str) -> Result<Selection, String> {
    if value.eq_ignore_ascii_case("all") {
        return Ok(Selection::All);
    }
    value
        .parse::<StrategyKind>()
        .map(Selection::One)
        .map_err(|err| err.to_string())
}

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(
    name = "flowbench",
    version,
    about = "Maximum flow by augmenting paths: shortest, randomized and fattest",
    long_about = None
)]
struct Args {
    /// DIMACS max-flow instance
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Heap fan-out for the fattest-path strategy (same as --arity)
    #[arg(value_name = "K", conflicts_with = "arity")]
    k: Option<usize>,

    /// Strategy to run: shortest, randomized, fattest or all
    #[arg(short, long, value_parser = parse_selection)]
    strategy: Option<Selection>,

    /// Heap fan-out for the fattest-path strategy
    #[arg(short = 'k', long)]
    arity: Option<usize>,

    /// Seed for the randomized strategy
    #[arg(long)]
    seed: Option<u64>,

    /// JSON solver configuration; flags override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Check each computed flow and its minimum cut certificate
    #[arg(long, default_value_t = false)]
    verify: bool,

    /// Print iteration statistics
    #[arg(long, default_value_t = false)]
    stats: bool,

    /// Print results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    /// Merge the configuration file with command-line overrides
    fn solver_config(&self) -> Result<(SolverConfig, Selection)> {
        let mut config = match &self.config {
            Some(path) => SolverConfig::from_json_file(path)?,
            None => SolverConfig::default(),
        };

        if let Some(arity) = self.arity.or(self.k) {
            config.arity = arity;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        let selection = match self.strategy {
            Some(Selection::One(kind)) => {
                config.strategy = kind;
                Selection::One(kind)
            }
            Some(Selection::All) => Selection::All,
            None => Selection::One(config.strategy),
        };

        config.validate()?;
        Ok((config, selection))
    }
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level.as_str()))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(&args) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(args, &mut out)
}

/// Load the instance, run the selected strategies and write the results to `out`
fn execute<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let (config, selection) = args.solver_config()?;
    let kinds: Vec<StrategyKind> = match selection {
        Selection::One(kind) => vec![kind],
        Selection::All => StrategyKind::all().to_vec(),
    };

    let mut instance = dimacs::read_from_file(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    info!("loaded {}", args.input.display());

    if !args.json {
        writeln!(
            out,
            "Graph has {} vertices and {} edges",
            instance.graph.vertex_count(),
            instance.graph.arc_count()
        )?;
    }

    let mut engine = MaxFlowEngine::new();
    let mut reports = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let mut strategy = config.build(kind)?;
        let arity = (kind == StrategyKind::Fattest).then_some(config.arity);

        instance.graph.reset_flow();
        let started = Instant::now();
        let result = engine.run(&mut instance.graph, instance.source, instance.sink, strategy.as_mut())?;
        let elapsed = started.elapsed();
        debug!("{} finished in {:?}", result.strategy, elapsed);

        let mut report = RunReport::new(&result, arity, elapsed, args.stats);
        if args.verify {
            let cut = verify_flow(&instance.graph, instance.source, instance.sink, result.max_flow)
                .with_context(|| format!("{} produced an invalid flow", report.label()))?;
            report.min_cut = Some(cut);
        }

        if !args.json {
            writeln!(out, "Running {} on {}", report.label(), args.input.display())?;
            write_result(out, &report)?;
            if args.stats {
                write_summary(out, &report.summary)?;
            }
        }
        reports.push(report);
    }

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
    } else if reports.len() > 1 {
        writeln!(out)?;
        write_comparison(out, &reports)?;
    }
    check_agreement(&reports)
}

/// Fail when the runs report different maximum flow values
fn check_agreement(reports: &[RunReport]) -> Result<()> {
    if let Some(first) = reports.first() {
        if let Some(other) = reports.iter().find(|report| report.max_flow != first.max_flow) {
            bail!(
                "strategies disagree on the maximum flow value: {} found {}, {} found {}",
                first.label(),
                first.max_flow,
                other.label(),
                other.max_flow
            );
        }
    }
    Ok(())
}
