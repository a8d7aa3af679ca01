//! FLOWSCOPE CLI - maximum flow and minimum cut with stepwise replay

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::debug;

use flowscope_core::{EdmondsKarp, FlowGraph, MaxFlowAlgorithm, SolverConfig};

mod report;
mod sample;

#[derive(Parser)]
#[command(name = "flowscope")]
#[command(about = "Edmonds-Karp maximum flow and minimum cut with stepwise replay", long_about = None)]
#[command(version)]
struct Cli {
    /// Solver configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print the full result as JSON instead of the step report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run on a graph document
    Run {
        /// Graph document path (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Source node id
        #[arg(short, long)]
        source: String,

        /// Sink node id
        #[arg(short = 't', long)]
        sink: String,
    },

    /// Run on the built-in six-node sample network from S to T
    Sample,

    /// Print the sample network as a graph document
    ExportSample,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { graph, source, sink } => {
            let text = fs::read_to_string(&graph)
                .with_context(|| format!("Failed to read graph document {}", graph.display()))?;
            let network = FlowGraph::from_json(&text)
                .with_context(|| format!("Invalid graph document {}", graph.display()))?;
            solve_and_print(&network, &source, &sink, config, cli.json)
        }
        Commands::Sample => {
            let network = sample::sample_network()?;
            solve_and_print(&network, sample::SOURCE, sample::SINK, config, cli.json)
        }
        Commands::ExportSample => {
            println!("{}", sample::sample_network()?.to_json_pretty()?);
            Ok(())
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(path: Option<&Path>) -> Result<SolverConfig> {
    let Some(path) = path else {
        return Ok(SolverConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = SolverConfig::from_json(&text)?;
    debug!("loaded config from {}: {:?}", path.display(), config);
    Ok(config)
}

fn solve_and_print(graph: &FlowGraph, source: &str, sink: &str, config: SolverConfig, json: bool) -> Result<()> {
    let mut solver = EdmondsKarp::with_config(config);
    let result = solver.solve(graph, source, sink)?;

    if json {
        println!("{}", result.to_json()?);
    } else {
        print!("{}", report::render(graph, source, sink, &result));
    }
    Ok(())
}
