//! Cutlist CLI: compute cutting plans for linear stock.

mod job;
mod report;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cutlist_core::{CutList, Optimizer, OptimizerConfig, DEFAULT_KERF, DEFAULT_STOCK_LENGTH};
use tracing_subscriber::EnvFilter;

use crate::job::PlanResponse;

#[derive(Parser)]
#[command(name = "cutlist")]
#[command(about = "Cutting plan optimizer for bar stock and lumber")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a plan from lengths given on the command line
    Plan {
        /// Part lengths in mm, a single value or comma-separated (repeatable)
        #[arg(short, long, required = true)]
        parts: Vec<String>,

        /// Number of parts to create for each length
        #[arg(short, long, default_value = "1")]
        quantity: usize,

        /// Stock lengths in mm, a single value or comma-separated (repeatable)
        #[arg(short, long)]
        stock: Vec<String>,

        /// Number of default-length stock pieces to add
        #[arg(long, default_value = "0")]
        default_pieces: usize,

        /// Saw kerf in mm
        #[arg(short, long, default_value_t = DEFAULT_KERF)]
        kerf: f64,

        /// Default stock length in mm, used for default and overflow pieces
        #[arg(short, long, default_value_t = DEFAULT_STOCK_LENGTH)]
        default_length: f64,

        /// Print the plan as JSON instead of a text report
        #[arg(long)]
        json: bool,

        /// Write the output to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a JSON job file
    Run {
        /// Path to the JSON job file
        file: PathBuf,

        /// Write the JSON response to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

fn emit(text: &str, output: Option<PathBuf>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(&path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Saved to: {}", path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Plan {
            parts,
            quantity,
            stock,
            default_pieces,
            kerf,
            default_length,
            json,
            output,
        } => {
            let config = OptimizerConfig::new()
                .with_kerf(kerf)
                .with_default_stock_length(default_length);
            let mut job = CutList::new(config);

            for input in &parts {
                job.parts
                    .add(input, quantity)
                    .with_context(|| format!("invalid part lengths '{input}'"))?;
            }
            for input in &stock {
                job.stock
                    .add(input)
                    .with_context(|| format!("invalid stock lengths '{input}'"))?;
            }
            for _ in 0..default_pieces {
                job.add_default_stock()?;
            }

            if job.stock.is_empty() {
                println!("No stock given. Add stock with --stock or --default-pieces.");
                return Ok(());
            }

            let (plan, balance) = Optimizer::new(job.config.clone())
                .solve_with_report(job.parts.as_slice(), job.stock.as_slice())?;
            log::info!(
                "balancing ran {} rounds with {} relocations",
                balance.rounds,
                balance.relocations
            );

            let text = if json {
                serde_json::to_string_pretty(&PlanResponse::from_plan(plan, Some(balance)))?
            } else {
                report::render_plan(&plan)
            };
            emit(&text, output)?;
        }

        Commands::Run { file, output } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read job {}", file.display()))?;
            let response = job::run_job_json(&content);

            if let Some(error) = &response.error {
                log::warn!("job failed: {error}");
            }

            match output {
                Some(path) => {
                    job::save_response(&response, &path)?;
                    eprintln!("Results saved to: {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&response)?),
            }

            if !response.success {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
