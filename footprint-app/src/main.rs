use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use footprint_core::form::FormSubmission;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod plotting;
mod workflow;

use config::AppConfig;
use workflow::{AnalysisOutput, ResultRequest};

#[derive(Parser)]
#[command(name = "footprint", version, about = "Estimate a lifestyle carbon footprint and chart it")]
struct Cli {
    /// YAML configuration file; built-in factors are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the emission score for one set of answers.
    Estimate(InputArgs),
    /// Score the answers, render the four charts and write a report directory.
    Report {
        #[command(flatten)]
        input: InputArgs,
        /// Historical dataset, overriding the configured path.
        #[arg(long)]
        data: Option<PathBuf>,
        /// Parent directory for the run folder, overriding the configured one.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Score an analysis query string, e.g. `daily_travel=10&habits=recycle,compost`.
    Query { query: String },
}

/// The lifestyle form. Amounts stay text so that malformed numbers are
/// reported the same way a web submission would be.
#[derive(Args)]
struct InputArgs {
    #[arg(long)]
    daily_travel: String,
    #[arg(long, default_value = "car_petrol")]
    transport_mode: String,
    #[arg(long)]
    energy_usage: String,
    #[arg(long, default_value = "grid")]
    energy_source: String,
    #[arg(long, default_value = "omnivore")]
    diet_type: String,
    /// Repeat for each habit: recycle, reusable_bags, avoid_plastic, compost.
    #[arg(long = "habit")]
    habits: Vec<String>,
}

impl From<InputArgs> for FormSubmission {
    fn from(args: InputArgs) -> Self {
        Self {
            daily_travel: args.daily_travel,
            transport_mode: args.transport_mode,
            energy_usage: args.energy_usage,
            energy_source: args.energy_source,
            diet_type: args.diet_type,
            habits: args.habits,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_analysis(analysis: &AnalysisOutput) {
    let score = &analysis.score;
    println!("Estimated carbon emission: {:.2} kg CO2", score.rounded());
    println!(
        "  travel {:.2} + energy {:.2} + diet {:.2} = {:.2}, habit discount {:.0}%",
        score.travel_term,
        score.energy_term,
        score.diet_term,
        score.raw,
        score.discount * 100.0
    );
    println!("{}", analysis.insight);
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Command::Estimate(input) => {
            let analysis = workflow::run_analysis(&config, &input.into())?;
            print_analysis(&analysis);
        }
        Command::Query { query } => {
            let form = FormSubmission::from_query(&query)?;
            let analysis = workflow::run_analysis(&config, &form)?;
            print_analysis(&analysis);
        }
        Command::Report {
            input,
            data,
            output_dir,
        } => {
            if let Some(data) = data {
                config.dataset_path = data;
            }
            if let Some(output_dir) = output_dir {
                config.output_dir = output_dir;
            }

            let form: FormSubmission = input.into();
            println!("Analysis query: {}", form.to_query());
            let analysis = workflow::run_analysis(&config, &form)?;
            print_analysis(&analysis);

            let report = workflow::run_result(&config, &ResultRequest::from(&analysis))
                .context("Could not build the results report")?;
            let run_dir = workflow::write_report(&config.output_dir, &report, Some(&analysis.score))?;
            println!("\nCharts and report written to '{}'", run_dir.display());
        }
    }

    Ok(())
}
