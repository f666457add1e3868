//! Batch runner for the MCDA engine.
//!
//! Reads one JSON task file, runs the pipeline it names and prints the
//! result as JSON on stdout. Logs go to stderr.
//!
//! ```bash
//! mcda-engine task.json
//! mcda-engine --config mcda.toml --pretty task.json
//! ```

use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde::Deserialize;
use tracing::{error, info};

use mcda_engine::adapters::LogTraceObserver;
use mcda_engine::application::{
    EvaluateFuzzyAlternativesHandler, RankCertainAlternativesCommand,
    RankCertainAlternativesHandler, RankUncertainAlternativesCommand,
    RankUncertainAlternativesHandler,
};
use mcda_engine::config::{init_tracing, EngineConfig};
use mcda_engine::domain::fuzzy::FuzzyTask;
use mcda_engine::ports::TraceObserver;

/// Multi-criteria decision analysis over a JSON task file
#[derive(Parser, Debug)]
#[command(name = "mcda-engine")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Task file with a top-level "pipeline" tag
    task: PathBuf,

    /// TOML or JSON engine configuration; environment variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "pipeline", rename_all = "kebab-case")]
enum BatchTask {
    Certain(RankCertainAlternativesCommand),
    Uncertain(RankUncertainAlternativesCommand),
    Fuzzy(FuzzyTask),
}

fn main() {
    if let Err(e) = run() {
        error!(error = %e, "run failed");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load_from_file(path)?,
        None => EngineConfig::load()?,
    };
    config.validate()?;
    init_tracing(&config.logging)?;

    let task: BatchTask = serde_json::from_str(&fs::read_to_string(&cli.task)?)?;
    info!(task = %cli.task.display(), "task loaded");

    let observer: Arc<dyn TraceObserver> = Arc::new(LogTraceObserver::new());
    let output = match task {
        BatchTask::Certain(cmd) => {
            let handler = RankCertainAlternativesHandler::from_config(observer, &config);
            serde_json::to_value(handler.handle(cmd)?)?
        }
        BatchTask::Uncertain(cmd) => {
            let handler = RankUncertainAlternativesHandler::new(observer);
            serde_json::to_value(handler.handle(cmd)?)?
        }
        BatchTask::Fuzzy(task) => {
            let handler = EvaluateFuzzyAlternativesHandler::from_config(observer, &config);
            serde_json::to_value(handler.handle(task)?)?
        }
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);
    Ok(())
}
