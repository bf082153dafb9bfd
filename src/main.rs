//! NPV Calculator CLI
//!
//! Command-line interface for sweeping NPV across a range of discount rates

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::warn;
use npv_calculator::{
    input::{load_cash_flows_csv, parse_cash_flows},
    report::write_results_csv,
    CancellationFlag, EngineConfig, NpvApplicationService, NpvError, NpvRequest,
};
use rust_decimal::Decimal;
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "npv_calculator", version, about = "Sweep NPV across a range of discount rates")]
struct Args {
    /// Comma-separated cash flows, period 0 first (e.g. "-1000,300,400,500")
    #[arg(long, allow_hyphen_values = true, conflicts_with = "cash_flows_file")]
    cash_flows: Option<String>,

    /// CSV file with one cash flow per row (`amount` column or first column)
    #[arg(long)]
    cash_flows_file: Option<PathBuf>,

    /// Lower bound rate in percent
    #[arg(long, allow_hyphen_values = true)]
    lower: Decimal,

    /// Upper bound rate in percent
    #[arg(long, allow_hyphen_values = true)]
    upper: Decimal,

    /// Rate increment in percent
    #[arg(long)]
    increment: Decimal,

    /// JSON engine config (limits, yield cadence)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write results to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the full response as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::from_json_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    Ok(config.with_env_overrides()?)
}

fn load_cash_flows(args: &Args) -> Result<Vec<Decimal>> {
    if let Some(path) = &args.cash_flows_file {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        return Ok(load_cash_flows_csv(file)?);
    }
    match &args.cash_flows {
        Some(text) => Ok(parse_cash_flows(text)?),
        None => bail!("either --cash-flows or --cash-flows-file is required"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let request = NpvRequest::new(load_cash_flows(&args)?, args.lower, args.upper, args.increment);

    // Ctrl-C stops the sweep between rates
    let cancel = CancellationFlag::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling calculation");
            on_interrupt.cancel();
        }
    });

    let service = NpvApplicationService::new(&config);
    let response = match service.process(Some(&request), &cancel).await {
        Ok(response) => response,
        Err(NpvError::Cancelled) => bail!("calculation cancelled"),
        Err(e) => return Err(e).context("NPV calculation failed"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        for warning in &response.warnings {
            println!("Warning: {}", warning);
        }
        for error in &response.errors {
            println!("Error: {}", error);
        }
    }

    let Some(results) = response.data.as_deref() else {
        bail!("request failed validation with {} errors", response.errors.len());
    };

    if !args.json {
        println!("{:>10} {:>18}", "Rate (%)", "NPV");
        println!("{}", "-".repeat(29));
        for result in results {
            println!("{:>10.2} {:>18.2}", result.rate, result.value);
        }
        println!("\n{} rates evaluated", results.len());
    }

    if let Some(path) = &args.output {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_results_csv(file, results).map_err(|e| anyhow::anyhow!("writing results CSV: {}", e))?;
        if !args.json {
            println!("Results written to: {}", path.display());
        }
    }

    Ok(())
}
