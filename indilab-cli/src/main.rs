//! indilab CLI — inspect and calculate indicators.
//!
//! Commands:
//! - `list` — registered indicator names
//! - `describe` — caption, logic description, parameters and a config template
//! - `calc` — calculate indicators over a CSV bar file and print JSON

mod bars;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;

use indilab_core::components::{Components, Indicator, IndicatorRegistry, IndicatorSlot};
use indilab_core::config::IndicatorConfig;

#[derive(Parser)]
#[command(name = "indilab", about = "indilab CLI — technical indicators over bar files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered indicator names.
    List,
    /// Show an indicator's caption, logic and parameters.
    Describe {
        /// Registered indicator name (e.g. rsi, macd).
        name: Option<String>,

        /// Indicator config file (TOML or JSON) instead of a name.
        #[arg(long)]
        config: Option<PathBuf>,

        /// open_filter or close_filter.
        #[arg(long, default_value = "open_filter", value_parser = parse_slot)]
        slot: IndicatorSlot,
    },
    /// Calculate indicators over a CSV bar file.
    Calc {
        /// CSV file with time,open,high,low,close[,volume] columns.
        #[arg(long)]
        bars: PathBuf,

        /// Indicator names with default parameters (repeatable).
        #[arg(long = "indicator")]
        indicators: Vec<String>,

        /// Indicator config files (repeatable).
        #[arg(long = "config")]
        configs: Vec<PathBuf>,

        /// Price of one point (minimal price step) of the instrument.
        #[arg(long, default_value_t = 0.0001)]
        point: f64,

        /// Slot for indicators given with --indicator.
        #[arg(long, default_value = "open_filter", value_parser = parse_slot)]
        slot: IndicatorSlot,

        /// Write JSON here instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn parse_slot(text: &str) -> Result<IndicatorSlot, String> {
    IndicatorSlot::parse(text).ok_or_else(|| format!("unknown slot '{text}' (open_filter, close_filter)"))
}

#[derive(Serialize)]
struct CalcOutput<'a> {
    indicator: &'a str,
    caption: String,
    description: String,
    components: Components,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => run_list(),
        Commands::Describe { name, config, slot } => run_describe(name, config, slot),
        Commands::Calc {
            bars,
            indicators,
            configs,
            point,
            slot,
            output,
        } => run_calc(bars, indicators, configs, point, slot, output),
    }
}

fn run_list() -> Result<()> {
    let registry = IndicatorRegistry::global();
    for name in registry.names() {
        let ind = registry.create(name, IndicatorSlot::OpenFilter)?;
        println!("{:<26} {}", name, ind.title());
    }
    Ok(())
}

fn run_describe(name: Option<String>, config: Option<PathBuf>, slot: IndicatorSlot) -> Result<()> {
    let indicator = match (name, config) {
        (Some(_), Some(_)) => bail!("a name and --config are mutually exclusive"),
        (None, None) => bail!("one of a name or --config is required"),
        (Some(name), None) => IndicatorRegistry::global().create(&name, slot)?,
        (None, Some(path)) => IndicatorConfig::load(&path)?
            .build()
            .with_context(|| format!("build indicator from {}", path.display()))?,
    };

    print_description(indicator.as_ref())
}

fn print_description(indicator: &dyn Indicator) -> Result<()> {
    let params = indicator.params();

    println!("{}", indicator.caption());
    println!("{}", indicator.describe());
    println!();
    println!("--- Parameters ---");
    for c in params.choices() {
        println!("{:<18} {:<28} {}", c.key, c.caption, c.selected());
        for (i, option) in c.options().iter().enumerate() {
            let marker = if i == c.index() { '*' } else { ' ' };
            println!("{:<18}   {marker} {option}", "");
        }
    }
    for n in params.numerics() {
        println!(
            "{:<18} {:<28} {} [{} .. {}]",
            n.key,
            n.caption,
            n.display(),
            n.min(),
            n.max()
        );
    }
    for f in params.flags() {
        println!("{:<18} {:<28} {}", f.key, f.caption, f.checked);
    }

    println!();
    println!("--- Config ---");
    print!("{}", IndicatorConfig::from_indicator(indicator).to_toml_string()?);
    Ok(())
}

fn run_calc(
    bars_path: PathBuf,
    names: Vec<String>,
    config_paths: Vec<PathBuf>,
    point: f64,
    slot: IndicatorSlot,
    output: Option<PathBuf>,
) -> Result<()> {
    if names.is_empty() && config_paths.is_empty() {
        bail!("at least one --indicator or --config is required");
    }

    let series = bars::load_bars(&bars_path, point)?;

    let registry = IndicatorRegistry::global();
    let mut indicators: Vec<Box<dyn Indicator>> = Vec::new();
    for name in &names {
        indicators.push(registry.create(name, slot)?);
    }
    for path in &config_paths {
        let indicator = IndicatorConfig::load(path)?
            .build()
            .with_context(|| format!("build indicator from {}", path.display()))?;
        indicators.push(indicator);
    }

    let results: Vec<CalcOutput<'_>> = indicators
        .par_iter()
        .map(|ind| CalcOutput {
            indicator: ind.name(),
            caption: ind.caption(),
            description: ind.describe(),
            components: ind.calculate(&series),
        })
        .collect();

    let json = serde_json::to_string_pretty(&results)?;
    match output {
        Some(path) => {
            std::fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
            tracing::info!(path = %path.display(), indicators = results.len(), "wrote results");
        }
        None => println!("{json}"),
    }
    Ok(())
}
