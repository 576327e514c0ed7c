// Copyright 2025 the Plugviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runs one pluggable visualization over a reference point read from JSON.
//!
//! Prints the extended reference point and, unless `--no-execution` is given, the execution
//! the chart would request. Set `RUST_LOG=debug` to trace the pipeline stages.

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use plugviz_charts::{
    DefaultExecutionFactory, ExecutionDefinition, Settings, VisualizationCatalog,
};
use plugviz_model::{ExtendedReferencePoint, ReferencePoint};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "plugviz", version)]
#[command(about = "Normalize a reference point for a chart type")]
struct Cli {
    /// Chart type, e.g. `column` or `headline`.
    #[arg(required_unless_present = "list")]
    chart: Option<String>,
    /// Reference point JSON file; `-` reads standard input.
    #[arg(default_value = "-")]
    input: PathBuf,
    /// Settings JSON file.
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
    /// Allow over-time comparison with week granularity.
    #[arg(long, env = "PLUGVIZ_WEEK_FILTERS")]
    week_filters: bool,
    /// Skip describing the execution.
    #[arg(long)]
    no_execution: bool,
    /// List chart types and exit.
    #[arg(long)]
    list: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Output {
    extended_reference_point: ExtendedReferencePoint,
    #[serde(skip_serializing_if = "Option::is_none")]
    execution: Option<ExecutionDefinition>,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        Ok(input)
    } else {
        fs::read_to_string(path)
    }
}

fn load_settings(cli: &Cli) -> Result<Settings, Box<dyn Error>> {
    let mut settings = match &cli.settings {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Settings::default(),
    };
    settings.enable_week_filters |= cli.week_filters;
    Ok(settings)
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();
    let catalog = VisualizationCatalog::new(load_settings(&cli)?);

    if cli.list {
        for name in catalog.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let chart = cli.chart.as_deref().unwrap_or_default();
    let visualization = catalog.get(chart)?;
    let reference_point: ReferencePoint = serde_json::from_str(&read_input(&cli.input)?)?;
    info!(
        chart,
        buckets = reference_point.buckets.len(),
        "normalizing reference point"
    );

    let extended_reference_point = visualization.get_extended_reference_point(&reference_point)?;
    let execution = if cli.no_execution {
        None
    } else {
        Some(visualization.build_execution(&reference_point, &DefaultExecutionFactory)?)
    };
    let output = Output {
        extended_reference_point,
        execution,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
