//! Command implementations for the lexeval CLI.

use anyhow::{Context, Result};
use log::debug;

use crate::analysis::Variant;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::PipelineConfig;
use crate::pipeline;

/// Execute a CLI command.
pub fn execute_command(args: LexevalArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::ProcessQueries => process_queries(&config, &args),
        Command::Invert(variant_args) => invert(&config, variant_args.variant, &args),
        Command::Index(variant_args) => index(&config, variant_args.variant, &args),
        Command::Search(variant_args) => search(&config, variant_args.variant, &args),
        Command::Run => run(&config, &args),
        Command::Report(report_args) => report(&config, report_args, &args),
    }
}

fn load_config(args: &LexevalArgs) -> Result<PipelineConfig> {
    let config = PipelineConfig::load(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("Failed to load instructions from '{}'", path.display()),
        None => "Failed to load the default configuration".to_string(),
    })?;
    debug!("Configuration: {config:?}");
    Ok(config)
}

fn process_queries(config: &PipelineConfig, cli_args: &LexevalArgs) -> Result<()> {
    let summary = pipeline::process_queries(config).context("Processing queries failed")?;
    output_result("Processed queries", &summary, cli_args)?;
    Ok(())
}

fn invert(config: &PipelineConfig, variant: Variant, cli_args: &LexevalArgs) -> Result<()> {
    let summary = pipeline::generate_inverted_list(config, variant)
        .with_context(|| format!("Generating the {variant} inverted list failed"))?;
    output_result("Generated inverted list", &summary, cli_args)?;
    Ok(())
}

fn index(config: &PipelineConfig, variant: Variant, cli_args: &LexevalArgs) -> Result<()> {
    let summary = pipeline::build_model(config, variant)
        .with_context(|| format!("Building the {variant} model failed"))?;
    output_result("Built model", &summary, cli_args)?;
    Ok(())
}

fn search(config: &PipelineConfig, variant: Variant, cli_args: &LexevalArgs) -> Result<()> {
    let summary = pipeline::run_searches(config, variant)
        .with_context(|| format!("Searching with the {variant} model failed"))?;
    output_result("Ran queries", &summary, cli_args)?;
    Ok(())
}

fn run(config: &PipelineConfig, cli_args: &LexevalArgs) -> Result<()> {
    let summary = pipeline::run(config).context("Pipeline run failed")?;
    output_result("Completed all stages", &summary, cli_args)?;
    Ok(())
}

fn report(config: &PipelineConfig, args: &ReportArgs, cli_args: &LexevalArgs) -> Result<()> {
    let summary = pipeline::write_report(config, args.output.as_deref())
        .context("Writing the report failed")?;
    output_result("Wrote report", &summary, cli_args)?;
    Ok(())
}
