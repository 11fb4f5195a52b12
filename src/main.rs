//! simblend CLI.

use std::fs;
use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::Parser;
use simblend::logging::{init_logging, LogConfig, LogFormat};
use simblend::{
    levenshtein_matrix, Aggregator, Capabilities, Metric, MetricToggles, NormalizationMode,
    SimilarityConfig, SimilarityReport,
};
use tracing::{info, warn};

mod cli;

use crate::cli::{Cli, LogFormatArg};

fn main() {
    let cli = Cli::parse();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    let capabilities = Capabilities::detect();
    let config = config_from_cli(cli, &capabilities)?;
    let aggregator =
        Aggregator::new(capabilities, config).context("invalid similarity configuration")?;

    if cli.matrix {
        print!("{}", levenshtein_matrix(&cli.str1, &cli.str2));
        println!();
    }

    let report = aggregator
        .report(&cli.str1, &cli.str2)
        .with_context(|| format!("cannot compare {:?} and {:?}", cli.str1, cli.str2))?;

    for (metric, reason) in &report.skipped {
        warn!(%metric, ?reason, "metric skipped");
    }
    info!(score = report.score, "similarity");

    if cli.json {
        println!("{}", render_json(&report)?);
    } else if cli.breakdown {
        print_breakdown(&report);
    } else {
        println!("{:.6}", report.score);
    }
    Ok(())
}

/// Start from the config file (or the capability defaults) and apply flags.
fn config_from_cli(cli: &Cli, capabilities: &Capabilities) -> Result<SimilarityConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            SimilarityConfig::from_json(&json)
                .with_context(|| format!("failed to parse config file {}", path.display()))?
        }
        None => SimilarityConfig::for_capabilities(capabilities),
    };

    if cli.graphemic_only {
        config.metrics = MetricToggles::graphemic();
    }
    if cli.no_soundex {
        config.metrics.set(Metric::Soundex, false);
    }
    if cli.no_nysiis {
        config.metrics.set(Metric::Nysiis, false);
    }
    if let Some(normalization) = cli.normalization {
        config.edit_normalization = normalization.into();
    }
    if let Some(variant) = cli.soundex_variant {
        config.soundex_variant = variant.into();
    }
    if let Some(n) = cli.ngram {
        config.ngram.n = usize::from(n);
    }
    if cli.lowercase {
        config.normalization = Some(NormalizationMode::Lowercase);
    }
    Ok(config)
}

fn render_json(report: &SimilarityReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize report")
}

fn print_breakdown(report: &SimilarityReport) {
    println!("{:<18} {:>8} {:>8}", "metric", "value", "weight");
    for component in &report.components {
        println!(
            "{:<18} {:>8.4} {:>8.2}",
            component.metric.name(),
            component.value,
            component.weight
        );
    }
    for (metric, reason) in &report.skipped {
        println!("{:<18} skipped ({reason:?})", metric.name());
    }
    println!("{:<18} {:>8.4}", "score", report.score);
}

/// Build logging configuration from CLI flags.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !cli.verbosity.is_present();
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = cli.log_file.is_none() && io::stderr().is_terminal();
    config
}
