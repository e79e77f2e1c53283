use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::Level;

use pgxguide::cli;
use pgxguide::config::RunConfig;
use pgxguide::gene::Gene;
use pgxguide::genotype::VariantCall;
use pgxguide::provider::Provider;
use pgxguide::raw_data;
use pgxguide::report::build_report;

#[derive(Parser)]
#[command(
    name = "pgx_report",
    about = "Interpret pharmacogene genotypes into drug-dosing guidance"
)]
struct Cli {
    /// Path to a JSON run configuration
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Raw 23andMe or AncestryDNA export (plain or .gz); overrides the config's rawData
    #[arg(short = 'r', long = "raw")]
    raw: Option<PathBuf>,

    /// Genotyping provider: 23andme, ancestrydna or unknown
    #[arg(short = 'p', long = "provider")]
    provider: Option<String>,

    /// Gene to analyze (repeatable); defaults to the whole panel
    #[arg(short = 'g', long = "gene")]
    genes: Vec<String>,

    /// Write the JSON report here instead of stdout
    #[arg(short = 'o', long = "out")]
    out: Option<PathBuf>,

    /// Log pipeline decisions to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let cli_args = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli_args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    cli::banner("Pharmacogenomic Report");

    // ── Configuration ────────────────────────────────────
    cli::section("Configuration");

    let config = cli_args
        .config
        .as_deref()
        .map(RunConfig::from_file)
        .transpose()?;

    let genes: Vec<Gene> = if !cli_args.genes.is_empty() {
        cli_args
            .genes
            .iter()
            .map(|g| g.parse::<Gene>().with_context(|| format!("invalid gene: '{g}'")))
            .collect::<Result<_>>()?
    } else if let Some(config) = &config {
        config.genes()?
    } else {
        Gene::ALL.to_vec()
    };

    let raw_path = cli_args
        .raw
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.raw_data.clone()));

    if let Some(path) = &cli_args.config {
        cli::kv("Config", &path.display().to_string());
    }
    let symbols: Vec<&str> = genes.iter().map(|g| g.symbol()).collect();
    cli::kv("Genes", &symbols.join(", "));
    eprintln!();

    // ── Genotypes ────────────────────────────────────────
    cli::section("Genotypes");

    let mut calls: Vec<VariantCall> = config
        .as_ref()
        .map(|c| c.calls.clone())
        .unwrap_or_default();
    let mut detected = Provider::Unknown;

    if let Some(path) = &raw_path {
        let raw = raw_data::read_raw_file(path)
            .with_context(|| format!("failed to read raw data: {}", path.display()))?;
        cli::kv("Raw data", &path.display().to_string());
        cli::kv("Records", &raw.records.to_string());
        cli::kv("Panel calls", &raw.calls.len().to_string());
        detected = raw.provider;
        // Explicit calls come first and therefore take precedence.
        calls.extend(raw.calls);
    }

    if calls.is_empty() && raw_path.is_none() {
        bail!("no genotypes supplied: pass --config with 'calls' or --raw");
    }

    let provider = match (&cli_args.provider, &config) {
        (Some(name), _) => name
            .parse::<Provider>()
            .with_context(|| format!("invalid provider: '{name}'"))?,
        (None, Some(config)) if config.provider.is_some() => config.provider()?,
        _ => detected,
    };
    cli::kv("Provider", &provider.to_string());
    if calls.is_empty() {
        cli::warning("No panel variants found; every gene will be reported as unknown");
    }
    eprintln!();

    // ── Analysis ─────────────────────────────────────────
    let report = build_report(&calls, &genes, provider)?;
    for result in &report.results {
        cli::gene_result(result);
    }
    cli::report_summary(&report.summary);

    // ── Output ───────────────────────────────────────────
    match &cli_args.out {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            eprintln!();
            cli::success(&format!("Report written to {}", path.display()));
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = stdout.lock();
            serde_json::to_writer_pretty(&mut writer, &report)?;
            writer.write_all(b"\n")?;
        }
    }

    cli::print_summary(start);
    Ok(())
}
