//! Shared terminal output helpers for pgxguide binaries. Everything goes to stderr so stdout
//! stays free for the JSON report.

use std::time::Instant;

use colored::{ColoredString, Colorize};

use crate::diplotype::Confidence;
use crate::recommendation::RiskTier;
use crate::report::ReportSummary;
use crate::result::AnalysisResult;

pub fn banner(subtitle: &str) {
    eprintln!();
    eprintln!("{} {}", "pgxguide".bold().cyan(), subtitle.dimmed());
    eprintln!("{}", "For research use only; not a medical device".dimmed());
    eprintln!();
}

pub fn section(title: &str) {
    let bar = "─".repeat(50);
    eprintln!("{} {}", title.bold().blue(), bar.dimmed());
}

pub fn kv(key: &str, value: &str) {
    eprintln!("  {:<20} {}", key.dimmed(), value);
}

pub fn success(msg: &str) {
    eprintln!("  {} {}", "✓".green().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("  {} {}", "⚠".yellow(), msg.yellow());
}

fn tier(tier: RiskTier) -> ColoredString {
    let label = tier.to_string();
    match tier {
        RiskTier::Critical => label.red().bold(),
        RiskTier::High => label.red(),
        RiskTier::Moderate => label.yellow(),
        RiskTier::Low => label.green(),
        RiskTier::Indeterminate => label.dimmed(),
    }
}

fn confidence(confidence: Confidence) -> ColoredString {
    let label = confidence.to_string();
    match confidence {
        Confidence::High => label.green(),
        Confidence::Medium => label.yellow(),
        Confidence::Low => label.red(),
    }
}

/// One block per gene: call, phenotype, recommendations and alerts.
pub fn gene_result(result: &AnalysisResult) {
    section(result.gene.symbol());
    kv("Diplotype", &result.diplotype.to_string());
    kv(
        "Phenotype",
        &format!("{} ({} {:.1})", result.phenotype, result.score.kind, result.score.value),
    );
    kv("Confidence", &confidence(result.confidence).to_string());

    for rec in &result.recommendations {
        kv(&rec.subject, &tier(rec.risk_tier).to_string());
    }
    for alert in &result.alerts {
        warning(alert);
    }
    eprintln!();
}

pub fn report_summary(summary: &ReportSummary) {
    section("Summary");
    kv("Genes analyzed", &summary.genes_analyzed.to_string());
    kv("Drugs affected", &summary.drugs_affected.to_string());
    kv("High confidence", &summary.high_confidence_count.to_string());
    if summary.critical_warnings.is_empty() {
        success("No high-risk drug interactions");
    }
    for w in &summary.critical_warnings {
        warning(w);
    }
}

pub fn print_summary(start: Instant) {
    let elapsed = start.elapsed();
    eprintln!();
    eprintln!(
        "{}  {}",
        "Time".dimmed(),
        format!("{:.3} s", elapsed.as_secs_f64()).bold()
    );
    eprintln!();
}
