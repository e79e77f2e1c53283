//! Output contract checks for analysis results and reports.
//!
//! A failure here means the pipeline produced something it never should; it is reported as
//! [`Error::Validation`] rather than corrected.

use crate::diplotype::{Allele, Confidence};
use crate::error::Error;
use crate::gene::Gene;
use crate::genes;
use crate::phenotype::Phenotype;
use crate::report::Report;
use crate::result::AnalysisResult;

fn violation(gene: Gene, message: impl std::fmt::Display) -> Error {
    Error::Validation(format!("{gene}: {message}"))
}

/// Genes whose result must carry a gene-specific block.
fn has_block(gene: Gene) -> bool {
    matches!(gene, Gene::Ugt1a1 | Gene::Slco1b1 | Gene::F5 | Gene::Vkorc1)
}

pub fn validate_result(result: &AnalysisResult) -> Result<(), Error> {
    let gene = result.gene;
    let panel = genes::panel(gene);

    if result.phenotype != Phenotype::Unknown && !panel.phenotypes.contains(&result.phenotype) {
        return Err(violation(
            gene,
            format!("phenotype '{}' is not defined for this gene", result.phenotype),
        ));
    }

    if result.score.kind != panel.classifier.kind {
        return Err(violation(
            gene,
            format!("score kind '{}' does not match the gene", result.score.kind),
        ));
    }
    let (min, max) = panel.classifier.score_range();
    let value = result.score.value;
    if !value.is_finite() || value < min || value > max {
        return Err(violation(
            gene,
            format!("score {value} outside [{min}, {max}]"),
        ));
    }

    for allele in [result.diplotype.allele1, result.diplotype.allele2] {
        if let Allele::Named(name) = allele
            && !panel.classifier.alleles().any(|known| known == name)
        {
            return Err(violation(gene, format!("unknown allele '{name}'")));
        }
    }

    let known = result.diplotype.is_known();
    if known == result.phenotype.is_unknown() {
        return Err(violation(
            gene,
            "phenotype must be Unknown exactly when an allele is Unknown",
        ));
    }
    if !known && result.confidence != Confidence::Low {
        return Err(violation(gene, "an unknown diplotype must have low confidence"));
    }
    if result.diplotype.confidence != result.confidence {
        return Err(violation(gene, "diplotype and result confidence disagree"));
    }

    if result.summary.trim().is_empty() {
        return Err(violation(gene, "summary is empty"));
    }
    if result.limitations.is_empty() {
        return Err(violation(gene, "limitations are empty"));
    }
    if result.recommendations.len() < panel.drugs.len() {
        return Err(violation(
            gene,
            format!(
                "{} recommendations for {} drugs",
                result.recommendations.len(),
                panel.drugs.len()
            ),
        ));
    }
    for (rule, rec) in panel.drugs.iter().zip(&result.recommendations) {
        if rec.subject != rule.drug {
            return Err(violation(
                gene,
                format!("expected '{}' recommendation, found '{}'", rule.drug, rec.subject),
            ));
        }
    }
    for rec in &result.recommendations {
        if rec.subject.trim().is_empty() || rec.guidance.trim().is_empty() {
            return Err(violation(gene, "recommendation with empty subject or guidance"));
        }
        if rec.cpic_guideline != rec.cpic_level.is_some() {
            return Err(violation(
                gene,
                format!("'{}' has inconsistent CPIC tagging", rec.subject),
            ));
        }
    }

    match &result.gene_specific {
        Some(block) if block.gene() != gene => {
            return Err(violation(
                gene,
                format!("carries a {} block", block.gene()),
            ));
        }
        None if has_block(gene) => {
            return Err(violation(gene, "missing gene-specific block"));
        }
        _ => {}
    }

    Ok(())
}

/// True for `MAJOR.MINOR.PATCH` with an optional `-pre` suffix.
fn is_semver(version: &str) -> bool {
    let core = version.split_once('-').map_or(version, |(core, _)| core);
    let parts: Vec<&str> = core.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()))
}

pub fn validate_report(report: &Report) -> Result<(), Error> {
    let metadata = &report.metadata;
    if !is_semver(&metadata.version) {
        return Err(Error::Validation(format!(
            "report version '{}' is not semantic",
            metadata.version
        )));
    }
    if metadata.disclaimer.trim().is_empty() {
        return Err(Error::Validation("report disclaimer is empty".to_string()));
    }
    if metadata.citations.is_empty() {
        return Err(Error::Validation("report has no citations".to_string()));
    }

    let mut seen: Vec<Gene> = Vec::with_capacity(report.results.len());
    for result in &report.results {
        if seen.contains(&result.gene) {
            return Err(violation(result.gene, "analyzed more than once"));
        }
        seen.push(result.gene);
        validate_result(result)?;
    }

    if report.summary.genes_analyzed != report.results.len() {
        return Err(Error::Validation(format!(
            "summary counts {} genes, report has {}",
            report.summary.genes_analyzed,
            report.results.len()
        )));
    }
    Ok(())
}
