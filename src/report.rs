//! Multi-gene report: per-gene results plus summary counts and a metadata envelope.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::analysis::{AnalysisOptions, analyze_gene};
use crate::diplotype::Confidence;
use crate::error::Error;
use crate::gene::Gene;
use crate::genotype::VariantCall;
use crate::provider::Provider;
use crate::result::AnalysisResult;
use crate::validation::validate_report;
use crate::warfarin;

pub const DISCLAIMER: &str = "This report is for informational and research purposes only. It \
    is not a diagnosis and must not be used to start, stop or change any medication without \
    review by a qualified healthcare professional. Consumer genotyping arrays can miscall \
    variants, and results should be confirmed by a CLIA-certified clinical laboratory.";

pub const CITATIONS: &[&str] = &[
    "Clinical Pharmacogenetics Implementation Consortium (CPIC) guidelines, https://cpicpgx.org/guidelines/",
    "Dutch Pharmacogenetics Working Group (DPWG) guidelines, via PharmGKB",
    "PharmGKB clinical annotations, https://www.pharmgkb.org/",
    "U.S. FDA Table of Pharmacogenomic Biomarkers in Drug Labeling",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub generator: String,
    pub version: String,
    pub provider: Provider,
    /// SHA-256 of the normalized panel calls the report was computed from.
    pub input_digest: String,
    pub disclaimer: String,
    pub citations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub genes_analyzed: usize,
    /// Distinct drugs with a moderate or higher tier in any gene. The cross-gene warfarin entry
    /// counts as warfarin.
    pub drugs_affected: usize,
    pub high_confidence_count: usize,
    pub critical_warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub metadata: ReportMetadata,
    pub results: Vec<AnalysisResult>,
    pub summary: ReportSummary,
}

/// Analyze each requested gene and assemble a validated report.
///
/// Genes are analyzed once each in panel order, which places CYP2C9 before VKORC1 so its
/// phenotype feeds the warfarin cross-gene check. The request order does not matter.
pub fn build_report(
    calls: &[VariantCall],
    genes: &[Gene],
    provider: Provider,
) -> Result<Report, Error> {
    let ordered: Vec<Gene> = Gene::ALL
        .into_iter()
        .filter(|gene| genes.contains(gene))
        .collect();

    let mut options = AnalysisOptions {
        provider,
        cyp2c9_phenotype: None,
    };
    let mut results = Vec::with_capacity(ordered.len());
    for gene in ordered {
        let result = analyze_gene(gene, calls, &options)?;
        if gene == Gene::Cyp2c9 {
            options.cyp2c9_phenotype = Some(result.phenotype);
        }
        results.push(result);
    }

    let report = Report {
        metadata: ReportMetadata {
            generator: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            provider,
            input_digest: input_digest(&results),
            disclaimer: DISCLAIMER.to_string(),
            citations: CITATIONS.iter().map(|c| c.to_string()).collect(),
        },
        summary: summarize(&results),
        results,
    };

    validate_report(&report)?;
    tracing::debug!(
        genes = report.summary.genes_analyzed,
        drugs_affected = report.summary.drugs_affected,
        "built report"
    );
    Ok(report)
}

fn summarize(results: &[AnalysisResult]) -> ReportSummary {
    let mut affected: Vec<&str> = results
        .iter()
        .flat_map(AnalysisResult::actionable)
        .map(|r| warfarin::drug_name(&r.subject))
        .collect();
    affected.sort_unstable();
    affected.dedup();

    let critical_warnings = results
        .iter()
        .flat_map(|result| {
            result
                .recommendations
                .iter()
                .filter(|r| r.risk_tier.is_critical_warning())
                .map(move |r| format!("{}: {} ({} risk)", result.gene, r.subject, r.risk_tier))
        })
        .collect();

    ReportSummary {
        genes_analyzed: results.len(),
        drugs_affected: affected.len(),
        high_confidence_count: results
            .iter()
            .filter(|r| r.confidence == Confidence::High)
            .count(),
        critical_warnings,
    }
}

fn input_digest(results: &[AnalysisResult]) -> String {
    let mut hasher = Sha256::new();
    for result in results {
        for genotype in &result.genotypes {
            hasher.update(genotype.variant_id.as_bytes());
            hasher.update(b"\t");
            hasher.update(genotype.canonical_pair.as_bytes());
            hasher.update(b"\n");
        }
    }
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phenotype::Phenotype;
    use crate::recommendation::RiskTier;
    use crate::warfarin::CombinedRiskBand;
    use crate::result::GeneSpecific;

    fn calls(pairs: &[(&str, &str)]) -> Vec<VariantCall> {
        pairs.iter().map(|(id, g)| VariantCall::new(id, Some(*g))).collect()
    }

    fn full_panel() -> Vec<VariantCall> {
        calls(&[
            ("rs4148323", "GG"),
            ("rs887829", "CT"),
            ("rs4149056", "CT"),
            ("rs776746", "GG"),
            ("rs6025", "GG"),
            ("rs1799853", "TT"),
            ("rs1057910", "AA"),
            ("rs9923231", "TT"),
        ])
    }

    #[test]
    fn cyp2c9_feeds_vkorc1_regardless_of_request_order() {
        let report =
            build_report(&full_panel(), &[Gene::Vkorc1, Gene::Cyp2c9], Provider::Unknown).unwrap();
        let genes: Vec<Gene> = report.results.iter().map(|r| r.gene).collect();
        assert_eq!(genes, [Gene::Cyp2c9, Gene::Vkorc1]);

        let Some(GeneSpecific::WarfarinSensitivity(block)) = &report.results[1].gene_specific
        else {
            panic!("missing warfarin block");
        };
        let risk = block.combined_risk.as_ref().unwrap();
        // *2/*2 is intermediate; VKORC1 T/T is high sensitivity.
        assert_eq!(risk.cyp2c9_phenotype, Some(Phenotype::IntermediateMetabolizer));
        assert_eq!(risk.combined_risk, CombinedRiskBand::High);
    }

    #[test]
    fn summary_counts() {
        let report = build_report(&full_panel(), &Gene::ALL, Provider::Unknown).unwrap();
        assert_eq!(report.summary.genes_analyzed, 6);
        assert_eq!(report.summary.high_confidence_count, 6);
        assert!(report.summary.drugs_affected > 0);
        assert!(
            report
                .summary
                .critical_warnings
                .iter()
                .any(|w| w.starts_with("SLCO1B1: Simvastatin"))
        );
        let critical = report
            .results
            .iter()
            .flat_map(|r| &r.recommendations)
            .filter(|r| r.risk_tier.is_critical_warning())
            .count();
        assert_eq!(report.summary.critical_warnings.len(), critical);
    }

    #[test]
    fn cross_gene_warfarin_is_not_a_separate_drug() {
        // T/T: warfarin, acenocoumarol and phenprocoumon all high, plus the cross-gene entry.
        let report =
            build_report(&calls(&[("rs9923231", "TT")]), &[Gene::Vkorc1], Provider::Unknown)
                .unwrap();
        let subjects: Vec<&str> = report.results[0]
            .actionable()
            .map(|r| r.subject.as_str())
            .collect();
        assert!(subjects.contains(&"Warfarin"));
        assert!(subjects.contains(&warfarin::COMBINED_SUBJECT));
        assert_eq!(report.summary.drugs_affected, 3);
    }

    #[test]
    fn duplicate_genes_are_analyzed_once() {
        let report =
            build_report(&full_panel(), &[Gene::F5, Gene::F5], Provider::Unknown).unwrap();
        assert_eq!(report.results.len(), 1);
    }

    #[test]
    fn metadata_envelope() {
        let report = build_report(&[], &[Gene::Ugt1a1], Provider::AncestryDna).unwrap();
        assert_eq!(report.metadata.version, env!("CARGO_PKG_VERSION"));
        assert!(!report.metadata.citations.is_empty());
        assert_eq!(report.metadata.input_digest.len(), 64);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["metadata"]["provider"], "ancestrydna");
        assert!(json["summary"]["criticalWarnings"].is_array());
    }

    #[test]
    fn report_is_deterministic() {
        let a = build_report(&full_panel(), &Gene::ALL, Provider::TwentyThreeAndMe).unwrap();
        let b = build_report(&full_panel(), &Gene::ALL, Provider::TwentyThreeAndMe).unwrap();
        assert_eq!(
            serde_json::to_string_pretty(&a).unwrap(),
            serde_json::to_string_pretty(&b).unwrap()
        );
    }

    #[test]
    fn digest_tracks_input() {
        let a = build_report(&full_panel(), &Gene::ALL, Provider::Unknown).unwrap();
        let mut changed = full_panel();
        changed[2] = VariantCall::new("rs4149056", Some("CC"));
        let b = build_report(&changed, &Gene::ALL, Provider::Unknown).unwrap();
        assert_ne!(a.metadata.input_digest, b.metadata.input_digest);

        // Non-panel calls and allele order do not change the digest.
        let mut noisy = full_panel();
        noisy.push(VariantCall::new("rs1", Some("AA")));
        noisy[2] = VariantCall::new("rs4149056", Some("T/C"));
        let c = build_report(&noisy, &Gene::ALL, Provider::Unknown).unwrap();
        assert_eq!(a.metadata.input_digest, c.metadata.input_digest);
    }

    #[test]
    fn unknown_genes_are_indeterminate_not_errors() {
        let report = build_report(&[], &Gene::ALL, Provider::Unknown).unwrap();
        let f5 = report.results.iter().find(|r| r.gene == Gene::F5).unwrap();
        assert!(
            f5.recommendations
                .iter()
                .all(|r| r.risk_tier == RiskTier::Indeterminate)
        );
        assert_eq!(report.summary.high_confidence_count, 0);
    }
}
