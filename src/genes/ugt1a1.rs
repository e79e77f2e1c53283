//! UGT1A1: bilirubin and SN-38 glucuronidation.
//!
//! Two defining variants are consulted in priority order: rs4148323 (*6) first, rs887829 (*27)
//! only when *6 is absent. A carrier of both reports the *6-derived diplotype.

use serde::Serialize;

use super::{Findings, GenePanel};
use crate::caller::{AbsentPolicy, CallStrategy, CallerTable, DefiningVariant, GenotypeRule, Requirement};
use crate::gene::Gene;
use crate::genotype::Orientation;
use crate::phenotype::{Band, Bound, Classifier, Method, Phenotype, ScoreKind};
use crate::recommendation::{CpicLevel, DrugRule, Guideline, Outcome, RiskTier};

pub static PANEL: GenePanel = GenePanel {
    gene: Gene::Ugt1a1,
    name: "UDP glucuronosyltransferase 1A1",
    caller: CallerTable {
        variants: &[
            DefiningVariant {
                rsid: "rs4148323",
                orientation: Orientation::Undirected,
                requirement: Requirement::Required,
                rules: &[
                    GenotypeRule { genotype: "GG", alleles: ("*1", "*1") },
                    GenotypeRule { genotype: "AG", alleles: ("*1", "*6") },
                    GenotypeRule { genotype: "AA", alleles: ("*6", "*6") },
                ],
            },
            DefiningVariant {
                rsid: "rs887829",
                orientation: Orientation::Undirected,
                requirement: Requirement::Supplementary,
                rules: &[
                    GenotypeRule { genotype: "CC", alleles: ("*1", "*1") },
                    GenotypeRule { genotype: "CT", alleles: ("*1", "*27") },
                    GenotypeRule { genotype: "TT", alleles: ("*27", "*27") },
                ],
            },
        ],
        reference: ("*1", "*1"),
        strategy: CallStrategy::FirstNonReference,
        when_absent: AbsentPolicy::AssumeReference,
    },
    classifier: Classifier {
        kind: ScoreKind::Activity,
        weights: &[("*1", 1.0), ("*6", 0.3), ("*27", 0.3)],
        method: Method::Bands(&[
            Band { bound: Bound::Above(1.5), phenotype: Phenotype::NormalMetabolizer },
            Band { bound: Bound::AtLeast(1.0), phenotype: Phenotype::IntermediateMetabolizer },
            Band { bound: Bound::Any, phenotype: Phenotype::PoorMetabolizer },
        ]),
    },
    phenotypes: &[
        Phenotype::NormalMetabolizer,
        Phenotype::IntermediateMetabolizer,
        Phenotype::PoorMetabolizer,
    ],
    drugs: &[
        DrugRule {
            drug: "Irinotecan",
            guideline: Guideline {
                cpic_level: None,
                source: "DPWG UGT1A1-irinotecan guideline; FDA irinotecan label",
                evidence: "DPWG actionable; FDA label dosing",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorMetabolizer,
                    risk: RiskTier::Critical,
                    guidance: "Markedly reduced SN-38 glucuronidation with a high risk of severe \
                        neutropenia and diarrhea. Reduce the starting dose by 30% and increase in \
                        subsequent cycles only as guided by neutrophil counts.",
                    dose_adjustment: Some("Reduce starting dose by 30%"),
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::IntermediateMetabolizer,
                    risk: RiskTier::Moderate,
                    guidance: "Moderately reduced SN-38 clearance. Use the standard starting \
                        dose and monitor closely for neutropenia, particularly at doses above \
                        250 mg/m2.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::NormalMetabolizer,
                    risk: RiskTier::Low,
                    guidance: "Normal SN-38 glucuronidation. Use standard irinotecan dosing.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
        DrugRule {
            drug: "Atazanavir",
            guideline: Guideline {
                cpic_level: Some(CpicLevel::A),
                source: "CPIC Guideline for UGT1A1 and Atazanavir Prescribing (2015)",
                evidence: "",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorMetabolizer,
                    risk: RiskTier::High,
                    guidance: "High likelihood (20-60%) of bilirubin-related jaundice leading to \
                        atazanavir discontinuation. Consider an alternative antiretroviral, \
                        particularly where jaundice would concern the patient.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::IntermediateMetabolizer,
                    risk: RiskTier::Low,
                    guidance: "Low likelihood of jaundice-related discontinuation. Prescribe \
                        atazanavir per standard recommendations.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::NormalMetabolizer,
                    risk: RiskTier::Low,
                    guidance: "Very low likelihood of jaundice-related discontinuation. \
                        Prescribe atazanavir per standard recommendations.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
        DrugRule {
            drug: "Belinostat",
            guideline: Guideline {
                cpic_level: None,
                source: "FDA belinostat label",
                evidence: "FDA label dosing",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorMetabolizer,
                    risk: RiskTier::High,
                    guidance: "Reduced belinostat clearance increases the risk of dose-limiting \
                        toxicity. Reduce the starting dose to 750 mg/m2.",
                    dose_adjustment: Some("Starting dose 750 mg/m2 (from 1,000 mg/m2)"),
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::IntermediateMetabolizer,
                    risk: RiskTier::Low,
                    guidance: "Use the standard starting dose with routine toxicity monitoring.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::NormalMetabolizer,
                    risk: RiskTier::Low,
                    guidance: "Use the standard starting dose.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
        DrugRule {
            drug: "Sacituzumab govitecan",
            guideline: Guideline {
                cpic_level: None,
                source: "FDA sacituzumab govitecan label",
                evidence: "FDA label: actionable",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorMetabolizer,
                    risk: RiskTier::High,
                    guidance: "Increased risk of neutropenia from reduced SN-38 clearance. \
                        Monitor blood counts closely and withhold or reduce the dose for severe \
                        neutropenia per the label.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::IntermediateMetabolizer,
                    risk: RiskTier::Moderate,
                    guidance: "Possible increased risk of neutropenia. Monitor blood counts \
                        during treatment.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::NormalMetabolizer,
                    risk: RiskTier::Low,
                    guidance: "Use standard dosing with routine monitoring.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
    ],
    limitations: &[
        "UGT1A1*28 (rs3064744, TA repeat) is not assayed by SNP arrays; its presence cannot be \
         excluded and a *1 call may be *28.",
        "rs887829 is consulted only when rs4148323 shows no *6 allele, so a compound *6/*27 \
         carrier is reported as *1/*6 and may be under-called.",
        "When neither defining variant is present the reference *1/*1 diplotype is assumed at \
         low confidence.",
    ],
};

/// Gilbert syndrome genotype status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GilbertStatus {
    Positive,
    Carrier,
    Negative,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GilbertSyndrome {
    pub status: GilbertStatus,
    pub bilirubin_note: String,
}

#[must_use]
pub fn gilbert_syndrome(findings: &Findings) -> GilbertSyndrome {
    let (status, note) = match findings.phenotype() {
        Phenotype::PoorMetabolizer => (
            GilbertStatus::Positive,
            "Genotype consistent with Gilbert syndrome. Mild, fluctuating unconjugated \
             hyperbilirubinemia is expected, especially with fasting, illness or stress, and is \
             benign.",
        ),
        Phenotype::IntermediateMetabolizer => (
            GilbertStatus::Carrier,
            "One reduced-function allele. Bilirubin is usually normal or mildly elevated.",
        ),
        Phenotype::NormalMetabolizer => (
            GilbertStatus::Negative,
            "No reduced-function UGT1A1 alleles detected among the variants tested.",
        ),
        _ => (
            GilbertStatus::Unknown,
            "Gilbert syndrome status cannot be determined from the supplied data.",
        ),
    };
    GilbertSyndrome {
        status,
        bilirubin_note: note.to_string(),
    }
}

#[must_use]
pub fn alerts(findings: &Findings) -> Vec<String> {
    match findings.phenotype() {
        Phenotype::PoorMetabolizer => vec![
            format!(
                "CRITICAL: UGT1A1 Poor Metabolizer ({}). Irinotecan starting dose must be reduced; \
                 high risk of severe neutropenia and diarrhea.",
                findings.diplotype
            ),
            "UGT1A1 Poor Metabolizer: atazanavir is likely to cause jaundice; consider an \
             alternative antiretroviral."
                .to_string(),
        ],
        Phenotype::IntermediateMetabolizer => vec![format!(
            "UGT1A1 Intermediate Metabolizer ({}): monitor for irinotecan and sacituzumab \
             govitecan toxicity.",
            findings.diplotype
        )],
        _ => Vec::new(),
    }
}

#[must_use]
pub fn function_paragraph(findings: &Findings) -> Option<String> {
    let text = match findings.phenotype() {
        Phenotype::PoorMetabolizer => {
            "Two reduced-function alleles substantially lower glucuronidation of bilirubin and of \
             SN-38, the active metabolite of irinotecan. Drugs cleared by UGT1A1 accumulate, and \
             the genotype is consistent with Gilbert syndrome."
        }
        Phenotype::IntermediateMetabolizer => {
            "One reduced-function allele moderately lowers UGT1A1 glucuronidation. Toxicity risk \
             rises mainly at high doses of UGT1A1-cleared drugs."
        }
        Phenotype::NormalMetabolizer => {
            "No reduced-function alleles were detected; UGT1A1 glucuronidation is expected to be \
             normal."
        }
        _ => return None,
    };
    Some(text.to_string())
}
