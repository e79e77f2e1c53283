//! CYP2C9: *2 and *3 reduced-function alleles.

use super::{Findings, GenePanel};
use crate::caller::{AbsentPolicy, CallStrategy, CallerTable, DefiningVariant, GenotypeRule, Requirement};
use crate::gene::Gene;
use crate::genotype::Orientation;
use crate::phenotype::{Band, Bound, Classifier, Method, Phenotype, ScoreKind};
use crate::recommendation::{CpicLevel, DrugRule, Guideline, Outcome, RiskTier};

const NSAID_GUIDELINE: Guideline = Guideline {
    cpic_level: Some(CpicLevel::A),
    source: "CPIC Guideline for CYP2C9 and Nonsteroidal Anti-Inflammatory Drugs (2020)",
    evidence: "",
};

pub static PANEL: GenePanel = GenePanel {
    gene: Gene::Cyp2c9,
    name: "cytochrome P450 family 2 subfamily C member 9",
    caller: CallerTable {
        variants: &[
            DefiningVariant {
                rsid: "rs1799853",
                orientation: Orientation::Undirected,
                requirement: Requirement::Required,
                rules: &[
                    GenotypeRule { genotype: "CC", alleles: ("*1", "*1") },
                    GenotypeRule { genotype: "CT", alleles: ("*1", "*2") },
                    GenotypeRule { genotype: "TT", alleles: ("*2", "*2") },
                ],
            },
            DefiningVariant {
                rsid: "rs1057910",
                orientation: Orientation::Undirected,
                requirement: Requirement::Required,
                rules: &[
                    GenotypeRule { genotype: "AA", alleles: ("*1", "*1") },
                    GenotypeRule { genotype: "AC", alleles: ("*1", "*3") },
                    GenotypeRule { genotype: "CC", alleles: ("*3", "*3") },
                ],
            },
        ],
        reference: ("*1", "*1"),
        strategy: CallStrategy::Combine,
        when_absent: AbsentPolicy::Unknown,
    },
    classifier: Classifier {
        kind: ScoreKind::Activity,
        weights: &[("*1", 1.0), ("*2", 0.5), ("*3", 0.0)],
        method: Method::Bands(&[
            Band { bound: Bound::AtLeast(2.0), phenotype: Phenotype::NormalMetabolizer },
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
            drug: "Phenytoin",
            guideline: Guideline {
                cpic_level: Some(CpicLevel::A),
                source: "CPIC Guideline for CYP2C9 and HLA-B Genotypes and Phenytoin Dosing \
                         (2020)",
                evidence: "",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorMetabolizer,
                    risk: RiskTier::High,
                    guidance: "Reduced phenytoin clearance raises the risk of concentration-\
                        dependent toxicity. Reduce subsequent maintenance doses by 50% and adjust \
                        by therapeutic drug monitoring.",
                    dose_adjustment: Some("Reduce maintenance dose by 50%"),
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::IntermediateMetabolizer,
                    risk: RiskTier::Moderate,
                    guidance: "Modestly reduced phenytoin clearance. Consider a 25% reduction of \
                        the maintenance dose and adjust by therapeutic drug monitoring.",
                    dose_adjustment: Some("Reduce maintenance dose by 25%"),
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::NormalMetabolizer,
                    risk: RiskTier::Low,
                    guidance: "Normal phenytoin metabolism. Initiate standard dosing.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
        DrugRule {
            drug: "NSAIDs (celecoxib, flurbiprofen, ibuprofen)",
            guideline: NSAID_GUIDELINE,
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorMetabolizer,
                    risk: RiskTier::High,
                    guidance: "Markedly prolonged half-life and increased risk of \
                        gastrointestinal bleeding, hypertension and renal injury. Initiate at \
                        25-50% of the lowest recommended starting dose, or choose an NSAID not \
                        metabolized by CYP2C9.",
                    dose_adjustment: Some("25-50% of lowest starting dose"),
                    alternatives: &["Aspirin", "Ketorolac", "Naproxen", "Sulindac"],
                },
                Outcome {
                    phenotype: Phenotype::IntermediateMetabolizer,
                    risk: RiskTier::Moderate,
                    guidance: "Moderately increased exposure. Initiate at the lowest recommended \
                        starting dose and titrate to the clinical effect.",
                    dose_adjustment: Some("Lowest recommended starting dose"),
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::NormalMetabolizer,
                    risk: RiskTier::Low,
                    guidance: "Normal NSAID metabolism. Initiate at the recommended starting dose.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
        DrugRule {
            drug: "Warfarin",
            guideline: Guideline {
                cpic_level: Some(CpicLevel::A),
                source: "CPIC Guideline for Pharmacogenetics-Guided Warfarin Dosing (2017)",
                evidence: "",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorMetabolizer,
                    risk: RiskTier::High,
                    guidance: "Substantially reduced S-warfarin clearance. Reduce the initial \
                        dose, use a pharmacogenetic dosing algorithm including VKORC1, and \
                        monitor INR closely.",
                    dose_adjustment: Some("Reduce initial dose by 20-40% or more"),
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::IntermediateMetabolizer,
                    risk: RiskTier::Moderate,
                    guidance: "Reduced S-warfarin clearance. Use a pharmacogenetic dosing \
                        algorithm including VKORC1; a lower maintenance dose is expected.",
                    dose_adjustment: Some("Reduce initial dose by 20-40%"),
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::NormalMetabolizer,
                    risk: RiskTier::Low,
                    guidance: "Normal S-warfarin clearance. Dose with a validated algorithm and \
                        routine INR monitoring.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
    ],
    limitations: &[
        "Only *2 (rs1799853) and *3 (rs1057910) are assayed; *5, *6, *8 and *11, which are more \
         common in people of African ancestry, are not detected.",
        "Alleles are combined without phasing; two variant alleles are assumed to lie on \
         opposite chromosomes.",
    ],
};

#[must_use]
pub fn alerts(findings: &Findings) -> Vec<String> {
    match findings.phenotype() {
        Phenotype::PoorMetabolizer => vec![
            format!(
                "CYP2C9 Poor Metabolizer ({}): reduce phenytoin maintenance dose by 50% and start \
                 NSAIDs at 25-50% of the lowest dose.",
                findings.diplotype
            ),
            "CYP2C9 Poor Metabolizer: increased warfarin bleeding risk; dose with a \
             pharmacogenetic algorithm."
                .to_string(),
        ],
        Phenotype::IntermediateMetabolizer => vec![format!(
            "CYP2C9 Intermediate Metabolizer ({}): lower starting doses for phenytoin, NSAIDs \
             and warfarin may be needed.",
            findings.diplotype
        )],
        _ => Vec::new(),
    }
}

#[must_use]
pub fn function_paragraph(findings: &Findings) -> Option<String> {
    let text = match findings.phenotype() {
        Phenotype::PoorMetabolizer => {
            "Reduced-function alleles on both chromosomes sharply lower CYP2C9 activity, \
             prolonging exposure to phenytoin, several NSAIDs, and S-warfarin."
        }
        Phenotype::IntermediateMetabolizer => {
            "Reduced-function alleles lower CYP2C9 activity, modestly increasing exposure to \
             drugs it clears."
        }
        Phenotype::NormalMetabolizer => {
            "No *2 or *3 alleles were detected; CYP2C9 activity is expected to be normal."
        }
        _ => return None,
    };
    Some(text.to_string())
}
