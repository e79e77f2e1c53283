//! SLCO1B1: hepatic statin uptake transporter (OATP1B1).

use serde::Serialize;

use super::{Findings, GenePanel};
use crate::caller::{AbsentPolicy, CallStrategy, CallerTable, DefiningVariant, GenotypeRule, Requirement};
use crate::gene::Gene;
use crate::genotype::Orientation;
use crate::phenotype::{Band, Bound, Classifier, Method, Phenotype, ScoreKind};
use crate::recommendation::{CpicLevel, DrugRule, Guideline, Outcome, RiskTier};

const STATIN_GUIDELINE: Guideline = Guideline {
    cpic_level: Some(CpicLevel::A),
    source: "CPIC Guideline for SLCO1B1, ABCG2, and CYP2C9 and Statin-Associated Musculoskeletal \
             Symptoms (2022)",
    evidence: "",
};

const PREFERRED_STATINS: &[&str] = &["Pravastatin", "Rosuvastatin", "Pitavastatin"];

const fn standard_dose(phenotype: Phenotype, guidance: &'static str) -> Outcome {
    Outcome {
        phenotype,
        risk: RiskTier::Low,
        guidance,
        dose_adjustment: None,
        alternatives: &[],
    }
}

pub static PANEL: GenePanel = GenePanel {
    gene: Gene::Slco1b1,
    name: "solute carrier organic anion transporter 1B1",
    caller: CallerTable {
        variants: &[DefiningVariant {
            rsid: "rs4149056",
            orientation: Orientation::Undirected,
            requirement: Requirement::Required,
            rules: &[
                GenotypeRule { genotype: "TT", alleles: ("*1", "*1") },
                GenotypeRule { genotype: "CT", alleles: ("*1", "*5") },
                GenotypeRule { genotype: "CC", alleles: ("*5", "*5") },
            ],
        }],
        reference: ("*1", "*1"),
        strategy: CallStrategy::FirstNonReference,
        when_absent: AbsentPolicy::Unknown,
    },
    classifier: Classifier {
        kind: ScoreKind::Function,
        weights: &[("*1", 1.0), ("*5", 0.0)],
        method: Method::Bands(&[
            Band { bound: Bound::AtLeast(1.5), phenotype: Phenotype::NormalFunction },
            Band { bound: Bound::AtLeast(0.5), phenotype: Phenotype::DecreasedFunction },
            Band { bound: Bound::Any, phenotype: Phenotype::PoorFunction },
        ]),
    },
    phenotypes: &[
        Phenotype::NormalFunction,
        Phenotype::DecreasedFunction,
        Phenotype::PoorFunction,
    ],
    drugs: &[
        DrugRule {
            drug: "Simvastatin",
            guideline: STATIN_GUIDELINE,
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorFunction,
                    risk: RiskTier::Critical,
                    guidance: "Markedly increased simvastatin acid exposure with approximately \
                        17x the myopathy risk at 80 mg. Avoid simvastatin; prescribe an \
                        alternative statin based on the desired potency.",
                    dose_adjustment: Some("Avoid simvastatin"),
                    alternatives: PREFERRED_STATINS,
                },
                Outcome {
                    phenotype: Phenotype::DecreasedFunction,
                    risk: RiskTier::High,
                    guidance: "Increased simvastatin acid exposure with a 4-5x higher myopathy \
                        risk at 80 mg. Prescribe an alternative statin; if simvastatin is \
                        required, limit the dose to 20 mg/day.",
                    dose_adjustment: Some("Do not exceed 20 mg/day"),
                    alternatives: PREFERRED_STATINS,
                },
                standard_dose(
                    Phenotype::NormalFunction,
                    "Normal myopathy risk. Prescribe the desired starting dose and adjust per \
                     disease-specific guidelines.",
                ),
            ],
        },
        DrugRule {
            drug: "Atorvastatin",
            guideline: STATIN_GUIDELINE,
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorFunction,
                    risk: RiskTier::High,
                    guidance: "Increased atorvastatin exposure and myopathy risk. Prescribe 20 mg \
                        or less; if a higher dose is needed, consider rosuvastatin or \
                        combination therapy.",
                    dose_adjustment: Some("Do not exceed 20 mg/day"),
                    alternatives: &["Rosuvastatin"],
                },
                Outcome {
                    phenotype: Phenotype::DecreasedFunction,
                    risk: RiskTier::Moderate,
                    guidance: "Increased atorvastatin exposure. Prescribe 40 mg or less; if a \
                        higher dose is needed, consider rosuvastatin or combination therapy.",
                    dose_adjustment: Some("Do not exceed 40 mg/day"),
                    alternatives: &["Rosuvastatin"],
                },
                standard_dose(
                    Phenotype::NormalFunction,
                    "Prescribe the desired starting dose and adjust per disease-specific \
                     guidelines.",
                ),
            ],
        },
        DrugRule {
            drug: "Rosuvastatin",
            guideline: STATIN_GUIDELINE,
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorFunction,
                    risk: RiskTier::Moderate,
                    guidance: "Increased rosuvastatin exposure. Prescribe 20 mg or less; if a \
                        higher dose is needed, consider combination therapy.",
                    dose_adjustment: Some("Do not exceed 20 mg/day"),
                    alternatives: &[],
                },
                standard_dose(
                    Phenotype::DecreasedFunction,
                    "Prescribe the desired starting dose and adjust per disease-specific \
                     guidelines.",
                ),
                standard_dose(
                    Phenotype::NormalFunction,
                    "Prescribe the desired starting dose and adjust per disease-specific \
                     guidelines.",
                ),
            ],
        },
        DrugRule {
            drug: "Pravastatin",
            guideline: STATIN_GUIDELINE,
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorFunction,
                    risk: RiskTier::Moderate,
                    guidance: "Increased pravastatin exposure. Prescribe 40 mg or less; if a \
                        higher dose is needed, consider an alternative statin or combination \
                        therapy.",
                    dose_adjustment: Some("Do not exceed 40 mg/day"),
                    alternatives: &["Rosuvastatin"],
                },
                standard_dose(
                    Phenotype::DecreasedFunction,
                    "Prescribe the desired starting dose; doses above 40 mg may carry \
                     slightly increased myopathy risk.",
                ),
                standard_dose(
                    Phenotype::NormalFunction,
                    "Prescribe the desired starting dose and adjust per disease-specific \
                     guidelines.",
                ),
            ],
        },
        DrugRule {
            drug: "Pitavastatin",
            guideline: STATIN_GUIDELINE,
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorFunction,
                    risk: RiskTier::Moderate,
                    guidance: "Increased pitavastatin exposure. Prescribe 1 mg or less; if a \
                        higher dose is needed, consider an alternative statin or combination \
                        therapy.",
                    dose_adjustment: Some("Do not exceed 1 mg/day"),
                    alternatives: &["Rosuvastatin"],
                },
                standard_dose(
                    Phenotype::DecreasedFunction,
                    "Prescribe the desired starting dose; doses above 2 mg may carry \
                     increased myopathy risk.",
                ),
                standard_dose(
                    Phenotype::NormalFunction,
                    "Prescribe the desired starting dose and adjust per disease-specific \
                     guidelines.",
                ),
            ],
        },
        DrugRule {
            drug: "Lovastatin",
            guideline: STATIN_GUIDELINE,
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorFunction,
                    risk: RiskTier::High,
                    guidance: "Markedly increased lovastatin acid exposure. Prescribe an \
                        alternative statin.",
                    dose_adjustment: Some("Avoid lovastatin"),
                    alternatives: PREFERRED_STATINS,
                },
                Outcome {
                    phenotype: Phenotype::DecreasedFunction,
                    risk: RiskTier::Moderate,
                    guidance: "Increased lovastatin acid exposure. Prescribe an alternative \
                        statin; if lovastatin is required, limit the dose to 20 mg/day.",
                    dose_adjustment: Some("Do not exceed 20 mg/day"),
                    alternatives: PREFERRED_STATINS,
                },
                standard_dose(
                    Phenotype::NormalFunction,
                    "Prescribe the desired starting dose and adjust per disease-specific \
                     guidelines.",
                ),
            ],
        },
        DrugRule {
            drug: "Fluvastatin",
            guideline: STATIN_GUIDELINE,
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::PoorFunction,
                    risk: RiskTier::Moderate,
                    guidance: "Increased fluvastatin exposure. Prescribe 40 mg or less; if a \
                        higher dose is needed, consider an alternative statin.",
                    dose_adjustment: Some("Do not exceed 40 mg/day"),
                    alternatives: &["Rosuvastatin"],
                },
                standard_dose(
                    Phenotype::DecreasedFunction,
                    "Prescribe the desired starting dose; doses above 40 mg may carry \
                     increased myopathy risk.",
                ),
                standard_dose(
                    Phenotype::NormalFunction,
                    "Prescribe the desired starting dose and adjust per disease-specific \
                     guidelines.",
                ),
            ],
        },
    ],
    limitations: &[
        "Only rs4149056 (c.521T>C) is assayed; other reduced-function SLCO1B1 alleles and the \
         increased-function *14 allele are not detected.",
        "*5 is reported for any c.521C allele; *15 and *17, which share this variant, cannot be \
         distinguished.",
        "ABCG2 and CYP2C9 also affect statin exposure and are not considered in the statin \
         recommendations.",
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MyopathyRisk {
    Normal,
    Increased,
    High,
    Unknown,
}

/// Statin-associated musculoskeletal symptom risk, keyed to simvastatin 80 mg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatinMyopathyRisk {
    pub myopathy_risk: MyopathyRisk,
    pub risk_multiplier: String,
}

#[must_use]
pub fn statin_myopathy_risk(findings: &Findings) -> StatinMyopathyRisk {
    let (risk, multiplier) = match findings.phenotype() {
        Phenotype::PoorFunction => (MyopathyRisk::High, "~17x baseline risk"),
        Phenotype::DecreasedFunction => (MyopathyRisk::Increased, "4-5x baseline risk"),
        Phenotype::NormalFunction => (MyopathyRisk::Normal, "Baseline risk"),
        _ => (MyopathyRisk::Unknown, "Cannot be estimated"),
    };
    StatinMyopathyRisk {
        myopathy_risk: risk,
        risk_multiplier: multiplier.to_string(),
    }
}

#[must_use]
pub fn alerts(findings: &Findings) -> Vec<String> {
    match findings.phenotype() {
        Phenotype::PoorFunction => vec![
            format!(
                "CRITICAL: SLCO1B1 Poor Function ({}). Avoid simvastatin and lovastatin; \
                 approximately 17x myopathy risk.",
                findings.diplotype
            ),
            "SLCO1B1 Poor Function: cap atorvastatin, rosuvastatin, pravastatin, pitavastatin \
             and fluvastatin doses."
                .to_string(),
        ],
        Phenotype::DecreasedFunction => vec![format!(
            "SLCO1B1 Decreased Function ({}): 4-5x myopathy risk with high-dose simvastatin; \
             prefer pravastatin, rosuvastatin or pitavastatin.",
            findings.diplotype
        )],
        _ => Vec::new(),
    }
}

#[must_use]
pub fn function_paragraph(findings: &Findings) -> Option<String> {
    let text = match findings.phenotype() {
        Phenotype::PoorFunction => {
            "Two no-function alleles sharply reduce hepatic statin uptake. Plasma statin \
             concentrations rise, and with them the risk of statin-associated muscle symptoms \
             and rhabdomyolysis."
        }
        Phenotype::DecreasedFunction => {
            "One no-function allele reduces hepatic statin uptake. Exposure to simvastatin acid \
             and, to a lesser extent, other statins is increased."
        }
        Phenotype::NormalFunction => {
            "No reduced-function alleles were detected; hepatic statin uptake is expected to be \
             normal."
        }
        _ => return None,
    };
    Some(text.to_string())
}
