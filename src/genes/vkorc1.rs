//! VKORC1: warfarin target sensitivity from the -1639G>A promoter variant.
//!
//! rs9923231 is reported on either strand by consumer arrays; both `G/A` and the plus-strand
//! `C/T` spellings map onto the same alleles. The score counts `A` alleles, so it rises with
//! drug sensitivity.

use serde::Serialize;

use super::{Findings, GenePanel};
use crate::caller::{AbsentPolicy, CallStrategy, CallerTable, DefiningVariant, GenotypeRule, Requirement};
use crate::gene::Gene;
use crate::genotype::Orientation;
use crate::phenotype::{Classifier, GenotypeClass, Method, Phenotype, ScoreKind};
use crate::recommendation::{CpicLevel, DrugRule, Guideline, Outcome, RiskTier};
use crate::warfarin::{CombinedRiskBand, CombinedWarfarinRisk};

pub static PANEL: GenePanel = GenePanel {
    gene: Gene::Vkorc1,
    name: "vitamin K epoxide reductase complex subunit 1",
    caller: CallerTable {
        variants: &[DefiningVariant {
            rsid: "rs9923231",
            orientation: Orientation::Undirected,
            requirement: Requirement::Required,
            rules: &[
                GenotypeRule { genotype: "GG", alleles: ("G", "G") },
                GenotypeRule { genotype: "AG", alleles: ("G", "A") },
                GenotypeRule { genotype: "AA", alleles: ("A", "A") },
                GenotypeRule { genotype: "CC", alleles: ("G", "G") },
                GenotypeRule { genotype: "CT", alleles: ("G", "A") },
                GenotypeRule { genotype: "TT", alleles: ("A", "A") },
            ],
        }],
        reference: ("G", "G"),
        strategy: CallStrategy::FirstNonReference,
        when_absent: AbsentPolicy::Unknown,
    },
    classifier: Classifier {
        kind: ScoreKind::Sensitivity,
        weights: &[("G", 0.0), ("A", 1.0)],
        method: Method::Lookup(&[
            GenotypeClass { alleles: ("G", "G"), phenotype: Phenotype::NormalSensitivity },
            GenotypeClass { alleles: ("G", "A"), phenotype: Phenotype::IntermediateSensitivity },
            GenotypeClass { alleles: ("A", "A"), phenotype: Phenotype::HighSensitivity },
        ]),
    },
    phenotypes: &[
        Phenotype::NormalSensitivity,
        Phenotype::IntermediateSensitivity,
        Phenotype::HighSensitivity,
    ],
    drugs: &[
        DrugRule {
            drug: "Warfarin",
            guideline: Guideline {
                cpic_level: Some(CpicLevel::A),
                source: "CPIC Guideline for Pharmacogenetics-Guided Warfarin Dosing (2017)",
                evidence: "",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::HighSensitivity,
                    risk: RiskTier::High,
                    guidance: "Markedly increased warfarin sensitivity. Start at a substantially \
                        reduced dose using a validated pharmacogenetic dosing algorithm and \
                        monitor INR closely.",
                    dose_adjustment: Some("Expected maintenance dose 0.5-2 mg/day"),
                    alternatives: &["Direct oral anticoagulants where clinically appropriate"],
                },
                Outcome {
                    phenotype: Phenotype::IntermediateSensitivity,
                    risk: RiskTier::Moderate,
                    guidance: "Increased warfarin sensitivity. Use a pharmacogenetic dosing \
                        algorithm; a lower than average maintenance dose is expected.",
                    dose_adjustment: Some("Expected maintenance dose 3-4 mg/day"),
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::NormalSensitivity,
                    risk: RiskTier::Low,
                    guidance: "Typical warfarin sensitivity. Dose with a validated algorithm and \
                        routine INR monitoring.",
                    dose_adjustment: Some("Expected maintenance dose 5-7 mg/day"),
                    alternatives: &[],
                },
            ],
        },
        DrugRule {
            drug: "Acenocoumarol",
            guideline: Guideline {
                cpic_level: None,
                source: "DPWG VKORC1-acenocoumarol guideline",
                evidence: "DPWG actionable",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::HighSensitivity,
                    risk: RiskTier::High,
                    guidance: "Increased risk of over-anticoagulation. Use 50% of the standard \
                        initial dose and monitor INR more frequently.",
                    dose_adjustment: Some("50% of standard initial dose"),
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::IntermediateSensitivity,
                    risk: RiskTier::Low,
                    guidance: "No dose adjustment required; monitor INR as usual.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::NormalSensitivity,
                    risk: RiskTier::Low,
                    guidance: "Standard dosing and INR monitoring.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
        DrugRule {
            drug: "Phenprocoumon",
            guideline: Guideline {
                cpic_level: None,
                source: "DPWG VKORC1-phenprocoumon guideline",
                evidence: "DPWG actionable",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::HighSensitivity,
                    risk: RiskTier::High,
                    guidance: "Increased risk of over-anticoagulation. Use 50% of the standard \
                        initial dose and monitor INR more frequently.",
                    dose_adjustment: Some("50% of standard initial dose"),
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::IntermediateSensitivity,
                    risk: RiskTier::Low,
                    guidance: "No dose adjustment required; monitor INR as usual.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
                Outcome {
                    phenotype: Phenotype::NormalSensitivity,
                    risk: RiskTier::Low,
                    guidance: "Standard dosing and INR monitoring.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
    ],
    limitations: &[
        "Only the -1639G>A promoter variant (rs9923231) is assayed; rare coding variants that \
         cause warfarin resistance are not detected.",
        "Warfarin dose also depends on CYP2C9, CYP4F2, age, body size, and interacting drugs; \
         use a validated dosing algorithm.",
    ],
};

/// Relative VKORC1 expression implied by the promoter genotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Expression {
    Normal,
    Reduced,
    Low,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarfarinSensitivity {
    pub expression: Expression,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined_risk: Option<CombinedWarfarinRisk>,
}

#[must_use]
pub fn warfarin_sensitivity(
    findings: &Findings,
    combined_risk: Option<CombinedWarfarinRisk>,
) -> WarfarinSensitivity {
    let expression = match findings.phenotype() {
        Phenotype::NormalSensitivity => Expression::Normal,
        Phenotype::IntermediateSensitivity => Expression::Reduced,
        Phenotype::HighSensitivity => Expression::Low,
        _ => Expression::Unknown,
    };
    WarfarinSensitivity {
        expression,
        combined_risk,
    }
}

#[must_use]
pub fn alerts(findings: &Findings, combined: Option<&CombinedWarfarinRisk>) -> Vec<String> {
    let mut alerts = match findings.phenotype() {
        Phenotype::HighSensitivity => vec![format!(
            "VKORC1 High Sensitivity ({}): warfarin requirements are markedly reduced; start low \
             and monitor INR closely.",
            findings.diplotype
        )],
        Phenotype::IntermediateSensitivity => vec![format!(
            "VKORC1 Intermediate Sensitivity ({}): a lower warfarin maintenance dose is expected.",
            findings.diplotype
        )],
        _ => Vec::new(),
    };

    if let Some(risk) = combined {
        match risk.combined_risk {
            CombinedRiskBand::VeryHigh => alerts.push(format!(
                "CRITICAL: Combined VKORC1/CYP2C9 warfarin bleeding risk Very High ({}); \
                 estimated dose {}.",
                risk.bleeding_risk_multiplier, risk.estimated_dose
            )),
            CombinedRiskBand::High => alerts.push(format!(
                "Combined VKORC1/CYP2C9 warfarin bleeding risk High ({}); estimated dose {}.",
                risk.bleeding_risk_multiplier, risk.estimated_dose
            )),
            CombinedRiskBand::Moderate | CombinedRiskBand::Normal => {}
        }
    }
    alerts
}

#[must_use]
pub fn function_paragraph(findings: &Findings) -> Option<String> {
    let text = match findings.phenotype() {
        Phenotype::HighSensitivity => {
            "Two copies of the -1639A promoter allele greatly reduce VKORC1 expression, so much \
             less warfarin is needed to reach a therapeutic INR."
        }
        Phenotype::IntermediateSensitivity => {
            "One copy of the -1639A promoter allele reduces VKORC1 expression, lowering the \
             warfarin dose needed for a therapeutic INR."
        }
        Phenotype::NormalSensitivity => {
            "No -1639A promoter allele was detected; VKORC1 expression and warfarin sensitivity \
             are expected to be typical."
        }
        _ => return None,
    };
    Some(text.to_string())
}

/// Paragraph describing the combined warfarin risk, when one was resolved.
#[must_use]
pub fn combined_paragraph(risk: &CombinedWarfarinRisk) -> String {
    match &risk.note {
        Some(note) => note.clone(),
        None => format!(
            "Combined with CYP2C9 ({}), the warfarin bleeding risk is {} ({}) with an estimated \
             maintenance dose of {}.",
            risk.cyp2c9_phenotype
                .map_or_else(|| "unknown".to_string(), |p| p.to_string()),
            risk.combined_risk,
            risk.bleeding_risk_multiplier,
            risk.estimated_dose
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genes::findings_for;
    use crate::warfarin::resolve_warfarin_risk;

    #[test]
    fn expression_per_phenotype() {
        let cases = [
            (Phenotype::NormalSensitivity, Expression::Normal),
            (Phenotype::IntermediateSensitivity, Expression::Reduced),
            (Phenotype::HighSensitivity, Expression::Low),
            (Phenotype::Unknown, Expression::Unknown),
        ];
        for (phenotype, expression) in cases {
            let block = warfarin_sensitivity(&findings_for(Gene::Vkorc1, phenotype), None);
            assert_eq!(block.expression, expression, "{phenotype}");
            assert!(block.combined_risk.is_none());
        }
    }

    #[test]
    fn sensitivity_field_names() {
        let findings = findings_for(Gene::Vkorc1, Phenotype::IntermediateSensitivity);

        let alone = serde_json::to_value(warfarin_sensitivity(&findings, None)).unwrap();
        assert_eq!(alone["expression"], "Reduced");
        assert!(alone.get("combinedRisk").is_none());

        let combined = resolve_warfarin_risk(
            Phenotype::IntermediateSensitivity,
            Some(Phenotype::NormalMetabolizer),
        );
        let json = serde_json::to_value(warfarin_sensitivity(&findings, Some(combined))).unwrap();
        assert_eq!(json["expression"], "Reduced");
        assert!(json["combinedRisk"].is_object());
    }
}
