//! CYP3A5: expressor status for tacrolimus dosing.

use super::{Findings, GenePanel};
use crate::caller::{AbsentPolicy, CallStrategy, CallerTable, DefiningVariant, GenotypeRule, Requirement};
use crate::gene::Gene;
use crate::genotype::Orientation;
use crate::phenotype::{Classifier, GenotypeClass, Method, Phenotype, ScoreKind};
use crate::recommendation::{CpicLevel, DrugRule, Guideline, Outcome, RiskTier};

pub static PANEL: GenePanel = GenePanel {
    gene: Gene::Cyp3a5,
    name: "cytochrome P450 family 3 subfamily A member 5",
    caller: CallerTable {
        variants: &[DefiningVariant {
            rsid: "rs776746",
            orientation: Orientation::Undirected,
            requirement: Requirement::Required,
            rules: &[
                GenotypeRule { genotype: "AA", alleles: ("*1", "*1") },
                GenotypeRule { genotype: "AG", alleles: ("*1", "*3") },
                GenotypeRule { genotype: "GG", alleles: ("*3", "*3") },
            ],
        }],
        reference: ("*1", "*1"),
        strategy: CallStrategy::FirstNonReference,
        when_absent: AbsentPolicy::Unknown,
    },
    classifier: Classifier {
        kind: ScoreKind::Expression,
        weights: &[("*1", 1.0), ("*3", 0.0)],
        method: Method::Lookup(&[
            GenotypeClass { alleles: ("*1", "*1"), phenotype: Phenotype::Expressor },
            GenotypeClass { alleles: ("*1", "*3"), phenotype: Phenotype::IntermediateExpressor },
            GenotypeClass { alleles: ("*3", "*3"), phenotype: Phenotype::NonExpressor },
        ]),
    },
    phenotypes: &[
        Phenotype::Expressor,
        Phenotype::IntermediateExpressor,
        Phenotype::NonExpressor,
    ],
    drugs: &[DrugRule {
        drug: "Tacrolimus",
        guideline: Guideline {
            cpic_level: Some(CpicLevel::A),
            source: "CPIC Guideline for CYP3A5 Genotype and Tacrolimus Dosing (2015)",
            evidence: "",
        },
        outcomes: &[
            Outcome {
                phenotype: Phenotype::Expressor,
                risk: RiskTier::High,
                guidance: "Rapid tacrolimus clearance makes target trough concentrations \
                    unlikely at standard doses. Increase the starting dose 1.5-2x the \
                    recommended dose (not exceeding 0.3 mg/kg/day) and use therapeutic drug \
                    monitoring to guide adjustment.",
                dose_adjustment: Some("Increase starting dose 1.5-2x (max 0.3 mg/kg/day)"),
                alternatives: &[],
            },
            Outcome {
                phenotype: Phenotype::IntermediateExpressor,
                risk: RiskTier::Moderate,
                guidance: "Faster tacrolimus clearance lowers dose-adjusted trough \
                    concentrations. Increase the starting dose and use therapeutic drug \
                    monitoring to guide adjustment.",
                dose_adjustment: Some("Increase starting dose 1.2-1.5x (max 0.3 mg/kg/day)"),
                alternatives: &[],
            },
            Outcome {
                phenotype: Phenotype::NonExpressor,
                risk: RiskTier::Low,
                guidance: "Typical tacrolimus metabolism. Initiate at the standard starting \
                    dose with therapeutic drug monitoring.",
                dose_adjustment: None,
                alternatives: &[],
            },
        ],
    }],
    limitations: &[
        "Only rs776746 (*3) is assayed; the *6 (rs10264272) and *7 (rs41303343) \
         non-functional alleles are not tested, so some non-expressors may be reported as \
         expressors.",
        "*1 is assigned by default when *3 is absent.",
    ],
};

#[must_use]
pub fn alerts(findings: &Findings) -> Vec<String> {
    match findings.phenotype() {
        Phenotype::Expressor => vec![format!(
            "CYP3A5 Expressor ({}): standard tacrolimus doses are likely subtherapeutic; a \
             higher starting dose is recommended.",
            findings.diplotype
        )],
        Phenotype::IntermediateExpressor => vec![format!(
            "CYP3A5 Intermediate Expressor ({}): tacrolimus trough levels may be low at \
             standard doses.",
            findings.diplotype
        )],
        _ => Vec::new(),
    }
}

#[must_use]
pub fn function_paragraph(findings: &Findings) -> Option<String> {
    let text = match findings.phenotype() {
        Phenotype::Expressor => {
            "Two functional alleles produce CYP3A5 protein, so tacrolimus is cleared faster \
             than in most patients of European ancestry."
        }
        Phenotype::IntermediateExpressor => {
            "One functional allele produces CYP3A5 protein, increasing tacrolimus clearance \
             relative to non-expressors."
        }
        Phenotype::NonExpressor => {
            "Neither allele produces functional CYP3A5 protein. This is the most common \
             phenotype in many populations, and standard tacrolimus dosing assumes it."
        }
        _ => return None,
    };
    Some(text.to_string())
}
