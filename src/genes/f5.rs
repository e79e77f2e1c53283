//! F5: Factor V Leiden (rs6025) and estrogen-associated thrombosis risk.
//!
//! There is no star-allele nomenclature here; the diplotype is the base pair itself, with `G`
//! as the normal allele and `A` as Leiden.

use serde::Serialize;

use super::{Findings, GenePanel};
use crate::caller::{AbsentPolicy, CallStrategy, CallerTable, DefiningVariant, GenotypeRule, Requirement};
use crate::gene::Gene;
use crate::genotype::Orientation;
use crate::phenotype::{Band, Bound, Classifier, Method, Phenotype, ScoreKind};
use crate::recommendation::{DrugRule, Guideline, Outcome, RiskTier};

pub static PANEL: GenePanel = GenePanel {
    gene: Gene::F5,
    name: "coagulation factor V",
    caller: CallerTable {
        variants: &[DefiningVariant {
            rsid: "rs6025",
            orientation: Orientation::Undirected,
            requirement: Requirement::Required,
            rules: &[
                GenotypeRule { genotype: "GG", alleles: ("G", "G") },
                GenotypeRule { genotype: "AG", alleles: ("G", "A") },
                GenotypeRule { genotype: "AA", alleles: ("A", "A") },
            ],
        }],
        reference: ("G", "G"),
        strategy: CallStrategy::FirstNonReference,
        when_absent: AbsentPolicy::Unknown,
    },
    classifier: Classifier {
        kind: ScoreKind::Function,
        weights: &[("G", 1.0), ("A", 0.0)],
        method: Method::Bands(&[
            Band { bound: Bound::AtLeast(2.0), phenotype: Phenotype::NoFactorVLeiden },
            Band { bound: Bound::AtLeast(1.0), phenotype: Phenotype::HeterozygousFactorVLeiden },
            Band { bound: Bound::Any, phenotype: Phenotype::HomozygousFactorVLeiden },
        ]),
    },
    phenotypes: &[
        Phenotype::NoFactorVLeiden,
        Phenotype::HeterozygousFactorVLeiden,
        Phenotype::HomozygousFactorVLeiden,
    ],
    drugs: &[
        DrugRule {
            drug: "Estrogen-containing contraceptives",
            guideline: Guideline {
                cpic_level: None,
                source: "FDA combined hormonal contraceptive labeling (boxed warning); CDC US \
                         Medical Eligibility Criteria for Contraceptive Use",
                evidence: "FDA boxed warning; US MEC category 4",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::HomozygousFactorVLeiden,
                    risk: RiskTier::Critical,
                    guidance: "Contraindicated. Estrogen-containing contraceptives raise venous \
                        thromboembolism risk far above the already very high baseline of a \
                        homozygous carrier. Use a non-hormonal method.",
                    dose_adjustment: None,
                    alternatives: &["Copper IUD", "Barrier methods"],
                },
                Outcome {
                    phenotype: Phenotype::HeterozygousFactorVLeiden,
                    risk: RiskTier::High,
                    guidance: "Contraindicated. Combined hormonal contraception multiplies the \
                        venous thromboembolism risk of a Factor V Leiden carrier. Use a \
                        progestin-only or non-hormonal method.",
                    dose_adjustment: None,
                    alternatives: &["Levonorgestrel IUD", "Copper IUD", "Progestin-only pill"],
                },
                Outcome {
                    phenotype: Phenotype::NoFactorVLeiden,
                    risk: RiskTier::Low,
                    guidance: "No Factor V Leiden detected. Standard contraceptive counselling \
                        applies; other thrombophilias are not excluded.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
        DrugRule {
            drug: "Hormone replacement therapy (oral estrogen)",
            guideline: Guideline {
                cpic_level: None,
                source: "FDA estrogen labeling (boxed warning); North American Menopause \
                         Society position statement",
                evidence: "FDA boxed warning",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::HomozygousFactorVLeiden,
                    risk: RiskTier::Critical,
                    guidance: "Avoid systemic oral estrogen. If menopausal hormone therapy is \
                        essential, consider transdermal estradiol only after hematology \
                        consultation.",
                    dose_adjustment: None,
                    alternatives: &["Transdermal estradiol (specialist review)", "Non-hormonal therapy"],
                },
                Outcome {
                    phenotype: Phenotype::HeterozygousFactorVLeiden,
                    risk: RiskTier::High,
                    guidance: "Oral estrogen increases venous thromboembolism risk in carriers. \
                        Prefer transdermal estradiol at the lowest effective dose or a \
                        non-hormonal alternative.",
                    dose_adjustment: Some("Prefer transdermal route at lowest effective dose"),
                    alternatives: &["Transdermal estradiol", "Non-hormonal therapy"],
                },
                Outcome {
                    phenotype: Phenotype::NoFactorVLeiden,
                    risk: RiskTier::Low,
                    guidance: "No Factor V Leiden detected. Standard menopausal hormone therapy \
                        risk assessment applies.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
        DrugRule {
            drug: "Selective estrogen receptor modulators",
            guideline: Guideline {
                cpic_level: None,
                source: "FDA tamoxifen and raloxifene labeling (boxed warning)",
                evidence: "FDA boxed warning",
            },
            outcomes: &[
                Outcome {
                    phenotype: Phenotype::HomozygousFactorVLeiden,
                    risk: RiskTier::High,
                    guidance: "Tamoxifen and raloxifene increase thromboembolic risk. Weigh \
                        benefit carefully; consider an aromatase inhibitor where indicated.",
                    dose_adjustment: None,
                    alternatives: &["Aromatase inhibitors"],
                },
                Outcome {
                    phenotype: Phenotype::HeterozygousFactorVLeiden,
                    risk: RiskTier::Moderate,
                    guidance: "Increased thromboembolic risk with tamoxifen or raloxifene. \
                        Discuss risk and monitor for signs of venous thrombosis.",
                    dose_adjustment: None,
                    alternatives: &["Aromatase inhibitors"],
                },
                Outcome {
                    phenotype: Phenotype::NoFactorVLeiden,
                    risk: RiskTier::Low,
                    guidance: "No Factor V Leiden detected. Standard prescribing applies.",
                    dose_adjustment: None,
                    alternatives: &[],
                },
            ],
        },
    ],
    limitations: &[
        "Only Factor V Leiden (rs6025) is assayed. Other inherited thrombophilias, including \
         prothrombin G20210A and protein C, protein S or antithrombin deficiency, are not \
         detected.",
        "A negative result does not exclude thrombophilia; family history remains relevant.",
        "Direct-to-consumer array calls for rs6025 should be confirmed by clinical testing \
         before changing therapy.",
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThrombophiliaRisk {
    Normal,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Suitability {
    Safe,
    Caution,
    Contraindicated,
    Undetermined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContraceptiveSafety {
    pub combined_oral: Suitability,
    pub progestin_only: Suitability,
    pub non_hormonal: Suitability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThrombophiliaAssessment {
    pub thrombophilia_risk: ThrombophiliaRisk,
    /// Fold increase in venous thromboembolism risk over non-carriers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vte_risk_multiplier: Option<u32>,
    pub contraceptive_safety: ContraceptiveSafety,
    pub fda_black_box_applies: bool,
}

#[must_use]
pub fn thrombophilia_assessment(findings: &Findings) -> ThrombophiliaAssessment {
    use Suitability::{Caution, Contraindicated, Safe, Undetermined};

    let (risk, multiplier, combined_oral, progestin_only) = match findings.phenotype() {
        Phenotype::HomozygousFactorVLeiden => {
            (ThrombophiliaRisk::VeryHigh, Some(50), Contraindicated, Caution)
        }
        Phenotype::HeterozygousFactorVLeiden => {
            (ThrombophiliaRisk::High, Some(5), Contraindicated, Caution)
        }
        Phenotype::NoFactorVLeiden => (ThrombophiliaRisk::Normal, Some(1), Safe, Safe),
        _ => (ThrombophiliaRisk::Unknown, None, Undetermined, Undetermined),
    };

    ThrombophiliaAssessment {
        thrombophilia_risk: risk,
        vte_risk_multiplier: multiplier,
        contraceptive_safety: ContraceptiveSafety {
            combined_oral,
            progestin_only,
            non_hormonal: Safe,
        },
        fda_black_box_applies: matches!(
            risk,
            ThrombophiliaRisk::High | ThrombophiliaRisk::VeryHigh
        ),
    }
}

#[must_use]
pub fn alerts(findings: &Findings) -> Vec<String> {
    match findings.phenotype() {
        Phenotype::HomozygousFactorVLeiden => vec![
            "CRITICAL: Homozygous Factor V Leiden. Venous thromboembolism risk is approximately \
             50x baseline."
                .to_string(),
            "CRITICAL: Estrogen-containing contraceptives and oral hormone replacement therapy \
             are contraindicated (FDA boxed warning)."
                .to_string(),
            "Consider hematology referral and thromboprophylaxis during surgery, immobilization \
             and pregnancy."
                .to_string(),
        ],
        Phenotype::HeterozygousFactorVLeiden => vec![
            "Heterozygous Factor V Leiden: venous thromboembolism risk is approximately 5x \
             baseline."
                .to_string(),
            "Estrogen-containing contraceptives are contraindicated (FDA boxed warning); prefer \
             progestin-only or non-hormonal methods."
                .to_string(),
        ],
        _ => Vec::new(),
    }
}

#[must_use]
pub fn function_paragraph(findings: &Findings) -> Option<String> {
    let text = match findings.phenotype() {
        Phenotype::HomozygousFactorVLeiden => {
            "Both copies of factor V carry the Leiden variant, making it resistant to \
             inactivation by activated protein C. Lifetime venous thromboembolism risk is \
             markedly elevated, and estrogen exposure compounds it."
        }
        Phenotype::HeterozygousFactorVLeiden => {
            "One copy of factor V carries the Leiden variant, producing partial resistance to \
             activated protein C and a moderately increased risk of venous thromboembolism."
        }
        Phenotype::NoFactorVLeiden => {
            "The Factor V Leiden variant was not detected. Clotting risk from this variant is at \
             the population baseline."
        }
        _ => return None,
    };
    Some(text.to_string())
}
