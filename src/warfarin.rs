//! Cross-gene warfarin risk: VKORC1 sensitivity combined with CYP2C9 metabolism.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::phenotype::Phenotype;
use crate::recommendation::{CpicLevel, GuidelineCitation, Recommendation, RiskTier};

/// Ordinal combined bleeding-risk band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CombinedRiskBand {
    Normal,
    Moderate,
    High,
    VeryHigh,
}

impl fmt::Display for CombinedRiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombinedRiskBand::Normal => write!(f, "Normal"),
            CombinedRiskBand::Moderate => write!(f, "Moderate"),
            CombinedRiskBand::High => write!(f, "High"),
            CombinedRiskBand::VeryHigh => write!(f, "Very High"),
        }
    }
}

impl Serialize for CombinedRiskBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which genes contributed to the combined risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskBasis {
    BothGenes,
    InsufficientData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedWarfarinRisk {
    pub combined_risk: CombinedRiskBand,
    pub bleeding_risk_multiplier: String,
    pub estimated_dose: String,
    pub basis: RiskBasis,
    pub vkorc1_phenotype: Phenotype,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cyp2c9_phenotype: Option<Phenotype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

struct RiskRule {
    applies: fn(Phenotype, Phenotype) -> bool,
    band: CombinedRiskBand,
    bleeding_risk_multiplier: &'static str,
    estimated_dose: &'static str,
}

fn vkorc1_high(p: Phenotype) -> bool {
    p == Phenotype::HighSensitivity
}

fn cyp2c9_poor(p: Phenotype) -> bool {
    p == Phenotype::PoorMetabolizer
}

/// Checked top to bottom; the first matching row wins. More severe combinations come first.
static RISK_MATRIX: [RiskRule; 4] = [
    RiskRule {
        applies: |vk, cyp| vkorc1_high(vk) && cyp2c9_poor(cyp),
        band: CombinedRiskBand::VeryHigh,
        bleeding_risk_multiplier: "5-8x baseline risk",
        estimated_dose: "0.5-2mg/day",
    },
    RiskRule {
        applies: |vk, cyp| vkorc1_high(vk) || cyp2c9_poor(cyp),
        band: CombinedRiskBand::High,
        bleeding_risk_multiplier: "3-5x baseline risk",
        estimated_dose: "1-3mg/day",
    },
    RiskRule {
        applies: |vk, cyp| {
            vk == Phenotype::IntermediateSensitivity || cyp == Phenotype::IntermediateMetabolizer
        },
        band: CombinedRiskBand::Moderate,
        bleeding_risk_multiplier: "1.5-2x baseline risk",
        estimated_dose: "3-5mg/day",
    },
    RiskRule {
        applies: |_, _| true,
        band: CombinedRiskBand::Normal,
        bleeding_risk_multiplier: "Baseline risk",
        estimated_dose: "5-7mg/day",
    },
];

const INSUFFICIENT_MULTIPLIER: &str = "Cannot be fully estimated from a single gene";
const INSUFFICIENT_DOSE: &str = "Use a validated clinical dosing algorithm";

/// Subject of the cross-gene warfarin recommendation.
pub const COMBINED_SUBJECT: &str = "Warfarin (VKORC1 + CYP2C9)";

/// The drug a recommendation subject names. The cross-gene entry names warfarin.
#[must_use]
pub fn drug_name(subject: &str) -> &str {
    if subject == COMBINED_SUBJECT { "Warfarin" } else { subject }
}

/// Combine VKORC1 and CYP2C9 phenotypes into one warfarin risk band.
///
/// A missing or unknown phenotype for either gene yields a `Moderate` insufficient-data result
/// with a note naming the test still needed.
#[must_use]
pub fn resolve_warfarin_risk(vkorc1: Phenotype, cyp2c9: Option<Phenotype>) -> CombinedWarfarinRisk {
    let cyp2c9_known = cyp2c9.filter(|p| !p.is_unknown());

    let Some(cyp) = cyp2c9_known.filter(|_| !vkorc1.is_unknown()) else {
        let note = if vkorc1.is_unknown() {
            "VKORC1 genotype could not be determined; warfarin sensitivity cannot be estimated. \
             VKORC1 testing is recommended before genotype-guided dosing."
        } else {
            "CYP2C9 genotype not available; risk reflects VKORC1 only. CYP2C9 testing is \
             recommended to complete warfarin dosing guidance."
        };
        return CombinedWarfarinRisk {
            combined_risk: CombinedRiskBand::Moderate,
            bleeding_risk_multiplier: INSUFFICIENT_MULTIPLIER.to_string(),
            estimated_dose: INSUFFICIENT_DOSE.to_string(),
            basis: RiskBasis::InsufficientData,
            vkorc1_phenotype: vkorc1,
            cyp2c9_phenotype: cyp2c9,
            note: Some(note.to_string()),
        };
    };

    // The last row always applies.
    let rule = RISK_MATRIX
        .iter()
        .find(|rule| (rule.applies)(vkorc1, cyp))
        .unwrap_or(&RISK_MATRIX[RISK_MATRIX.len() - 1]);

    tracing::debug!(%vkorc1, cyp2c9 = %cyp, band = %rule.band, "resolved warfarin risk");

    CombinedWarfarinRisk {
        combined_risk: rule.band,
        bleeding_risk_multiplier: rule.bleeding_risk_multiplier.to_string(),
        estimated_dose: rule.estimated_dose.to_string(),
        basis: RiskBasis::BothGenes,
        vkorc1_phenotype: vkorc1,
        cyp2c9_phenotype: Some(cyp),
        note: None,
    }
}

/// The cross-gene warfarin recommendation, distinct from the single-gene entries.
#[must_use]
pub fn recommendation(risk: &CombinedWarfarinRisk) -> Recommendation {
    let (risk_tier, guidance) = match (risk.basis, risk.combined_risk) {
        (RiskBasis::InsufficientData, _) => (
            RiskTier::Moderate,
            format!(
                "Combined VKORC1/CYP2C9 assessment incomplete. {} Start with conservative dosing \
                 and frequent INR monitoring.",
                risk.note.as_deref().unwrap_or_default()
            ),
        ),
        (RiskBasis::BothGenes, CombinedRiskBand::VeryHigh) => (
            RiskTier::Critical,
            format!(
                "Greatly increased warfarin sensitivity ({}). Initiate at a substantially reduced \
                 dose, consider an alternative anticoagulant, and monitor INR closely during \
                 initiation.",
                risk.bleeding_risk_multiplier
            ),
        ),
        (RiskBasis::BothGenes, CombinedRiskBand::High) => (
            RiskTier::High,
            format!(
                "Increased warfarin sensitivity ({}). Reduce the initial dose and monitor INR \
                 frequently until stable.",
                risk.bleeding_risk_multiplier
            ),
        ),
        (RiskBasis::BothGenes, CombinedRiskBand::Moderate) => (
            RiskTier::Moderate,
            format!(
                "Moderately increased warfarin sensitivity ({}). A lower starting dose is \
                 expected; titrate to INR.",
                risk.bleeding_risk_multiplier
            ),
        ),
        (RiskBasis::BothGenes, CombinedRiskBand::Normal) => (
            RiskTier::Low,
            "Typical warfarin sensitivity. Standard initiation per a validated dosing \
             algorithm with routine INR monitoring."
                .to_string(),
        ),
    };

    Recommendation {
        subject: COMBINED_SUBJECT.to_string(),
        risk_tier,
        guidance,
        dose_adjustment: Some(format!("Estimated maintenance dose: {}", risk.estimated_dose)),
        alternatives: Vec::new(),
        cpic_guideline: true,
        cpic_level: Some(CpicLevel::A),
        guideline_citation: Some(GuidelineCitation {
            source: "CPIC Guideline for Pharmacogenetics-Guided Warfarin Dosing (2017)".to_string(),
            level: format!("CPIC level {}", CpicLevel::A),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_gene_subject_names_warfarin() {
        assert_eq!(drug_name(COMBINED_SUBJECT), "Warfarin");
        assert_eq!(drug_name("Acenocoumarol"), "Acenocoumarol");
    }

    #[test]
    fn both_high_risk_is_very_high() {
        let risk = resolve_warfarin_risk(Phenotype::HighSensitivity, Some(Phenotype::PoorMetabolizer));
        assert_eq!(risk.combined_risk, CombinedRiskBand::VeryHigh);
        assert_eq!(risk.bleeding_risk_multiplier, "5-8x baseline risk");
        assert_eq!(risk.estimated_dose, "0.5-2mg/day");
        assert_eq!(risk.basis, RiskBasis::BothGenes);
    }

    #[test]
    fn either_high_risk_is_high() {
        let risk =
            resolve_warfarin_risk(Phenotype::HighSensitivity, Some(Phenotype::NormalMetabolizer));
        assert_eq!(risk.combined_risk, CombinedRiskBand::High);
        let risk = resolve_warfarin_risk(
            Phenotype::IntermediateSensitivity,
            Some(Phenotype::PoorMetabolizer),
        );
        assert_eq!(risk.combined_risk, CombinedRiskBand::High);
    }

    #[test]
    fn severe_rows_are_tested_first() {
        // Matches both the high and moderate rows; the high row must win.
        let risk = resolve_warfarin_risk(
            Phenotype::HighSensitivity,
            Some(Phenotype::IntermediateMetabolizer),
        );
        assert_eq!(risk.combined_risk, CombinedRiskBand::High);
    }

    #[test]
    fn moderate_and_normal() {
        let risk = resolve_warfarin_risk(
            Phenotype::NormalSensitivity,
            Some(Phenotype::IntermediateMetabolizer),
        );
        assert_eq!(risk.combined_risk, CombinedRiskBand::Moderate);
        let risk =
            resolve_warfarin_risk(Phenotype::NormalSensitivity, Some(Phenotype::NormalMetabolizer));
        assert_eq!(risk.combined_risk, CombinedRiskBand::Normal);
        assert_eq!(risk.estimated_dose, "5-7mg/day");
    }

    #[test]
    fn missing_cyp2c9_is_insufficient_data() {
        let risk = resolve_warfarin_risk(Phenotype::HighSensitivity, None);
        assert_eq!(risk.combined_risk, CombinedRiskBand::Moderate);
        assert_eq!(risk.basis, RiskBasis::InsufficientData);
        assert!(risk.note.as_deref().unwrap().contains("CYP2C9 testing"));

        let risk = resolve_warfarin_risk(Phenotype::HighSensitivity, Some(Phenotype::Unknown));
        assert_eq!(risk.basis, RiskBasis::InsufficientData);
    }

    #[test]
    fn unknown_vkorc1_is_insufficient_data() {
        let risk = resolve_warfarin_risk(Phenotype::Unknown, Some(Phenotype::PoorMetabolizer));
        assert_eq!(risk.basis, RiskBasis::InsufficientData);
        assert!(risk.note.as_deref().unwrap().contains("VKORC1 testing"));
    }

    #[test]
    fn band_ordering() {
        assert!(CombinedRiskBand::Normal < CombinedRiskBand::Moderate);
        assert!(CombinedRiskBand::Moderate < CombinedRiskBand::High);
        assert!(CombinedRiskBand::High < CombinedRiskBand::VeryHigh);
        assert_eq!(
            serde_json::to_value(CombinedRiskBand::VeryHigh).unwrap(),
            "Very High"
        );
    }

    #[test]
    fn cross_gene_recommendation() {
        let risk = resolve_warfarin_risk(Phenotype::HighSensitivity, Some(Phenotype::PoorMetabolizer));
        let rec = recommendation(&risk);
        assert_eq!(rec.subject, "Warfarin (VKORC1 + CYP2C9)");
        assert_eq!(rec.risk_tier, RiskTier::Critical);
        assert!(rec.dose_adjustment.as_deref().unwrap().contains("0.5-2mg/day"));
        assert!(rec.guidance.contains("5-8x baseline risk"));
    }
}
