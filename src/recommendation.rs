//! Drug recommendations from per-drug phenotype decision tables.

use std::fmt;

use serde::Serialize;

use crate::phenotype::Phenotype;

/// Clinical risk attached to a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Critical,
    /// The phenotype could not be determined.
    Indeterminate,
}

impl RiskTier {
    /// Moderate or worse: the prescriber should act on the genotype.
    #[must_use]
    pub fn is_actionable(self) -> bool {
        matches!(self, RiskTier::Moderate | RiskTier::High | RiskTier::Critical)
    }

    #[must_use]
    pub fn is_critical_warning(self) -> bool {
        matches!(self, RiskTier::High | RiskTier::Critical)
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Moderate => write!(f, "Moderate"),
            RiskTier::High => write!(f, "High"),
            RiskTier::Critical => write!(f, "Critical"),
            RiskTier::Indeterminate => write!(f, "Indeterminate"),
        }
    }
}

/// CPIC evidence level for a gene-drug pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CpicLevel {
    A,
    B,
    C,
    D,
}

impl fmt::Display for CpicLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpicLevel::A => write!(f, "A"),
            CpicLevel::B => write!(f, "B"),
            CpicLevel::C => write!(f, "C"),
            CpicLevel::D => write!(f, "D"),
        }
    }
}

/// Guideline metadata for a drug. Descriptive only; never affects the risk tier.
#[derive(Debug)]
pub struct Guideline {
    pub cpic_level: Option<CpicLevel>,
    pub source: &'static str,
    /// Evidence grade in the source's own terms, used when there is no CPIC level.
    pub evidence: &'static str,
}

/// Decision-table row for one phenotype.
#[derive(Debug)]
pub struct Outcome {
    pub phenotype: Phenotype,
    pub risk: RiskTier,
    pub guidance: &'static str,
    pub dose_adjustment: Option<&'static str>,
    pub alternatives: &'static [&'static str],
}

/// Fully-enumerated decision table for one drug.
#[derive(Debug)]
pub struct DrugRule {
    pub drug: &'static str,
    pub guideline: Guideline,
    pub outcomes: &'static [Outcome],
}

impl DrugRule {
    #[must_use]
    pub fn outcome(&self, phenotype: Phenotype) -> Option<&'static Outcome> {
        self.outcomes.iter().find(|o| o.phenotype == phenotype)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuidelineCitation {
    pub source: String,
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub subject: String,
    pub risk_tier: RiskTier,
    pub guidance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose_adjustment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    pub cpic_guideline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpic_level: Option<CpicLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guideline_citation: Option<GuidelineCitation>,
}

const INDETERMINATE_GUIDANCE: &str = "Genotype could not be determined for this gene. Prescribe \
     according to standard clinical practice with routine monitoring, and consider confirmatory \
     pharmacogenetic testing before relying on genotype-guided dosing.";

/// One recommendation per drug, in table order.
#[must_use]
pub fn recommend(drugs: &[DrugRule], phenotype: Phenotype) -> Vec<Recommendation> {
    drugs.iter().map(|rule| recommend_drug(rule, phenotype)).collect()
}

fn recommend_drug(rule: &DrugRule, phenotype: Phenotype) -> Recommendation {
    let (risk_tier, guidance, dose_adjustment, alternatives) = match rule.outcome(phenotype) {
        Some(outcome) => (
            outcome.risk,
            outcome.guidance,
            outcome.dose_adjustment,
            outcome.alternatives,
        ),
        None => (RiskTier::Indeterminate, INDETERMINATE_GUIDANCE, None, &[][..]),
    };

    let level = match rule.guideline.cpic_level {
        Some(level) => format!("CPIC level {level}"),
        None => rule.guideline.evidence.to_string(),
    };

    Recommendation {
        subject: rule.drug.to_string(),
        risk_tier,
        guidance: guidance.to_string(),
        dose_adjustment: dose_adjustment.map(str::to_string),
        alternatives: alternatives.iter().map(|s| s.to_string()).collect(),
        cpic_guideline: rule.guideline.cpic_level.is_some(),
        cpic_level: rule.guideline.cpic_level,
        guideline_citation: Some(GuidelineCitation {
            source: rule.guideline.source.to_string(),
            level,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::Gene;
    use crate::genes;

    static DRUGS: &[DrugRule] = &[
        DrugRule {
            drug: "Exampletinib",
            guideline: Guideline {
                cpic_level: Some(CpicLevel::B),
                source: "Example guideline",
                evidence: "",
            },
            outcomes: &[Outcome {
                phenotype: Phenotype::PoorMetabolizer,
                risk: RiskTier::High,
                guidance: "Reduce dose.",
                dose_adjustment: Some("50% of standard dose"),
                alternatives: &["Otherinib"],
            }],
        },
        DrugRule {
            drug: "Labelmab",
            guideline: Guideline {
                cpic_level: None,
                source: "FDA drug label",
                evidence: "FDA label: actionable",
            },
            outcomes: &[Outcome {
                phenotype: Phenotype::PoorMetabolizer,
                risk: RiskTier::High,
                guidance: "Reduce dose.",
                dose_adjustment: None,
                alternatives: &[],
            }],
        },
    ];

    #[test]
    fn one_entry_per_drug_in_table_order() {
        let recs = recommend(DRUGS, Phenotype::PoorMetabolizer);
        let subjects: Vec<&str> = recs.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, ["Exampletinib", "Labelmab"]);
        assert_eq!(recs[0].alternatives, ["Otherinib"]);
        assert_eq!(recs[0].dose_adjustment.as_deref(), Some("50% of standard dose"));
    }

    #[test]
    fn guideline_tag_is_metadata_only() {
        let recs = recommend(DRUGS, Phenotype::PoorMetabolizer);
        assert!(recs[0].cpic_guideline);
        assert_eq!(recs[0].cpic_level, Some(CpicLevel::B));
        assert_eq!(recs[0].guideline_citation.as_ref().unwrap().level, "CPIC level B");
        assert!(!recs[1].cpic_guideline);
        assert_eq!(recs[1].cpic_level, None);
        assert_eq!(recs[0].risk_tier, recs[1].risk_tier);
    }

    #[test]
    fn missing_outcome_is_indeterminate() {
        let recs = recommend(DRUGS, Phenotype::Unknown);
        assert!(recs.iter().all(|r| r.risk_tier == RiskTier::Indeterminate));
        assert!(recs.iter().all(|r| r.dose_adjustment.is_none()));
    }

    #[test]
    fn every_drug_table_covers_every_known_phenotype() {
        for gene in Gene::ALL {
            let panel = genes::panel(gene);
            for drug in panel.drugs {
                for phenotype in panel.phenotypes {
                    assert!(
                        drug.outcome(*phenotype).is_some(),
                        "{gene} {} missing {phenotype}",
                        drug.drug
                    );
                }
            }
        }
    }

    #[test]
    fn cpic_level_serializes_as_letter() {
        let recs = recommend(DRUGS, Phenotype::PoorMetabolizer);
        let json = serde_json::to_value(&recs[0]).unwrap();
        assert_eq!(json["cpicLevel"], "B");
        assert_eq!(json["riskTier"], "high");
        assert!(json.get("doseAdjustment").is_some());
        let json = serde_json::to_value(&recs[1]).unwrap();
        assert!(json.get("alternatives").is_none());
    }
}
