//! The per-gene analysis result and its gene-specific blocks.

use serde::Serialize;

use crate::diplotype::{Confidence, Diplotype};
use crate::gene::Gene;
use crate::genes::f5::ThrombophiliaAssessment;
use crate::genes::slco1b1::StatinMyopathyRisk;
use crate::genes::ugt1a1::GilbertSyndrome;
use crate::genes::vkorc1::WarfarinSensitivity;
use crate::genotype::NormalizedGenotype;
use crate::phenotype::{Phenotype, Score};
use crate::recommendation::Recommendation;

/// Typed per-gene extension of an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneSpecific {
    GilbertSyndrome(GilbertSyndrome),
    StatinMyopathy(StatinMyopathyRisk),
    Thrombophilia(ThrombophiliaAssessment),
    WarfarinSensitivity(WarfarinSensitivity),
}

impl GeneSpecific {
    /// The only gene this block may accompany.
    #[must_use]
    pub fn gene(&self) -> Gene {
        match self {
            GeneSpecific::GilbertSyndrome(_) => Gene::Ugt1a1,
            GeneSpecific::StatinMyopathy(_) => Gene::Slco1b1,
            GeneSpecific::Thrombophilia(_) => Gene::F5,
            GeneSpecific::WarfarinSensitivity(_) => Gene::Vkorc1,
        }
    }
}

/// Everything the pipeline concluded about one gene.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub gene: Gene,
    /// Normalized calls for the gene's defining variants, in panel order.
    pub genotypes: Vec<NormalizedGenotype>,
    pub diplotype: Diplotype,
    pub score: Score,
    pub phenotype: Phenotype,
    pub confidence: Confidence,
    pub recommendations: Vec<Recommendation>,
    pub alerts: Vec<String>,
    pub summary: String,
    pub limitations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gene_specific: Option<GeneSpecific>,
}

impl AnalysisResult {
    /// Recommendations at moderate tier or above.
    pub fn actionable(&self) -> impl Iterator<Item = &Recommendation> {
        self.recommendations
            .iter()
            .filter(|r| r.risk_tier.is_actionable())
    }
}
