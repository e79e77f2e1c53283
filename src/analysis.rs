//! The per-gene pipeline: normalize, call, score confidence, classify, recommend, compose.

use crate::confidence;
use crate::error::Error;
use crate::gene::Gene;
use crate::genes::{self, Findings, cyp2c9, cyp3a5, f5, slco1b1, ugt1a1, vkorc1};
use crate::genotype::VariantCall;
use crate::phenotype::Phenotype;
use crate::provider::Provider;
use crate::recommendation::recommend;
use crate::result::{AnalysisResult, GeneSpecific};
use crate::validation::validate_result;
use crate::warfarin::{self, CombinedWarfarinRisk};

/// Inputs that are not genotype calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    pub provider: Provider,
    /// CYP2C9 phenotype for the warfarin cross-gene check, when CYP2C9 was analyzed.
    pub cyp2c9_phenotype: Option<Phenotype>,
}

/// Run one gene's pipeline over a set of raw calls.
///
/// Calls for other genes' variants are ignored. Missing and malformed genotypes never fail;
/// the only error is an internally inconsistent result.
pub fn analyze_gene(
    gene: Gene,
    calls: &[VariantCall],
    options: &AnalysisOptions,
) -> Result<AnalysisResult, Error> {
    let panel = genes::panel(gene);

    let genotypes = panel.caller.normalize(calls);
    let outcome = panel.caller.call(&genotypes);
    let confidence = confidence::score(&outcome.diplotype, &outcome.evidence);
    let diplotype = outcome.diplotype.with_confidence(confidence);
    let classification = panel.classifier.classify(&diplotype);

    let findings = Findings {
        gene,
        diplotype,
        classification,
        confidence,
    };

    tracing::debug!(
        %gene,
        %diplotype,
        phenotype = %classification.phenotype,
        score = classification.score.value,
        %confidence,
        "classified"
    );

    let mut recommendations = recommend(panel.drugs, findings.phenotype());

    let combined_risk = (gene == Gene::Vkorc1)
        .then(|| combined_warfarin_risk(&findings, options.cyp2c9_phenotype))
        .flatten();
    if let Some(risk) = &combined_risk {
        recommendations.push(warfarin::recommendation(risk));
    }

    let (alerts, function, gene_specific) = match gene {
        Gene::Ugt1a1 => (
            ugt1a1::alerts(&findings),
            ugt1a1::function_paragraph(&findings),
            Some(GeneSpecific::GilbertSyndrome(ugt1a1::gilbert_syndrome(&findings))),
        ),
        Gene::Slco1b1 => (
            slco1b1::alerts(&findings),
            slco1b1::function_paragraph(&findings),
            Some(GeneSpecific::StatinMyopathy(slco1b1::statin_myopathy_risk(&findings))),
        ),
        Gene::Cyp3a5 => (
            cyp3a5::alerts(&findings),
            cyp3a5::function_paragraph(&findings),
            None,
        ),
        Gene::F5 => (
            f5::alerts(&findings),
            f5::function_paragraph(&findings),
            Some(GeneSpecific::Thrombophilia(f5::thrombophilia_assessment(&findings))),
        ),
        Gene::Cyp2c9 => (
            cyp2c9::alerts(&findings),
            cyp2c9::function_paragraph(&findings),
            None,
        ),
        Gene::Vkorc1 => (
            vkorc1::alerts(&findings, combined_risk.as_ref()),
            vkorc1::function_paragraph(&findings),
            Some(GeneSpecific::WarfarinSensitivity(vkorc1::warfarin_sensitivity(
                &findings,
                combined_risk.clone(),
            ))),
        ),
    };

    let summary = genes::join_paragraphs([
        Some(genes::headline(panel, &findings)),
        function,
        combined_risk.as_ref().map(vkorc1::combined_paragraph),
        Some(genes::drug_paragraph(&recommendations)),
        genes::confidence_paragraph(&findings),
    ]);

    let limitations = panel
        .limitations
        .iter()
        .chain(options.provider.limitations())
        .map(|s| s.to_string())
        .collect();

    let result = AnalysisResult {
        gene,
        genotypes,
        diplotype,
        score: classification.score,
        phenotype: classification.phenotype,
        confidence,
        recommendations,
        alerts,
        summary,
        limitations,
        gene_specific,
    };

    validate_result(&result)?;
    Ok(result)
}

/// The combined risk is omitted only when neither gene has anything to contribute.
fn combined_warfarin_risk(
    findings: &Findings,
    cyp2c9_phenotype: Option<Phenotype>,
) -> Option<CombinedWarfarinRisk> {
    let vkorc1 = findings.phenotype();
    if vkorc1.is_unknown() && cyp2c9_phenotype.is_none() {
        return None;
    }
    Some(warfarin::resolve_warfarin_risk(vkorc1, cyp2c9_phenotype))
}
