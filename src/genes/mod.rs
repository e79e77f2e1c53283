//! Per-gene rule panels: calling tables, classifiers, drug tables, and text templates.

pub mod cyp2c9;
pub mod cyp3a5;
pub mod f5;
pub mod slco1b1;
pub mod ugt1a1;
pub mod vkorc1;

use crate::caller::CallerTable;
use crate::diplotype::{Confidence, Diplotype};
use crate::gene::Gene;
use crate::phenotype::{Classification, Classifier, Phenotype};
use crate::recommendation::{DrugRule, Recommendation};

/// Everything the pipeline needs to know about one gene.
#[derive(Debug)]
pub struct GenePanel {
    pub gene: Gene,
    pub name: &'static str,
    pub caller: CallerTable,
    pub classifier: Classifier,
    /// The gene's phenotype set, excluding `Unknown`.
    pub phenotypes: &'static [Phenotype],
    /// Drug decision tables in priority order.
    pub drugs: &'static [DrugRule],
    pub limitations: &'static [&'static str],
}

impl GenePanel {
    /// Every rsID this panel reads.
    pub fn variant_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.caller.variants.iter().map(|v| v.rsid)
    }
}

#[must_use]
pub fn panel(gene: Gene) -> &'static GenePanel {
    match gene {
        Gene::Cyp2c9 => &cyp2c9::PANEL,
        Gene::Cyp3a5 => &cyp3a5::PANEL,
        Gene::F5 => &f5::PANEL,
        Gene::Slco1b1 => &slco1b1::PANEL,
        Gene::Ugt1a1 => &ugt1a1::PANEL,
        Gene::Vkorc1 => &vkorc1::PANEL,
    }
}

/// True if any gene panel reads this variant.
#[must_use]
pub fn is_panel_variant(variant_id: &str) -> bool {
    Gene::ALL
        .iter()
        .flat_map(|gene| panel(*gene).variant_ids())
        .any(|rsid| rsid.eq_ignore_ascii_case(variant_id.trim()))
}

/// The called and classified state of one gene, shared by the text templates.
#[derive(Debug, Clone, Copy)]
pub struct Findings {
    pub gene: Gene,
    pub diplotype: Diplotype,
    pub classification: Classification,
    pub confidence: Confidence,
}

impl Findings {
    #[must_use]
    pub fn phenotype(&self) -> Phenotype {
        self.classification.phenotype
    }
}

/// Opening paragraph: diplotype, score, phenotype.
#[must_use]
pub fn headline(panel: &GenePanel, findings: &Findings) -> String {
    if findings.phenotype().is_unknown() {
        return format!(
            "{} ({}) could not be genotyped from the supplied data: the variants that define its \
             diplotype were missing or could not be interpreted. No phenotype has been assigned.",
            panel.gene, panel.name
        );
    }
    format!(
        "{} ({}) diplotype {} ({} {:.1}) corresponds to the {} phenotype.",
        panel.gene,
        panel.name,
        findings.diplotype,
        findings.classification.score.kind,
        findings.classification.score.value,
        findings.phenotype(),
    )
}

/// Closing paragraph: which drugs need action.
#[must_use]
pub fn drug_paragraph(recommendations: &[Recommendation]) -> String {
    let actionable: Vec<String> = recommendations
        .iter()
        .filter(|r| r.risk_tier.is_actionable())
        .map(|r| format!("{} ({} risk)", r.subject, r.risk_tier))
        .collect();

    if actionable.is_empty() {
        "No genotype-guided dosing changes are indicated for the drugs evaluated; prescribe \
         according to standard clinical practice."
            .to_string()
    } else {
        format!(
            "Genotype-guided prescribing changes are indicated for: {}. See the individual \
             recommendations for dose guidance.",
            actionable.join(", ")
        )
    }
}

/// Paragraph describing data completeness, if it is less than complete.
#[must_use]
pub fn confidence_paragraph(findings: &Findings) -> Option<String> {
    match findings.confidence {
        Confidence::High => None,
        Confidence::Medium => Some(
            "Confidence is medium: the primary defining variant was genotyped, but one or more \
             secondary variants were not present in the data."
                .to_string(),
        ),
        Confidence::Low => Some(
            "Confidence is low: one or more required defining variants were absent or could not \
             be interpreted, so this result should be confirmed by clinical genotyping."
                .to_string(),
        ),
    }
}

/// Assemble a summary from its paragraphs, skipping empty ones.
#[must_use]
pub fn join_paragraphs(paragraphs: impl IntoIterator<Item = Option<String>>) -> String {
    paragraphs
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Findings for a bare phenotype, for exercising the per-gene text and block builders.
#[cfg(test)]
pub(crate) fn findings_for(gene: Gene, phenotype: Phenotype) -> Findings {
    use crate::phenotype::{Score, ScoreKind};

    let diplotype = if phenotype.is_unknown() {
        Diplotype::unknown()
    } else {
        let reference = panel(gene).caller.reference;
        Diplotype::named(reference.0, reference.1)
    };
    Findings {
        gene,
        diplotype,
        classification: Classification {
            phenotype,
            score: Score { kind: ScoreKind::Function, value: 0.0 },
        },
        confidence: Confidence::High,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_are_keyed_by_gene() {
        for gene in Gene::ALL {
            assert_eq!(panel(gene).gene, gene);
        }
    }

    #[test]
    fn panel_variants() {
        assert!(is_panel_variant("rs4148323"));
        assert!(is_panel_variant("RS6025"));
        assert!(!is_panel_variant("rs1"));
    }

    #[test]
    fn every_rule_allele_has_a_weight() {
        for gene in Gene::ALL {
            let p = panel(gene);
            let known: Vec<&str> = p.classifier.alleles().collect();
            for variant in p.caller.variants {
                for rule in variant.rules {
                    assert!(known.contains(&rule.alleles.0), "{gene} {}", rule.alleles.0);
                    assert!(known.contains(&rule.alleles.1), "{gene} {}", rule.alleles.1);
                }
            }
            assert!(known.contains(&p.caller.reference.0));
        }
    }

    #[test]
    fn every_gene_has_drugs_and_limitations() {
        for gene in Gene::ALL {
            let p = panel(gene);
            assert!(!p.drugs.is_empty(), "{gene}");
            assert!(!p.limitations.is_empty(), "{gene}");
            assert!(!p.phenotypes.is_empty(), "{gene}");
        }
    }

    #[test]
    fn join_skips_empty_paragraphs() {
        let text = join_paragraphs([Some("a".to_string()), None, Some(String::new()), Some("b".into())]);
        assert_eq!(text, "a\n\nb");
    }
}
