//! Diplotype calling from normalized genotypes via per-gene rule tables.

use crate::diplotype::{Allele, Diplotype};
use crate::genotype::{self, NormalizedGenotype, Orientation, VariantCall};

/// Whether a defining variant must be present for a fully confident call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Supplementary,
}

/// Maps one canonical genotype of a defining variant to an allele pair.
#[derive(Debug)]
pub struct GenotypeRule {
    pub genotype: &'static str,
    pub alleles: (&'static str, &'static str),
}

/// A variant that defines (part of) a gene's diplotype.
#[derive(Debug)]
pub struct DefiningVariant {
    pub rsid: &'static str,
    pub orientation: Orientation,
    pub requirement: Requirement,
    pub rules: &'static [GenotypeRule],
}

impl DefiningVariant {
    fn lookup(&self, canonical: &str) -> Option<(&'static str, &'static str)> {
        self.rules
            .iter()
            .find(|rule| rule.genotype == canonical)
            .map(|rule| rule.alleles)
    }
}

/// How results from several defining variants combine into one diplotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStrategy {
    /// Variants are consulted in table order; the first non-reference result wins and later
    /// variants are only read while earlier ones are reference or silent.
    FirstNonReference,
    /// Non-reference alleles from every variant are pooled into the diplotype.
    Combine,
}

/// Diplotype reported when no defining variant could be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbsentPolicy {
    Unknown,
    AssumeReference,
}

/// The calling rules for one gene.
#[derive(Debug)]
pub struct CallerTable {
    pub variants: &'static [DefiningVariant],
    pub reference: (&'static str, &'static str),
    pub strategy: CallStrategy,
    pub when_absent: AbsentPolicy,
}

/// What happened to one defining variant during calling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceStatus {
    /// The genotype matched a rule.
    Resolved,
    /// A genotype was supplied but matched no rule.
    Unresolved,
    /// No genotype was supplied, or it was empty.
    Absent,
}

#[derive(Debug, Clone)]
pub struct VariantEvidence {
    pub rsid: &'static str,
    pub requirement: Requirement,
    pub status: EvidenceStatus,
    alleles: Option<(&'static str, &'static str)>,
}

impl VariantEvidence {
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.status == EvidenceStatus::Resolved
    }
}

/// A called diplotype together with the per-variant evidence behind it.
#[derive(Debug, Clone)]
pub struct CallOutcome {
    pub diplotype: Diplotype,
    pub evidence: Vec<VariantEvidence>,
}

impl CallerTable {
    /// Normalize the input calls that belong to this gene's defining variants.
    ///
    /// The first call for a variant id wins; ids are matched case-insensitively. Variants with
    /// no call are omitted.
    #[must_use]
    pub fn normalize(&self, calls: &[VariantCall]) -> Vec<NormalizedGenotype> {
        self.variants
            .iter()
            .filter_map(|variant| {
                calls
                    .iter()
                    .find(|call| call.variant_id.trim().eq_ignore_ascii_case(variant.rsid))
                    .map(|call| {
                        genotype::normalize(
                            variant.rsid,
                            call.genotype.as_deref(),
                            variant.orientation,
                        )
                    })
            })
            .collect()
    }

    /// Call a diplotype from normalized genotypes. Never fails: missing and malformed
    /// genotypes are recorded in the evidence and degrade the call.
    #[must_use]
    pub fn call(&self, genotypes: &[NormalizedGenotype]) -> CallOutcome {
        let evidence: Vec<VariantEvidence> = self
            .variants
            .iter()
            .map(|variant| evaluate_variant(variant, genotypes))
            .collect();

        let diplotype = if evidence.iter().any(VariantEvidence::is_resolved) {
            match self.strategy {
                CallStrategy::FirstNonReference => self.first_non_reference(&evidence),
                CallStrategy::Combine => self.combine(&evidence),
            }
        } else {
            match self.when_absent {
                AbsentPolicy::Unknown => Diplotype::unknown(),
                AbsentPolicy::AssumeReference => self.reference_diplotype(),
            }
        };

        tracing::debug!(
            diplotype = %diplotype,
            resolved = evidence.iter().filter(|e| e.is_resolved()).count(),
            total = evidence.len(),
            "called diplotype"
        );

        CallOutcome {
            diplotype,
            evidence,
        }
    }

    fn reference_diplotype(&self) -> Diplotype {
        Diplotype::named(self.reference.0, self.reference.1)
    }

    fn first_non_reference(&self, evidence: &[VariantEvidence]) -> Diplotype {
        let reference = self.reference_diplotype();
        for alleles in evidence.iter().filter_map(|e| e.alleles) {
            let called = Diplotype::named(alleles.0, alleles.1);
            if !called.same_alleles(&reference) {
                return called;
            }
        }
        reference
    }

    fn combine(&self, evidence: &[VariantEvidence]) -> Diplotype {
        let reference_allele = self.reference.0;
        let variant_alleles: Vec<&'static str> = evidence
            .iter()
            .filter_map(|e| e.alleles)
            .flat_map(|(a, b)| [a, b])
            .filter(|allele| *allele != reference_allele)
            .collect();

        if variant_alleles.len() > 2 {
            tracing::debug!(
                alleles = ?variant_alleles,
                "more than two non-reference alleles; keeping the first two"
            );
        }

        match variant_alleles.as_slice() {
            [] => self.reference_diplotype(),
            [only] => Diplotype::new(Allele::Named(reference_allele), Allele::Named(*only)),
            [first, second, ..] => Diplotype::named(*first, *second),
        }
    }
}

fn evaluate_variant(variant: &DefiningVariant, genotypes: &[NormalizedGenotype]) -> VariantEvidence {
    let genotype = genotypes
        .iter()
        .find(|g| g.variant_id.eq_ignore_ascii_case(variant.rsid));

    let (status, alleles) = match genotype {
        None => (EvidenceStatus::Absent, None),
        Some(g) if g.is_unknown() => (EvidenceStatus::Absent, None),
        Some(g) => match variant.lookup(&g.canonical_pair) {
            Some(alleles) => (EvidenceStatus::Resolved, Some(alleles)),
            None => (EvidenceStatus::Unresolved, None),
        },
    };

    VariantEvidence {
        rsid: variant.rsid,
        requirement: variant.requirement,
        status,
        alleles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static PRIMARY: &[GenotypeRule] = &[
        GenotypeRule { genotype: "GG", alleles: ("*1", "*1") },
        GenotypeRule { genotype: "AG", alleles: ("*1", "*2") },
        GenotypeRule { genotype: "AA", alleles: ("*2", "*2") },
    ];

    static SECONDARY: &[GenotypeRule] = &[
        GenotypeRule { genotype: "CC", alleles: ("*1", "*1") },
        GenotypeRule { genotype: "CT", alleles: ("*1", "*3") },
        GenotypeRule { genotype: "TT", alleles: ("*3", "*3") },
    ];

    static VARIANTS: &[DefiningVariant] = &[
        DefiningVariant {
            rsid: "rs100",
            orientation: Orientation::Undirected,
            requirement: Requirement::Required,
            rules: PRIMARY,
        },
        DefiningVariant {
            rsid: "rs200",
            orientation: Orientation::Undirected,
            requirement: Requirement::Supplementary,
            rules: SECONDARY,
        },
    ];

    fn table(strategy: CallStrategy, when_absent: AbsentPolicy) -> CallerTable {
        CallerTable {
            variants: VARIANTS,
            reference: ("*1", "*1"),
            strategy,
            when_absent,
        }
    }

    fn call(table: &CallerTable, calls: &[(&str, Option<&str>)]) -> CallOutcome {
        let calls: Vec<VariantCall> =
            calls.iter().map(|(id, g)| VariantCall::new(id, *g)).collect();
        table.call(&table.normalize(&calls))
    }

    #[test]
    fn first_variant_takes_priority() {
        let t = table(CallStrategy::FirstNonReference, AbsentPolicy::Unknown);
        let outcome = call(&t, &[("rs100", Some("A/G")), ("rs200", Some("TT"))]);
        assert!(outcome.diplotype.same_alleles(&Diplotype::named("*1", "*2")));
    }

    #[test]
    fn falls_through_when_primary_is_reference() {
        let t = table(CallStrategy::FirstNonReference, AbsentPolicy::Unknown);
        let outcome = call(&t, &[("rs100", Some("GG")), ("rs200", Some("C/T"))]);
        assert!(outcome.diplotype.same_alleles(&Diplotype::named("*1", "*3")));
    }

    #[test]
    fn falls_through_when_primary_is_silent() {
        let t = table(CallStrategy::FirstNonReference, AbsentPolicy::Unknown);
        let outcome = call(&t, &[("rs100", Some("NN")), ("rs200", Some("TT"))]);
        assert!(outcome.diplotype.same_alleles(&Diplotype::named("*3", "*3")));
        assert_eq!(outcome.evidence[0].status, EvidenceStatus::Unresolved);
        assert_eq!(outcome.evidence[1].status, EvidenceStatus::Resolved);
    }

    #[test]
    fn combine_pools_variant_alleles() {
        let t = table(CallStrategy::Combine, AbsentPolicy::Unknown);
        let outcome = call(&t, &[("rs100", Some("AG")), ("rs200", Some("CT"))]);
        assert!(outcome.diplotype.same_alleles(&Diplotype::named("*2", "*3")));

        let outcome = call(&t, &[("rs100", Some("GG")), ("rs200", Some("CT"))]);
        assert!(outcome.diplotype.same_alleles(&Diplotype::named("*1", "*3")));

        let outcome = call(&t, &[("rs100", Some("GG")), ("rs200", Some("CC"))]);
        assert!(outcome.diplotype.same_alleles(&Diplotype::named("*1", "*1")));
    }

    #[test]
    fn combine_keeps_first_two_variant_alleles() {
        let t = table(CallStrategy::Combine, AbsentPolicy::Unknown);
        let outcome = call(&t, &[("rs100", Some("AA")), ("rs200", Some("CT"))]);
        assert!(outcome.diplotype.same_alleles(&Diplotype::named("*2", "*2")));
    }

    #[test]
    fn nothing_resolved_follows_absent_policy() {
        let unknown = table(CallStrategy::FirstNonReference, AbsentPolicy::Unknown);
        assert!(!call(&unknown, &[]).diplotype.is_known());

        let assume = table(CallStrategy::FirstNonReference, AbsentPolicy::AssumeReference);
        let outcome = call(&assume, &[("rs100", None)]);
        assert!(outcome.diplotype.same_alleles(&Diplotype::named("*1", "*1")));
        assert!(outcome.evidence.iter().all(|e| e.status == EvidenceStatus::Absent));
    }

    #[test]
    fn normalize_matches_ids_case_insensitively_and_ignores_others() {
        let t = table(CallStrategy::FirstNonReference, AbsentPolicy::Unknown);
        let calls = vec![
            VariantCall::new("RS100", Some("ga")),
            VariantCall::new("rs999", Some("AA")),
            VariantCall::new("rs100", Some("AA")),
        ];
        let normalized = t.normalize(&calls);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].variant_id, "rs100");
        assert_eq!(normalized[0].canonical_pair, "AG");
    }
}
