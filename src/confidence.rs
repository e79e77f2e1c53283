//! Call confidence from data completeness.

use crate::caller::{Requirement, VariantEvidence};
use crate::diplotype::{Confidence, Diplotype};

/// Rate a call by whether the data it needed was present.
///
/// `Low` when an allele is unknown or any required defining variant is absent or unresolved,
/// `Medium` when only supplementary variants are missing, `High` when every defining variant
/// resolved.
#[must_use]
pub fn score(diplotype: &Diplotype, evidence: &[VariantEvidence]) -> Confidence {
    let required_missing = evidence
        .iter()
        .any(|e| e.requirement == Requirement::Required && !e.is_resolved());

    if !diplotype.is_known() || required_missing || evidence.is_empty() {
        Confidence::Low
    } else if evidence.iter().all(VariantEvidence::is_resolved) {
        Confidence::High
    } else {
        Confidence::Medium
    }
}
