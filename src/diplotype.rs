//! Alleles, diplotypes and call confidence.

use std::fmt;

use serde::{Serialize, Serializer};

/// One allele of a diplotype: a star allele (`*1`, `*3`), a raw base for genes without star
/// nomenclature, or `Unknown` when the defining data was missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allele {
    Named(&'static str),
    Unknown,
}

impl Allele {
    #[must_use]
    pub fn is_unknown(self) -> bool {
        self == Allele::Unknown
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Allele::Named(name) => name,
            Allele::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Allele {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Allele {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// How much of the data needed for a call was present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// An unordered allele pair. `*1/*3` and `*3/*1` compare equal.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diplotype {
    pub allele1: Allele,
    pub allele2: Allele,
    pub confidence: Confidence,
}

impl Diplotype {
    /// A diplotype whose confidence has not been scored yet.
    #[must_use]
    pub fn new(allele1: Allele, allele2: Allele) -> Self {
        Self {
            allele1,
            allele2,
            confidence: Confidence::Low,
        }
    }

    #[must_use]
    pub fn named(allele1: &'static str, allele2: &'static str) -> Self {
        Self::new(Allele::Named(allele1), Allele::Named(allele2))
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self::new(Allele::Unknown, Allele::Unknown)
    }

    #[must_use]
    pub fn with_confidence(self, confidence: Confidence) -> Self {
        Self { confidence, ..self }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !self.allele1.is_unknown() && !self.allele2.is_unknown()
    }

    #[must_use]
    pub fn is_homozygous(&self) -> bool {
        self.is_known() && self.allele1 == self.allele2
    }

    #[must_use]
    pub fn contains(&self, allele: &str) -> bool {
        [self.allele1, self.allele2]
            .iter()
            .any(|a| matches!(a, Allele::Named(name) if *name == allele))
    }

    /// True when both diplotypes carry the same alleles, in either order.
    #[must_use]
    pub fn same_alleles(&self, other: &Diplotype) -> bool {
        (self.allele1 == other.allele1 && self.allele2 == other.allele2)
            || (self.allele1 == other.allele2 && self.allele2 == other.allele1)
    }
}

impl PartialEq for Diplotype {
    fn eq(&self, other: &Self) -> bool {
        self.same_alleles(other) && self.confidence == other.confidence
    }
}

impl Eq for Diplotype {}

impl fmt::Display for Diplotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.allele1, self.allele2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unordered_equality() {
        assert_eq!(Diplotype::named("*1", "*3"), Diplotype::named("*3", "*1"));
        assert_ne!(Diplotype::named("*1", "*3"), Diplotype::named("*1", "*1"));
    }

    #[test]
    fn confidence_participates_in_equality() {
        let low = Diplotype::named("*1", "*1");
        let high = low.with_confidence(Confidence::High);
        assert!(low.same_alleles(&high));
        assert_ne!(low, high);
    }

    #[test]
    fn unknown_diplotype() {
        let d = Diplotype::unknown();
        assert!(!d.is_known());
        assert!(!d.is_homozygous());
        assert_eq!(d.to_string(), "Unknown/Unknown");
    }

    #[test]
    fn contains_and_display() {
        let d = Diplotype::named("*1", "*6");
        assert!(d.contains("*6"));
        assert!(!d.contains("*27"));
        assert_eq!(d.to_string(), "*1/*6");
    }

    #[test]
    fn serializes_allele_names() {
        let d = Diplotype::named("*1", "*5").with_confidence(Confidence::High);
        let json = serde_json::to_value(d).unwrap();
        assert_eq!(json["allele1"], "*1");
        assert_eq!(json["allele2"], "*5");
        assert_eq!(json["confidence"], "high");
    }

    #[test]
    fn confidence_ordering() {
        assert!(Confidence::Low < Confidence::Medium);
        assert!(Confidence::Medium < Confidence::High);
    }
}
