//! Phenotype classification from diplotypes.
//!
//! Two styles share one interface: score banding, where the summed allele weights fall into
//! ordered threshold bands, and direct lookup, where the diplotype itself selects a category.
//! Both styles always report a score.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::diplotype::{Allele, Diplotype};

/// Categorical functional consequence of a diplotype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phenotype {
    NormalMetabolizer,
    IntermediateMetabolizer,
    PoorMetabolizer,
    NormalFunction,
    DecreasedFunction,
    PoorFunction,
    Expressor,
    IntermediateExpressor,
    NonExpressor,
    NormalSensitivity,
    IntermediateSensitivity,
    HighSensitivity,
    NoFactorVLeiden,
    HeterozygousFactorVLeiden,
    HomozygousFactorVLeiden,
    Unknown,
}

impl Phenotype {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Phenotype::NormalMetabolizer => "Normal Metabolizer",
            Phenotype::IntermediateMetabolizer => "Intermediate Metabolizer",
            Phenotype::PoorMetabolizer => "Poor Metabolizer",
            Phenotype::NormalFunction => "Normal Function",
            Phenotype::DecreasedFunction => "Decreased Function",
            Phenotype::PoorFunction => "Poor Function",
            Phenotype::Expressor => "Expressor",
            Phenotype::IntermediateExpressor => "Intermediate Expressor",
            Phenotype::NonExpressor => "Non-expressor",
            Phenotype::NormalSensitivity => "Normal Sensitivity",
            Phenotype::IntermediateSensitivity => "Intermediate Sensitivity",
            Phenotype::HighSensitivity => "High Sensitivity",
            Phenotype::NoFactorVLeiden => "No Factor V Leiden",
            Phenotype::HeterozygousFactorVLeiden => "Heterozygous Factor V Leiden",
            Phenotype::HomozygousFactorVLeiden => "Homozygous Factor V Leiden",
            Phenotype::Unknown => "Unknown",
        }
    }

    /// Functional rank within a gene: 2 for full function or expression, 1 for intermediate,
    /// 0 for the lowest. `None` for `Unknown`.
    #[must_use]
    pub fn function_rank(self) -> Option<u8> {
        match self {
            Phenotype::NormalMetabolizer
            | Phenotype::NormalFunction
            | Phenotype::Expressor
            | Phenotype::NormalSensitivity
            | Phenotype::NoFactorVLeiden => Some(2),
            Phenotype::IntermediateMetabolizer
            | Phenotype::DecreasedFunction
            | Phenotype::IntermediateExpressor
            | Phenotype::IntermediateSensitivity
            | Phenotype::HeterozygousFactorVLeiden => Some(1),
            Phenotype::PoorMetabolizer
            | Phenotype::PoorFunction
            | Phenotype::NonExpressor
            | Phenotype::HighSensitivity
            | Phenotype::HomozygousFactorVLeiden => Some(0),
            Phenotype::Unknown => None,
        }
    }

    #[must_use]
    pub fn is_unknown(self) -> bool {
        self == Phenotype::Unknown
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Phenotype {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// What a gene's numeric score measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    Activity,
    Function,
    Expression,
    /// Inverted: higher means more drug-sensitive (less enzyme expressed).
    Sensitivity,
}

impl fmt::Display for ScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreKind::Activity => write!(f, "activity score"),
            ScoreKind::Function => write!(f, "function score"),
            ScoreKind::Expression => write!(f, "expression score"),
            ScoreKind::Sensitivity => write!(f, "sensitivity score"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Score {
    pub kind: ScoreKind,
    pub value: f64,
}

/// Lower edge of a score band.
#[derive(Debug, Clone, Copy)]
pub enum Bound {
    /// Strictly greater than the value.
    Above(f64),
    /// Greater than or equal to the value.
    AtLeast(f64),
    /// Catch-all lowest band.
    Any,
}

impl Bound {
    fn admits(self, score: f64) -> bool {
        match self {
            Bound::Above(x) => score > x,
            Bound::AtLeast(x) => score >= x,
            Bound::Any => true,
        }
    }
}

/// One band, checked in order from the highest score down.
#[derive(Debug)]
pub struct Band {
    pub bound: Bound,
    pub phenotype: Phenotype,
}

/// Direct diplotype → phenotype entry for lookup-style genes.
#[derive(Debug)]
pub struct GenotypeClass {
    pub alleles: (&'static str, &'static str),
    pub phenotype: Phenotype,
}

#[derive(Debug, Clone, Copy)]
pub enum Method {
    Bands(&'static [Band]),
    Lookup(&'static [GenotypeClass]),
}

/// Per-gene classification rules.
#[derive(Debug)]
pub struct Classifier {
    pub kind: ScoreKind,
    pub weights: &'static [(&'static str, f64)],
    pub method: Method,
}

/// Result of classifying a diplotype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub phenotype: Phenotype,
    pub score: Score,
}

impl Classifier {
    fn weight(&self, allele: Allele) -> Option<f64> {
        match allele {
            Allele::Named(name) => self
                .weights
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, w)| *w),
            Allele::Unknown => None,
        }
    }

    /// Lowest and highest score the weight table can produce.
    #[must_use]
    pub fn score_range(&self) -> (f64, f64) {
        let min = self.weights.iter().map(|(_, w)| *w).fold(f64::INFINITY, f64::min);
        let max = self.weights.iter().map(|(_, w)| *w).fold(f64::NEG_INFINITY, f64::max);
        (round_score(2.0 * min), round_score(2.0 * max))
    }

    /// Mid-range score reported for an unknown diplotype.
    #[must_use]
    pub fn neutral_score(&self) -> f64 {
        let (min, max) = self.score_range();
        round_score((min + max) / 2.0)
    }

    /// Every allele name the weight table knows.
    pub fn alleles(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.weights.iter().map(|(name, _)| *name)
    }

    #[must_use]
    pub fn classify(&self, diplotype: &Diplotype) -> Classification {
        let weights = self
            .weight(diplotype.allele1)
            .zip(self.weight(diplotype.allele2));

        let Some((w1, w2)) = weights else {
            return Classification {
                phenotype: Phenotype::Unknown,
                score: Score {
                    kind: self.kind,
                    value: self.neutral_score(),
                },
            };
        };

        let value = round_score(w1 + w2);
        let phenotype = match self.method {
            Method::Bands(bands) => band_phenotype(bands, value),
            Method::Lookup(classes) => classes
                .iter()
                .find(|class| {
                    diplotype.same_alleles(&Diplotype::named(class.alleles.0, class.alleles.1))
                })
                .map_or(Phenotype::Unknown, |class| class.phenotype),
        };

        Classification {
            phenotype,
            score: Score {
                kind: self.kind,
                value,
            },
        }
    }
}

/// Apply ordered bands to a score. Total: the last band of every table is `Bound::Any`.
#[must_use]
pub fn band_phenotype(bands: &[Band], score: f64) -> Phenotype {
    bands
        .iter()
        .find(|band| band.bound.admits(score))
        .map_or(Phenotype::Unknown, |band| band.phenotype)
}

/// Scores are reported to one decimal place.
#[must_use]
pub fn round_score(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
