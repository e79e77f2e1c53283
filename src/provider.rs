//! Genotyping provider hints.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::Error;

/// Source of the raw genotype calls. Only affects which limitation notes are surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    Unknown,
    TwentyThreeAndMe,
    AncestryDna,
}

impl Provider {
    /// Limitation notes specific to this provider's data.
    #[must_use]
    pub fn limitations(self) -> &'static [&'static str] {
        match self {
            Provider::Unknown => &[
                "Genotype source was not specified; array-based calls should be confirmed in a \
                 CLIA-certified laboratory before prescribing decisions.",
            ],
            Provider::TwentyThreeAndMe => &[
                "23andMe raw data is provided for research and informational use and is not \
                 validated for clinical decision-making.",
                "23andMe reports genotypes on the plus strand of the GRCh37 reference; calls \
                 were interpreted on that orientation.",
            ],
            Provider::AncestryDna => &[
                "AncestryDNA raw data is not validated for clinical use and may contain \
                 miscalled or uncalled positions.",
                "AncestryDNA reports no-calls as 0; such positions were treated as missing.",
            ],
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unknown" | "" => Ok(Provider::Unknown),
            "23andme" => Ok(Provider::TwentyThreeAndMe),
            "ancestrydna" | "ancestry" => Ok(Provider::AncestryDna),
            _ => Err(Error::Parse(format!("unrecognized provider: {s}"))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Unknown => write!(f, "unknown"),
            Provider::TwentyThreeAndMe => write!(f, "23andme"),
            Provider::AncestryDna => write!(f, "ancestrydna"),
        }
    }
}

impl Serialize for Provider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
