//! Pharmacogene identification.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::Error;

/// Genes covered by the rule panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gene {
    Cyp2c9,
    Cyp3a5,
    F5,
    Slco1b1,
    Ugt1a1,
    Vkorc1,
}

impl Gene {
    /// All genes in evaluation order. CYP2C9 precedes VKORC1 so its phenotype is available to the
    /// warfarin resolver.
    pub const ALL: [Gene; 6] = [
        Gene::Ugt1a1,
        Gene::Slco1b1,
        Gene::Cyp3a5,
        Gene::F5,
        Gene::Cyp2c9,
        Gene::Vkorc1,
    ];

    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Gene::Cyp2c9 => "CYP2C9",
            Gene::Cyp3a5 => "CYP3A5",
            Gene::F5 => "F5",
            Gene::Slco1b1 => "SLCO1B1",
            Gene::Ugt1a1 => "UGT1A1",
            Gene::Vkorc1 => "VKORC1",
        }
    }
}

impl std::str::FromStr for Gene {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CYP2C9" => Ok(Gene::Cyp2c9),
            "CYP3A5" => Ok(Gene::Cyp3a5),
            "F5" | "FVL" => Ok(Gene::F5),
            "SLCO1B1" => Ok(Gene::Slco1b1),
            "UGT1A1" => Ok(Gene::Ugt1a1),
            "VKORC1" => Ok(Gene::Vkorc1),
            _ => Err(Error::Parse(format!("unsupported gene: {s}"))),
        }
    }
}

impl fmt::Display for Gene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl Serialize for Gene {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}
