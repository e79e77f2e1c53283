//! Error types for the pgxguide library.

use thiserror::Error;

/// Errors that can occur during pgxguide operations.
///
/// Missing or malformed genotypes are not errors: the pipeline absorbs them into `Unknown`
/// alleles and low confidence. These variants cover the outer surfaces and contract breaches.
#[derive(Debug, Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A parse error occurred while reading input data.
    #[error("{0}")]
    Parse(String),

    /// An analysis result or report violated its output contract.
    #[error("schema violation: {0}")]
    Validation(String),

    /// A raw genotype file format was not recognized.
    #[error("{0}")]
    Format(String),
}
