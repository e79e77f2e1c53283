//! pgxguide: pharmacogenomic rule engine turning raw genotype calls into drug-dosing guidance.
//!
//! Each gene runs the same pipeline: [`genotype::normalize`] canonicalizes calls,
//! [`caller::CallerTable::call`] assigns a diplotype, [`confidence::score`] rates completeness,
//! [`phenotype::Classifier::classify`] assigns a phenotype, [`recommendation::recommend`] walks
//! the drug tables, and [`analysis::analyze_gene`] composes and validates the result. The
//! warfarin check in [`warfarin`] is the only step that combines two genes.

pub mod error;

pub mod analysis;
pub mod caller;
pub mod cli;
pub mod confidence;
pub mod config;
pub mod diplotype;
pub mod gene;
pub mod genes;
pub mod genotype;
pub mod phenotype;
pub mod provider;
pub mod raw_data;
pub mod recommendation;
pub mod report;
pub mod result;
pub mod validation;
pub mod warfarin;
