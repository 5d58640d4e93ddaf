//! genolr-ranker — Genotype likelihood-ratio engine for disease prioritisation.
//!
//! Compares the pathogenic variant burden of a gene against a Poisson
//! disease model (λ = 1 dominant, λ = 2 recessive) and a population
//! background model, with fixed scores for ClinVar-confirmed alleles and
//! genes without any called variant.

pub mod poisson;
pub mod inheritance;
pub mod genotype;
pub mod background;
pub mod diagnostics;
pub mod likelihood;
pub mod explain;
pub mod batch;

pub use background::{BackgroundFrequencyProvider, BackgroundFrequencyTable};
pub use batch::{GeneGenotypeScore, GenotypeQuery};
pub use diagnostics::{DiagnosticSink, RecordingDiagnostics, TracingDiagnostics};
pub use genotype::{GeneVariantSummary, GenotypeEvidence};
pub use inheritance::InheritanceMode;
pub use likelihood::{GenotypeLikelihoodRatio, LikelihoodRatio};
pub use poisson::PoissonModel;
