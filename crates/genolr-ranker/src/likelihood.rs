//! Genotype likelihood ratio.
//!
//! How much more likely the variants observed in a gene are if the gene
//! causes the disease (λ_disease = 1 or 2 expected pathogenic alleles) than
//! if they are population background (λ_background from gnomAD).

use std::sync::Arc;

use genolr_common::{GenotypeConfig, Result};
use serde::{Deserialize, Serialize};

use crate::background::BackgroundFrequencyProvider;
use crate::diagnostics::{DiagnosticSink, TracingDiagnostics};
use crate::genotype::{GeneVariantSummary, GenotypeEvidence};
use crate::inheritance::{includes_autosomal_recessive, InheritanceMode};
use crate::poisson::PoissonModel;

/// Background lambda used when neither the table nor the config supplies one.
pub const DEFAULT_LAMBDA_BACKGROUND: f64 = 0.1;

/// Threshold below which a weighted pathogenic count is treated as zero.
pub const EPSILON: f64 = 1e-5;

/// Probability of missing a causal allele for technical reasons.
pub const MISSED_VARIANT_PROBABILITY: f64 = 0.05;

/// Probability of missing both alleles, 0.05². Written out so the value is exact.
pub const MISSED_BOTH_ALLELES_PROBABILITY: f64 = 0.0025;

/// Likelihood ratio per ClinVar-confirmed pathogenic allele.
pub const CLINVAR_PATHOGENIC_LR: f64 = 1000.0;

/// Returned when no mode of inheritance produced a usable ratio.
pub const FALLBACK_LR: f64 = 0.05;

/// Assumed when a disease has no inheritance-mode annotation.
const DEFAULT_MODES: &[InheritanceMode] = &[InheritanceMode::AutosomalDominant];

/// Strict mode: a single called allele in an autosomal recessive disease.
const STRICT_SINGLE_RECESSIVE_ALLELE: f64 = -0.5;

/// Strict mode: penalty per allele beyond λ_disease.
const STRICT_EXCESS_ALLELE_PENALTY: f64 = -0.5;

/// Genotype likelihood ratio with an optional explanation.
///
/// In strict mode the value can be zero or negative, which marks a
/// penalised genotype rather than a probability ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikelihoodRatio {
    pub value: f64,
    pub explanation: Option<String>,
}

impl LikelihoodRatio {
    pub fn new(value: f64) -> Self {
        Self { value, explanation: None }
    }

    pub fn with_explanation(mut self, explanation: String) -> Self {
        self.explanation = Some(explanation);
        self
    }

    /// A strict-mode penalty rather than a ratio.
    pub fn is_penalized(&self) -> bool {
        self.value <= 0.0
    }

    pub fn log10(&self) -> Option<f64> {
        (self.value > 0.0).then(|| self.value.log10())
    }
}

/// Scores the genotype term of the disease posterior.
///
/// Holds the two canonical disease models and read-only handles to the
/// background table and diagnostics sink, so one instance can score many
/// genes concurrently.
pub struct GenotypeLikelihoodRatio {
    background: Arc<dyn BackgroundFrequencyProvider>,
    diagnostics: Arc<dyn DiagnosticSink>,
    dominant: PoissonModel,
    recessive: PoissonModel,
    config: GenotypeConfig,
}

impl GenotypeLikelihoodRatio {
    pub fn new(
        background: Arc<dyn BackgroundFrequencyProvider>,
        config: GenotypeConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            background,
            diagnostics: Arc::new(TracingDiagnostics),
            dominant: PoissonModel::DOMINANT,
            recessive: PoissonModel::RECESSIVE,
            config,
        })
    }

    /// Route diagnostics somewhere other than `tracing`.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn is_strict(&self) -> bool {
        self.config.strict
    }

    pub fn config(&self) -> &GenotypeConfig {
        &self.config
    }

    /// The pre-built disease model for `mode`, shared by scoring and explanation.
    pub(crate) fn disease_model(&self, mode: InheritanceMode) -> &PoissonModel {
        if mode.is_recessive() {
            &self.recessive
        } else {
            &self.dominant
        }
    }

    /// Background lambda from the table, or the configured default.
    pub fn background_lambda(&self, gene_id: &str) -> f64 {
        self.background
            .background_lambda(gene_id)
            .unwrap_or(self.config.default_background_lambda)
    }

    /// Background lambda actually compared against the disease model.
    ///
    /// A gene with a high background rate is best explained as background,
    /// so a rate above 1 is capped at the individual's called allele count.
    pub fn effective_background_lambda(&self, summary: &GeneVariantSummary, gene_id: &str) -> f64 {
        let lambda = self.background_lambda(gene_id);
        if lambda > 1.0 {
            lambda.min(f64::from(summary.pathogenic_allele_count()))
        } else {
            lambda
        }
    }

    /// Heuristic LR when no causal variant was seen: 5% chance of missing
    /// one allele, squared when two must have been missed.
    fn no_variant_lr(modes: &[InheritanceMode]) -> f64 {
        if includes_autosomal_recessive(modes) {
            MISSED_BOTH_ALLELES_PROBABILITY
        } else {
            MISSED_VARIANT_PROBABILITY
        }
    }

    /// Likelihood ratio of the genotype in `gene_id` given a disease with `modes`.
    pub fn score_genotype(
        &self,
        evidence: &GenotypeEvidence,
        modes: &[InheritanceMode],
        gene_id: &str,
    ) -> Result<LikelihoodRatio> {
        let summary = match evidence {
            GenotypeEvidence::NoVariantFound => {
                tracing::debug!(gene_id, "No variant found in gene");
                return Ok(LikelihoodRatio::new(Self::no_variant_lr(modes)));
            }
            GenotypeEvidence::Observed(summary) => summary,
        };

        if let Some(lr) = clinvar_lr(summary, modes) {
            tracing::debug!(gene_id, lr, "ClinVar pathogenic allele(s) found");
            return Ok(LikelihoodRatio::new(lr));
        }

        let observed = summary.weighted_pathogenic_score_sum();
        if !summary.has_predicted_pathogenic_variant() || observed < EPSILON {
            tracing::debug!(gene_id, observed, "No usable pathogenic signal");
            return Ok(LikelihoodRatio::new(Self::no_variant_lr(modes)));
        }

        let background = PoissonModel::new(self.effective_background_lambda(summary, gene_id))?;

        let modes = if modes.is_empty() {
            self.diagnostics.missing_inheritance_mode(gene_id);
            DEFAULT_MODES
        } else {
            modes
        };

        let allele_count = f64::from(summary.pathogenic_allele_count());
        let mut best: Option<f64> = None;
        for &mode in modes {
            let disease = self.disease_model(mode);
            let lambda_disease = disease.lambda();

            let candidate = if self.config.strict
                && mode == InheritanceMode::AutosomalRecessive
                && summary.pathogenic_allele_count() < 2
            {
                Some(STRICT_SINGLE_RECESSIVE_ALLELE)
            } else if self.config.strict && allele_count > lambda_disease + EPSILON {
                Some(STRICT_EXCESS_ALLELE_PENALTY * (allele_count - lambda_disease))
            } else {
                let d = disease.probability(observed)?;
                let b = background.probability(observed)?;
                (d > 0.0 && b > 0.0).then(|| d / b)
            };

            // Only a strictly greater value replaces the running maximum.
            best = match (best, candidate) {
                (Some(current), Some(c)) if c > current => Some(c),
                (None, c) => c,
                (current, _) => current,
            };
        }

        let value = best.unwrap_or_else(|| {
            tracing::debug!(gene_id, "No mode produced a likelihood ratio, using fallback");
            FALLBACK_LR
        });
        Ok(LikelihoodRatio::new(value))
    }

    /// Score and attach the explanation produced by [`Self::explain_genotype`].
    pub fn score_and_explain(
        &self,
        evidence: &GenotypeEvidence,
        modes: &[InheritanceMode],
        gene_id: &str,
    ) -> Result<LikelihoodRatio> {
        let lr = self.score_genotype(evidence, modes, gene_id)?;
        let explanation = self.explain_genotype(evidence, modes, gene_id)?;
        Ok(lr.with_explanation(explanation))
    }
}

/// Fixed LR for ClinVar-confirmed alleles: 10⁶ for two alleles in an
/// autosomal recessive disease, 10³ for any non-recessive disease. A
/// recessive disease with another count is left to the Poisson comparison.
pub(crate) fn clinvar_lr(summary: &GeneVariantSummary, modes: &[InheritanceMode]) -> Option<f64> {
    if !summary.has_clinvar_pathogenic_variant() {
        return None;
    }
    if includes_autosomal_recessive(modes) {
        (summary.clinvar_pathogenic_count() == 2).then(|| CLINVAR_PATHOGENIC_LR.powi(2))
    } else {
        Some(CLINVAR_PATHOGENIC_LR)
    }
}
