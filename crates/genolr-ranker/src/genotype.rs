//! Per-gene variant evidence for one individual.
//! Built once by the variant-aggregation step and read-only afterwards.

use genolr_common::{GenolrError, Result};
use serde::{Deserialize, Serialize};

/// Aggregate of the variants called in one gene of one individual.
///
/// Deserialized input goes through [`GeneVariantSummaryBuilder::build`], so
/// it is validated the same way as summaries built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeneVariantSummaryBuilder")]
pub struct GeneVariantSummary {
    symbol: Option<String>,
    clinvar_pathogenic_count: u32,
    pathogenic_allele_count: u32,
    weighted_pathogenic_score_sum: f64,
    has_predicted_pathogenic_variant: bool,
}

impl GeneVariantSummary {
    pub fn builder() -> GeneVariantSummaryBuilder {
        GeneVariantSummaryBuilder::default()
    }

    /// Gene symbol for display, if known.
    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    /// At least one allele is classified pathogenic in ClinVar.
    pub fn has_clinvar_pathogenic_variant(&self) -> bool {
        self.clinvar_pathogenic_count > 0
    }

    pub fn clinvar_pathogenic_count(&self) -> u32 {
        self.clinvar_pathogenic_count
    }

    /// Alleles predicted pathogenic by the variant-effect score.
    pub fn pathogenic_allele_count(&self) -> u32 {
        self.pathogenic_allele_count
    }

    /// Sum of pathogenicity bin scores, the continuous "effective" allele count.
    pub fn weighted_pathogenic_score_sum(&self) -> f64 {
        self.weighted_pathogenic_score_sum
    }

    pub fn has_predicted_pathogenic_variant(&self) -> bool {
        self.has_predicted_pathogenic_variant
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GeneVariantSummaryBuilder {
    symbol: Option<String>,
    clinvar_pathogenic_count: u32,
    pathogenic_allele_count: u32,
    weighted_pathogenic_score_sum: f64,
    has_predicted_pathogenic_variant: Option<bool>,
}

impl GeneVariantSummaryBuilder {
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn clinvar_pathogenic_count(mut self, count: u32) -> Self {
        self.clinvar_pathogenic_count = count;
        self
    }

    pub fn pathogenic_allele_count(mut self, count: u32) -> Self {
        self.pathogenic_allele_count = count;
        self
    }

    pub fn weighted_pathogenic_score_sum(mut self, sum: f64) -> Self {
        self.weighted_pathogenic_score_sum = sum;
        self
    }

    /// Overrides the flag, which otherwise follows `pathogenic_allele_count > 0`.
    pub fn has_predicted_pathogenic_variant(mut self, flag: bool) -> Self {
        self.has_predicted_pathogenic_variant = Some(flag);
        self
    }

    pub fn build(self) -> Result<GeneVariantSummary> {
        let sum = self.weighted_pathogenic_score_sum;
        if !sum.is_finite() || sum < 0.0 {
            return Err(GenolrError::InvalidSummary(format!(
                "weighted pathogenic score sum must be finite and >= 0, got {sum}"
            )));
        }
        let has_predicted = self
            .has_predicted_pathogenic_variant
            .unwrap_or(self.pathogenic_allele_count > 0);

        Ok(GeneVariantSummary {
            symbol: self.symbol,
            clinvar_pathogenic_count: self.clinvar_pathogenic_count,
            pathogenic_allele_count: self.pathogenic_allele_count,
            weighted_pathogenic_score_sum: sum,
            has_predicted_pathogenic_variant: has_predicted,
        })
    }
}

impl TryFrom<GeneVariantSummaryBuilder> for GeneVariantSummary {
    type Error = GenolrError;

    fn try_from(builder: GeneVariantSummaryBuilder) -> Result<Self> {
        builder.build()
    }
}

/// Genotype evidence for one gene.
///
/// `NoVariantFound` is kept apart from a summary with zero counts: the two
/// reach the engine's no-variant heuristic through different branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenotypeEvidence {
    NoVariantFound,
    Observed(GeneVariantSummary),
}

impl GenotypeEvidence {
    pub fn summary(&self) -> Option<&GeneVariantSummary> {
        match self {
            GenotypeEvidence::NoVariantFound => None,
            GenotypeEvidence::Observed(summary) => Some(summary),
        }
    }

    /// Weighted pathogenic score sum, zero when no variant was found.
    pub fn weighted_pathogenic_score_sum(&self) -> f64 {
        self.summary()
            .map_or(0.0, GeneVariantSummary::weighted_pathogenic_score_sum)
    }
}

impl From<GeneVariantSummary> for GenotypeEvidence {
    fn from(summary: GeneVariantSummary) -> Self {
        GenotypeEvidence::Observed(summary)
    }
}
