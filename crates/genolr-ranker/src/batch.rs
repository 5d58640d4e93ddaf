//! Score every candidate gene of one individual in parallel.

use genolr_common::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::genotype::GenotypeEvidence;
use crate::inheritance::InheritanceMode;
use crate::likelihood::{GenotypeLikelihoodRatio, LikelihoodRatio};

/// One gene/disease pair to score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenotypeQuery {
    pub gene_id: String,
    pub symbol: Option<String>,
    pub evidence: GenotypeEvidence,
    /// Modes of inheritance of the disease the gene is associated with.
    #[serde(default)]
    pub inheritance_modes: Vec<InheritanceMode>,
}

impl GenotypeQuery {
    pub fn new(gene_id: impl Into<String>, evidence: GenotypeEvidence, modes: Vec<InheritanceMode>) -> Self {
        Self {
            gene_id: gene_id.into(),
            symbol: None,
            evidence,
            inheritance_modes: modes,
        }
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    /// Symbol for display: explicit, then from the summary, then the gene id.
    pub fn display_name(&self) -> &str {
        self.symbol
            .as_deref()
            .or_else(|| self.evidence.summary().and_then(|s| s.symbol()))
            .unwrap_or(&self.gene_id)
    }
}

/// Genotype score of one gene/disease pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneGenotypeScore {
    pub gene_id: String,
    pub symbol: String,
    pub likelihood_ratio: LikelihoodRatio,
}

impl GenotypeLikelihoodRatio {
    /// Score all queries, highest likelihood ratio first (ties by gene id).
    ///
    /// Explanations are attached when `explain` is set in the config. The
    /// first error from any query aborts the batch.
    pub fn score_genes(&self, queries: &[GenotypeQuery]) -> Result<Vec<GeneGenotypeScore>> {
        let mut scores = queries
            .par_iter()
            .map(|query| self.score_query(query))
            .collect::<Result<Vec<_>>>()?;

        scores.sort_by(|a, b| {
            b.likelihood_ratio
                .value
                .total_cmp(&a.likelihood_ratio.value)
                .then_with(|| a.gene_id.cmp(&b.gene_id))
        });

        tracing::debug!(genes = scores.len(), "Scored genotypes");
        Ok(scores)
    }

    fn score_query(&self, query: &GenotypeQuery) -> Result<GeneGenotypeScore> {
        let modes = &query.inheritance_modes;
        let mut lr = self.score_genotype(&query.evidence, modes, &query.gene_id)?;

        if self.config().explain {
            let explanation = match query.evidence {
                GenotypeEvidence::NoVariantFound => {
                    format!("No variants found in {}.", query.display_name())
                }
                GenotypeEvidence::Observed(_) => {
                    self.explain_genotype(&query.evidence, modes, &query.gene_id)?
                }
            };
            lr = lr.with_explanation(explanation);
        }

        Ok(GeneGenotypeScore {
            gene_id: query.gene_id.clone(),
            symbol: query.display_name().to_string(),
            likelihood_ratio: lr,
        })
    }
}
